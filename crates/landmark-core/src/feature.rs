//! The feature grammar.
//!
//! A `Feature` requires the `type`, `geometry` and `properties` keys to be
//! present. `geometry: null` (an unlocated feature) and `properties: null`
//! are both valid documents; a missing `properties` key is not, and the two
//! cases are distinguished by presence of the key, never by the value.

use crate::combinator::{
    any, both, list, literal, named, null, number, one_of, optional, record, required, string,
    Validate,
};
use crate::geometry::{bounding_box, geometry};
use crate::types::{
    Feature, FeatureCollection, FeatureId, GeoJson, GeoJsonType, Geometry, Properties,
    TypedFeature,
};

/// The default properties validator: any string-keyed object, or explicit
/// `null`. Absence of the `properties` key is rejected one level up, by the
/// required-fields shape of [`feature`].
pub fn properties() -> impl Validate<Output = Option<Properties>> + Send + Sync {
    one_of(
        "properties",
        vec![
            Box::new(record(any()).map(Some)),
            Box::new(null().map(|()| None)),
        ],
    )
}

/// A feature identifier: a string or a number.
pub fn feature_id() -> impl Validate<Output = FeatureId> + Send + Sync {
    one_of(
        "a feature id",
        vec![
            Box::new(string().map(FeatureId::String)),
            Box::new(number().map(FeatureId::Number)),
        ],
    )
}

/// A geometry object, or explicit `null` for an unlocated feature.
fn nullable_geometry() -> impl Validate<Output = Option<Geometry>> + Send + Sync {
    one_of(
        "a geometry object or null",
        vec![
            Box::new(geometry().map(Some)),
            Box::new(null().map(|()| None)),
        ],
    )
}

/// A feature validator with a caller-supplied properties validator, for
/// callers who want strongly-typed properties. The `properties` key itself
/// is still required: even when `props` accepts `null`, an absent key is a
/// missing-field rejection.
pub fn feature_with_properties<P>(
    props: P,
) -> impl Validate<Output = TypedFeature<P::Output>> + Send + Sync
where
    P: Validate + Send + Sync,
{
    named(
        GeoJsonType::Feature.as_str(),
        both(
            both(
                both(
                    required("type", literal(GeoJsonType::Feature.as_str())),
                    required("geometry", nullable_geometry()),
                ),
                required("properties", props),
            ),
            both(
                optional("id", feature_id()),
                optional("bbox", bounding_box()),
            ),
        ),
    )
    .map(
        |(((_, geometry), properties), (id, bbox))| TypedFeature {
            geometry,
            properties,
            id,
            bbox,
        },
    )
}

/// `{ "type": "Feature", "geometry": ..., "properties": ... }` with the
/// default dictionary-or-null properties.
pub fn feature() -> impl Validate<Output = Feature> + Send + Sync {
    feature_with_properties(properties())
}

/// `{ "type": "FeatureCollection", "features": [...] }`.
pub fn feature_collection() -> impl Validate<Output = FeatureCollection> + Send + Sync {
    named(
        GeoJsonType::FeatureCollection.as_str(),
        both(
            both(
                required("type", literal(GeoJsonType::FeatureCollection.as_str())),
                required("features", list(feature())),
            ),
            optional("bbox", bounding_box()),
        ),
    )
    .map(|((_, features), bbox)| FeatureCollection { features, bbox })
}

/// Any whole GeoJSON document: a geometry, a feature, or a collection.
pub fn geojson() -> impl Validate<Output = GeoJson> + Send + Sync {
    one_of(
        "a GeoJSON document",
        vec![
            Box::new(geometry().map(GeoJson::Geometry)),
            Box::new(feature().map(GeoJson::Feature)),
            Box::new(feature_collection().map(GeoJson::FeatureCollection)),
        ],
    )
}
