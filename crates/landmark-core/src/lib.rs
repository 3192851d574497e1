//! # landmark-core
//!
//! Typed validation for GeoJSON (RFC 7946) documents.
//!
//! This crate takes an arbitrary decoded JSON value and either proves it
//! conforms to the GeoJSON grammar, producing a precisely-typed value, or
//! rejects it with a structured list of (path, expected) failures.
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: union alternatives are tried in declared order and
//!    the first match wins
//! 2. **Pure**: validation is a function of (document, validator); no I/O,
//!    no shared mutable state, safe to call from any thread
//! 3. **No coercion**: accepted values are carried through verbatim; a
//!    numeric string is never a number
//! 4. **Traceable**: every rejection names the path from the document root
//!    and the shape expected there
//!
//! ## Example
//!
//! ```rust
//! use landmark_core::{feature, validate};
//!
//! let document = serde_json::json!({
//!     "type": "Feature",
//!     "geometry": {"type": "Point", "coordinates": [13.4, 52.5]},
//!     "properties": null,
//! });
//!
//! let feature = validate(&feature(), &document).expect("conforming document");
//! assert!(feature.geometry.is_some());
//! ```
//!
//! Out of scope: decoding text into JSON values, geometric computation,
//! coordinate reference systems, bbox semantics beyond shape, and encoding
//! typed values back to text.

pub mod combinator;
pub mod error;
pub mod feature;
pub mod geometry;
pub mod types;

// Re-export the grammar and the main types at the crate root.
pub use combinator::{
    any, both, list, literal, named, non_empty_list, null, number, one_of, optional, pair, record,
    required, string, BoxValidator, Validate,
};
pub use error::{leaves, ErrorKind, InstancePath, PathSegment, Validated, ValidationError};
pub use feature::{
    feature, feature_collection, feature_id, feature_with_properties, geojson, properties,
};
pub use geometry::{
    bounding_box, coordinates, geometry, geometry_collection, line_string, multi_line_string,
    multi_point, multi_polygon, point, polygon, position, simple_geometry,
};
pub use types::{
    BoundingBox, Coordinates, Feature, FeatureCollection, FeatureId, GeoJson, GeoJsonType,
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon, Position, Properties, SimpleGeometry, TypedFeature,
};

use serde_json::Value;

/// Validate a decoded document against a validator.
///
/// This is the single entry point of the crate: everything else builds the
/// validator passed in here. On success the returned value is the typed
/// form of the input, untransformed; on failure, the list of rejections
/// with paths from the document root.
pub fn validate<V: Validate>(validator: &V, document: &Value) -> Validated<V::Output> {
    let result = validator.validate(document);
    if let Err(errors) = &result {
        tracing::debug!(
            expected = %validator.expecting(),
            rejections = errors.len(),
            "document rejected"
        );
    }
    result
}
