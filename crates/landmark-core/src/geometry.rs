//! The leaf and geometry grammar.
//!
//! Each of the six simple geometry validators intersects a required-fields
//! shape (`type` tag plus `coordinates`) with an optional `bbox`, so the
//! optional field is defined once rather than per geometry. The grammar is
//! a DAG: [`geometry_collection`] references the simple-geometry union, not
//! the full [`geometry`] union, which both forbids nested collections and
//! breaks what would otherwise be an infinitely recursive type.

use crate::combinator::{
    both, list, literal, named, non_empty_list, number, one_of, optional, pair, required, Validate,
};
use crate::types::{
    BoundingBox, Coordinates, GeoJsonType, Geometry, GeometryCollection, LineString,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, Position, SimpleGeometry,
};

/// Exactly two numbers: (longitude, latitude). Altitude is rejected.
pub fn position() -> impl Validate<Output = Position> + Send + Sync {
    pair(number(), number()).map(|(longitude, latitude)| Position(longitude, latitude))
}

/// An array of numbers. Arity (4 vs 6) is not enforced.
pub fn bounding_box() -> impl Validate<Output = BoundingBox> + Send + Sync {
    list(number())
}

/// The tagless coordinates union, tried shallow to deep so that the
/// shortest match wins: a bare position is never mistaken for a one-element
/// array of something deeper.
pub fn coordinates() -> impl Validate<Output = Coordinates> + Send + Sync {
    one_of(
        "coordinates",
        vec![
            Box::new(position().map(Coordinates::Position)),
            Box::new(list(position()).map(Coordinates::PositionList)),
            Box::new(list(non_empty_list(position())).map(Coordinates::LineList)),
            Box::new(list(non_empty_list(non_empty_list(position()))).map(Coordinates::PolygonList)),
        ],
    )
}

/// `{ "type": "Point", "coordinates": Position, "bbox"?: [...] }`.
pub fn point() -> impl Validate<Output = Point> + Send + Sync {
    named(
        GeoJsonType::Point.as_str(),
        both(
            both(
                required("type", literal(GeoJsonType::Point.as_str())),
                required("coordinates", position()),
            ),
            optional("bbox", bounding_box()),
        ),
    )
    .map(|((_, coordinates), bbox)| Point { coordinates, bbox })
}

/// `{ "type": "MultiPoint", "coordinates": [Position] }`.
pub fn multi_point() -> impl Validate<Output = MultiPoint> + Send + Sync {
    named(
        GeoJsonType::MultiPoint.as_str(),
        both(
            both(
                required("type", literal(GeoJsonType::MultiPoint.as_str())),
                required("coordinates", list(position())),
            ),
            optional("bbox", bounding_box()),
        ),
    )
    .map(|((_, coordinates), bbox)| MultiPoint { coordinates, bbox })
}

/// `{ "type": "LineString", "coordinates": [Position] }`.
pub fn line_string() -> impl Validate<Output = LineString> + Send + Sync {
    named(
        GeoJsonType::LineString.as_str(),
        both(
            both(
                required("type", literal(GeoJsonType::LineString.as_str())),
                required("coordinates", list(position())),
            ),
            optional("bbox", bounding_box()),
        ),
    )
    .map(|((_, coordinates), bbox)| LineString { coordinates, bbox })
}

/// `{ "type": "MultiLineString", "coordinates": [[Position, ...]] }`; each
/// line must hold at least one position.
pub fn multi_line_string() -> impl Validate<Output = MultiLineString> + Send + Sync {
    named(
        GeoJsonType::MultiLineString.as_str(),
        both(
            both(
                required("type", literal(GeoJsonType::MultiLineString.as_str())),
                required("coordinates", list(non_empty_list(position()))),
            ),
            optional("bbox", bounding_box()),
        ),
    )
    .map(|((_, coordinates), bbox)| MultiLineString { coordinates, bbox })
}

/// `{ "type": "Polygon", "coordinates": [[Position, ...]] }`; empty rings
/// are invalid, ring closure is not checked.
pub fn polygon() -> impl Validate<Output = Polygon> + Send + Sync {
    named(
        GeoJsonType::Polygon.as_str(),
        both(
            both(
                required("type", literal(GeoJsonType::Polygon.as_str())),
                required("coordinates", list(non_empty_list(position()))),
            ),
            optional("bbox", bounding_box()),
        ),
    )
    .map(|((_, coordinates), bbox)| Polygon { coordinates, bbox })
}

/// `{ "type": "MultiPolygon", "coordinates": [[[Position, ...], ...]] }`.
pub fn multi_polygon() -> impl Validate<Output = MultiPolygon> + Send + Sync {
    named(
        GeoJsonType::MultiPolygon.as_str(),
        both(
            both(
                required("type", literal(GeoJsonType::MultiPolygon.as_str())),
                required(
                    "coordinates",
                    list(non_empty_list(non_empty_list(position()))),
                ),
            ),
            optional("bbox", bounding_box()),
        ),
    )
    .map(|((_, coordinates), bbox)| MultiPolygon { coordinates, bbox })
}

/// The ordered union of the six simple geometries.
pub fn simple_geometry() -> impl Validate<Output = SimpleGeometry> + Send + Sync {
    one_of(
        "a geometry",
        vec![
            Box::new(point().map(SimpleGeometry::Point)),
            Box::new(multi_point().map(SimpleGeometry::MultiPoint)),
            Box::new(line_string().map(SimpleGeometry::LineString)),
            Box::new(multi_line_string().map(SimpleGeometry::MultiLineString)),
            Box::new(polygon().map(SimpleGeometry::Polygon)),
            Box::new(multi_polygon().map(SimpleGeometry::MultiPolygon)),
        ],
    )
}

/// `{ "type": "GeometryCollection", "geometries": [...] }`. The members
/// validate against [`simple_geometry`], so a nested collection rejects.
pub fn geometry_collection() -> impl Validate<Output = GeometryCollection> + Send + Sync {
    named(
        GeoJsonType::GeometryCollection.as_str(),
        both(
            both(
                required("type", literal(GeoJsonType::GeometryCollection.as_str())),
                required("geometries", list(simple_geometry())),
            ),
            optional("bbox", bounding_box()),
        ),
    )
    .map(|((_, geometries), bbox)| GeometryCollection { geometries, bbox })
}

/// Any geometry object: a simple geometry or a collection of them.
pub fn geometry() -> impl Validate<Output = Geometry> + Send + Sync {
    one_of(
        "a geometry object",
        vec![
            Box::new(simple_geometry().map(Geometry::from)),
            Box::new(geometry_collection().map(Geometry::GeometryCollection)),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{leaves, ErrorKind};
    use serde_json::json;

    #[test]
    fn test_position_is_exactly_two_numbers() {
        assert_eq!(
            position().validate(&json!([13.4, 52.5])).unwrap(),
            Position(13.4, 52.5)
        );
        assert!(position().validate(&json!([13.4])).is_err());
        assert!(position().validate(&json!([13.4, 52.5, 30.0])).is_err());
        assert!(position().validate(&json!(["13.4", "52.5"])).is_err());
    }

    #[test]
    fn test_bounding_box_arity_is_not_enforced() {
        assert!(bounding_box().validate(&json!([0.0, 0.0, 1.0, 1.0])).is_ok());
        // Documented limitation: 5-element boxes pass the shape check.
        assert!(bounding_box()
            .validate(&json!([0.0, 0.0, 1.0, 1.0, 2.0]))
            .is_ok());
        assert!(bounding_box().validate(&json!("0,0,1,1")).is_err());
    }

    #[test]
    fn test_coordinates_union_prefers_shallow_matches() {
        assert_eq!(
            coordinates().validate(&json!([13.4, 52.5])).unwrap(),
            Coordinates::Position(Position(13.4, 52.5))
        );
        assert_eq!(
            coordinates()
                .validate(&json!([[0.0, 0.0], [1.0, 1.0]]))
                .unwrap(),
            Coordinates::PositionList(vec![Position(0.0, 0.0), Position(1.0, 1.0)])
        );
        assert_eq!(
            coordinates()
                .validate(&json!([[[0.0, 0.0], [1.0, 1.0]]]))
                .unwrap(),
            Coordinates::LineList(vec![vec![Position(0.0, 0.0), Position(1.0, 1.0)]])
        );
    }

    #[test]
    fn test_point_accepts_tagged_pair() {
        let point = point()
            .validate(&json!({"type": "Point", "coordinates": [0.0, 0.0]}))
            .unwrap();
        assert_eq!(point.coordinates, Position(0.0, 0.0));
        assert_eq!(point.bbox, None);
    }

    #[test]
    fn test_point_carries_optional_bbox() {
        let point = point()
            .validate(&json!({
                "type": "Point",
                "coordinates": [0.5, 0.5],
                "bbox": [0.0, 0.0, 1.0, 1.0],
            }))
            .unwrap();
        assert_eq!(point.bbox, Some(vec![0.0, 0.0, 1.0, 1.0]));
    }

    #[test]
    fn test_point_rejects_wrong_tag() {
        let errors = point()
            .validate(&json!({"type": "MultiPoint", "coordinates": [0.0, 0.0]}))
            .unwrap_err();
        let flat = leaves(&errors);
        assert!(flat.iter().any(|e| {
            e.path.to_string() == "/type"
                && matches!(&e.kind, ErrorKind::TagMismatch { expected, .. } if expected == "Point")
        }));
    }

    #[test]
    fn test_point_rejects_missing_coordinates() {
        let errors = point().validate(&json!({"type": "Point"})).unwrap_err();
        assert!(errors.iter().any(|e| {
            matches!(&e.kind, ErrorKind::MissingField { field } if field == "coordinates")
        }));
    }

    #[test]
    fn test_polygon_rejects_empty_ring() {
        let errors = polygon()
            .validate(&json!({
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]], []],
            }))
            .unwrap_err();
        let flat = leaves(&errors);
        assert!(flat.iter().any(|e| {
            e.path.to_string() == "/coordinates/1"
                && matches!(&e.kind, ErrorKind::EmptinessViolation { .. })
        }));
    }

    #[test]
    fn test_polygon_accepts_open_ring() {
        // Closure is not checked: three distinct positions are enough.
        let result = polygon().validate(&json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]],
        }));
        assert!(result.is_ok());
    }

    #[test]
    fn test_multi_polygon_nesting_depth() {
        let multi = multi_polygon()
            .validate(&json!({
                "type": "MultiPolygon",
                "coordinates": [[[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]]],
            }))
            .unwrap();
        assert_eq!(multi.coordinates.len(), 1);
        assert_eq!(multi.coordinates[0][0].len(), 3);
    }

    #[test]
    fn test_simple_geometry_dispatches_on_tag() {
        let geometry = simple_geometry()
            .validate(&json!({
                "type": "LineString",
                "coordinates": [[0.0, 0.0], [1.0, 1.0]],
            }))
            .unwrap();
        assert_eq!(geometry.geometry_type(), GeoJsonType::LineString);
    }

    #[test]
    fn test_collection_accepts_mixed_simple_geometries() {
        let collection = geometry_collection()
            .validate(&json!({
                "type": "GeometryCollection",
                "geometries": [
                    {"type": "Point", "coordinates": [0.0, 0.0]},
                    {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]},
                    {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
                    },
                ],
            }))
            .unwrap();
        assert_eq!(collection.geometries.len(), 3);
    }

    #[test]
    fn test_collections_do_not_nest() {
        let errors = geometry_collection()
            .validate(&json!({
                "type": "GeometryCollection",
                "geometries": [{
                    "type": "GeometryCollection",
                    "geometries": [{"type": "Point", "coordinates": [0.0, 0.0]}],
                }],
            }))
            .unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_geometry_union_accepts_collections() {
        let geometry = geometry()
            .validate(&json!({
                "type": "GeometryCollection",
                "geometries": [{"type": "Point", "coordinates": [0.0, 0.0]}],
            }))
            .unwrap();
        assert_eq!(geometry.geometry_type(), GeoJsonType::GeometryCollection);
    }
}
