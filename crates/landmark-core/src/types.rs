//! Typed GeoJSON values produced by successful validation.
//!
//! These are validation outcomes, not long-lived stateful objects: a value
//! is built once per accepted document and never mutated afterwards. The
//! encode direction (typed value back to text) is intentionally absent.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// The nine `type` tags a GeoJSON object may carry. Every document's `type`
/// field must be exactly one of these string literals; the tag is what
/// disambiguates the tagged unions of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeoJsonType {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
    Feature,
    FeatureCollection,
}

impl GeoJsonType {
    /// The exact tag string, as it appears in documents.
    pub const fn as_str(self) -> &'static str {
        match self {
            GeoJsonType::Point => "Point",
            GeoJsonType::MultiPoint => "MultiPoint",
            GeoJsonType::LineString => "LineString",
            GeoJsonType::MultiLineString => "MultiLineString",
            GeoJsonType::Polygon => "Polygon",
            GeoJsonType::MultiPolygon => "MultiPolygon",
            GeoJsonType::GeometryCollection => "GeometryCollection",
            GeoJsonType::Feature => "Feature",
            GeoJsonType::FeatureCollection => "FeatureCollection",
        }
    }

    /// Look a tag string up in the closed enumeration.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Point" => Some(GeoJsonType::Point),
            "MultiPoint" => Some(GeoJsonType::MultiPoint),
            "LineString" => Some(GeoJsonType::LineString),
            "MultiLineString" => Some(GeoJsonType::MultiLineString),
            "Polygon" => Some(GeoJsonType::Polygon),
            "MultiPolygon" => Some(GeoJsonType::MultiPolygon),
            "GeometryCollection" => Some(GeoJsonType::GeometryCollection),
            "Feature" => Some(GeoJsonType::Feature),
            "FeatureCollection" => Some(GeoJsonType::FeatureCollection),
            _ => None,
        }
    }
}

impl fmt::Display for GeoJsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (longitude, latitude) pair: exactly two numbers. The RFC permits an
/// optional altitude; this grammar intentionally rejects it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub f64, pub f64);

impl Position {
    pub fn longitude(self) -> f64 {
        self.0
    }

    pub fn latitude(self) -> f64 {
        self.1
    }
}

/// Numeric bounding box. Only the shape (an array of numbers) is checked;
/// the 4-vs-6 arity of the RFC is a documented, unenforced limitation.
pub type BoundingBox = Vec<f64>;

/// A feature's property bag, carried through verbatim.
pub type Properties = BTreeMap<String, Value>;

/// `{ "type": "Point", "coordinates": [lon, lat] }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub coordinates: Position,
    pub bbox: Option<BoundingBox>,
}

/// A set of points.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPoint {
    pub coordinates: Vec<Position>,
    pub bbox: Option<BoundingBox>,
}

/// A connected sequence of positions.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    pub coordinates: Vec<Position>,
    pub bbox: Option<BoundingBox>,
}

/// A set of line strings; each line must be non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiLineString {
    pub coordinates: Vec<Vec<Position>>,
    pub bbox: Option<BoundingBox>,
}

/// A polygon as a list of rings; each ring must be non-empty. Ring closure
/// is not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub coordinates: Vec<Vec<Position>>,
    pub bbox: Option<BoundingBox>,
}

/// A set of polygons; each polygon and each of its rings must be non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon {
    pub coordinates: Vec<Vec<Vec<Position>>>,
    pub bbox: Option<BoundingBox>,
}

/// The six geometries a [`GeometryCollection`] may hold. Collections may
/// not nest, and that restriction is carried by this type: there is no
/// collection variant to put inside one.
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleGeometry {
    Point(Point),
    MultiPoint(MultiPoint),
    LineString(LineString),
    MultiLineString(MultiLineString),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
}

impl SimpleGeometry {
    /// The tag of this geometry.
    pub fn geometry_type(&self) -> GeoJsonType {
        match self {
            SimpleGeometry::Point(_) => GeoJsonType::Point,
            SimpleGeometry::MultiPoint(_) => GeoJsonType::MultiPoint,
            SimpleGeometry::LineString(_) => GeoJsonType::LineString,
            SimpleGeometry::MultiLineString(_) => GeoJsonType::MultiLineString,
            SimpleGeometry::Polygon(_) => GeoJsonType::Polygon,
            SimpleGeometry::MultiPolygon(_) => GeoJsonType::MultiPolygon,
        }
    }
}

/// `{ "type": "GeometryCollection", "geometries": [...] }`, holding simple
/// geometries only.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollection {
    pub geometries: Vec<SimpleGeometry>,
    pub bbox: Option<BoundingBox>,
}

/// Any geometry object: one of the six simple geometries, or a collection
/// of simple geometries.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    MultiPoint(MultiPoint),
    LineString(LineString),
    MultiLineString(MultiLineString),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// The tag of this geometry.
    pub fn geometry_type(&self) -> GeoJsonType {
        match self {
            Geometry::Point(_) => GeoJsonType::Point,
            Geometry::MultiPoint(_) => GeoJsonType::MultiPoint,
            Geometry::LineString(_) => GeoJsonType::LineString,
            Geometry::MultiLineString(_) => GeoJsonType::MultiLineString,
            Geometry::Polygon(_) => GeoJsonType::Polygon,
            Geometry::MultiPolygon(_) => GeoJsonType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeoJsonType::GeometryCollection,
        }
    }
}

impl From<SimpleGeometry> for Geometry {
    fn from(geometry: SimpleGeometry) -> Self {
        match geometry {
            SimpleGeometry::Point(g) => Geometry::Point(g),
            SimpleGeometry::MultiPoint(g) => Geometry::MultiPoint(g),
            SimpleGeometry::LineString(g) => Geometry::LineString(g),
            SimpleGeometry::MultiLineString(g) => Geometry::MultiLineString(g),
            SimpleGeometry::Polygon(g) => Geometry::Polygon(g),
            SimpleGeometry::MultiPolygon(g) => Geometry::MultiPolygon(g),
        }
    }
}

/// The tagless union of coordinate shapes, ordered shallow to deep.
#[derive(Debug, Clone, PartialEq)]
pub enum Coordinates {
    /// A single position.
    Position(Position),
    /// MultiPoint / LineString coordinates.
    PositionList(Vec<Position>),
    /// MultiLineString / Polygon coordinates: non-empty lines or rings.
    LineList(Vec<Vec<Position>>),
    /// MultiPolygon coordinates.
    PolygonList(Vec<Vec<Vec<Position>>>),
}

/// RFC 7946 allows string or number feature identifiers.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureId {
    String(String),
    Number(f64),
}

/// A feature whose properties were validated by a caller-supplied
/// validator. `geometry: None` models an unlocated feature (`geometry:
/// null` in the document).
#[derive(Debug, Clone, PartialEq)]
pub struct TypedFeature<P> {
    pub geometry: Option<Geometry>,
    pub properties: P,
    pub id: Option<FeatureId>,
    pub bbox: Option<BoundingBox>,
}

/// A feature with the default dictionary-or-null properties. `properties:
/// None` means the key was present and explicitly `null`; a document with
/// the key absent altogether never validates.
pub type Feature = TypedFeature<Option<Properties>>;

/// `{ "type": "FeatureCollection", "features": [...] }`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
    pub bbox: Option<BoundingBox>,
}

/// Any whole GeoJSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoJson {
    Geometry(Geometry),
    Feature(Feature),
    FeatureCollection(FeatureCollection),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        let tags = [
            GeoJsonType::Point,
            GeoJsonType::MultiPoint,
            GeoJsonType::LineString,
            GeoJsonType::MultiLineString,
            GeoJsonType::Polygon,
            GeoJsonType::MultiPolygon,
            GeoJsonType::GeometryCollection,
            GeoJsonType::Feature,
            GeoJsonType::FeatureCollection,
        ];
        for tag in tags {
            assert_eq!(GeoJsonType::from_tag(tag.as_str()), Some(tag));
        }
        assert_eq!(GeoJsonType::from_tag("Circle"), None);
    }

    #[test]
    fn test_position_accessors() {
        let position = Position(13.4, 52.5);
        assert_eq!(position.longitude(), 13.4);
        assert_eq!(position.latitude(), 52.5);
    }

    #[test]
    fn test_simple_geometry_widens_to_geometry() {
        let point = SimpleGeometry::Point(Point {
            coordinates: Position(0.0, 0.0),
            bbox: None,
        });
        let geometry: Geometry = point.into();
        assert_eq!(geometry.geometry_type(), GeoJsonType::Point);
    }
}
