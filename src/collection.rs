//! The loaded document: an ordered list of features, each one geometry in
//! WGS84 lon/lat.

use core::fmt;

use geojson::{FeatureCollection, GeoJson, JsonObject, JsonValue};
use serde::Serialize;

/// The closed set of GeoJSON geometry types a feature can have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    pub fn of(geometry: &geo::Geometry<f64>) -> Self {
        match geometry {
            geo::Geometry::Point(_) => Self::Point,
            geo::Geometry::Line(_) | geo::Geometry::LineString(_) => Self::LineString,
            geo::Geometry::Polygon(_) | geo::Geometry::Rect(_) | geo::Geometry::Triangle(_) => {
                Self::Polygon
            }
            geo::Geometry::MultiPoint(_) => Self::MultiPoint,
            geo::Geometry::MultiLineString(_) => Self::MultiLineString,
            geo::Geometry::MultiPolygon(_) => Self::MultiPolygon,
            geo::Geometry::GeometryCollection(_) => Self::GeometryCollection,
        }
    }

    /// LineString and MultiLineString, the kinds that have a length.
    pub fn is_linear(&self) -> bool {
        matches!(self, Self::LineString | Self::MultiLineString)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
            Self::GeometryCollection => "GeometryCollection",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    kind: GeometryKind,
    geometry: geo::Geometry<f64>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Feature {
    pub fn new(geometry: geo::Geometry<f64>) -> Self {
        Self {
            kind: GeometryKind::of(&geometry),
            geometry,
            name: None,
            description: None,
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    pub fn geometry(&self) -> &geo::Geometry<f64> {
        &self.geometry
    }

    fn to_geojson(&self) -> geojson::Feature {
        let mut properties = JsonObject::new();
        if let Some(name) = &self.name {
            properties.insert("name".to_string(), JsonValue::from(name.clone()));
        }
        if let Some(description) = &self.description {
            properties.insert(
                "description".to_string(),
                JsonValue::from(description.clone()),
            );
        }
        geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(&self.geometry))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryCollection {
    pub features: Vec<Feature>,
}

impl GeometryCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    pub fn to_geojson(&self) -> GeoJson {
        GeoJson::FeatureCollection(FeatureCollection {
            bbox: None,
            features: self.features.iter().map(Feature::to_geojson).collect(),
            foreign_members: None,
        })
    }

    pub fn info(&self) {
        log::info!("collection: features: {}", self.features.len());
        for (i, f) in self.features.iter().enumerate() {
            log::debug!(
                "collection: #{} {} {}",
                i,
                f.kind,
                f.name.as_deref().unwrap_or("-")
            );
        }
    }
}

impl<'a> IntoIterator for &'a GeometryCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
