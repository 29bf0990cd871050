use std::fs::File;
use std::io::Read;
use std::path::Path;

use kml::Kml;
use kml::types::{Geometry, Placemark};

use crate::collection::{Feature, GeometryCollection};
use crate::error::{Error, Result};

/// Reads a KML file into memory. Parsing is a separate step so the caller
/// decides when the loaded collection is replaced.
pub fn read_file(path: &Path) -> Result<String> {
    let io = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(io)?;
    let mut content = String::new();
    file.read_to_string(&mut content).map_err(io)?;
    Ok(content)
}

/// Parses KML text into a collection with one feature per Placemark geometry,
/// in document order.
pub fn parse(content: &str) -> Result<GeometryCollection> {
    // the kml reader panics on some empty geometries, e.g. a Point without coordinates
    let kml: Kml = std::panic::catch_unwind(|| content.parse::<Kml>())
        .map_err(|_| Error::malformed("invalid KML geometry"))?
        .map_err(|e: kml::Error| Error::malformed(e.to_string()))?;

    if !is_container(&kml) {
        return Err(Error::malformed("no KML document, folder or placemark at the root"));
    }

    let mut features = Vec::new();
    collect_placemarks(&kml, &mut features);
    log::debug!("parsed {} features", features.len());
    Ok(GeometryCollection::new(features))
}

fn is_container(kml: &Kml) -> bool {
    matches!(
        kml,
        Kml::KmlDocument(_) | Kml::Document { .. } | Kml::Folder(_) | Kml::Placemark(_)
    )
}

fn collect_placemarks(kml: &Kml, out: &mut Vec<Feature>) {
    match kml {
        Kml::KmlDocument(doc) => doc.elements.iter().for_each(|e| collect_placemarks(e, out)),
        Kml::Document { elements, .. } => elements.iter().for_each(|e| collect_placemarks(e, out)),
        Kml::Folder(z) => z.elements.iter().for_each(|e| collect_placemarks(e, out)),
        Kml::Placemark(p) => {
            if let Some(feature) = placemark_feature(p) {
                out.push(feature);
            }
        }
        _ => {}
    }
}

fn placemark_feature(p: &Placemark) -> Option<Feature> {
    let geometry = match p.geometry.as_ref() {
        Some(g) => convert(g)?,
        None => {
            log::trace!("placemark {:?} has no geometry", p.name);
            return None;
        }
    };
    Some(
        Feature::new(geometry)
            .with_name(p.name.clone())
            .with_description(p.description.clone()),
    )
}

fn convert(geometry: &Geometry) -> Option<geo::Geometry<f64>> {
    match geometry {
        Geometry::Point(p) => Some(geo::Point::from(p.clone()).into()),
        Geometry::LineString(ls) => Some(geo::LineString::from(ls.clone()).into()),
        Geometry::LinearRing(ring) => Some(geo::LineString::from(ring.clone()).into()),
        Geometry::Polygon(poly) => Some(geo::Polygon::from(poly.clone()).into()),
        Geometry::MultiGeometry(multi) => {
            let mut parts = Vec::new();
            flatten(&multi.geometries, &mut parts);
            aggregate(parts)
        }
        _ => None,
    }
}

fn flatten(geometries: &[Geometry], out: &mut Vec<geo::Geometry<f64>>) {
    for g in geometries {
        match g {
            Geometry::MultiGeometry(inner) => flatten(&inner.geometries, out),
            other => out.extend(convert(other)),
        }
    }
}

/// One part stays as it is, parts of a single simple type become the matching
/// Multi* geometry, anything else becomes a GeometryCollection.
fn aggregate(mut parts: Vec<geo::Geometry<f64>>) -> Option<geo::Geometry<f64>> {
    if parts.len() <= 1 {
        return parts.pop();
    }
    if let Some(points) = all_of(&parts, |g| match g {
        geo::Geometry::Point(p) => Some(*p),
        _ => None,
    }) {
        return Some(geo::MultiPoint::new(points).into());
    }
    if let Some(lines) = all_of(&parts, |g| match g {
        geo::Geometry::LineString(l) => Some(l.clone()),
        _ => None,
    }) {
        return Some(geo::MultiLineString::new(lines).into());
    }
    if let Some(polygons) = all_of(&parts, |g| match g {
        geo::Geometry::Polygon(p) => Some(p.clone()),
        _ => None,
    }) {
        return Some(geo::MultiPolygon::new(polygons).into());
    }
    Some(geo::Geometry::GeometryCollection(geo::GeometryCollection(parts)))
}

fn all_of<T>(
    parts: &[geo::Geometry<f64>],
    pick: impl Fn(&geo::Geometry<f64>) -> Option<T>,
) -> Option<Vec<T>> {
    parts.iter().map(pick).collect()
}
