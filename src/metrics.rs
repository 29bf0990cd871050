use std::collections::BTreeMap;

use geo::{Geodesic, Length};
use serde::Serialize;

use crate::collection::{GeometryCollection, GeometryKind};

/// Number of features per geometry kind. Kinds with no feature are absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SummaryResult(pub BTreeMap<GeometryKind, usize>);

/// Total geodesic length in kilometers per line kind.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DetailResult(pub BTreeMap<GeometryKind, f64>);

impl SummaryResult {
    pub fn get(&self, kind: GeometryKind) -> Option<usize> {
        self.0.get(&kind).copied()
    }
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl DetailResult {
    pub fn get(&self, kind: GeometryKind) -> Option<f64> {
        self.0.get(&kind).copied()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn summarize(collection: &GeometryCollection) -> SummaryResult {
    let mut counts = BTreeMap::new();
    for feature in collection {
        *counts.entry(feature.kind()).or_insert(0) += 1;
    }
    SummaryResult(counts)
}

pub fn detail(collection: &GeometryCollection) -> DetailResult {
    let mut lengths = BTreeMap::new();
    for feature in collection.iter().filter(|f| f.kind().is_linear()) {
        let km = geodesic_length_km(feature.geometry());
        log::trace!("{} {:?}: {:.3} km", feature.kind(), feature.name, km);
        *lengths.entry(feature.kind()).or_insert(0.0) += km;
    }
    DetailResult(lengths)
}

/// Length along the ellipsoid in kilometers. Zero for anything that is not a
/// line.
pub fn geodesic_length_km(geometry: &geo::Geometry<f64>) -> f64 {
    match geometry {
        geo::Geometry::LineString(ls) => line_length_km(ls),
        geo::Geometry::MultiLineString(lines) => lines.iter().map(line_length_km).sum(),
        _ => 0.0,
    }
}

fn line_length_km(ls: &geo::LineString<f64>) -> f64 {
    if ls.0.len() < 2 {
        return 0.0;
    }
    Geodesic.length(ls) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Feature;
    use approx::assert_abs_diff_eq;
    use geo::{line_string, point, polygon};

    // One degree of longitude along the equator on WGS84, in km.
    const EQUATOR_DEGREE_KM: f64 = 111.319_490_793_273_58;

    fn equator_line(from: f64, km: f64) -> geo::Geometry<f64> {
        let to = from + km / EQUATOR_DEGREE_KM;
        line_string![(x: from, y: 0.0), (x: to, y: 0.0)].into()
    }

    fn mixed() -> GeometryCollection {
        GeometryCollection::new(vec![
            Feature::new(point!(x: 0.0, y: 0.0).into()),
            Feature::new(equator_line(0.0, 5.0)),
            Feature::new(
                polygon![(x: 2.0, y: 2.0), (x: 3.0, y: 2.0), (x: 3.0, y: 3.0), (x: 2.0, y: 2.0)]
                    .into(),
            ),
            Feature::new(point!(x: 1.0, y: 1.0).into()),
        ])
    }

    #[test]
    fn test_summarize_counts_by_kind() {
        let s = summarize(&mixed());
        assert_eq!(s.get(GeometryKind::Point), Some(2));
        assert_eq!(s.get(GeometryKind::LineString), Some(1));
        assert_eq!(s.get(GeometryKind::Polygon), Some(1));
        assert_eq!(s.get(GeometryKind::MultiPoint), None);
        assert_eq!(s.total(), 4);
    }

    #[test]
    fn test_summary_total_matches_feature_count() {
        let c = mixed();
        assert_eq!(summarize(&c).total(), c.len());
        let empty = GeometryCollection::default();
        assert_eq!(summarize(&empty).total(), empty.len());
    }

    #[test]
    fn test_idempotent() {
        let c = mixed();
        assert_eq!(summarize(&c), summarize(&c));
        assert_eq!(detail(&c), detail(&c));
    }

    #[test]
    fn test_detail_only_lines() {
        let d = detail(&mixed());
        assert_eq!(d.0.len(), 1);
        assert_abs_diff_eq!(d.get(GeometryKind::LineString).unwrap(), 5.0, epsilon = 1e-6);
        assert_eq!(d.get(GeometryKind::Point), None);
        assert_eq!(d.get(GeometryKind::Polygon), None);
    }

    #[test]
    fn test_detail_sums_per_kind() {
        let c = GeometryCollection::new(vec![
            Feature::new(equator_line(0.0, 5.0)),
            Feature::new(equator_line(10.0, 3.2)),
        ]);
        let d = detail(&c);
        assert_abs_diff_eq!(d.get(GeometryKind::LineString).unwrap(), 8.2, epsilon = 1e-6);
    }

    #[test]
    fn test_multi_line_string_sums_all_parts() {
        let multi = geo::MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
            line_string![(x: 20.0, y: 0.0), (x: 20.5, y: 0.0), (x: 21.0, y: 0.0)],
        ]);
        let c = GeometryCollection::new(vec![
            Feature::new(multi.into()),
            Feature::new(equator_line(50.0, 1.0)),
        ]);
        let d = detail(&c);
        assert_abs_diff_eq!(
            d.get(GeometryKind::MultiLineString).unwrap(),
            2.0 * EQUATOR_DEGREE_KM,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(d.get(GeometryKind::LineString).unwrap(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_single_point_line_is_zero() {
        let c = GeometryCollection::new(vec![Feature::new(
            line_string![(x: 3.0, y: 4.0)].into(),
        )]);
        assert_eq!(detail(&c).get(GeometryKind::LineString), Some(0.0));
    }

    #[test]
    fn test_meridian_is_not_planar() {
        // 10 degrees of latitude is not 10 equator degrees on an ellipsoid
        let l: geo::Geometry<f64> = line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 10.0)].into();
        let km = geodesic_length_km(&l);
        assert!((km - 10.0 * EQUATOR_DEGREE_KM).abs() > 1.0);
        assert_abs_diff_eq!(km, 1105.855, epsilon = 0.01);
    }

    #[test]
    fn test_empty_collection() {
        let c = GeometryCollection::default();
        assert!(summarize(&c).is_empty());
        assert!(detail(&c).is_empty());
    }

    #[test]
    fn test_serialize_keys() {
        let s = summarize(&mixed());
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"Point":2,"LineString":1,"Polygon":1}"#);
    }
}
