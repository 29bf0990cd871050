use serde::Serialize;

use crate::bounds::{Camera, ViewBounds};
use crate::error::Result;
use crate::metrics::{DetailResult, SummaryResult};

/// Everything the `--json` output prints. Absent parts are left out.
#[derive(Debug, Default, Serialize)]
pub struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<&'a ViewBounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<Camera>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<&'a SummaryResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<&'a DetailResult>,
}

impl JsonReport<'_> {
    pub fn render(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn summary_table(summary: &SummaryResult) -> String {
    let rows: Vec<(String, String)> = summary
        .0
        .iter()
        .map(|(kind, count)| (kind.to_string(), count.to_string()))
        .collect();
    table(("Geometry type", "Count"), &rows)
}

/// Lengths are rounded to two decimals here and nowhere else.
pub fn detail_table(detail: &DetailResult) -> String {
    let rows: Vec<(String, String)> = detail
        .0
        .iter()
        .map(|(kind, km)| (kind.to_string(), format!("{:.2}", km)))
        .collect();
    table(("Geometry type", "Length (km)"), &rows)
}

fn table(header: (&str, &str), rows: &[(String, String)]) -> String {
    let w0 = rows
        .iter()
        .map(|r| r.0.len())
        .chain(std::iter::once(header.0.len()))
        .max()
        .unwrap_or(0);
    let w1 = rows
        .iter()
        .map(|r| r.1.len())
        .chain(std::iter::once(header.1.len()))
        .max()
        .unwrap_or(0);

    let mut doc = format!("{:<w0$}  {:>w1$}\n", header.0, header.1);
    doc.push_str(&format!("{}  {}\n", "-".repeat(w0), "-".repeat(w1)));
    for (a, b) in rows {
        doc.push_str(&format!("{:<w0$}  {:>w1$}\n", a, b));
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::GeometryKind;
    use crate::point::{WGS84BoundingBox, WGS84Point};
    use std::collections::BTreeMap;

    #[test]
    fn test_detail_rounds_to_two_decimals() {
        let detail = DetailResult(BTreeMap::from([(GeometryKind::LineString, 8.200000000001)]));
        let t = detail_table(&detail);
        assert!(t.contains("LineString"));
        assert!(t.contains("8.20"));
        assert!(!t.contains("8.200"));
    }

    #[test]
    fn test_summary_rows_in_kind_order() {
        let summary = SummaryResult(BTreeMap::from([
            (GeometryKind::Polygon, 1),
            (GeometryKind::Point, 3),
        ]));
        let t = summary_table(&summary);
        let lines: Vec<&str> = t.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Geometry type"));
        assert!(lines[2].starts_with("Point"));
        assert!(lines[2].ends_with('3'));
        assert!(lines[3].starts_with("Polygon"));
    }

    #[test]
    fn test_json_report() {
        let bounds = ViewBounds {
            bbox: WGS84BoundingBox::from(&WGS84Point::new(1.0, 2.0), &WGS84Point::new(3.0, 4.0)),
        };
        let summary = SummaryResult(BTreeMap::from([(GeometryKind::LineString, 2)]));
        let report = JsonReport {
            bounds: Some(&bounds),
            camera: Some(Camera {
                center: WGS84Point::new(2.0, 3.0),
                zoom: 7,
            }),
            summary: Some(&summary),
            detail: None,
        };
        let v: serde_json::Value = serde_json::from_str(&report.render().unwrap()).unwrap();
        assert_eq!(v["bounds"]["bbox"]["min"]["lon"], 1.0);
        assert_eq!(v["bounds"]["bbox"]["max"]["lat"], 4.0);
        assert_eq!(v["camera"]["zoom"], 7);
        assert_eq!(v["summary"]["LineString"], 2);
        assert!(v.get("detail").is_none());
    }

    #[test]
    fn test_empty_table_has_header() {
        let t = summary_table(&SummaryResult::default());
        assert_eq!(t.lines().count(), 2);
    }
}
