use crate::{
    bounds::ViewBounds,
    collection::{Feature, GeometryCollection, GeometryKind},
    config::ViewerConfig,
    error::Result,
    mercator::WebMercatorProjection,
    point::{MercatorBoundingBox, MercatorPoint},
};

/// Static stand-in for the map: draws the collection in Web Mercator, framed
/// by its view bounds with a pixel margin.
pub struct SVG {
    mercator_bbox: MercatorBoundingBox,
    projection: WebMercatorProjection,
    width: f64,
    height: f64,
    padding: f64,
    elements: Vec<String>,
}

impl SVG {
    pub fn init(bounds: &ViewBounds, config: &ViewerConfig) -> Result<Self> {
        let projection = WebMercatorProjection::make()?;
        Ok(Self {
            mercator_bbox: projection.project_bbox(&bounds.bbox)?,
            projection,
            width: f64::from(config.width_px),
            height: f64::from(config.height_px),
            padding: f64::from(config.padding_px),
            elements: Vec::new(),
        })
    }

    pub fn add_feature(&mut self, feature: &Feature) -> Result<()> {
        let stroke = color(feature.kind());
        self.add_geometry(feature.geometry(), stroke)
    }

    fn add_geometry(&mut self, geometry: &geo::Geometry<f64>, stroke: &str) -> Result<()> {
        match geometry {
            geo::Geometry::Point(p) => self.add_point(p.0, stroke)?,
            geo::Geometry::MultiPoint(m) => {
                for p in m {
                    self.add_point(p.0, stroke)?;
                }
            }
            geo::Geometry::LineString(ls) => self.add_line(ls, stroke)?,
            geo::Geometry::MultiLineString(m) => {
                for ls in m {
                    self.add_line(ls, stroke)?;
                }
            }
            geo::Geometry::Polygon(p) => self.add_polygon(p, stroke)?,
            geo::Geometry::MultiPolygon(m) => {
                for p in m {
                    self.add_polygon(p, stroke)?;
                }
            }
            geo::Geometry::GeometryCollection(c) => {
                for g in c {
                    self.add_geometry(g, stroke)?;
                }
            }
            other => log::warn!("svg: skipping {:?}", GeometryKind::of(other)),
        }
        Ok(())
    }

    fn add_point(&mut self, c: geo::Coord<f64>, stroke: &str) -> Result<()> {
        let (x, y) = self.pixel(c)?;
        self.elements.push(format!(
            r#"  <circle cx="{:.2}" cy="{:.2}" r="4" fill="{}"/>"#,
            x, y, stroke
        ));
        Ok(())
    }

    fn add_line(&mut self, ls: &geo::LineString<f64>, stroke: &str) -> Result<()> {
        let points = self.points(ls)?;
        self.elements.push(format!(
            r#"  <polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
            points, stroke
        ));
        Ok(())
    }

    fn add_polygon(&mut self, p: &geo::Polygon<f64>, stroke: &str) -> Result<()> {
        // evenodd keeps the interior rings as holes
        let mut d = String::new();
        for ring in std::iter::once(p.exterior()).chain(p.interiors()) {
            if ring.0.is_empty() {
                continue;
            }
            d.push_str(&format!("M {} Z ", self.points(ring)?));
        }
        self.elements.push(format!(
            r#"  <path d="{}" fill="{}" fill-opacity="0.3" fill-rule="evenodd" stroke="{}" stroke-width="2"/>"#,
            d.trim_end(),
            stroke,
            stroke
        ));
        Ok(())
    }

    fn points(&self, ls: &geo::LineString<f64>) -> Result<String> {
        let mut out = Vec::with_capacity(ls.0.len());
        for c in ls.coords() {
            let (x, y) = self.pixel(*c)?;
            out.push(format!("{:.2},{:.2}", x, y));
        }
        Ok(out.join(" "))
    }

    pub fn render(&self) -> String {
        let mut svg = format!(
            r#"<svg width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">"#,
            self.width, self.height
        );
        svg.push('\n');
        for e in &self.elements {
            svg.push_str(e);
            svg.push('\n');
        }
        svg.push_str("</svg>");
        svg
    }

    /// Pixels per mercator meter. A degenerate extent (a single point) is
    /// drawn at scale 1.
    pub fn scale(&self) -> f64 {
        let inner_w = (self.width - 2.0 * self.padding).max(1.0);
        let inner_h = (self.height - 2.0 * self.padding).max(1.0);
        let sx = inner_w / self.mercator_bbox.width();
        let sy = inner_h / self.mercator_bbox.height();
        let s = sx.min(sy);
        if s.is_finite() { s } else { 1.0 }
    }

    fn pixel(&self, c: geo::Coord<f64>) -> Result<(f64, f64)> {
        let m = self.projection.project(&c.into())?;
        Ok(self.transform(&m))
    }

    /// Centers the data in the canvas; y grows downwards in SVG.
    fn transform(&self, m: &MercatorPoint) -> (f64, f64) {
        let center = self.mercator_bbox.center();
        let s = self.scale();
        let svg_x = self.width / 2.0 + (m.x - center.x) * s;
        let svg_y = self.height / 2.0 - (m.y - center.y) * s;
        (svg_x, svg_y)
    }
}

fn color(kind: GeometryKind) -> &'static str {
    match kind {
        GeometryKind::Point | GeometryKind::MultiPoint => "red",
        GeometryKind::LineString | GeometryKind::MultiLineString => "blue",
        GeometryKind::Polygon | GeometryKind::MultiPolygon => "green",
        GeometryKind::GeometryCollection => "purple",
    }
}

/// `None` when there is nothing to frame.
pub fn render_preview(
    collection: &GeometryCollection,
    bounds: Option<&ViewBounds>,
    config: &ViewerConfig,
) -> Result<Option<String>> {
    let Some(bounds) = bounds else {
        return Ok(None);
    };
    let mut svg = SVG::init(bounds, config)?;
    for feature in collection {
        svg.add_feature(feature)?;
    }
    Ok(Some(svg.render()))
}
