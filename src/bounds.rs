use geo::BoundingRect;
use serde::Serialize;

use crate::collection::GeometryCollection;
use crate::config::ViewerConfig;
use crate::error::Result;
use crate::mercator::{WORLD_SIZE, WebMercatorProjection};
use crate::point::{WGS84BoundingBox, WGS84Point};

const TILE_SIZE: f64 = 256.0;

/// Corners of the smallest lon/lat rectangle around the loaded data.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ViewBounds {
    pub bbox: WGS84BoundingBox,
}

impl ViewBounds {
    /// (min latitude, min longitude)
    pub fn south_west(&self) -> WGS84Point {
        self.bbox.min
    }
    /// (max latitude, max longitude)
    pub fn north_east(&self) -> WGS84Point {
        self.bbox.max
    }
}

/// `None` when the collection has no coordinate at all.
pub fn compute_bounds(collection: &GeometryCollection) -> Option<ViewBounds> {
    collection
        .iter()
        .filter_map(|f| f.geometry().bounding_rect())
        .map(|rect| WGS84BoundingBox::from_rect(&rect))
        .reduce(|a, b| a.union(&b))
        .map(|bbox| {
            log::debug!("bounds: {}", bbox);
            ViewBounds { bbox }
        })
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Camera {
    pub center: WGS84Point,
    pub zoom: u8,
}

/// What the map should show.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Viewport {
    Default { center: WGS84Point, zoom: u8 },
    Fit { bounds: ViewBounds, padding_px: u32 },
}

impl Viewport {
    pub fn default_for(config: &ViewerConfig) -> Self {
        Viewport::Default {
            center: config.default_center,
            zoom: config.default_zoom,
        }
    }

    /// Fits the bounds when there are any, otherwise keeps the default view.
    pub fn for_bounds(bounds: Option<ViewBounds>, config: &ViewerConfig) -> Self {
        match bounds {
            Some(bounds) => Viewport::Fit {
                bounds,
                padding_px: config.padding_px,
            },
            None => Self::default_for(config),
        }
    }

    pub fn bounds(&self) -> Option<&ViewBounds> {
        match self {
            Viewport::Fit { bounds, .. } => Some(bounds),
            Viewport::Default { .. } => None,
        }
    }

    /// Center and the largest whole zoom level at which the bounds fit inside
    /// the padded viewport, capped at `max_zoom`.
    pub fn camera(&self, width_px: u32, height_px: u32, max_zoom: u8) -> Result<Camera> {
        let (bounds, padding_px) = match self {
            Viewport::Default { center, zoom } => {
                return Ok(Camera {
                    center: *center,
                    zoom: *zoom,
                });
            }
            Viewport::Fit { bounds, padding_px } => (bounds, *padding_px),
        };
        let projection = WebMercatorProjection::make()?;
        let m = projection.project_bbox(&bounds.bbox)?;
        let center = projection.unproject(&m.center())?;

        let inner_w = (f64::from(width_px) - 2.0 * f64::from(padding_px)).max(1.0);
        let inner_h = (f64::from(height_px) - 2.0 * f64::from(padding_px)).max(1.0);
        let fit = |extent: f64, pixels: f64| {
            if extent <= 0.0 {
                f64::INFINITY
            } else {
                (pixels * WORLD_SIZE / (TILE_SIZE * extent)).log2()
            }
        };
        let zoom = fit(m.width(), inner_w)
            .min(fit(m.height(), inner_h))
            .floor()
            .clamp(0.0, f64::from(max_zoom)) as u8;
        log::debug!("camera: center {} zoom {}", center, zoom);
        Ok(Camera { center, zoom })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Feature;
    use approx::assert_abs_diff_eq;
    use geo::{line_string, point, polygon};

    #[test]
    fn test_bounds_cover_all_features() {
        let c = GeometryCollection::new(vec![
            Feature::new(point!(x: 10.0, y: 52.0).into()),
            Feature::new(line_string![(x: 9.5, y: 52.5), (x: 11.0, y: 51.0)].into()),
            Feature::new(
                polygon![(x: 8.0, y: 50.0), (x: 9.0, y: 50.0), (x: 9.0, y: 53.0), (x: 8.0, y: 50.0)]
                    .into(),
            ),
        ]);
        let b = compute_bounds(&c).unwrap();
        assert_eq!(b.south_west(), WGS84Point::new(8.0, 50.0));
        assert_eq!(b.north_east(), WGS84Point::new(11.0, 53.0));
    }

    #[test]
    fn test_single_point_bounds() {
        let c = GeometryCollection::new(vec![Feature::new(point!(x: -3.0, y: 40.0).into())]);
        let b = compute_bounds(&c).unwrap();
        assert_eq!(b.south_west(), b.north_east());
    }

    #[test]
    fn test_no_bounds() {
        assert_eq!(compute_bounds(&GeometryCollection::default()), None);
        let empty_line = GeometryCollection::new(vec![Feature::new(
            geo::LineString::<f64>::new(vec![]).into(),
        )]);
        assert_eq!(compute_bounds(&empty_line), None);
    }

    #[test]
    fn test_default_viewport_when_no_bounds() {
        let config = ViewerConfig::default();
        let v = Viewport::for_bounds(None, &config);
        let cam = v.camera(800, 600, 18).unwrap();
        assert_eq!(cam.center, config.default_center);
        assert_eq!(cam.zoom, config.default_zoom);
    }

    #[test]
    fn test_fit_whole_world_width() {
        // 360 degrees of longitude on 256 inner pixels is exactly zoom 0
        let bounds = ViewBounds {
            bbox: WGS84BoundingBox::from(&WGS84Point::new(-180.0, -10.0), &WGS84Point::new(180.0, 10.0)),
        };
        let v = Viewport::Fit { bounds, padding_px: 10 };
        let cam = v.camera(276, 276, 18).unwrap();
        assert_eq!(cam.zoom, 0);
        assert_abs_diff_eq!(cam.center.lon, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(cam.center.lat, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_padding_lowers_zoom() {
        let bounds = ViewBounds {
            bbox: WGS84BoundingBox::from(&WGS84Point::new(0.0, 0.0), &WGS84Point::new(40.0, 1.0)),
        };
        // 40 degrees is 1/9 of the world: 228 px wide at zoom 3
        let tight = Viewport::Fit { bounds, padding_px: 0 }.camera(256, 256, 18).unwrap();
        let padded = Viewport::Fit { bounds, padding_px: 20 }.camera(256, 256, 18).unwrap();
        assert_eq!(tight.zoom, 3);
        assert_eq!(padded.zoom, 2);
    }

    #[test]
    fn test_point_uses_max_zoom() {
        let bounds = ViewBounds {
            bbox: WGS84BoundingBox::from(&WGS84Point::new(5.0, 5.0), &WGS84Point::new(5.0, 5.0)),
        };
        let cam = Viewport::Fit { bounds, padding_px: 20 }.camera(800, 600, 17).unwrap();
        assert_eq!(cam.zoom, 17);
        assert_abs_diff_eq!(cam.center.lon, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(cam.center.lat, 5.0, epsilon = 1e-9);
    }
}
