use crate::error::{Error, Result};
use crate::point::{MercatorBoundingBox, MercatorPoint, WGS84BoundingBox, WGS84Point};

/// Equatorial circumference of the EPSG:3857 sphere, in meters.
pub const WORLD_SIZE: f64 = 2.0 * std::f64::consts::PI * 6378137.0;

/// Web Mercator cannot represent the poles.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_6;

pub struct WebMercatorProjection {
    wgs84_spec: proj4rs::proj::Proj,
    dst_spec: proj4rs::proj::Proj,
}

impl WebMercatorProjection {
    pub fn make() -> Result<WebMercatorProjection> {
        // EPSG:3857, what slippy map tiles use
        use proj4rs::proj::Proj;
        let spec = "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs";
        let dst_spec = Proj::from_proj_string(spec).map_err(|e| Error::Projection(e.to_string()))?;

        // lon/lat are taken as-is on the same sphere, no datum shift
        let spec = "+proj=longlat +a=6378137 +b=6378137 +no_defs";
        let wgs84_spec =
            Proj::from_proj_string(spec).map_err(|e| Error::Projection(e.to_string()))?;
        Ok(WebMercatorProjection {
            wgs84_spec,
            dst_spec,
        })
    }

    pub fn project(&self, wgs: &WGS84Point) -> Result<MercatorPoint> {
        let lat = wgs.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        if lat != wgs.lat {
            log::warn!("clamped to mercator range: {}", wgs);
        }
        let mut p = (wgs.lon.to_radians(), lat.to_radians());
        proj4rs::transform::transform(&self.wgs84_spec, &self.dst_spec, &mut p)
            .map_err(|e| Error::Projection(e.to_string()))?;
        Ok(MercatorPoint { x: p.0, y: p.1 })
    }

    pub fn unproject(&self, m: &MercatorPoint) -> Result<WGS84Point> {
        let mut p = (m.x, m.y);
        proj4rs::transform::transform(&self.dst_spec, &self.wgs84_spec, &mut p)
            .map_err(|e| Error::Projection(e.to_string()))?;
        Ok(WGS84Point {
            lon: p.0.to_degrees(),
            lat: p.1.to_degrees(),
        })
    }

    pub fn project_bbox(&self, b: &WGS84BoundingBox) -> Result<MercatorBoundingBox> {
        Ok(MercatorBoundingBox {
            min: self.project(&b.min)?,
            max: self.project(&b.max)?,
        })
    }
}
