use core::fmt;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WGS84Point {
    pub lon: f64,
    pub lat: f64,
}

impl WGS84Point {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<geo::Coord<f64>> for WGS84Point {
    fn from(c: geo::Coord<f64>) -> Self {
        Self { lon: c.x, lat: c.y }
    }
}

impl fmt::Display for WGS84Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wgs(lat: {:.5}, lon: {:.5})", self.lat, self.lon)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MercatorPoint {
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for MercatorPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mercator(x: {:.2}, y: {:.2})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WGS84BoundingBox {
    pub min: WGS84Point,
    pub max: WGS84Point,
}

impl WGS84BoundingBox {
    pub fn from(p1: &WGS84Point, p2: &WGS84Point) -> Self {
        let min = WGS84Point {
            lon: p1.lon.min(p2.lon),
            lat: p1.lat.min(p2.lat),
        };
        let max = WGS84Point {
            lon: p1.lon.max(p2.lon),
            lat: p1.lat.max(p2.lat),
        };
        Self { min, max }
    }
    pub fn from_rect(r: &geo::Rect<f64>) -> Self {
        WGS84BoundingBox {
            min: r.min().into(),
            max: r.max().into(),
        }
    }
    pub fn union(&self, other: &Self) -> Self {
        WGS84BoundingBox {
            min: WGS84Point {
                lon: self.min.lon.min(other.min.lon),
                lat: self.min.lat.min(other.min.lat),
            },
            max: WGS84Point {
                lon: self.max.lon.max(other.max.lon),
                lat: self.max.lat.max(other.max.lat),
            },
        }
    }
}

impl fmt::Display for WGS84BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wgsbbox(min: {}, max: {})", self.min, self.max)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MercatorBoundingBox {
    pub min: MercatorPoint,
    pub max: MercatorPoint,
}

impl MercatorBoundingBox {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
    pub fn center(&self) -> MercatorPoint {
        MercatorPoint {
            x: (self.min.x + self.max.x) / 2.0,
            y: (self.min.y + self.max.y) / 2.0,
        }
    }
}

impl fmt::Display for MercatorBoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mercatorbbox(min: {}, max: {})", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_orders_corners() {
        let b = WGS84BoundingBox::from(&WGS84Point::new(10.0, -5.0), &WGS84Point::new(-3.0, 7.0));
        assert_eq!(b.min, WGS84Point::new(-3.0, -5.0));
        assert_eq!(b.max, WGS84Point::new(10.0, 7.0));
    }

    #[test]
    fn test_union() {
        let a = WGS84BoundingBox::from(&WGS84Point::new(0.0, 0.0), &WGS84Point::new(1.0, 1.0));
        let b = WGS84BoundingBox::from(&WGS84Point::new(2.0, -1.0), &WGS84Point::new(3.0, 0.5));
        let u = a.union(&b);
        assert_eq!(u.min, WGS84Point::new(0.0, -1.0));
        assert_eq!(u.max, WGS84Point::new(3.0, 1.0));
    }
}
