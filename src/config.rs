use crate::point::WGS84Point;

/// Map and preview settings. The binary overrides these from its flags.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    /// Margin kept free around fitted bounds, in pixels.
    pub padding_px: u32,
    pub default_center: WGS84Point,
    pub default_zoom: u8,
    pub max_zoom: u8,
    pub width_px: u32,
    pub height_px: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            padding_px: 20,
            default_center: WGS84Point::new(0.0, 20.0),
            default_zoom: 2,
            max_zoom: 18,
            width_px: 800,
            height_px: 600,
        }
    }
}
