//! 细胞宽度
//!
//! 细胞宽度乘以 `2^level` 就是整个宇宙在屏幕上的尺寸。

use crate::config::ViewportConfig;
use bigdecimal::BigDecimal;
use zlife_core::math::decimal_from_f32;

/// 量化后的细胞宽度（像素）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellWidth {
    width: f32,
}

impl CellWidth {
    /// 量化后的宽度不低于 `f32::MIN_POSITIVE`，极大的图案也不会让宽度下溢为 0
    pub fn new(width: f32, config: &ViewportConfig) -> Self {
        Self {
            width: config.quantize_cell_width(width).max(f32::MIN_POSITIVE),
        }
    }

    pub fn get(&self) -> f32 {
        self.width
    }

    pub fn to_decimal(&self) -> BigDecimal {
        decimal_from_f32(self.width)
    }

    /// 按配置的缩放倍数放大或缩小
    pub fn zoomed(&self, zoom_in: bool, config: &ViewportConfig) -> Self {
        let factor = if zoom_in {
            config.zoom_step
        } else {
            1.0 / config.zoom_step
        };
        Self::new(self.width * factor, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_steps_are_quantized() {
        let config = ViewportConfig::default();
        let cell = CellWidth::new(4.0, &config);

        assert_eq!(cell.zoomed(true, &config).get(), 5.0);
        assert_eq!(cell.zoomed(false, &config).get(), 3.0);
    }

    #[test]
    fn test_small_widths_keep_fraction() {
        let config = ViewportConfig::default();
        let cell = CellWidth::new(1.0, &config).zoomed(false, &config);
        assert_eq!(cell.get(), 0.8);
    }

    #[test]
    fn test_width_never_reaches_zero() {
        let config = ViewportConfig::default();
        assert_eq!(CellWidth::new(0.0, &config).get(), f32::MIN_POSITIVE);
        assert_eq!(CellWidth::new(1e-45, &config).get(), f32::MIN_POSITIVE);

        let floor = CellWidth::new(0.0, &config);
        assert_eq!(floor.zoomed(false, &config).get(), f32::MIN_POSITIVE);
        assert!(floor.zoomed(true, &config).get() > f32::MIN_POSITIVE);
    }
}
