//! 图案边界
//!
//! 四个角都是包含式的：只有一个活细胞的图案宽高都是 1。

use crate::flex_int::FlexInt;
use crate::math::{decimal_from_f32, decimal_to_f32, ScreenRect};
use bigdecimal::BigDecimal;

/// 包含式边界矩形（宇宙坐标）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    pub left: FlexInt,
    pub top: FlexInt,
    pub right: FlexInt,
    pub bottom: FlexInt,
}

impl Bounds {
    pub fn new(left: FlexInt, top: FlexInt, right: FlexInt, bottom: FlexInt) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// 空宇宙报告的边界（全为 0）
    pub fn empty() -> Self {
        Self::default()
    }

    /// 包含式宽度 `right - left + 1`
    pub fn width(&self) -> FlexInt {
        (&self.right - &self.left).add_one()
    }

    /// 包含式高度 `bottom - top + 1`
    pub fn height(&self) -> FlexInt {
        (&self.bottom - &self.top).add_one()
    }

    /// 扩展边界以包含一个细胞
    pub fn include(&mut self, x: &FlexInt, y: &FlexInt) {
        if *x < self.left {
            self.left = x.clone();
        }
        if *x > self.right {
            self.right = x.clone();
        }
        if *y < self.top {
            self.top = y.clone();
        }
        if *y > self.bottom {
            self.bottom = y.clone();
        }
    }

    /// 映射到屏幕矩形
    pub fn screen_rect(
        &self,
        cell_width: f32,
        offset_x: &BigDecimal,
        offset_y: &BigDecimal,
    ) -> ScreenRect {
        let cell = decimal_from_f32(cell_width);
        let x = self.left.to_decimal() * &cell + offset_x;
        let y = self.top.to_decimal() * &cell + offset_y;
        let width = self.width().to_decimal() * &cell;
        let height = self.height().to_decimal() * &cell;

        ScreenRect::new(
            decimal_to_f32(&x),
            decimal_to_f32(&y),
            decimal_to_f32(&width),
            decimal_to_f32(&height),
        )
    }
}
