//! 画布变换
//!
//! 维护宇宙坐标到像素画布的映射：`screen = universe × cellWidth + offset`。
//!
//! 偏移量与画布尺寸全部使用 `BigDecimal`，在很深的缩放层级上反复平移、缩放
//! 也不会累积漂移。像素输入（锚点、平移量、窗口尺寸）以 f32 进入，
//! 按最短十进制表示转换。

use crate::cell::CellWidth;
use crate::config::{ConfigError, ViewportConfig};
use crate::history::{CanvasState, UndoHistory};
use bigdecimal::BigDecimal;
use num_traits::{One, Zero};
use std::collections::HashMap;
use tracing::debug;
use zlife_core::math::{decimal_from_f32, decimal_to_f32, Point2, Vector2};
use zlife_core::Bounds;

#[derive(Debug, Clone)]
pub struct CanvasTransform {
    config: ViewportConfig,
    cell: CellWidth,
    offset_x: BigDecimal,
    offset_y: BigDecimal,
    canvas_width: BigDecimal,
    canvas_height: BigDecimal,

    /// 自上次真正绘制以来累积的平移，宿主据此移动旧的图案缓冲
    pending_movement: Vector2,

    /// 尺寸 -> 一半，只增不删；条目数约等于遇到的四叉树层数
    half_sizes: HashMap<BigDecimal, BigDecimal>,

    history: UndoHistory,
}

impl CanvasTransform {
    pub fn new(width: f32, height: f32) -> Self {
        Self::from_valid_config(ViewportConfig::default(), width, height)
    }

    /// 使用自定义配置，配置先经过校验
    pub fn with_config(
        config: ViewportConfig,
        width: f32,
        height: f32,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config, width, height))
    }

    fn from_valid_config(config: ViewportConfig, width: f32, height: f32) -> Self {
        let cell = CellWidth::new(config.default_cell_width, &config);
        Self {
            config,
            cell,
            offset_x: BigDecimal::zero(),
            offset_y: BigDecimal::zero(),
            canvas_width: decimal_from_f32(width),
            canvas_height: decimal_from_f32(height),
            pending_movement: Vector2::zeros(),
            half_sizes: HashMap::new(),
            history: UndoHistory::new(),
        }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn cell(&self) -> CellWidth {
        self.cell
    }

    pub fn cell_width(&self) -> f32 {
        self.cell.get()
    }

    pub fn offset_x(&self) -> &BigDecimal {
        &self.offset_x
    }

    pub fn offset_y(&self) -> &BigDecimal {
        &self.offset_y
    }

    pub fn set_offset(&mut self, offset_x: BigDecimal, offset_y: BigDecimal) {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
    }

    pub fn canvas_width(&self) -> &BigDecimal {
        &self.canvas_width
    }

    pub fn canvas_height(&self) -> &BigDecimal {
        &self.canvas_height
    }

    pub fn pending_movement(&self) -> Vector2 {
        self.pending_movement
    }

    /// 真正绘制一帧后调用，新缓冲已经包含了累积的平移
    pub fn reset_pending_movement(&mut self) {
        self.pending_movement = Vector2::zeros();
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    /// 当前视口快照
    pub fn state(&self) -> CanvasState {
        CanvasState {
            cell: self.cell,
            offset_x: self.offset_x.clone(),
            offset_y: self.offset_y.clone(),
        }
    }

    pub fn save_state(&mut self) {
        let state = self.state();
        self.history.push(state);
    }

    /// 撤销上一次视口操作，历史为空时返回 `false`
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.cell = previous.cell;
                self.offset_x = previous.offset_x;
                self.offset_y = previous.offset_y;
                debug!(
                    "Undo viewport change, cell width {}, {} states left",
                    self.cell.get(),
                    self.history.len()
                );
                true
            }
            None => false,
        }
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// 把图案居中，`fit_bounds` 时同时选择细胞宽度让图案占满画布的 `fit_margin`
    pub fn center(&mut self, bounds: &Bounds, fit_bounds: bool, save_state: bool) {
        if save_state {
            self.save_state();
        }

        let pattern_width = bounds.width().to_decimal();
        let pattern_height = bounds.height().to_decimal();

        if fit_bounds {
            let width_ratio = self.fit_ratio(&self.canvas_width, &pattern_width);
            let height_ratio = self.fit_ratio(&self.canvas_height, &pattern_height);
            let ratio = width_ratio.min(height_ratio);
            let fitted = decimal_to_f32(&ratio) * self.config.fit_margin;
            self.cell = CellWidth::new(fitted, &self.config);
        }

        let cell = self.cell.to_decimal();
        let drawing_width = &pattern_width * &cell;
        let drawing_height = &pattern_height * &cell;

        self.offset_x =
            self.canvas_width.half() - drawing_width.half() - bounds.left.to_decimal() * &cell;
        self.offset_y =
            self.canvas_height.half() - drawing_height.half() - bounds.top.to_decimal() * &cell;

        debug!(
            "Centered pattern {}x{}, fit: {}, cell width {}",
            pattern_width,
            pattern_height,
            fit_bounds,
            self.cell.get()
        );
    }

    /// 画布与图案尺寸之比；图案尺寸不为正时取 1
    fn fit_ratio(&self, canvas: &BigDecimal, pattern: &BigDecimal) -> BigDecimal {
        if *pattern > BigDecimal::zero() {
            self.round(canvas / pattern)
        } else {
            BigDecimal::one()
        }
    }

    /// 以画布像素坐标 `anchor` 为不动点缩放
    pub fn zoom(&mut self, zoom_in: bool, anchor: Point2) {
        self.save_state();

        let previous = self.cell;
        self.cell = previous.zoomed(zoom_in, &self.config);

        if previous.get() > 0.0 {
            let zoom_factor = self.round(self.cell.to_decimal() / previous.to_decimal());
            let keep = BigDecimal::one() - zoom_factor;

            let dx = self.round(&keep * (decimal_from_f32(anchor.x) - &self.offset_x));
            let dy = self.round(&keep * (decimal_from_f32(anchor.y) - &self.offset_y));
            self.offset_x += dx;
            self.offset_y += dy;
        }

        debug!(
            "Zoom {} at ({}, {}), cell width {} -> {}",
            if zoom_in { "in" } else { "out" },
            anchor.x,
            anchor.y,
            previous.get(),
            self.cell.get()
        );
    }

    /// 以画布中心为不动点缩放
    pub fn zoom_center(&mut self, zoom_in: bool) {
        let anchor = Point2::new(
            decimal_to_f32(&self.canvas_width.half()),
            decimal_to_f32(&self.canvas_height.half()),
        );
        self.zoom(zoom_in, anchor);
    }

    /// 平移画布
    pub fn move_by(&mut self, delta: Vector2) {
        self.save_state();
        self.offset_x += decimal_from_f32(delta.x);
        self.offset_y += decimal_from_f32(delta.y);
        self.pending_movement += delta;
    }

    /// 窗口尺寸变化后保持画面中心对应的宇宙点不变
    pub fn on_resize(&mut self, width: f32, height: f32) {
        let (before_x, before_y) = self.visible_center();

        self.canvas_width = decimal_from_f32(width);
        self.canvas_height = decimal_from_f32(height);

        let (after_x, after_y) = self.visible_center();
        self.offset_x += after_x - before_x;
        self.offset_y += after_y - before_y;

        debug!("Canvas resized to {}x{}", width, height);
    }

    /// 画布中心相对偏移原点的位置 `canvas / 2 - offset`
    pub fn visible_center(&self) -> (BigDecimal, BigDecimal) {
        (
            self.canvas_width.half() - &self.offset_x,
            self.canvas_height.half() - &self.offset_y,
        )
    }

    /// 像素坐标转换为宇宙坐标（以细胞为单位，未取整）
    pub fn screen_to_universe(&self, point: Point2) -> (BigDecimal, BigDecimal) {
        let cell = self.cell.to_decimal();
        if cell.is_zero() {
            return (BigDecimal::zero(), BigDecimal::zero());
        }
        let x = self.round((decimal_from_f32(point.x) - &self.offset_x) / &cell);
        let y = self.round((decimal_from_f32(point.y) - &self.offset_y) / &cell);
        (x, y)
    }

    /// 带缓存的精确减半
    pub fn half_size(&mut self, size: &BigDecimal) -> BigDecimal {
        self.half_sizes
            .entry(size.clone())
            .or_insert_with(|| size.half())
            .clone()
    }

    pub fn half_size_cache_len(&self) -> usize {
        self.half_sizes.len()
    }

    fn round(&self, value: BigDecimal) -> BigDecimal {
        value.with_prec(self.config.decimal_precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use zlife_core::FlexInt;

    fn bounds(left: i32, top: i32, right: i32, bottom: i32) -> Bounds {
        Bounds::new(left.into(), top.into(), right.into(), bottom.into())
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_fit_ten_by_ten_into_square_canvas() {
        let mut transform = CanvasTransform::new(1000.0, 1000.0);
        transform.center(&bounds(0, 0, 9, 9), true, false);

        assert_eq!(transform.cell_width(), 90.0);
        assert_eq!(*transform.offset_x(), BigDecimal::from(50));
        assert_eq!(*transform.offset_y(), BigDecimal::from(50));
        assert!(transform.history().is_empty());
    }

    #[test]
    fn test_fit_respects_margin_on_both_axes() {
        let mut transform = CanvasTransform::new(800.0, 600.0);
        transform.center(&bounds(-20, -5, 79, 44), true, true);

        // 取整最多让每个细胞多出半个像素
        let cell = f64::from(transform.cell_width());
        assert_eq!(cell, 7.0);
        assert!(100.0 * cell <= 0.9 * 800.0 + 0.5 * 100.0);
        assert!(50.0 * cell <= 0.9 * 600.0 + 0.5 * 50.0);
        assert_eq!(transform.history().len(), 1);
    }

    #[test]
    fn test_center_places_pattern_symmetrically() {
        let mut transform = CanvasTransform::new(1000.0, 500.0);
        transform.center(&bounds(-10, 3, 9, 12), true, false);

        let cell = transform.cell().to_decimal();
        let left = BigDecimal::from(-10) * &cell + transform.offset_x();
        let right = BigDecimal::from(10) * &cell + transform.offset_x();
        let top = BigDecimal::from(3) * &cell + transform.offset_y();
        let bottom = BigDecimal::from(13) * &cell + transform.offset_y();

        assert_eq!(&left + &right, BigDecimal::from(1000));
        assert_eq!(&top + &bottom, BigDecimal::from(500));
    }

    #[test]
    fn test_center_without_fit_keeps_cell_width() {
        let mut transform = CanvasTransform::new(100.0, 100.0);
        transform.center(&bounds(0, 0, 0, 0), false, false);
        assert_eq!(transform.cell_width(), 4.0);
        assert_eq!(*transform.offset_x(), BigDecimal::from(48));
    }

    #[test]
    fn test_degenerate_pattern_fits_with_unit_ratio() {
        let mut transform = CanvasTransform::new(1000.0, 1000.0);
        transform.center(&bounds(5, 5, 0, 0), true, false);
        assert_eq!(transform.cell_width(), 0.9);
    }

    #[test]
    fn test_single_degenerate_axis() {
        // 另一轴的比例更小时仍由它决定
        let mut transform = CanvasTransform::new(100.0, 100.0);
        transform.center(&bounds(0, 5, 399, 0), true, false);
        assert_eq!(transform.cell_width(), 0.25 * 0.9);

        // 另一轴的比例更大时取 1
        let mut transform = CanvasTransform::new(1000.0, 1000.0);
        transform.center(&bounds(0, 5, 9, 0), true, false);
        assert_eq!(transform.cell_width(), 0.9);
    }

    #[test]
    fn test_with_config_rejects_invalid_config() {
        let config = ViewportConfig {
            cell_rounding_factor: 0.0,
            ..ViewportConfig::default()
        };
        assert!(matches!(
            CanvasTransform::with_config(config, 100.0, 100.0),
            Err(ConfigError::InvalidValue {
                field: "cell_rounding_factor",
                ..
            })
        ));
    }

    #[test]
    fn test_fit_beyond_f32_range_keeps_viewport_usable() {
        let far = FlexInt::from(zlife_core::math::pow2(170));
        let b = Bounds::new(-&far, -&far, far.clone(), far);
        let mut transform = CanvasTransform::new(1000.0, 1000.0);
        transform.center(&b, true, false);
        assert_eq!(transform.cell_width(), f32::MIN_POSITIVE);

        let offset_before = transform.offset_x().clone();
        for _ in 0..50 {
            transform.zoom_center(true);
        }
        assert!(transform.cell_width() > f32::MIN_POSITIVE * 1000.0);
        assert_ne!(*transform.offset_x(), offset_before);
    }

    #[test]
    fn test_fit_huge_pattern() {
        let far = FlexInt::from(zlife_core::math::pow2(100));
        let b = Bounds::new(-&far, -&far, far.clone(), far);
        let mut transform = CanvasTransform::new(1000.0, 1000.0);
        transform.center(&b, true, false);

        assert!(transform.cell_width() > 0.0);
        assert!(transform.cell_width() < 1e-20);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut transform = CanvasTransform::new(1000.0, 1000.0);
        transform.set_offset(dec("123.5"), dec("-40.25"));
        let anchor = Point2::new(300.0, 700.0);
        let before = transform.screen_to_universe(anchor);

        transform.zoom(true, anchor);
        assert_eq!(transform.cell_width(), 5.0);
        let after = transform.screen_to_universe(anchor);

        assert_eq!(before, after);
    }

    #[test]
    fn test_zoom_then_undo_restores_exactly() {
        let mut transform = CanvasTransform::new(640.0, 480.0);
        transform.center(&bounds(-3, -3, 3, 3), true, false);
        let before = transform.state();
        let before_text = (before.offset_x.to_string(), before.offset_y.to_string());

        transform.zoom(false, Point2::new(17.0, 411.0));
        assert_ne!(transform.state(), before);

        assert!(transform.undo());
        let after = transform.state();
        assert_eq!(after, before);
        assert_eq!(
            (after.offset_x.to_string(), after.offset_y.to_string()),
            before_text
        );
        assert!(!transform.undo());
    }

    #[test]
    fn test_move_accumulates_pending_movement() {
        let mut transform = CanvasTransform::new(100.0, 100.0);
        transform.move_by(Vector2::new(3.0, -2.0));
        transform.move_by(Vector2::new(0.5, 0.25));

        assert_eq!(*transform.offset_x(), dec("3.5"));
        assert_eq!(*transform.offset_y(), dec("-1.75"));
        assert_eq!(transform.pending_movement(), Vector2::new(3.5, -1.75));
        assert_eq!(transform.history().len(), 2);

        transform.reset_pending_movement();
        assert_eq!(transform.pending_movement(), Vector2::zeros());
    }

    #[test]
    fn test_resize_preserves_visible_center() {
        let mut transform = CanvasTransform::new(1000.0, 800.0);
        transform.set_offset(dec("-12345678901234567890.125"), dec("77.5"));
        let center_before = transform.visible_center();
        let universe_before = transform.screen_to_universe(Point2::new(500.0, 400.0));

        transform.on_resize(1337.0, 411.0);

        assert_eq!(transform.visible_center(), center_before);
        assert_eq!(
            transform.screen_to_universe(Point2::new(668.5, 205.5)),
            universe_before
        );
    }

    #[test]
    fn test_half_size_cache() {
        let mut transform = CanvasTransform::new(100.0, 100.0);
        let size = dec("1024.5");
        assert_eq!(transform.half_size(&size), dec("512.25"));
        assert_eq!(transform.half_size(&size), dec("512.25"));
        assert_eq!(transform.half_size_cache_len(), 1);
        transform.half_size(&dec("7"));
        assert_eq!(transform.half_size_cache_len(), 2);
    }

    #[test]
    fn test_clear_history() {
        let mut transform = CanvasTransform::new(100.0, 100.0);
        transform.zoom_center(true);
        transform.zoom_center(true);
        transform.clear_history();
        assert!(!transform.undo());
        assert_eq!(transform.cell_width(), 6.0);
    }
}
