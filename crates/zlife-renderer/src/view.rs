//! 宿主接口
//!
//! `LifeView` 把画布变换与节点渲染器组合起来，对外只暴露 f32 像素坐标。
//! 宿主每帧调用一次 `render`，交互回调调用平移、缩放、撤销等操作。

use crate::config::{ConfigError, ViewportConfig};
use crate::renderer::{NodeRenderer, RenderStats};
use crate::surface::DrawSurface;
use crate::transform::CanvasTransform;
use tracing::{debug, trace};
use zlife_core::math::{Point2, Vector2};
use zlife_core::node::{root_bounds, QuadNode};
use zlife_core::Bounds;

/// 一帧的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    /// 宿主绘制图案缓冲时应使用的位置；真正绘制之后为零
    pub position: Vector2,
    pub stats: RenderStats,
}

#[derive(Debug, Clone)]
pub struct LifeView {
    transform: CanvasTransform,
    draw_bounds: bool,
}

impl LifeView {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            transform: CanvasTransform::new(width, height),
            draw_bounds: false,
        }
    }

    pub fn with_config(
        config: ViewportConfig,
        width: f32,
        height: f32,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            transform: CanvasTransform::with_config(config, width, height)?,
            draw_bounds: false,
        })
    }

    pub fn transform(&self) -> &CanvasTransform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut CanvasTransform {
        &mut self.transform
    }

    /// 载入新宇宙：适配屏幕，旧的撤销历史作废
    pub fn setup_new_life(&mut self, bounds: &Bounds) {
        self.transform.center(bounds, true, false);
        self.transform.clear_history();
    }

    pub fn center(&mut self, bounds: &Bounds, fit_bounds: bool, save_state: bool) {
        self.transform.center(bounds, fit_bounds, save_state);
    }

    /// 缩放到整个图案可见
    pub fn fit_to_screen(&mut self, bounds: &Bounds) {
        self.transform.center(bounds, true, true);
    }

    /// 保持当前缩放，把图案移到画面中央
    pub fn center_view(&mut self, bounds: &Bounds) {
        self.transform.center(bounds, false, true);
    }

    pub fn zoom(&mut self, zoom_in: bool, x: f32, y: f32) {
        self.transform.zoom(zoom_in, Point2::new(x, y));
    }

    pub fn zoom_center(&mut self, zoom_in: bool) {
        self.transform.zoom_center(zoom_in);
    }

    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.transform.move_by(Vector2::new(dx, dy));
        debug!(
            "Moved view by ({}, {}), pending movement ({}, {})",
            dx,
            dy,
            self.transform.pending_movement().x,
            self.transform.pending_movement().y
        );
    }

    pub fn undo(&mut self) -> bool {
        self.transform.undo()
    }

    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.transform.on_resize(width, height);
    }

    pub fn clear_history(&mut self) {
        self.transform.clear_history();
        debug!("Viewport history cleared");
    }

    pub fn toggle_draw_bounds(&mut self) {
        self.draw_bounds = !self.draw_bounds;
    }

    pub fn is_drawing_bounds(&self) -> bool {
        self.draw_bounds
    }

    /// 开启边界显示时描出图案边界，返回是否绘制
    pub fn render_bounds<S: DrawSurface + ?Sized>(&self, bounds: &Bounds, surface: &mut S) -> bool {
        if !self.draw_bounds {
            return false;
        }
        let rect = bounds.screen_rect(
            self.transform.cell_width(),
            self.transform.offset_x(),
            self.transform.offset_y(),
        );
        surface.stroke_rect(rect);
        true
    }

    /// 渲染一帧
    ///
    /// `should_draw` 为假时不遍历节点，只返回宿主复用旧缓冲所需的偏移。
    /// 开启边界显示时，真正绘制的帧会在细胞之后描出根节点的边界。
    pub fn render<N, S>(&mut self, root: &N, should_draw: bool, surface: &mut S) -> FrameOutput
    where
        N: QuadNode,
        S: DrawSurface + ?Sized,
    {
        if !should_draw {
            return FrameOutput {
                position: self.transform.pending_movement(),
                stats: RenderStats::default(),
            };
        }

        let stats = {
            let mut renderer = NodeRenderer::new(&mut self.transform, surface);
            renderer.draw_root(root);
            renderer.finish()
        };
        self.transform.reset_pending_movement();

        if self.draw_bounds && root.population().is_not_zero() {
            self.render_bounds(&root_bounds(root), surface);
        }

        trace!(
            "Rendered level {} root: {} visited, {} culled, {} filled",
            root.level(),
            stats.visited,
            stats.culled,
            stats.filled
        );

        FrameOutput {
            position: Vector2::zeros(),
            stats,
        }
    }
}
