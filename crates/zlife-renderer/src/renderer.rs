//! 四叉树绘制
//!
//! 递归遍历节点图，跳过空子树与完全在画布外的子树。被裁剪的子树不会被访问，
//! 所以每帧的开销只与可见结构有关，与宇宙总大小无关。

use crate::surface::DrawSurface;
use crate::transform::CanvasTransform;
use bigdecimal::BigDecimal;
use num_traits::{One, Zero};
use zlife_core::math::{pow2, truncate_to_f32};
use zlife_core::node::QuadNode;

/// 单帧遍历统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// 访问过的节点数
    pub visited: usize,
    /// 因在画布外而被裁剪的节点数
    pub culled: usize,
    /// 发出的填充命令数
    pub filled: usize,
}

/// 节点渲染器
///
/// 只在一次绘制调用内存在，不持有任何节点引用。
pub struct NodeRenderer<'a, S: DrawSurface + ?Sized> {
    transform: &'a mut CanvasTransform,
    surface: &'a mut S,
    cell_width: f32,
    border_width: f32,
    zero: BigDecimal,
    one: BigDecimal,
    stats: RenderStats,
}

impl<'a, S: DrawSurface + ?Sized> NodeRenderer<'a, S> {
    pub fn new(transform: &'a mut CanvasTransform, surface: &'a mut S) -> Self {
        let cell_width = transform.cell_width();
        let border_width = transform.config().cell_border_ratio * cell_width;
        Self {
            transform,
            surface,
            cell_width,
            border_width,
            zero: BigDecimal::zero(),
            one: BigDecimal::one(),
            stats: RenderStats::default(),
        }
    }

    /// 绘制以宇宙原点为中心的根节点，边长 `2^level × cellWidth`
    pub fn draw_root<N: QuadNode>(&mut self, root: &N) {
        let size = BigDecimal::new(pow2(root.level()).clone(), 0) * self.transform.cell().to_decimal();
        let origin = -self.transform.half_size(&size);
        self.draw_node(root, &size, &origin, &origin);
    }

    /// 绘制一个节点
    ///
    /// `left`/`top` 是尚未加上画布偏移的像素坐标。
    pub fn draw_node<N: QuadNode>(
        &mut self,
        node: &N,
        size: &BigDecimal,
        left: &BigDecimal,
        top: &BigDecimal,
    ) {
        self.stats.visited += 1;

        if node.population().is_zero() {
            return;
        }

        let screen_left = left + self.transform.offset_x();
        let screen_top = top + self.transform.offset_y();

        if &screen_left + size < self.zero
            || &screen_top + size < self.zero
            || &screen_left >= self.transform.canvas_width()
            || &screen_top >= self.transform.canvas_height()
        {
            self.stats.culled += 1;
            return;
        }

        if *size <= self.one {
            // 小于一个像素，画一个单位点即可
            self.fill(&screen_left, &screen_top, 1.0);
        } else if node.level() == 0 {
            if node.population().is_one() {
                self.fill(&screen_left, &screen_top, self.cell_width);
            }
        } else if let Some([nw, ne, sw, se]) = node.children() {
            let half = self.transform.half_size(size);
            let mid_x = left + &half;
            let mid_y = top + &half;
            self.draw_node(nw, &half, left, top);
            self.draw_node(ne, &half, &mid_x, top);
            self.draw_node(sw, &half, left, &mid_y);
            self.draw_node(se, &half, &mid_x, &mid_y);
        }
    }

    fn fill(&mut self, left: &BigDecimal, top: &BigDecimal, size: f32) {
        self.surface.fill_square(
            truncate_to_f32(left),
            truncate_to_f32(top),
            size - self.border_width,
        );
        self.stats.filled += 1;
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    pub fn finish(self) -> RenderStats {
        self.stats
    }
}
