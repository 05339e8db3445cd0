//! 绘制表面
//!
//! 实际的光栅化由宿主完成，渲染器只发出填充命令。

use zlife_core::math::ScreenRect;

/// 宿主提供的绘制表面
pub trait DrawSurface {
    /// 以 `(x, y)` 为左上角填充一个边长为 `width` 的正方形
    fn fill_square(&mut self, x: f32, y: f32, width: f32);

    /// 描边矩形，用于边界显示
    fn stroke_rect(&mut self, _rect: ScreenRect) {}
}

/// 一次填充命令
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillCommand {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

/// 只记录命令的表面，便于测试与离屏统计
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub fills: Vec<FillCommand>,
    pub strokes: Vec<ScreenRect>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.fills.clear();
        self.strokes.clear();
    }
}

impl DrawSurface for RecordingSurface {
    fn fill_square(&mut self, x: f32, y: f32, width: f32) {
        self.fills.push(FillCommand { x, y, width });
    }

    fn stroke_rect(&mut self, rect: ScreenRect) {
        self.strokes.push(rect);
    }
}
