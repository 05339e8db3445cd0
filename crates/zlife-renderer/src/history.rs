//! 视口撤销历史
//!
//! 每次平移、缩放或居中之前保存一份视口快照，撤销时后进先出地恢复。
//! 载入新宇宙时整体清空。

use crate::cell::CellWidth;
use bigdecimal::BigDecimal;

/// 视口快照
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasState {
    pub cell: CellWidth,
    pub offset_x: BigDecimal,
    pub offset_y: BigDecimal,
}

#[derive(Debug, Clone, Default)]
pub struct UndoHistory {
    states: Vec<CanvasState>,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: CanvasState) {
        self.states.push(state);
    }

    pub fn pop(&mut self) -> Option<CanvasState> {
        self.states.pop()
    }

    pub fn peek(&self) -> Option<&CanvasState> {
        self.states.last()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
