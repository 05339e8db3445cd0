//! ZLife 视口与渲染
//!
//! 把指数级大小、坐标无界的四叉树宇宙映射到有限的像素画布：
//! - `CanvasTransform`: 高精度十进制偏移、量化细胞宽度、撤销历史
//! - `NodeRenderer`: 带视口裁剪的递归遍历，只访问可见结构
//! - `LifeView`: 面向宿主的操作集合（居中、缩放、平移、撤销、渲染）
//!
//! 光栅化由宿主通过 `DrawSurface` 完成。
//!
//! # 示例
//!
//! ```rust
//! use std::sync::Arc;
//! use zlife_core::prelude::*;
//! use zlife_renderer::prelude::*;
//!
//! let alive = Arc::new(Node::leaf(true));
//! let dead = Arc::new(Node::leaf(false));
//! let root = Node::branch(alive.clone(), dead.clone(), dead, alive);
//!
//! let mut view = LifeView::new(800.0, 600.0);
//! view.setup_new_life(&root_bounds(&root));
//!
//! let mut surface = RecordingSurface::new();
//! let frame = view.render(&root, true, &mut surface);
//! assert_eq!(frame.stats.filled, 2);
//! ```

pub mod cell;
pub mod config;
pub mod history;
pub mod renderer;
pub mod surface;
pub mod transform;
pub mod view;

pub use config::{ConfigError, ViewportConfig};
pub use renderer::{NodeRenderer, RenderStats};
pub use surface::{DrawSurface, RecordingSurface};
pub use transform::CanvasTransform;
pub use view::{FrameOutput, LifeView};

pub mod prelude {
    pub use crate::cell::CellWidth;
    pub use crate::config::{ConfigError, ViewportConfig};
    pub use crate::history::{CanvasState, UndoHistory};
    pub use crate::renderer::{NodeRenderer, RenderStats};
    pub use crate::surface::{DrawSurface, FillCommand, RecordingSurface};
    pub use crate::transform::CanvasTransform;
    pub use crate::view::{FrameOutput, LifeView};
}
