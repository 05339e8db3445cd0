//! ZLife 核心数值层
//!
//! 为无限细胞自动机宇宙提供不会溢出的数值基础：
//! - `FlexInt`: 自适应精度整数，按需在 32 位、64 位与任意精度之间提升
//! - `Bounds`: 以 `FlexInt` 表示的包含式边界矩形
//! - `QuadNode`: 渲染器消费的四叉树节点接口
//!
//! # 示例
//!
//! ```rust
//! use zlife_core::prelude::*;
//!
//! let max = FlexInt::from(i32::MAX);
//! let sum = &max + &FlexInt::ONE;
//!
//! assert_eq!(sum.tier(), Tier::Wide);
//! assert_eq!(sum, FlexInt::from(i64::from(i32::MAX) + 1));
//! ```

pub mod bounds;
pub mod error;
pub mod flex_int;
pub mod math;
pub mod node;

pub use bounds::Bounds;
pub use error::FlexIntError;
pub use flex_int::{FlexInt, Tier};

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::bounds::Bounds;
    pub use crate::error::FlexIntError;
    pub use crate::flex_int::{FlexInt, Tier};
    pub use crate::math::{pow2, Point2, ScreenRect, Vector2, DEFAULT_PRECISION};
    pub use crate::node::{root_bounds, Node, QuadNode};
}
