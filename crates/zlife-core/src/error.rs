//! 数值错误定义

use crate::flex_int::Tier;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlexIntError {
    /// 仅在窄整数上有意义的运算被用在了更宽的层级上
    #[error("Operation `{op}` is only supported for narrow values, found a {tier} value")]
    UnsupportedOperation { op: &'static str, tier: Tier },

    #[error("Invalid integer literal: {0}")]
    Parse(String),
}
