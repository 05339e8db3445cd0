//! 数学工具
//!
//! 像素空间使用 nalgebra 的 f32 点与向量；宇宙空间使用 `BigDecimal`。

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

/// 像素坐标中的点
pub type Point2 = nalgebra::Point2<f32>;

/// 像素坐标中的位移
pub type Vector2 = nalgebra::Vector2<f32>;

/// 十进制运算保留的有效位数
///
/// 宇宙层级很深时精度不足会让图案在屏幕上跳动，不要降低。
pub const DEFAULT_PRECISION: u64 = 100;

/// 2 的幂表的上限层级，超出的请求被截断到 `2^UNIVERSE_LEVEL_LIMIT`
pub const UNIVERSE_LEVEL_LIMIT: u32 = 1024;

static POWERS_OF_TWO: OnceLock<Vec<BigInt>> = OnceLock::new();

/// 返回缓存的 `2^level`
pub fn pow2(level: u32) -> &'static BigInt {
    let powers = POWERS_OF_TWO.get_or_init(|| {
        let mut powers = Vec::with_capacity(UNIVERSE_LEVEL_LIMIT as usize + 1);
        let mut current = BigInt::from(1);
        for _ in 0..=UNIVERSE_LEVEL_LIMIT {
            powers.push(current.clone());
            current *= 2;
        }
        powers
    });
    &powers[level.min(UNIVERSE_LEVEL_LIMIT) as usize]
}

/// 以浮点数的最短十进制表示构造 `BigDecimal`
///
/// 非有限值按 0 处理。
pub fn decimal_from_f32(value: f32) -> BigDecimal {
    if !value.is_finite() {
        tracing::warn!("Non-finite pixel value {} treated as zero", value);
        return BigDecimal::zero();
    }
    BigDecimal::from_str(&value.to_string()).unwrap_or_else(|_| BigDecimal::zero())
}

/// 四舍五入到最接近的 f32
pub fn decimal_to_f32(value: &BigDecimal) -> f32 {
    value.to_f32().unwrap_or(0.0)
}

/// 向零截断后转为 f32
pub fn truncate_to_f32(value: &BigDecimal) -> f32 {
    decimal_to_f32(&value.with_scale(0))
}

/// 屏幕矩形（像素）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pow2_table() {
        assert_eq!(*pow2(0), BigInt::from(1));
        assert_eq!(*pow2(10), BigInt::from(1024));
        assert_eq!(*pow2(64), BigInt::from(u64::MAX) + 1);
        assert_eq!(pow2(5000), pow2(UNIVERSE_LEVEL_LIMIT));
    }

    #[test]
    fn test_decimal_from_f32_uses_shortest_repr() {
        assert_eq!(decimal_from_f32(0.1), BigDecimal::from_str("0.1").unwrap());
        assert_eq!(decimal_from_f32(90.0), BigDecimal::from(90));
        assert_eq!(decimal_from_f32(f32::NAN), BigDecimal::zero());
    }

    #[test]
    fn test_truncate_toward_zero() {
        assert_eq!(truncate_to_f32(&BigDecimal::from_str("12.9").unwrap()), 12.0);
        assert_eq!(truncate_to_f32(&BigDecimal::from_str("-3.7").unwrap()), -3.0);
    }
}
