//! 自适应精度整数
//!
//! `FlexInt` 在常见情况下就是一个机器整数，运算可能溢出时无损地提升到更宽的表示：
//! - 窄 (Narrow): `i32`
//! - 宽 (Wide): `i64`
//! - 任意精度 (Arbitrary): `BigInt`
//!
//! 每个值总是保存在能容纳它的最窄层级上。层级只是实现细节，
//! 相等、排序与哈希都只取决于数学上的值。

use crate::error::FlexIntError;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

/// 表示层级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    /// 32 位
    Narrow,
    /// 64 位
    Wide,
    /// 任意精度
    Arbitrary,
}

impl Tier {
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Narrow => "narrow",
            Tier::Wide => "wide",
            Tier::Arbitrary => "arbitrary",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
enum Repr {
    Narrow(i32),
    Wide(i64),
    Arbitrary(BigInt),
}

/// 自适应精度整数
///
/// 构造后不可变；提升总是产生新值。
#[derive(Debug, Clone)]
pub struct FlexInt {
    repr: Repr,
}

impl FlexInt {
    pub const ZERO: FlexInt = FlexInt { repr: Repr::Narrow(0) };
    pub const ONE: FlexInt = FlexInt { repr: Repr::Narrow(1) };

    const fn narrow(value: i32) -> Self {
        Self {
            repr: Repr::Narrow(value),
        }
    }

    /// 当前的表示层级
    pub fn tier(&self) -> Tier {
        match self.repr {
            Repr::Narrow(_) => Tier::Narrow,
            Repr::Wide(_) => Tier::Wide,
            Repr::Arbitrary(_) => Tier::Arbitrary,
        }
    }

    pub fn is_zero(&self) -> bool {
        match &self.repr {
            Repr::Narrow(v) => *v == 0,
            Repr::Wide(v) => *v == 0,
            Repr::Arbitrary(v) => v.sign() == num_bigint::Sign::NoSign,
        }
    }

    pub fn is_not_zero(&self) -> bool {
        !self.is_zero()
    }

    pub fn is_one(&self) -> bool {
        match &self.repr {
            Repr::Narrow(v) => *v == 1,
            Repr::Wide(v) => *v == 1,
            Repr::Arbitrary(v) => *v == BigInt::from(1),
        }
    }

    pub fn is_negative(&self) -> bool {
        match &self.repr {
            Repr::Narrow(v) => *v < 0,
            Repr::Wide(v) => *v < 0,
            Repr::Arbitrary(v) => v.is_negative(),
        }
    }

    pub fn add_one(&self) -> FlexInt {
        self + &FlexInt::ONE
    }

    /// 左移（仅窄整数）
    ///
    /// 用于位标志打包，结果按 32 位截断，移位量取低 5 位。
    pub fn shift_left(&self, bits: u32) -> Result<i32, FlexIntError> {
        let value = self.require_narrow("shift_left")?;
        Ok(value.wrapping_shl(bits))
    }

    /// 按位或（仅窄整数）
    pub fn bit_or(&self, other: &FlexInt) -> Result<i32, FlexIntError> {
        let a = self.require_narrow("bit_or")?;
        let b = other.require_narrow("bit_or")?;
        Ok(a | b)
    }

    /// 取出 32 位值（仅窄整数）
    pub fn to_i32(&self) -> Result<i32, FlexIntError> {
        self.require_narrow("to_i32")
    }

    /// 精确转换为高精度十进制数
    pub fn to_decimal(&self) -> BigDecimal {
        match &self.repr {
            Repr::Narrow(v) => BigDecimal::from(*v),
            Repr::Wide(v) => BigDecimal::from(*v),
            Repr::Arbitrary(v) => BigDecimal::new(v.clone(), 0),
        }
    }

    /// 近似转换为浮点数（用于显示）
    pub fn to_f64(&self) -> f64 {
        match &self.repr {
            Repr::Narrow(v) => f64::from(*v),
            Repr::Wide(v) => *v as f64,
            Repr::Arbitrary(v) => v.to_f64().unwrap_or(if v.is_negative() {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }),
        }
    }

    /// 转换为任意精度整数
    pub fn to_bigint(&self) -> BigInt {
        match &self.repr {
            Repr::Narrow(v) => BigInt::from(*v),
            Repr::Wide(v) => BigInt::from(*v),
            Repr::Arbitrary(v) => v.clone(),
        }
    }

    fn require_narrow(&self, op: &'static str) -> Result<i32, FlexIntError> {
        match self.repr {
            Repr::Narrow(v) => Ok(v),
            _ => Err(FlexIntError::UnsupportedOperation {
                op,
                tier: self.tier(),
            }),
        }
    }

    /// 窄或宽层级时的 64 位值
    fn as_i64(&self) -> Option<i64> {
        match &self.repr {
            Repr::Narrow(v) => Some(i64::from(*v)),
            Repr::Wide(v) => Some(*v),
            Repr::Arbitrary(_) => None,
        }
    }
}

/// 同号相加而结果符号翻转即为溢出
fn narrow_overflowed(a: i32, b: i32, sum: i32) -> bool {
    (a > 0 && b > 0 && sum < 0) || (a < 0 && b < 0 && sum >= 0)
}

fn wide_overflowed(a: i64, b: i64, sum: i64) -> bool {
    (a > 0 && b > 0 && sum < 0) || (a < 0 && b < 0 && sum >= 0)
}

fn add_narrow(a: i32, b: i32) -> FlexInt {
    let sum = a.wrapping_add(b);
    if narrow_overflowed(a, b, sum) {
        FlexInt::from(i64::from(a) + i64::from(b))
    } else {
        FlexInt::narrow(sum)
    }
}

fn add_wide(a: i64, b: i64) -> FlexInt {
    let sum = a.wrapping_add(b);
    if wide_overflowed(a, b, sum) {
        FlexInt::from(BigInt::from(a) + BigInt::from(b))
    } else {
        FlexInt::from(sum)
    }
}

impl From<i32> for FlexInt {
    fn from(value: i32) -> Self {
        FlexInt::narrow(value)
    }
}

impl From<i64> for FlexInt {
    fn from(value: i64) -> Self {
        match i32::try_from(value) {
            Ok(v) => FlexInt::narrow(v),
            Err(_) => FlexInt {
                repr: Repr::Wide(value),
            },
        }
    }
}

impl From<u32> for FlexInt {
    fn from(value: u32) -> Self {
        FlexInt::from(i64::from(value))
    }
}

impl From<u64> for FlexInt {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => FlexInt::from(v),
            Err(_) => FlexInt::from(BigInt::from(value)),
        }
    }
}

impl From<usize> for FlexInt {
    fn from(value: usize) -> Self {
        FlexInt::from(value as u64)
    }
}

impl From<BigInt> for FlexInt {
    fn from(value: BigInt) -> Self {
        if let Some(v) = value.to_i32() {
            FlexInt::narrow(v)
        } else if let Some(v) = value.to_i64() {
            FlexInt {
                repr: Repr::Wide(v),
            }
        } else {
            FlexInt {
                repr: Repr::Arbitrary(value),
            }
        }
    }
}

impl From<&BigInt> for FlexInt {
    fn from(value: &BigInt) -> Self {
        FlexInt::from(value.clone())
    }
}

impl FromStr for FlexInt {
    type Err = FlexIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigInt::from_str(s.trim())
            .map(FlexInt::from)
            .map_err(|e| FlexIntError::Parse(format!("{:?}: {}", s, e)))
    }
}

impl Default for FlexInt {
    fn default() -> Self {
        FlexInt::ZERO
    }
}

impl<'a> Add<&'a FlexInt> for &'a FlexInt {
    type Output = FlexInt;

    fn add(self, rhs: &'a FlexInt) -> FlexInt {
        match (&self.repr, &rhs.repr) {
            (Repr::Narrow(a), Repr::Narrow(b)) => add_narrow(*a, *b),
            (Repr::Narrow(a), Repr::Wide(b)) => add_wide(i64::from(*a), *b),
            (Repr::Wide(a), Repr::Narrow(b)) => add_wide(*a, i64::from(*b)),
            (Repr::Wide(a), Repr::Wide(b)) => add_wide(*a, *b),
            _ => FlexInt::from(self.to_bigint() + rhs.to_bigint()),
        }
    }
}

impl Add for FlexInt {
    type Output = FlexInt;

    fn add(self, rhs: FlexInt) -> FlexInt {
        &self + &rhs
    }
}

impl<'a> Sub<&'a FlexInt> for &'a FlexInt {
    type Output = FlexInt;

    fn sub(self, rhs: &'a FlexInt) -> FlexInt {
        match (&self.repr, &rhs.repr) {
            (Repr::Narrow(a), Repr::Narrow(b)) => FlexInt::from(i64::from(*a) - i64::from(*b)),
            _ => match (self.as_i64(), rhs.as_i64()) {
                (Some(a), Some(b)) => match a.checked_sub(b) {
                    Some(diff) => FlexInt::from(diff),
                    None => FlexInt::from(BigInt::from(a) - BigInt::from(b)),
                },
                _ => FlexInt::from(self.to_bigint() - rhs.to_bigint()),
            },
        }
    }
}

impl Sub for FlexInt {
    type Output = FlexInt;

    fn sub(self, rhs: FlexInt) -> FlexInt {
        &self - &rhs
    }
}

impl Neg for &FlexInt {
    type Output = FlexInt;

    fn neg(self) -> FlexInt {
        match &self.repr {
            Repr::Narrow(v) => match v.checked_neg() {
                Some(n) => FlexInt::narrow(n),
                // i32::MIN 没有对应的正值
                None => FlexInt::from(-i64::from(*v)),
            },
            Repr::Wide(v) => match v.checked_neg() {
                Some(n) => FlexInt::from(n),
                None => FlexInt::from(-BigInt::from(*v)),
            },
            Repr::Arbitrary(v) => FlexInt::from(-v),
        }
    }
}

impl Neg for FlexInt {
    type Output = FlexInt;

    fn neg(self) -> FlexInt {
        -&self
    }
}

impl Sum for FlexInt {
    fn sum<I: Iterator<Item = FlexInt>>(iter: I) -> Self {
        iter.fold(FlexInt::ZERO, |acc, x| &acc + &x)
    }
}

impl<'a> Sum<&'a FlexInt> for FlexInt {
    fn sum<I: Iterator<Item = &'a FlexInt>>(iter: I) -> Self {
        iter.fold(FlexInt::ZERO, |acc, x| &acc + x)
    }
}

impl Ord for FlexInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.repr, &other.repr) {
            (Repr::Narrow(a), Repr::Narrow(b)) => a.cmp(b),
            (Repr::Arbitrary(a), Repr::Arbitrary(b)) => a.cmp(b),
            _ => match (self.as_i64(), other.as_i64()) {
                (Some(a), Some(b)) => a.cmp(&b),
                _ => self.to_bigint().cmp(&other.to_bigint()),
            },
        }
    }
}

impl PartialOrd for FlexInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FlexInt {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FlexInt {}

impl Hash for FlexInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // 能放进 i64 的值一律按 i64 哈希，与层级无关
        match &self.repr {
            Repr::Narrow(v) => i64::from(*v).hash(state),
            Repr::Wide(v) => v.hash(state),
            Repr::Arbitrary(v) => match v.to_i64() {
                Some(n) => n.hash(state),
                None => v.hash(state),
            },
        }
    }
}

impl fmt::Display for FlexInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Narrow(v) => write!(f, "{}", v),
            Repr::Wide(v) => write!(f, "{}", v),
            Repr::Arbitrary(v) => write!(f, "{}", v),
        }
    }
}
