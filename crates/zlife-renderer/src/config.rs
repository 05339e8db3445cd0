//! 视口配置

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zlife_core::math::DEFAULT_PRECISION;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for `{field}`: {value}")]
    InvalidValue { field: &'static str, value: f64 },
}

/// 视口参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// 初始细胞宽度（像素）
    pub default_cell_width: f32,
    /// 每次缩放的倍数（放大乘以它，缩小除以它）
    pub zoom_step: f32,
    /// 适配屏幕时保留的比例
    pub fit_margin: f32,
    /// 超过该宽度的细胞宽度被取整
    pub cell_rounding_threshold: f32,
    /// 取整粒度，1.0 表示取整到整像素
    pub cell_rounding_factor: f32,
    /// 细胞间隙占细胞宽度的比例
    pub cell_border_ratio: f32,
    /// 十进制运算的有效位数
    pub decimal_precision: u64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            default_cell_width: 4.0,
            zoom_step: 1.25,
            fit_margin: 0.9,
            cell_rounding_threshold: 1.6,
            cell_rounding_factor: 1.0,
            cell_border_ratio: 0.05,
            decimal_precision: DEFAULT_PRECISION,
        }
    }
}

impl ViewportConfig {
    /// 从 JSON 读取并校验，缺失字段使用默认值
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ViewportConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, value: f64| ConfigError::InvalidValue { field, value };

        if !(self.default_cell_width > 0.0) {
            return Err(invalid("default_cell_width", self.default_cell_width.into()));
        }
        if !(self.zoom_step > 1.0) {
            return Err(invalid("zoom_step", self.zoom_step.into()));
        }
        if !(self.fit_margin > 0.0 && self.fit_margin <= 1.0) {
            return Err(invalid("fit_margin", self.fit_margin.into()));
        }
        if !(self.cell_rounding_factor > 0.0) {
            return Err(invalid("cell_rounding_factor", self.cell_rounding_factor.into()));
        }
        if !(0.0..1.0).contains(&self.cell_border_ratio) {
            return Err(invalid("cell_border_ratio", self.cell_border_ratio.into()));
        }
        if self.decimal_precision == 0 {
            return Err(invalid("decimal_precision", 0.0));
        }
        Ok(())
    }

    /// 量化细胞宽度，消除相邻帧之间的半像素抖动
    pub fn quantize_cell_width(&self, width: f32) -> f32 {
        if width > self.cell_rounding_threshold {
            (width * self.cell_rounding_factor).round() / self.cell_rounding_factor
        } else {
            width
        }
    }
}
