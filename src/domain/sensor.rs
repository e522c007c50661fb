// ==========================================
// 智慧朝觐运维平台 - 传感器读数领域模型
// ==========================================
// 生命周期: 由外部采集管道持续写入,记录后不可变
// 消费方: 健康评分器 (只读)
// ==========================================

use crate::domain::types::{SensorStatus, SensorType};
use crate::error::{EngineError, EngineResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ThresholdBand - 单个阈值带
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBand {
    pub min: f64,
    pub max: f64,
}

impl ThresholdBand {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// 中点
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// 半宽
    pub fn half_width(&self) -> f64 {
        (self.max - self.min) / 2.0
    }

    /// 闭区间包含判断
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// 是否完整包含另一个阈值带
    pub fn encloses(&self, inner: &ThresholdBand) -> bool {
        self.min <= inner.min && self.max >= inner.max
    }
}

// ==========================================
// SensorThresholds - 四级阈值
// ==========================================
// 红线: normal.min <= normal.max,且各带由 normal 向外逐级嵌套
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorThresholds {
    pub normal: ThresholdBand,
    pub warning: ThresholdBand,
    pub critical: ThresholdBand,
    pub emergency: ThresholdBand,
}

impl SensorThresholds {
    /// 校验阈值结构
    ///
    /// # 返回
    /// - Ok(()): 各带有限、min <= max、逐级嵌套
    /// - Err(EngineError::Validation): 指出第一处违规
    pub fn validate(&self) -> EngineResult<()> {
        let bands = [
            ("normal", &self.normal),
            ("warning", &self.warning),
            ("critical", &self.critical),
            ("emergency", &self.emergency),
        ];

        for (name, band) in bands.iter() {
            if !band.min.is_finite() || !band.max.is_finite() {
                return Err(EngineError::validation(
                    format!("thresholds.{}", name),
                    "阈值必须为有限数值",
                ));
            }
            if band.min > band.max {
                return Err(EngineError::validation(
                    format!("thresholds.{}", name),
                    format!("min({}) > max({})", band.min, band.max),
                ));
            }
        }

        for pair in bands.windows(2) {
            let (inner_name, inner) = pair[0];
            let (outer_name, outer) = pair[1];
            if !outer.encloses(inner) {
                return Err(EngineError::validation(
                    format!("thresholds.{}", outer_name),
                    format!("{} 带必须包含 {} 带", outer_name, inner_name),
                ));
            }
        }

        Ok(())
    }

    /// 按阈值带对数值分级 (由内向外,命中即返回)
    pub fn classify(&self, value: f64) -> SensorStatus {
        if self.normal.contains(value) {
            SensorStatus::Normal
        } else if self.warning.contains(value) {
            SensorStatus::Warning
        } else if self.critical.contains(value) {
            SensorStatus::Critical
        } else if self.emergency.contains(value) {
            SensorStatus::Emergency
        } else {
            SensorStatus::OutOfRange
        }
    }
}

// ==========================================
// SensorReading - 传感器读数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub asset_id: String,              // 资产ID
    pub sensor_type: SensorType,       // 传感器类型
    pub timestamp: DateTime<Utc>,      // 采集时间
    pub value: f64,                    // 读数
    pub unit: String,                  // 单位
    pub thresholds: SensorThresholds,  // 四级阈值
}

impl SensorReading {
    /// 校验读数 (NaN/无穷读数与非法阈值均视为输入错误)
    pub fn validate(&self) -> EngineResult<()> {
        if !self.value.is_finite() {
            return Err(EngineError::validation(
                "sensor_reading.value",
                format!(
                    "asset_id={}, sensor_type={}: 读数非法 {}",
                    self.asset_id, self.sensor_type, self.value
                ),
            ));
        }
        self.thresholds.validate()
    }

    /// 读数所处阈值带
    pub fn band_status(&self) -> SensorStatus {
        self.thresholds.classify(self.value)
    }
}
