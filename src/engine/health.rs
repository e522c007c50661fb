// ==========================================
// 智慧朝觐运维平台 - 资产健康评分引擎
// ==========================================
// 职责: 传感器健康度 + 近期维护效果 + 资产年龄 + 故障风险 -> 0~100 健康分
// 输入: 读数快照 + 维护记录快照 + 年龄 + 预测故障风险
// 输出: 健康分 (纯函数,不落库,不记日志)
// ==========================================

use crate::config::HealthScoringConfig;
use crate::domain::maintenance::MaintenanceRecord;
use crate::domain::sensor::SensorReading;
use crate::domain::types::AssetCondition;
use crate::error::{ensure_in_range, ensure_non_negative, EngineError, EngineResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// 健康分拆解 (用于解释评分来源)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthBreakdown {
    pub sensor_health: f64,        // 传感器健康度 (0-1)
    pub maintenance_health: f64,   // 维护健康度 (0-1)
    pub age_health: f64,           // 年龄健康度 (0-1)
    pub risk_health: f64,          // 风险健康度 (0-1)
    pub score: f64,                // 综合健康分 (0-100)
    pub condition: AssetCondition, // 健康状况
    pub readings_considered: usize,
    pub records_considered: usize,
}

// ==========================================
// HealthScorer - 资产健康评分引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct HealthScorer {
    config: HealthScoringConfig,
}

impl HealthScorer {
    pub fn new(config: HealthScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HealthScoringConfig {
        &self.config
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算资产健康分 (0-100)
    ///
    /// score = 100 × (w_s·传感器 + w_m·维护 + w_a·年龄 + w_r·风险)
    ///
    /// # 参数
    /// - `readings`: 传感器读数快照
    /// - `history`: 维护记录快照
    /// - `age_in_days`: 资产年龄 (天, 非负)
    /// - `predicted_failure_risk`: 预测故障风险 (0-1)
    /// - `as_of`: 评估时间点 (维护记录回看窗口的终点)
    ///
    /// # 错误
    /// - 读数为 NaN/无穷、阈值非法、风险超出 [0,1]、年龄为负 -> Validation
    pub fn compute_asset_health(
        &self,
        readings: &[SensorReading],
        history: &[MaintenanceRecord],
        age_in_days: f64,
        predicted_failure_risk: f64,
        as_of: DateTime<Utc>,
    ) -> EngineResult<f64> {
        self.breakdown(readings, history, age_in_days, predicted_failure_risk, as_of)
            .map(|b| b.score)
    }

    /// 计算健康分并返回各分项
    pub fn breakdown(
        &self,
        readings: &[SensorReading],
        history: &[MaintenanceRecord],
        age_in_days: f64,
        predicted_failure_risk: f64,
        as_of: DateTime<Utc>,
    ) -> EngineResult<HealthBreakdown> {
        // 先整体校验,再计算
        let risk_health = self.risk_health(predicted_failure_risk)?;
        let age_health = self.age_health(age_in_days)?;
        let sensor_health = self.sensor_health(readings)?;
        let recent = self.recent_records(history, as_of)?;
        let maintenance_health = self.maintenance_health_of(&recent);

        let c = &self.config;
        let weighted = c.sensor_weight * sensor_health
            + c.maintenance_weight * maintenance_health
            + c.age_weight * age_health
            + c.risk_weight * risk_health;
        let score = (100.0 * weighted).clamp(0.0, 100.0);

        Ok(HealthBreakdown {
            sensor_health,
            maintenance_health,
            age_health,
            risk_health,
            score,
            condition: AssetCondition::from_health_score(score),
            readings_considered: readings.len(),
            records_considered: recent.len(),
        })
    }

    // ==========================================
    // 分项计算
    // ==========================================

    /// 传感器健康度: 各读数健康度的平均值,无读数取中性默认值
    pub fn sensor_health(&self, readings: &[SensorReading]) -> EngineResult<f64> {
        if readings.is_empty() {
            return Ok(self.config.default_sensor_health);
        }

        let mut total = 0.0;
        for reading in readings {
            reading.validate()?;
            total += Self::reading_health(reading);
        }
        Ok(total / readings.len() as f64)
    }

    /// 单个读数健康度
    ///
    /// 规则:
    /// - 位于 normal 带中点 -> 1.0
    /// - 位于 normal 带边缘 -> 0.0
    /// - 超出边缘 -> 截断为 0.0
    /// - normal 带退化为单点时,等于该点为 1.0,否则 0.0
    pub fn reading_health(reading: &SensorReading) -> f64 {
        let band = &reading.thresholds.normal;
        let deviation = (reading.value - band.midpoint()).abs();
        let half_width = band.half_width();

        if half_width <= 0.0 {
            return if deviation == 0.0 { 1.0 } else { 0.0 };
        }
        (1.0 - deviation / half_width).max(0.0)
    }

    /// 维护健康度: 回看窗口内维护效果评分均值 / 10,窗口内无记录取默认值
    pub fn maintenance_health(
        &self,
        history: &[MaintenanceRecord],
        as_of: DateTime<Utc>,
    ) -> EngineResult<f64> {
        let recent = self.recent_records(history, as_of)?;
        Ok(self.maintenance_health_of(&recent))
    }

    /// 年龄健康度: max(0, 1 - age / 名义寿命)
    pub fn age_health(&self, age_in_days: f64) -> EngineResult<f64> {
        let age = ensure_non_negative("age_in_days", age_in_days)?;
        let lifespan = self.config.nominal_lifespan_days as f64;
        Ok((1.0 - age / lifespan).max(0.0))
    }

    /// 风险健康度: 1 - 预测故障风险
    pub fn risk_health(&self, predicted_failure_risk: f64) -> EngineResult<f64> {
        let risk = ensure_in_range("predicted_failure_risk", predicted_failure_risk, 0.0, 1.0)?;
        Ok(1.0 - risk)
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    /// 筛选 [as_of - 窗口, as_of] 内完工的记录 (同时校验评分)
    fn recent_records<'a>(
        &self,
        history: &'a [MaintenanceRecord],
        as_of: DateTime<Utc>,
    ) -> EngineResult<Vec<&'a MaintenanceRecord>> {
        let window_start = as_of
            .checked_sub_signed(Duration::days(self.config.recency_window_days as i64))
            .ok_or_else(|| {
                EngineError::validation(
                    "health.recency_window_days",
                    format!(
                        "回看窗口 {} 天超出时间范围 (as_of={})",
                        self.config.recency_window_days, as_of
                    ),
                )
            })?;
        let mut recent = Vec::new();
        for record in history {
            record.validate()?;
            if record.completed_at >= window_start && record.completed_at <= as_of {
                recent.push(record);
            }
        }
        Ok(recent)
    }

    fn maintenance_health_of(&self, recent: &[&MaintenanceRecord]) -> f64 {
        if recent.is_empty() {
            return self.config.default_maintenance_health;
        }
        let total: f64 = recent
            .iter()
            .map(|r| {
                r.effectiveness_rating
                    .unwrap_or(self.config.default_effectiveness) as f64
                    / 10.0
            })
            .sum();
        total / recent.len() as f64
    }
}
