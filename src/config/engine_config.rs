// ==========================================
// 智慧朝觐运维平台 - 引擎参数
// ==========================================
// 说明: 以下常量均为启发式取值,无标定数据,全部开放为可配置项
// 缺省字段以 Default 值补齐 (serde default)
// ==========================================

use crate::domain::types::{AssetType, MaintenanceType, TaskComplexity};
use crate::error::{EngineError, EngineResult};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// 维护记录回看窗口上限 (天)
pub const MAX_RECENCY_WINDOW_DAYS: u32 = 36_500;

// ==========================================
// EngineConfig - 引擎总配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub health: HealthScoringConfig,
    pub priority: PriorityConfig,
    pub cost: CostConfig,
    pub duration: DurationConfig,
    pub scheduler: SchedulerConfig,
}

impl EngineConfig {
    /// 校验全部分组
    pub fn validate(&self) -> EngineResult<()> {
        self.health.validate()?;
        self.priority.validate()?;
        self.cost.validate()?;
        self.duration.validate()?;
        self.scheduler.validate()
    }
}

// ==========================================
// 健康评分参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthScoringConfig {
    pub sensor_weight: f64,
    pub maintenance_weight: f64,
    pub age_weight: f64,
    pub risk_weight: f64,
    /// 维护记录回看窗口 (天)
    pub recency_window_days: u32,
    /// 名义寿命 (天),年龄健康度按此线性衰减
    pub nominal_lifespan_days: u32,
    /// 无读数时的传感器健康度
    pub default_sensor_health: f64,
    /// 窗口内无维护记录时的维护健康度
    pub default_maintenance_health: f64,
    /// 记录未评分时采用的效果评分 (1-10)
    pub default_effectiveness: u8,
}

impl Default for HealthScoringConfig {
    fn default() -> Self {
        Self {
            sensor_weight: 0.4,
            maintenance_weight: 0.3,
            age_weight: 0.2,
            risk_weight: 0.1,
            recency_window_days: 90,
            nominal_lifespan_days: 7300,
            default_sensor_health: 0.5,
            default_maintenance_health: 0.7,
            default_effectiveness: 7,
        }
    }
}

impl HealthScoringConfig {
    pub fn validate(&self) -> EngineResult<()> {
        let weights = [
            ("health.sensor_weight", self.sensor_weight),
            ("health.maintenance_weight", self.maintenance_weight),
            ("health.age_weight", self.age_weight),
            ("health.risk_weight", self.risk_weight),
        ];
        for (field, w) in weights.iter() {
            if !w.is_finite() || *w < 0.0 {
                return Err(EngineError::validation(*field, format!("权重非法: {}", w)));
            }
        }
        let sum: f64 = weights.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EngineError::validation(
                "health",
                format!("四项权重之和必须为 1, 实际为 {}", sum),
            ));
        }
        if !(1..=MAX_RECENCY_WINDOW_DAYS).contains(&self.recency_window_days) {
            return Err(EngineError::validation(
                "health.recency_window_days",
                format!(
                    "取值 {} 不在 [1, {}]",
                    self.recency_window_days, MAX_RECENCY_WINDOW_DAYS
                ),
            ));
        }
        if self.nominal_lifespan_days == 0 {
            return Err(EngineError::validation(
                "health.nominal_lifespan_days",
                "名义寿命必须大于 0",
            ));
        }
        for (field, v) in [
            ("health.default_sensor_health", self.default_sensor_health),
            ("health.default_maintenance_health", self.default_maintenance_health),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(EngineError::validation(field, format!("取值 {} 不在 [0, 1]", v)));
            }
        }
        if !(1..=10).contains(&self.default_effectiveness) {
            return Err(EngineError::validation(
                "health.default_effectiveness",
                format!("取值 {} 不在 [1, 10]", self.default_effectiveness),
            ));
        }
        Ok(())
    }
}

// ==========================================
// 优先级分类参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityConfig {
    pub criticality_weight: f64,
    pub urgency_weight: f64,
    pub probability_weight: f64,
    /// 分档下界 (含)
    pub critical_threshold: f64,
    pub high_threshold: f64,
    pub medium_threshold: f64,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            criticality_weight: 0.4,
            urgency_weight: 0.3,
            probability_weight: 0.3,
            critical_threshold: 3.5,
            high_threshold: 2.5,
            medium_threshold: 1.5,
        }
    }
}

impl PriorityConfig {
    pub fn validate(&self) -> EngineResult<()> {
        for (field, v) in [
            ("priority.criticality_weight", self.criticality_weight),
            ("priority.urgency_weight", self.urgency_weight),
            ("priority.probability_weight", self.probability_weight),
            ("priority.critical_threshold", self.critical_threshold),
            ("priority.high_threshold", self.high_threshold),
            ("priority.medium_threshold", self.medium_threshold),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(EngineError::validation(field, format!("取值非法: {}", v)));
            }
        }
        if !(self.critical_threshold > self.high_threshold
            && self.high_threshold > self.medium_threshold)
        {
            return Err(EngineError::validation(
                "priority",
                format!(
                    "分档阈值必须严格递减: critical={}, high={}, medium={}",
                    self.critical_threshold, self.high_threshold, self.medium_threshold
                ),
            ));
        }
        Ok(())
    }
}

// ==========================================
// 成本估算参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// 缺省管理费率
    pub default_overhead_rate: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            default_overhead_rate: 0.15,
        }
    }
}

impl CostConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if !self.default_overhead_rate.is_finite() || self.default_overhead_rate < 0.0 {
            return Err(EngineError::validation(
                "cost.default_overhead_rate",
                format!("取值非法: {}", self.default_overhead_rate),
            ));
        }
        Ok(())
    }
}

// ==========================================
// 工时估算参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationConfig {
    /// 基础工时表: 维护类型 -> 复杂度 -> 小时
    pub base_hours: BTreeMap<MaintenanceType, BTreeMap<TaskComplexity, f64>>,
    /// 资产类型工时倍率 (未登记类型按 1.0)
    ///
    /// 键按资产类型规范名存储 (hvac -> hvac-system),反序列化时叠加到默认倍率之上
    #[serde(deserialize_with = "deserialize_asset_multipliers")]
    pub asset_multipliers: BTreeMap<String, f64>,
    /// 工时表缺项时的兜底工时
    pub fallback_hours: f64,
}

fn default_asset_multipliers() -> BTreeMap<String, f64> {
    [
        (AssetType::HvacSystem, 1.2),
        (AssetType::Elevator, 1.5),
        (AssetType::Escalator, 1.3),
        (AssetType::Generator, 1.4),
        (AssetType::MedicalEquipment, 1.6),
    ]
    .into_iter()
    .map(|(asset_type, m)| (asset_type.as_str().to_string(), m))
    .collect()
}

fn deserialize_asset_multipliers<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = BTreeMap::<String, f64>::deserialize(deserializer)?;
    let mut multipliers = default_asset_multipliers();
    for (asset_type, m) in raw {
        multipliers.insert(AssetType::from(asset_type).as_str().to_string(), m);
    }
    Ok(multipliers)
}

impl Default for DurationConfig {
    fn default() -> Self {
        use MaintenanceType::*;

        let rows: [(MaintenanceType, [f64; 4]); 7] = [
            (Preventive, [2.0, 4.0, 8.0, 16.0]),
            (Predictive, [1.0, 3.0, 6.0, 12.0]),
            (Corrective, [3.0, 6.0, 12.0, 24.0]),
            (Emergency, [4.0, 8.0, 16.0, 24.0]),
            (Inspection, [0.5, 1.0, 2.0, 4.0]),
            (Calibration, [1.0, 2.0, 4.0, 8.0]),
            (Upgrade, [8.0, 16.0, 32.0, 40.0]),
        ];

        let base_hours: BTreeMap<MaintenanceType, BTreeMap<TaskComplexity, f64>> = rows
            .iter()
            .map(|(maintenance_type, hours)| {
                let by_complexity: BTreeMap<TaskComplexity, f64> = TaskComplexity::ALL
                    .iter()
                    .copied()
                    .zip(hours.iter().copied())
                    .collect();
                (*maintenance_type, by_complexity)
            })
            .collect();

        Self {
            base_hours,
            asset_multipliers: default_asset_multipliers(),
            fallback_hours: 2.0,
        }
    }
}

impl DurationConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if !self.fallback_hours.is_finite() || self.fallback_hours <= 0.0 {
            return Err(EngineError::validation(
                "duration.fallback_hours",
                format!("取值非法: {}", self.fallback_hours),
            ));
        }
        for (maintenance_type, row) in &self.base_hours {
            for (complexity, hours) in row {
                if !hours.is_finite() || *hours <= 0.0 {
                    return Err(EngineError::validation(
                        format!("duration.base_hours.{}.{}", maintenance_type, complexity),
                        format!("取值非法: {}", hours),
                    ));
                }
            }
        }
        for (asset_type, m) in &self.asset_multipliers {
            if !m.is_finite() || *m <= 0.0 {
                return Err(EngineError::validation(
                    format!("duration.asset_multipliers.{}", asset_type),
                    format!("取值非法: {}", m),
                ));
            }
        }
        Ok(())
    }
}

// ==========================================
// 调度参数
// ==========================================

/// 调度模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingMode {
    /// 单一共享时间线 (资源参数仅校验不参与排布)
    #[default]
    SingleTimeline,
    /// 多班组并行时间线 (班组数 = min(人员, 设备))
    ParallelCrews,
}

impl std::fmt::Display for SchedulingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingMode::SingleTimeline => write!(f, "single_timeline"),
            SchedulingMode::ParallelCrews => write!(f, "parallel_crews"),
        }
    }
}

impl std::str::FromStr for SchedulingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single_timeline" | "single-timeline" => Ok(SchedulingMode::SingleTimeline),
            "parallel_crews" | "parallel-crews" => Ok(SchedulingMode::ParallelCrews),
            other => Err(format!("未知调度模式: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// 换日后的开工时刻 (小时)
    pub day_start_hour: u32,
    /// 单批次工单数上限
    pub max_orders: usize,
    pub mode: SchedulingMode,
    /// 周末 (不允许周末作业时跳过)
    pub weekend_days: Vec<Weekday>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            day_start_hour: 8,
            max_orders: 100_000,
            mode: SchedulingMode::SingleTimeline,
            weekend_days: vec![Weekday::Sat, Weekday::Sun],
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if self.day_start_hour > 23 {
            return Err(EngineError::validation(
                "scheduler.day_start_hour",
                format!("取值 {} 不在 [0, 23]", self.day_start_hour),
            ));
        }
        if self.max_orders == 0 {
            return Err(EngineError::validation(
                "scheduler.max_orders",
                "上限必须大于 0",
            ));
        }
        let mut distinct = self.weekend_days.clone();
        distinct.sort_by_key(|d| d.num_days_from_monday());
        distinct.dedup();
        if distinct.len() >= 7 {
            return Err(EngineError::validation(
                "scheduler.weekend_days",
                "一周内至少需要一个工作日",
            ));
        }
        Ok(())
    }
}
