// ==========================================
// 智慧朝觐运维平台 - 配置管理器
// ==========================================
// 职责: 配置加载、校验、按键覆写、快照导出
// 来源: JSON 文件 / JSON 字符串 / 内置默认值
// ==========================================

use crate::config::engine_config::{EngineConfig, SchedulingMode};
use crate::domain::types::AssetType;
use crate::error::EngineError;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

// ==========================================
// 配置键 (点分路径)
// ==========================================
pub mod config_keys {
    // 健康评分
    pub const HEALTH_SENSOR_WEIGHT: &str = "health.sensor_weight";
    pub const HEALTH_MAINTENANCE_WEIGHT: &str = "health.maintenance_weight";
    pub const HEALTH_AGE_WEIGHT: &str = "health.age_weight";
    pub const HEALTH_RISK_WEIGHT: &str = "health.risk_weight";
    pub const HEALTH_RECENCY_WINDOW_DAYS: &str = "health.recency_window_days";
    pub const HEALTH_NOMINAL_LIFESPAN_DAYS: &str = "health.nominal_lifespan_days";
    pub const HEALTH_DEFAULT_SENSOR_HEALTH: &str = "health.default_sensor_health";
    pub const HEALTH_DEFAULT_MAINTENANCE_HEALTH: &str = "health.default_maintenance_health";
    pub const HEALTH_DEFAULT_EFFECTIVENESS: &str = "health.default_effectiveness";

    // 优先级
    pub const PRIORITY_CRITICALITY_WEIGHT: &str = "priority.criticality_weight";
    pub const PRIORITY_URGENCY_WEIGHT: &str = "priority.urgency_weight";
    pub const PRIORITY_PROBABILITY_WEIGHT: &str = "priority.probability_weight";
    pub const PRIORITY_CRITICAL_THRESHOLD: &str = "priority.critical_threshold";
    pub const PRIORITY_HIGH_THRESHOLD: &str = "priority.high_threshold";
    pub const PRIORITY_MEDIUM_THRESHOLD: &str = "priority.medium_threshold";

    // 成本
    pub const COST_DEFAULT_OVERHEAD_RATE: &str = "cost.default_overhead_rate";

    // 工时 (倍率键: duration.asset_multipliers.<asset-type>)
    pub const DURATION_FALLBACK_HOURS: &str = "duration.fallback_hours";
    pub const DURATION_ASSET_MULTIPLIER_PREFIX: &str = "duration.asset_multipliers.";

    // 调度
    pub const SCHEDULER_DAY_START_HOUR: &str = "scheduler.day_start_hour";
    pub const SCHEDULER_MAX_ORDERS: &str = "scheduler.max_orders";
    pub const SCHEDULER_MODE: &str = "scheduler.mode";
}

// ==========================================
// ConfigError - 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("未知配置键: {0}")]
    UnknownKey(String),

    #[error("配置值非法: key={key}, value={value}")]
    InvalidValue { key: String, value: String },

    #[error("配置校验失败: {0}")]
    Invalid(#[from] EngineError),
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    config: EngineConfig,
}

impl ConfigManager {
    /// 使用内置默认值
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文件加载 (缺省字段取默认值)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// 从 JSON 字符串加载
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(Self { config })
    }

    /// 当前生效配置
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 取出配置
    pub fn into_config(self) -> EngineConfig {
        self.config
    }

    /// 按点分键覆写单个配置项
    ///
    /// 覆写后整体重新校验,校验失败时保持原配置不变
    ///
    /// # 示例
    /// ```
    /// use smart_hajj_maintenance::config::{config_keys, ConfigManager};
    ///
    /// let mut manager = ConfigManager::new();
    /// manager.apply_override(config_keys::COST_DEFAULT_OVERHEAD_RATE, "0.2").unwrap();
    /// assert_eq!(manager.config().cost.default_overhead_rate, 0.2);
    /// ```
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        use config_keys::*;

        let mut next = self.config.clone();
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            HEALTH_SENSOR_WEIGHT => next.health.sensor_weight = parse(value).ok_or_else(invalid)?,
            HEALTH_MAINTENANCE_WEIGHT => {
                next.health.maintenance_weight = parse(value).ok_or_else(invalid)?
            }
            HEALTH_AGE_WEIGHT => next.health.age_weight = parse(value).ok_or_else(invalid)?,
            HEALTH_RISK_WEIGHT => next.health.risk_weight = parse(value).ok_or_else(invalid)?,
            HEALTH_RECENCY_WINDOW_DAYS => {
                next.health.recency_window_days = parse(value).ok_or_else(invalid)?
            }
            HEALTH_NOMINAL_LIFESPAN_DAYS => {
                next.health.nominal_lifespan_days = parse(value).ok_or_else(invalid)?
            }
            HEALTH_DEFAULT_SENSOR_HEALTH => {
                next.health.default_sensor_health = parse(value).ok_or_else(invalid)?
            }
            HEALTH_DEFAULT_MAINTENANCE_HEALTH => {
                next.health.default_maintenance_health = parse(value).ok_or_else(invalid)?
            }
            HEALTH_DEFAULT_EFFECTIVENESS => {
                next.health.default_effectiveness = parse(value).ok_or_else(invalid)?
            }
            PRIORITY_CRITICALITY_WEIGHT => {
                next.priority.criticality_weight = parse(value).ok_or_else(invalid)?
            }
            PRIORITY_URGENCY_WEIGHT => {
                next.priority.urgency_weight = parse(value).ok_or_else(invalid)?
            }
            PRIORITY_PROBABILITY_WEIGHT => {
                next.priority.probability_weight = parse(value).ok_or_else(invalid)?
            }
            PRIORITY_CRITICAL_THRESHOLD => {
                next.priority.critical_threshold = parse(value).ok_or_else(invalid)?
            }
            PRIORITY_HIGH_THRESHOLD => {
                next.priority.high_threshold = parse(value).ok_or_else(invalid)?
            }
            PRIORITY_MEDIUM_THRESHOLD => {
                next.priority.medium_threshold = parse(value).ok_or_else(invalid)?
            }
            COST_DEFAULT_OVERHEAD_RATE => {
                next.cost.default_overhead_rate = parse(value).ok_or_else(invalid)?
            }
            DURATION_FALLBACK_HOURS => {
                next.duration.fallback_hours = parse(value).ok_or_else(invalid)?
            }
            SCHEDULER_DAY_START_HOUR => {
                next.scheduler.day_start_hour = parse(value).ok_or_else(invalid)?
            }
            SCHEDULER_MAX_ORDERS => {
                next.scheduler.max_orders = parse(value).ok_or_else(invalid)?
            }
            SCHEDULER_MODE => {
                next.scheduler.mode = SchedulingMode::from_str(value).map_err(|_| invalid())?
            }
            other => match other.strip_prefix(DURATION_ASSET_MULTIPLIER_PREFIX) {
                Some(asset_type) if !asset_type.is_empty() => {
                    let multiplier: f64 = parse(value).ok_or_else(invalid)?;
                    // 键按资产类型规范名存储 (如 hvac -> hvac-system)
                    let asset_type = AssetType::from(asset_type).as_str().to_string();
                    next.duration.asset_multipliers.insert(asset_type, multiplier);
                }
                _ => return Err(ConfigError::UnknownKey(key.to_string())),
            },
        }

        next.validate()?;
        self.config = next;
        Ok(())
    }

    /// 批量覆写 (`key=value` 形式,逐条应用,遇错即停)
    pub fn apply_overrides<'a, I>(&mut self, pairs: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for pair in pairs {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: pair.to_string(),
                    value: String::new(),
                })?;
            self.apply_override(key.trim(), value.trim())?;
        }
        Ok(())
    }

    /// 获取当前配置快照 (JSON)
    ///
    /// # 用途
    /// - 随调度/评分结果一并留档,保证结果可复现
    pub fn snapshot(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(&self.config)?)
    }
}

fn parse<T: FromStr>(value: &str) -> Option<T> {
    value.trim().parse().ok()
}
