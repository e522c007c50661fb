// ==========================================
// 智慧朝觐运维平台 - 配置层
// ==========================================
// 职责: 引擎参数管理,支持文件加载与按键覆写
// ==========================================

pub mod config_manager;
pub mod engine_config;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigError, ConfigManager};
pub use engine_config::{
    CostConfig, DurationConfig, EngineConfig, HealthScoringConfig, PriorityConfig,
    SchedulerConfig, SchedulingMode,
};
