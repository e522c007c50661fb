// ==========================================
// 智慧朝觐运维平台 - 核心库
// ==========================================
// 系统定位: 朝觐期间设施维护决策引擎 (决策支持,人工最终控制权)
// 职责: 健康评分 / 优先级分类 / 成本估算 / 工时估算 / 工单调度
// 约定: 引擎为纯函数,调用方传入数据快照与时间点
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 决策规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 引擎参数
pub mod config;

// 引擎错误类型
pub mod error;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AssetCondition, AssetCriticality, AssetType, MaintenanceType, PriorityTier, SensorStatus,
    SensorType, TaskComplexity, UrgencyWindow, WorkOrderPriority, WorkOrderStatus,
};

// 领域实体
pub use domain::{
    InfrastructureAsset, MaintenancePrediction, MaintenanceRecord, MaintenanceWorkOrder,
    PartLine, PredictionTimeframe, ResourceCapacity, ScheduledSlot, SchedulingConstraints,
    SensorReading, SensorThresholds, ThresholdBand,
};

// 引擎
pub use engine::{
    CostEstimator, DurationEstimator, HealthScorer, MaintenanceEngines, PriorityClassifier,
    WorkOrderScheduler,
};

// 配置
pub use config::{ConfigManager, EngineConfig, SchedulingMode};

// 错误
pub use error::{EngineError, EngineResult};

// API
pub use api::{MaintenanceApi, MaintenanceResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "智慧朝觐运维平台";
