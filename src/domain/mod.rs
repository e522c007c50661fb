// ==========================================
// 智慧朝觐运维平台 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、生命周期规则
// 红线: 不含引擎计算逻辑,实体由外部系统持有,引擎只处理快照
// ==========================================

pub mod asset;
pub mod maintenance;
pub mod sensor;
pub mod types;
pub mod work_order;

// 重导出核心类型
pub use asset::InfrastructureAsset;
pub use maintenance::{MaintenancePrediction, MaintenanceRecord, PredictionTimeframe};
pub use sensor::{SensorReading, SensorThresholds, ThresholdBand};
pub use types::{
    AssetCondition, AssetCriticality, AssetType, MaintenanceType, PriorityTier, SensorStatus,
    SensorType, TaskComplexity, UrgencyWindow, WorkOrderPriority, WorkOrderStatus,
};
pub use work_order::{
    MaintenanceWorkOrder, PartLine, ResourceCapacity, ScheduledSlot, SchedulingConstraints,
};
