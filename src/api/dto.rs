// ==========================================
// 智慧朝觐运维平台 - MaintenanceApi DTO 定义
// ==========================================
// 职责: 定义各决策操作的请求和响应结构 (JSON 输入/输出)
// 约定: 时间一律显式传入,引擎不读取系统时钟
// ==========================================

use crate::domain::{
    AssetType, InfrastructureAsset, MaintenancePrediction, MaintenanceRecord,
    MaintenanceType, MaintenanceWorkOrder, PartLine, PriorityTier, ResourceCapacity,
    ScheduledSlot, SchedulingConstraints, SensorReading, SensorStatus, SensorType,
    TaskComplexity, WorkOrderPriority,
};
use crate::engine::{CostBreakdown, HealthBreakdown};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// 健康评分
// ==========================================

/// 健康评分请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRequest {
    /// 传感器读数快照
    #[serde(default)]
    pub readings: Vec<SensorReading>,

    /// 维护记录快照
    #[serde(default)]
    pub history: Vec<MaintenanceRecord>,

    /// 资产年龄 (天)
    pub age_in_days: f64,

    /// 预测故障风险 (0-1)
    pub predicted_failure_risk: f64,

    /// 评估时间点
    pub as_of: DateTime<Utc>,
}

// ==========================================
// 优先级分类
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityRequest {
    pub prediction: MaintenancePrediction,
    pub asset: InfrastructureAsset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityResponse {
    /// 加权评分
    pub score: f64,

    /// 分档
    pub tier: PriorityTier,

    /// 对应的工单优先级
    pub work_order_priority: WorkOrderPriority,
}

// ==========================================
// 成本估算
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRequest {
    pub labor_hours: f64,
    pub labor_rate: f64,
    #[serde(default)]
    pub parts: Vec<PartLine>,
    /// 管理费率 (缺省取配置值)
    #[serde(default)]
    pub overhead_rate: Option<f64>,
}

// ==========================================
// 工时估算
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationRequest {
    pub maintenance_type: MaintenanceType,
    pub asset_type: AssetType,
    pub complexity: TaskComplexity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationResponse {
    pub hours: f64,
    pub base_hours: f64,
    pub asset_multiplier: f64,
}

// ==========================================
// 工单调度
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub work_orders: Vec<MaintenanceWorkOrder>,
    pub resources: ResourceCapacity,
    pub constraints: SchedulingConstraints,
    /// 调度起点 (设施本地时间)
    pub now: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    /// 调度结果 (优先级降序)
    pub slots: Vec<ScheduledSlot>,

    /// 写入调度结果后的工单 (保持请求顺序)
    pub work_orders: Vec<MaintenanceWorkOrder>,
}

// ==========================================
// 资产综合评估
// ==========================================

/// 资产综合评估请求: 健康分 + 优先级一次算完
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessRequest {
    pub asset: InfrastructureAsset,
    #[serde(default)]
    pub readings: Vec<SensorReading>,
    #[serde(default)]
    pub history: Vec<MaintenanceRecord>,
    /// 故障预测 (其概率同时作为健康评分的故障风险)
    pub prediction: MaintenancePrediction,
    pub as_of: DateTime<Utc>,
}

/// 越出正常带的读数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorAlert {
    pub sensor_type: SensorType,
    pub value: f64,
    pub unit: String,
    pub status: SensorStatus,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub asset_id: String,
    pub age_in_days: u32,
    pub health: HealthBreakdown,
    pub priority: PriorityResponse,
    /// 越出正常带的读数 (按读数顺序)
    pub alerts: Vec<SensorAlert>,
}

// ==========================================
// 工单编制
// ==========================================

/// 工单编制请求: 估算工时与成本,生成待调度工单
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanWorkOrderRequest {
    pub work_order_id: String,
    pub asset: InfrastructureAsset,
    pub maintenance_type: MaintenanceType,
    pub complexity: TaskComplexity,
    pub priority: WorkOrderPriority,
    pub labor_rate: f64,
    #[serde(default)]
    pub parts: Vec<PartLine>,
    #[serde(default)]
    pub overhead_rate: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanWorkOrderResponse {
    pub work_order: MaintenanceWorkOrder,
    pub duration: DurationResponse,
    pub cost: CostBreakdown,
}
