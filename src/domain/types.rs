// ==========================================
// 智慧朝觐运维平台 - 领域类型定义
// ==========================================
// 序列化格式: kebab-case (与前端/外部接口一致)
// 红线: 未知枚举值必须显式报错,不允许静默回落默认值
// ==========================================

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// 为带 `ALL` 与 `as_str` 的枚举生成 Display / FromStr
macro_rules! impl_wire_str {
    ($ty:ty, $kind:expr) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = EngineError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_lowercase().replace('_', "-");
                <$ty>::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == normalized)
                    .ok_or_else(|| EngineError::UnknownValue {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

// ==========================================
// 传感器类型 (Sensor Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SensorType {
    Temperature,
    Vibration,
    Pressure,
    Humidity,
    Current,
    Voltage,
    FlowRate,
    Noise,
    AirQuality,
    PowerConsumption,
    RuntimeHours,
}

impl SensorType {
    pub const ALL: [SensorType; 11] = [
        SensorType::Temperature,
        SensorType::Vibration,
        SensorType::Pressure,
        SensorType::Humidity,
        SensorType::Current,
        SensorType::Voltage,
        SensorType::FlowRate,
        SensorType::Noise,
        SensorType::AirQuality,
        SensorType::PowerConsumption,
        SensorType::RuntimeHours,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorType::Temperature => "temperature",
            SensorType::Vibration => "vibration",
            SensorType::Pressure => "pressure",
            SensorType::Humidity => "humidity",
            SensorType::Current => "current",
            SensorType::Voltage => "voltage",
            SensorType::FlowRate => "flow-rate",
            SensorType::Noise => "noise",
            SensorType::AirQuality => "air-quality",
            SensorType::PowerConsumption => "power-consumption",
            SensorType::RuntimeHours => "runtime-hours",
        }
    }
}

impl_wire_str!(SensorType, "传感器类型");

// ==========================================
// 读数所处阈值带 (Sensor Status)
// ==========================================
// 顺序: Normal < Warning < Critical < Emergency < OutOfRange
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SensorStatus {
    Normal,
    Warning,
    Critical,
    Emergency,
    OutOfRange, // 超出应急带
}

impl fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorStatus::Normal => write!(f, "normal"),
            SensorStatus::Warning => write!(f, "warning"),
            SensorStatus::Critical => write!(f, "critical"),
            SensorStatus::Emergency => write!(f, "emergency"),
            SensorStatus::OutOfRange => write!(f, "out-of-range"),
        }
    }
}

// ==========================================
// 资产关键度 (Asset Criticality)
// ==========================================
// 顺序: Low < Medium < High < Critical < MissionCritical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetCriticality {
    Low,
    Medium,
    High,
    Critical,
    MissionCritical,
}

impl AssetCriticality {
    pub const ALL: [AssetCriticality; 5] = [
        AssetCriticality::Low,
        AssetCriticality::Medium,
        AssetCriticality::High,
        AssetCriticality::Critical,
        AssetCriticality::MissionCritical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCriticality::Low => "low",
            AssetCriticality::Medium => "medium",
            AssetCriticality::High => "high",
            AssetCriticality::Critical => "critical",
            AssetCriticality::MissionCritical => "mission-critical",
        }
    }

    /// 优先级评分中的关键度权重 (1..=5)
    pub fn weight(&self) -> f64 {
        match self {
            AssetCriticality::Low => 1.0,
            AssetCriticality::Medium => 2.0,
            AssetCriticality::High => 3.0,
            AssetCriticality::Critical => 4.0,
            AssetCriticality::MissionCritical => 5.0,
        }
    }
}

impl_wire_str!(AssetCriticality, "资产关键度");

// ==========================================
// 故障紧急窗口 (Urgency Window)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrgencyWindow {
    Planned,
    WithinMonth,
    WithinWeek,
    Immediate,
}

impl UrgencyWindow {
    pub const ALL: [UrgencyWindow; 4] = [
        UrgencyWindow::Planned,
        UrgencyWindow::WithinMonth,
        UrgencyWindow::WithinWeek,
        UrgencyWindow::Immediate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyWindow::Planned => "planned",
            UrgencyWindow::WithinMonth => "within-month",
            UrgencyWindow::WithinWeek => "within-week",
            UrgencyWindow::Immediate => "immediate",
        }
    }

    /// 优先级评分中的紧急权重 (1..=4)
    pub fn weight(&self) -> f64 {
        match self {
            UrgencyWindow::Planned => 1.0,
            UrgencyWindow::WithinMonth => 2.0,
            UrgencyWindow::WithinWeek => 3.0,
            UrgencyWindow::Immediate => 4.0,
        }
    }
}

impl_wire_str!(UrgencyWindow, "紧急窗口");

// ==========================================
// 维护类型 (Maintenance Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceType {
    Preventive,
    Predictive,
    Corrective,
    Emergency,
    Inspection,
    Calibration,
    Upgrade,
}

impl MaintenanceType {
    pub const ALL: [MaintenanceType; 7] = [
        MaintenanceType::Preventive,
        MaintenanceType::Predictive,
        MaintenanceType::Corrective,
        MaintenanceType::Emergency,
        MaintenanceType::Inspection,
        MaintenanceType::Calibration,
        MaintenanceType::Upgrade,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceType::Preventive => "preventive",
            MaintenanceType::Predictive => "predictive",
            MaintenanceType::Corrective => "corrective",
            MaintenanceType::Emergency => "emergency",
            MaintenanceType::Inspection => "inspection",
            MaintenanceType::Calibration => "calibration",
            MaintenanceType::Upgrade => "upgrade",
        }
    }
}

impl_wire_str!(MaintenanceType, "维护类型");

// ==========================================
// 任务复杂度 (Task Complexity)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskComplexity {
    Simple,
    Moderate,
    Complex,
    Major,
}

impl TaskComplexity {
    pub const ALL: [TaskComplexity; 4] = [
        TaskComplexity::Simple,
        TaskComplexity::Moderate,
        TaskComplexity::Complex,
        TaskComplexity::Major,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskComplexity::Simple => "simple",
            TaskComplexity::Moderate => "moderate",
            TaskComplexity::Complex => "complex",
            TaskComplexity::Major => "major",
        }
    }
}

impl_wire_str!(TaskComplexity, "任务复杂度");

// ==========================================
// 优先级分档 (Priority Tier)
// ==========================================
// 优先级分类器输出,不含 emergency (emergency 仅由人工/告警直接下发)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriorityTier {
    Low,
    Medium,
    High,
    Critical,
}

impl PriorityTier {
    pub const ALL: [PriorityTier; 4] = [
        PriorityTier::Low,
        PriorityTier::Medium,
        PriorityTier::High,
        PriorityTier::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityTier::Low => "low",
            PriorityTier::Medium => "medium",
            PriorityTier::High => "high",
            PriorityTier::Critical => "critical",
        }
    }
}

impl_wire_str!(PriorityTier, "优先级分档");

// ==========================================
// 工单优先级 (Work Order Priority)
// ==========================================
// 顺序: Low < Medium < High < Critical < Emergency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkOrderPriority {
    Low,
    Medium,
    High,
    Critical,
    Emergency,
}

impl WorkOrderPriority {
    pub const ALL: [WorkOrderPriority; 5] = [
        WorkOrderPriority::Low,
        WorkOrderPriority::Medium,
        WorkOrderPriority::High,
        WorkOrderPriority::Critical,
        WorkOrderPriority::Emergency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkOrderPriority::Low => "low",
            WorkOrderPriority::Medium => "medium",
            WorkOrderPriority::High => "high",
            WorkOrderPriority::Critical => "critical",
            WorkOrderPriority::Emergency => "emergency",
        }
    }

    /// 调度排序等级 (越大越先排)
    pub fn rank(&self) -> u8 {
        match self {
            WorkOrderPriority::Low => 1,
            WorkOrderPriority::Medium => 2,
            WorkOrderPriority::High => 3,
            WorkOrderPriority::Critical => 4,
            WorkOrderPriority::Emergency => 5,
        }
    }
}

impl_wire_str!(WorkOrderPriority, "工单优先级");

impl From<PriorityTier> for WorkOrderPriority {
    fn from(tier: PriorityTier) -> Self {
        match tier {
            PriorityTier::Low => WorkOrderPriority::Low,
            PriorityTier::Medium => WorkOrderPriority::Medium,
            PriorityTier::High => WorkOrderPriority::High,
            PriorityTier::Critical => WorkOrderPriority::Critical,
        }
    }
}

// ==========================================
// 工单状态 (Work Order Status)
// ==========================================
// 生命周期: Pending -> Scheduled -> InProgress -> Completed
//           任一非终态 -> Cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkOrderStatus {
    Pending,
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl WorkOrderStatus {
    pub const ALL: [WorkOrderStatus; 5] = [
        WorkOrderStatus::Pending,
        WorkOrderStatus::Scheduled,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::Completed,
        WorkOrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkOrderStatus::Pending => "pending",
            WorkOrderStatus::Scheduled => "scheduled",
            WorkOrderStatus::InProgress => "in-progress",
            WorkOrderStatus::Completed => "completed",
            WorkOrderStatus::Cancelled => "cancelled",
        }
    }

    /// 是否为终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkOrderStatus::Completed | WorkOrderStatus::Cancelled)
    }
}

impl_wire_str!(WorkOrderStatus, "工单状态");

// ==========================================
// 资产健康状况 (Asset Condition)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetCondition {
    Critical,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl AssetCondition {
    /// 由健康分 (0-100) 换算健康状况
    ///
    /// 规则: >=90 excellent, >=75 good, >=50 fair, >=25 poor, 其余 critical
    pub fn from_health_score(score: f64) -> Self {
        if score >= 90.0 {
            AssetCondition::Excellent
        } else if score >= 75.0 {
            AssetCondition::Good
        } else if score >= 50.0 {
            AssetCondition::Fair
        } else if score >= 25.0 {
            AssetCondition::Poor
        } else {
            AssetCondition::Critical
        }
    }
}

impl fmt::Display for AssetCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetCondition::Critical => write!(f, "critical"),
            AssetCondition::Poor => write!(f, "poor"),
            AssetCondition::Fair => write!(f, "fair"),
            AssetCondition::Good => write!(f, "good"),
            AssetCondition::Excellent => write!(f, "excellent"),
        }
    }
}

// ==========================================
// 资产类型 (Asset Type)
// ==========================================
// 未登记类型保留原始字符串 (工时倍率按 1.0 处理)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssetType {
    HvacSystem,
    Elevator,
    Escalator,
    Generator,
    MedicalEquipment,
    WaterSystem,
    PowerDistribution,
    FireSafety,
    SecuritySystem,
    Lighting,
    Communication,
    TransportVehicle,
    Other(String),
}

impl AssetType {
    pub fn as_str(&self) -> &str {
        match self {
            AssetType::HvacSystem => "hvac-system",
            AssetType::Elevator => "elevator",
            AssetType::Escalator => "escalator",
            AssetType::Generator => "generator",
            AssetType::MedicalEquipment => "medical-equipment",
            AssetType::WaterSystem => "water-system",
            AssetType::PowerDistribution => "power-distribution",
            AssetType::FireSafety => "fire-safety",
            AssetType::SecuritySystem => "security-system",
            AssetType::Lighting => "lighting",
            AssetType::Communication => "communication",
            AssetType::TransportVehicle => "transport-vehicle",
            AssetType::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for AssetType {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().replace('_', "-").as_str() {
            "hvac-system" | "hvac" => AssetType::HvacSystem,
            "elevator" => AssetType::Elevator,
            "escalator" => AssetType::Escalator,
            "generator" => AssetType::Generator,
            "medical-equipment" => AssetType::MedicalEquipment,
            "water-system" => AssetType::WaterSystem,
            "power-distribution" => AssetType::PowerDistribution,
            "fire-safety" => AssetType::FireSafety,
            "security-system" => AssetType::SecuritySystem,
            "lighting" => AssetType::Lighting,
            "communication" => AssetType::Communication,
            "transport-vehicle" => AssetType::TransportVehicle,
            _ => AssetType::Other(raw),
        }
    }
}

impl From<&str> for AssetType {
    fn from(raw: &str) -> Self {
        AssetType::from(raw.to_string())
    }
}

impl From<AssetType> for String {
    fn from(asset_type: AssetType) -> Self {
        asset_type.as_str().to_string()
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
