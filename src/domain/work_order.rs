// ==========================================
// 智慧朝觐运维平台 - 维护工单领域模型
// ==========================================
// 生命周期: 人工/自动触发创建 -> 调度器写入计划开始时间
//           -> 开工 -> 完工(写入实际成本,生成维护记录)
// 红线: 终态工单 (completed/cancelled) 不可再变更
// ==========================================

use crate::domain::maintenance::MaintenanceRecord;
use crate::domain::types::{MaintenanceType, WorkOrderPriority, WorkOrderStatus};
use crate::error::{ensure_non_negative, EngineError, EngineResult};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// MaintenanceWorkOrder - 维护工单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceWorkOrder {
    pub work_order_id: String,                  // 工单ID
    pub asset_id: String,                       // 资产ID
    pub maintenance_type: MaintenanceType,      // 维护类型
    pub priority: WorkOrderPriority,            // 优先级
    pub estimated_duration_hours: f64,          // 预计工时 (小时)

    #[serde(default = "default_status")]
    pub status: WorkOrderStatus,                // 工单状态
    #[serde(default)]
    pub scheduled_start: Option<NaiveDateTime>, // 计划开始时间 (调度器写入)
    #[serde(default)]
    pub assigned_crew: Option<usize>,           // 分配班组
    #[serde(default)]
    pub estimated_cost: Option<f64>,            // 预估成本
    #[serde(default)]
    pub actual_cost: Option<f64>,               // 实际成本 (完工写入)
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,    // 完工时间
    #[serde(default)]
    pub description: Option<String>,            // 工作内容
}

fn default_status() -> WorkOrderStatus {
    WorkOrderStatus::Pending
}

impl MaintenanceWorkOrder {
    /// 创建待调度工单
    pub fn new(
        work_order_id: impl Into<String>,
        asset_id: impl Into<String>,
        maintenance_type: MaintenanceType,
        priority: WorkOrderPriority,
        estimated_duration_hours: f64,
    ) -> Self {
        Self {
            work_order_id: work_order_id.into(),
            asset_id: asset_id.into(),
            maintenance_type,
            priority,
            estimated_duration_hours,
            status: WorkOrderStatus::Pending,
            scheduled_start: None,
            assigned_crew: None,
            estimated_cost: None,
            actual_cost: None,
            completed_at: None,
            description: None,
        }
    }

    // ==========================================
    // 状态流转
    // ==========================================

    /// 写入调度结果 (允许重排已调度工单)
    pub fn apply_slot(&mut self, slot: &ScheduledSlot) -> EngineResult<()> {
        if slot.work_order_id != self.work_order_id {
            return Err(EngineError::validation(
                "scheduled_slot.work_order_id",
                format!(
                    "调度结果属于工单 {}, 不能写入工单 {}",
                    slot.work_order_id, self.work_order_id
                ),
            ));
        }
        match self.status {
            WorkOrderStatus::Pending | WorkOrderStatus::Scheduled => {
                self.scheduled_start = Some(slot.scheduled_start);
                self.assigned_crew = Some(slot.crew);
                self.status = WorkOrderStatus::Scheduled;
                Ok(())
            }
            other => Err(self.transition_error(other, WorkOrderStatus::Scheduled)),
        }
    }

    /// 开工
    pub fn start(&mut self) -> EngineResult<()> {
        match self.status {
            WorkOrderStatus::Scheduled => {
                self.status = WorkOrderStatus::InProgress;
                Ok(())
            }
            other => Err(self.transition_error(other, WorkOrderStatus::InProgress)),
        }
    }

    /// 完工: 写入实际成本,并生成不可变的维护记录
    ///
    /// # 参数
    /// - `completed_at`: 完工时间
    /// - `actual_cost`: 实际成本 (非负)
    /// - `effectiveness_rating`: 维护效果评分 (1-10, 可空)
    pub fn complete(
        &mut self,
        completed_at: DateTime<Utc>,
        actual_cost: f64,
        effectiveness_rating: Option<u8>,
    ) -> EngineResult<MaintenanceRecord> {
        if self.status != WorkOrderStatus::InProgress {
            return Err(self.transition_error(self.status, WorkOrderStatus::Completed));
        }
        let actual_cost = ensure_non_negative("work_order.actual_cost", actual_cost)?;

        let record = MaintenanceRecord {
            record_id: format!("MR-{}", self.work_order_id),
            asset_id: self.asset_id.clone(),
            work_order_id: Some(self.work_order_id.clone()),
            maintenance_type: self.maintenance_type,
            completed_at,
            effectiveness_rating,
            cost: Some(actual_cost),
        };
        record.validate()?;

        self.status = WorkOrderStatus::Completed;
        self.actual_cost = Some(actual_cost);
        self.completed_at = Some(completed_at);
        Ok(record)
    }

    /// 取消 (仅非终态)
    pub fn cancel(&mut self) -> EngineResult<()> {
        if self.status.is_terminal() {
            return Err(self.transition_error(self.status, WorkOrderStatus::Cancelled));
        }
        self.status = WorkOrderStatus::Cancelled;
        Ok(())
    }

    fn transition_error(&self, from: WorkOrderStatus, to: WorkOrderStatus) -> EngineError {
        EngineError::InvalidStateTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

// ==========================================
// 调度输入/输出
// ==========================================

/// 可用资源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCapacity {
    pub personnel: u32,  // 可用技术人员数
    pub equipment: u32,  // 可用设备套数
}

/// 调度约束
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingConstraints {
    /// 收工时刻 (小时, 1..=24)。游标小时数 >= 该值即换日
    pub working_hours_per_day: u32,
    /// 是否允许周末作业
    pub allow_weekends: bool,
}

/// 单张工单的调度结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledSlot {
    pub work_order_id: String,           // 工单ID
    pub scheduled_start: NaiveDateTime,  // 计划开始时间
    pub duration_hours: f64,             // 工时 (小时)
    pub crew: usize,                     // 班组序号 (单时间线模式恒为 0)
}

// ==========================================
// 备件行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartLine {
    #[serde(default)]
    pub part_id: Option<String>,  // 备件编码
    pub cost: f64,                // 单价
    pub quantity: f64,            // 数量
}

impl PartLine {
    pub fn new(cost: f64, quantity: f64) -> Self {
        Self {
            part_id: None,
            cost,
            quantity,
        }
    }
}
