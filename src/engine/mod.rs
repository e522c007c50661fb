// ==========================================
// 智慧朝觐运维平台 - 引擎层
// ==========================================
// 职责: 维护决策规则引擎 (纯函数,无 I/O,无共享可变状态)
// 红线: 引擎不记日志、不吞错误、不做静默降级
// ==========================================

pub mod cost;
pub mod duration;
pub mod health;
pub mod priority;
pub mod scheduler;

// 重导出核心引擎
pub use cost::{CostBreakdown, CostEstimator};
pub use duration::DurationEstimator;
pub use health::{HealthBreakdown, HealthScorer};
pub use priority::PriorityClassifier;
pub use scheduler::WorkOrderScheduler;

use crate::config::EngineConfig;

// ==========================================
// MaintenanceEngines - 引擎集合
// ==========================================
// 按同一份配置构造五个引擎,供 API 层复用
#[derive(Debug, Clone, Default)]
pub struct MaintenanceEngines {
    pub health: HealthScorer,
    pub priority: PriorityClassifier,
    pub cost: CostEstimator,
    pub duration: DurationEstimator,
    pub scheduler: WorkOrderScheduler,
}

impl MaintenanceEngines {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            health: HealthScorer::new(config.health.clone()),
            priority: PriorityClassifier::new(config.priority.clone()),
            cost: CostEstimator::new(config.cost.clone()),
            duration: DurationEstimator::new(config.duration.clone()),
            scheduler: WorkOrderScheduler::new(config.scheduler.clone()),
        }
    }
}
