// ==========================================
// 智慧朝觐运维平台 - 维护记录与故障预测领域模型
// ==========================================
// MaintenanceRecord: 工单完工时生成,之后不可变
// MaintenancePrediction: 外部预测模型产出,优先级分类器只读
// ==========================================

use crate::domain::types::{MaintenanceType, UrgencyWindow};
use crate::error::{ensure_in_range, EngineResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// MaintenanceRecord - 历史维护记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub record_id: String,                 // 记录ID
    pub asset_id: String,                  // 资产ID
    pub work_order_id: Option<String>,     // 来源工单
    pub maintenance_type: MaintenanceType, // 维护类型
    pub completed_at: DateTime<Utc>,       // 完工时间
    #[serde(default)]
    pub effectiveness_rating: Option<u8>,  // 维护效果评分 (1-10, 可空)
    #[serde(default)]
    pub cost: Option<f64>,                 // 实际成本
}

impl MaintenanceRecord {
    /// 校验效果评分 (1..=10)
    pub fn validate(&self) -> EngineResult<()> {
        if let Some(rating) = self.effectiveness_rating {
            ensure_in_range(
                "maintenance_record.effectiveness_rating",
                rating as f64,
                1.0,
                10.0,
            )?;
        }
        Ok(())
    }
}

// ==========================================
// PredictionTimeframe - 预测时间窗
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionTimeframe {
    pub urgency: UrgencyWindow,            // 紧急窗口
    #[serde(default)]
    pub earliest: Option<DateTime<Utc>>,   // 最早故障时间
    #[serde(default)]
    pub latest: Option<DateTime<Utc>>,     // 最晚故障时间
}

// ==========================================
// MaintenancePrediction - 故障预测
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenancePrediction {
    pub prediction_id: String,             // 预测ID
    pub asset_id: String,                  // 资产ID
    pub probability: f64,                  // 故障概率 (0-1)
    pub timeframe: PredictionTimeframe,    // 时间窗
    #[serde(default)]
    pub confidence: Option<f64>,           // 模型置信度 (0-1)
}

impl MaintenancePrediction {
    /// 校验故障概率/置信度位于 [0, 1]
    pub fn validate(&self) -> EngineResult<()> {
        ensure_in_range("prediction.probability", self.probability, 0.0, 1.0)?;
        if let Some(confidence) = self.confidence {
            ensure_in_range("prediction.confidence", confidence, 0.0, 1.0)?;
        }
        Ok(())
    }
}
