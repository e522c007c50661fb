// ==========================================
// 智慧朝觐运维平台 - 基础设施资产领域模型
// ==========================================
// 归属: 外部资产台账,本引擎只读
// ==========================================

use crate::domain::types::{AssetCriticality, AssetType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// InfrastructureAsset - 基础设施资产
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureAsset {
    pub asset_id: String,                 // 资产ID
    pub name: String,                     // 资产名称
    pub asset_type: AssetType,            // 资产类型
    pub criticality: AssetCriticality,    // 关键度
    pub installation_date: NaiveDate,     // 安装日期 (决定资产年龄)
    #[serde(default)]
    pub location: Option<String>,         // 位置 (营地/圣地分区)
}

impl InfrastructureAsset {
    /// 截至 `as_of` 的资产年龄 (天)
    ///
    /// 安装日期晚于 `as_of` 时返回 0
    pub fn age_in_days(&self, as_of: DateTime<Utc>) -> u32 {
        let days = (as_of.date_naive() - self.installation_date).num_days();
        days.clamp(0, u32::MAX as i64) as u32
    }
}
