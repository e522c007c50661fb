// ==========================================
// 智慧朝觐运维平台 - 工单优先级分类引擎
// ==========================================
// 职责: 资产关键度 + 故障紧急窗口 + 故障概率 -> 优先级分档
// 红线: 分档下界含边界,阈值必须原样保留以保证结果可复现
// ==========================================

use crate::config::PriorityConfig;
use crate::domain::asset::InfrastructureAsset;
use crate::domain::maintenance::MaintenancePrediction;
use crate::domain::types::{AssetCriticality, PriorityTier, UrgencyWindow};
use crate::error::{ensure_in_range, EngineResult};

// ==========================================
// PriorityClassifier - 优先级分类引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct PriorityClassifier {
    config: PriorityConfig,
}

impl PriorityClassifier {
    pub fn new(config: PriorityConfig) -> Self {
        Self { config }
    }

    /// 对故障预测进行优先级分类
    ///
    /// score = w_c·关键度权重 + w_u·紧急权重 + w_p·故障概率
    ///
    /// 关键度/紧急窗口为穷举枚举,未知字符串在解析阶段即报错
    pub fn classify_priority(
        &self,
        prediction: &MaintenancePrediction,
        asset: &InfrastructureAsset,
    ) -> EngineResult<PriorityTier> {
        let score = self.weighted_score(
            asset.criticality,
            prediction.timeframe.urgency,
            prediction.probability,
        )?;
        Ok(self.tier_for_score(score))
    }

    /// 加权评分
    pub fn weighted_score(
        &self,
        criticality: AssetCriticality,
        urgency: UrgencyWindow,
        probability: f64,
    ) -> EngineResult<f64> {
        let probability = ensure_in_range("prediction.probability", probability, 0.0, 1.0)?;
        let c = &self.config;
        Ok(c.criticality_weight * criticality.weight()
            + c.urgency_weight * urgency.weight()
            + c.probability_weight * probability)
    }

    /// 评分 -> 分档 (下界含)
    pub fn tier_for_score(&self, score: f64) -> PriorityTier {
        let c = &self.config;
        if score >= c.critical_threshold {
            PriorityTier::Critical
        } else if score >= c.high_threshold {
            PriorityTier::High
        } else if score >= c.medium_threshold {
            PriorityTier::Medium
        } else {
            PriorityTier::Low
        }
    }
}
