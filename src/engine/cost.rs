// ==========================================
// 智慧朝觐运维平台 - 维护成本估算引擎
// ==========================================
// direct = 工时 × 费率 + Σ(备件单价 × 数量)
// total  = direct × (1 + 管理费率)
// ==========================================

use crate::config::CostConfig;
use crate::domain::work_order::PartLine;
use crate::error::{ensure_non_negative, EngineResult};
use serde::{Deserialize, Serialize};

/// 成本拆解
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub labor_cost: f64,
    pub parts_cost: f64,
    pub direct_cost: f64,
    pub overhead_rate: f64,
    pub overhead_cost: f64,
    pub total_cost: f64,
}

// ==========================================
// CostEstimator - 成本估算引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct CostEstimator {
    config: CostConfig,
}

impl CostEstimator {
    pub fn new(config: CostConfig) -> Self {
        Self { config }
    }

    /// 估算总成本
    ///
    /// # 参数
    /// - `overhead_rate`: 管理费率,为 None 时采用配置缺省值
    ///
    /// # 错误
    /// - 任一输入为负数或非有限数值 -> Validation
    pub fn estimate_cost(
        &self,
        labor_hours: f64,
        labor_rate: f64,
        parts: &[PartLine],
        overhead_rate: Option<f64>,
    ) -> EngineResult<f64> {
        self.breakdown(labor_hours, labor_rate, parts, overhead_rate)
            .map(|b| b.total_cost)
    }

    /// 估算成本并返回拆解
    pub fn breakdown(
        &self,
        labor_hours: f64,
        labor_rate: f64,
        parts: &[PartLine],
        overhead_rate: Option<f64>,
    ) -> EngineResult<CostBreakdown> {
        let labor_hours = ensure_non_negative("labor_hours", labor_hours)?;
        let labor_rate = ensure_non_negative("labor_rate", labor_rate)?;
        let overhead_rate = ensure_non_negative(
            "overhead_rate",
            overhead_rate.unwrap_or(self.config.default_overhead_rate),
        )?;

        let mut parts_cost = 0.0;
        for (idx, part) in parts.iter().enumerate() {
            let cost = ensure_non_negative(&format!("parts[{}].cost", idx), part.cost)?;
            let quantity = ensure_non_negative(&format!("parts[{}].quantity", idx), part.quantity)?;
            parts_cost += cost * quantity;
        }

        let labor_cost = labor_hours * labor_rate;
        let direct_cost = labor_cost + parts_cost;
        let total_cost = direct_cost * (1.0 + overhead_rate);

        Ok(CostBreakdown {
            labor_cost,
            parts_cost,
            direct_cost,
            overhead_rate,
            overhead_cost: total_cost - direct_cost,
            total_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_labor_only_without_overhead() {
        let estimator = CostEstimator::default();
        let total = estimator.estimate_cost(6.0, 85.0, &[], Some(0.0)).unwrap();
        assert_eq!(total, 510.0);
    }

    #[test]
    fn test_default_overhead_applied() {
        let estimator = CostEstimator::default();
        let parts = vec![PartLine::new(120.0, 2.0)];
        let total = estimator.estimate_cost(4.0, 100.0, &parts, None).unwrap();
        assert!((total - (400.0 + 240.0) * 1.15).abs() < EPS);
    }

    #[test]
    fn test_breakdown_components() {
        let estimator = CostEstimator::default();
        let parts = vec![PartLine::new(50.0, 3.0), PartLine::new(10.0, 0.5)];
        let b = estimator.breakdown(2.0, 60.0, &parts, Some(0.2)).unwrap();
        assert!((b.labor_cost - 120.0).abs() < EPS);
        assert!((b.parts_cost - 155.0).abs() < EPS);
        assert!((b.direct_cost - 275.0).abs() < EPS);
        assert!((b.overhead_cost - 55.0).abs() < 1e-6);
        assert!((b.total_cost - 330.0).abs() < 1e-6);
    }

    #[test]
    fn test_negative_inputs_rejected() {
        let estimator = CostEstimator::default();
        assert!(estimator.estimate_cost(-1.0, 10.0, &[], None).is_err());
        assert!(estimator.estimate_cost(1.0, -10.0, &[], None).is_err());
        assert!(estimator
            .estimate_cost(1.0, 10.0, &[PartLine::new(-5.0, 1.0)], None)
            .is_err());
        assert!(estimator
            .estimate_cost(1.0, 10.0, &[PartLine::new(5.0, -1.0)], None)
            .is_err());
        assert!(estimator.estimate_cost(1.0, 10.0, &[], Some(-0.1)).is_err());
    }

    #[test]
    fn test_failing_part_reports_index() {
        let estimator = CostEstimator::default();
        let parts = vec![PartLine::new(5.0, 1.0), PartLine::new(f64::NAN, 1.0)];
        let err = estimator.estimate_cost(1.0, 1.0, &parts, None).unwrap_err();
        assert!(err.to_string().contains("parts[1].cost"));
    }
}
