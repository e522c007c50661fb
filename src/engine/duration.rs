// ==========================================
// 智慧朝觐运维平台 - 维护工时估算引擎
// ==========================================
// duration = 基础工时(维护类型 × 复杂度) × 资产类型倍率
// 兜底: 工时表缺项 -> fallback_hours (缺省 2 小时); 未登记资产类型 -> 倍率 1.0
// ==========================================

use crate::config::DurationConfig;
use crate::domain::types::{AssetType, MaintenanceType, TaskComplexity};

// ==========================================
// DurationEstimator - 工时估算引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct DurationEstimator {
    config: DurationConfig,
}

impl DurationEstimator {
    pub fn new(config: DurationConfig) -> Self {
        Self { config }
    }

    /// 估算工时 (小时)
    pub fn estimate_duration(
        &self,
        maintenance_type: MaintenanceType,
        asset_type: &AssetType,
        complexity: TaskComplexity,
    ) -> f64 {
        self.base_hours(maintenance_type, complexity) * self.asset_multiplier(asset_type)
    }

    /// 基础工时,工时表缺项时取兜底值
    pub fn base_hours(&self, maintenance_type: MaintenanceType, complexity: TaskComplexity) -> f64 {
        self.config
            .base_hours
            .get(&maintenance_type)
            .and_then(|row| row.get(&complexity))
            .copied()
            .unwrap_or(self.config.fallback_hours)
    }

    /// 资产类型倍率,未登记类型取 1.0
    pub fn asset_multiplier(&self, asset_type: &AssetType) -> f64 {
        self.config
            .asset_multipliers
            .get(asset_type.as_str())
            .copied()
            .unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_inspection_hvac_simple() {
        let estimator = DurationEstimator::default();
        let hours = estimator.estimate_duration(
            MaintenanceType::Inspection,
            &AssetType::from("hvac-system"),
            TaskComplexity::Simple,
        );
        assert!((hours - 0.6).abs() < EPS);
    }

    #[test]
    fn test_emergency_medical_major() {
        let estimator = DurationEstimator::default();
        let hours = estimator.estimate_duration(
            MaintenanceType::Emergency,
            &AssetType::MedicalEquipment,
            TaskComplexity::Major,
        );
        assert!((hours - 38.4).abs() < EPS);
    }

    #[test]
    fn test_unregistered_asset_type_multiplier_is_one() {
        let estimator = DurationEstimator::default();
        let hours = estimator.estimate_duration(
            MaintenanceType::Upgrade,
            &AssetType::from("shuttle-bus-shelter"),
            TaskComplexity::Major,
        );
        assert_eq!(hours, 40.0);
        assert_eq!(estimator.asset_multiplier(&AssetType::Lighting), 1.0);
    }

    #[test]
    fn test_partial_table_falls_back_to_default_hours() {
        let mut base_hours = BTreeMap::new();
        base_hours.insert(
            MaintenanceType::Inspection,
            [(TaskComplexity::Simple, 0.75)].into_iter().collect(),
        );
        let estimator = DurationEstimator::new(DurationConfig {
            base_hours,
            ..DurationConfig::default()
        });

        assert_eq!(
            estimator.base_hours(MaintenanceType::Inspection, TaskComplexity::Simple),
            0.75
        );
        assert_eq!(
            estimator.base_hours(MaintenanceType::Inspection, TaskComplexity::Major),
            2.0
        );
        assert_eq!(
            estimator.base_hours(MaintenanceType::Calibration, TaskComplexity::Simple),
            2.0
        );
    }
}
