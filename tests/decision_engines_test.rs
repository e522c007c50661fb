// ==========================================
// 决策引擎集成测试 (优先级 / 成本 / 工时)
// ==========================================
// 职责: 验证分档边界、成本线性、工时表查找与兜底
// ==========================================

#[path = "helpers/test_data_builder.rs"]
mod test_data_builder;

use smart_hajj_maintenance::config::{CostConfig, EngineConfig};
use smart_hajj_maintenance::domain::{
    AssetCriticality, AssetType, MaintenanceType, PartLine, PriorityTier, TaskComplexity,
    UrgencyWindow, WorkOrderPriority,
};
use smart_hajj_maintenance::engine::{
    CostEstimator, DurationEstimator, MaintenanceEngines, PriorityClassifier,
};
use smart_hajj_maintenance::EngineError;
use test_data_builder::{assert_approx, prediction, AssetBuilder};

// ==========================================
// 优先级分类
// ==========================================

#[test]
fn test_priority_critical_immediate_certain_is_high() {
    // 0.4·4 + 0.3·4 + 0.3·1.0 = 3.1 < 3.5
    let classifier = PriorityClassifier::default();
    let asset = AssetBuilder::new("CHILLER-ARAFAT-2")
        .criticality(AssetCriticality::Critical)
        .build();
    let tier = classifier
        .classify_priority(
            &prediction("CHILLER-ARAFAT-2", 1.0, UrgencyWindow::Immediate),
            &asset,
        )
        .unwrap();
    assert_eq!(tier, PriorityTier::High);
}

#[test]
fn test_priority_tiers_across_the_grid() {
    let classifier = PriorityClassifier::default();
    let cases = [
        (AssetCriticality::Low, UrgencyWindow::Planned, 0.0, PriorityTier::Low),
        (AssetCriticality::Medium, UrgencyWindow::WithinMonth, 0.5, PriorityTier::Medium),
        (AssetCriticality::High, UrgencyWindow::WithinWeek, 0.5, PriorityTier::Medium),
        (AssetCriticality::High, UrgencyWindow::Immediate, 0.5, PriorityTier::High),
        (AssetCriticality::MissionCritical, UrgencyWindow::Immediate, 1.0, PriorityTier::Critical),
        (AssetCriticality::MissionCritical, UrgencyWindow::Immediate, 0.9, PriorityTier::High),
    ];

    for (criticality, urgency, probability, expected) in cases {
        let asset = AssetBuilder::new("A-1").criticality(criticality).build();
        let tier = classifier
            .classify_priority(&prediction("A-1", probability, urgency), &asset)
            .unwrap();
        assert_eq!(tier, expected, "{} / {} / {}", criticality, urgency, probability);
    }
}

#[test]
fn test_priority_thresholds_are_inclusive_lower_bounds() {
    let classifier = PriorityClassifier::default();
    assert_eq!(classifier.tier_for_score(3.5), PriorityTier::Critical);
    assert_eq!(classifier.tier_for_score(2.5), PriorityTier::High);
    assert_eq!(classifier.tier_for_score(1.5), PriorityTier::Medium);
    assert_eq!(classifier.tier_for_score(1.4999), PriorityTier::Low);
}

#[test]
fn test_priority_tier_maps_onto_work_order_scale() {
    assert_eq!(WorkOrderPriority::from(PriorityTier::Critical), WorkOrderPriority::Critical);
    assert!(WorkOrderPriority::Emergency.rank() > WorkOrderPriority::from(PriorityTier::Critical).rank());
}

#[test]
fn test_unknown_wire_values_are_rejected() {
    let err = "someday".parse::<UrgencyWindow>().unwrap_err();
    assert!(matches!(err, EngineError::UnknownValue { .. }));
    assert!(err.is_validation());

    let err = "vital".parse::<AssetCriticality>().unwrap_err();
    assert!(err.is_validation());

    assert_eq!(
        "Mission_Critical".parse::<AssetCriticality>().unwrap(),
        AssetCriticality::MissionCritical
    );
}

// ==========================================
// 成本估算
// ==========================================

#[test]
fn test_cost_formula_with_default_overhead() {
    let estimator = CostEstimator::default();
    // (4 × 50 + 100 × 2 + 25 × 4) × 1.15 = 500 × 1.15
    let total = estimator
        .estimate_cost(
            4.0,
            50.0,
            &[PartLine::new(100.0, 2.0), PartLine::new(25.0, 4.0)],
            None,
        )
        .unwrap();
    assert_approx(total, 575.0);
}

#[test]
fn test_cost_is_linear_in_labor_and_parts() {
    let estimator = CostEstimator::default();
    let parts = [PartLine::new(80.0, 3.0)];

    let base = estimator.estimate_cost(2.0, 60.0, &parts, Some(0.2)).unwrap();
    let doubled_hours = estimator.estimate_cost(4.0, 60.0, &parts, Some(0.2)).unwrap();
    let no_parts = estimator.estimate_cost(2.0, 60.0, &[], Some(0.2)).unwrap();
    let parts_only = estimator.estimate_cost(0.0, 60.0, &parts, Some(0.2)).unwrap();

    assert_approx(base, no_parts + parts_only);
    assert_approx(doubled_hours - base, no_parts);
}

#[test]
fn test_cost_breakdown_parts_sum_to_total() {
    let estimator = CostEstimator::new(CostConfig {
        default_overhead_rate: 0.1,
    });
    let breakdown = estimator
        .breakdown(3.0, 40.0, &[PartLine::new(15.0, 2.0)], None)
        .unwrap();

    assert_approx(breakdown.labor_cost, 120.0);
    assert_approx(breakdown.parts_cost, 30.0);
    assert_approx(breakdown.direct_cost, 150.0);
    assert_approx(breakdown.overhead_cost, 15.0);
    assert_approx(breakdown.total_cost, 165.0);
}

#[test]
fn test_cost_rejects_negative_inputs() {
    let estimator = CostEstimator::default();
    let cases = [
        estimator.estimate_cost(-1.0, 50.0, &[], None),
        estimator.estimate_cost(1.0, -50.0, &[], None),
        estimator.estimate_cost(1.0, 50.0, &[PartLine::new(-5.0, 1.0)], None),
        estimator.estimate_cost(1.0, 50.0, &[PartLine::new(5.0, -1.0)], None),
        estimator.estimate_cost(1.0, 50.0, &[], Some(-0.1)),
    ];
    for result in cases {
        assert!(result.unwrap_err().is_validation());
    }
}

// ==========================================
// 工时估算
// ==========================================

#[test]
fn test_duration_table_lookups() {
    let estimator = DurationEstimator::default();

    assert_approx(
        estimator.estimate_duration(
            MaintenanceType::Inspection,
            &AssetType::from("hvac-system"),
            TaskComplexity::Simple,
        ),
        0.6,
    );
    assert_approx(
        estimator.estimate_duration(
            MaintenanceType::Emergency,
            &AssetType::MedicalEquipment,
            TaskComplexity::Major,
        ),
        38.4,
    );
    assert_approx(
        estimator.estimate_duration(
            MaintenanceType::Preventive,
            &AssetType::Generator,
            TaskComplexity::Complex,
        ),
        8.0 * 1.4,
    );
}

#[test]
fn test_duration_unknown_asset_type_uses_unit_multiplier() {
    let estimator = DurationEstimator::default();
    let shelter = AssetType::from("pedestrian-shade-canopy");
    assert_eq!(shelter, AssetType::Other("pedestrian-shade-canopy".to_string()));
    assert_approx(
        estimator.estimate_duration(MaintenanceType::Calibration, &shelter, TaskComplexity::Moderate),
        2.0,
    );
}

#[test]
fn test_engines_share_one_configuration() {
    let mut config = EngineConfig::default();
    config.cost.default_overhead_rate = 0.0;
    config.priority.critical_threshold = 3.0;
    let engines = MaintenanceEngines::from_config(&config);

    assert_approx(engines.cost.estimate_cost(1.0, 10.0, &[], None).unwrap(), 10.0);
    assert_eq!(engines.priority.tier_for_score(3.1), PriorityTier::Critical);
}
