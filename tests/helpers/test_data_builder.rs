// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use smart_hajj_maintenance::domain::{
    AssetCriticality, AssetType, InfrastructureAsset, MaintenancePrediction, MaintenanceRecord,
    MaintenanceType, MaintenanceWorkOrder, PredictionTimeframe, SensorReading, SensorThresholds,
    SensorType, ThresholdBand, UrgencyWindow, WorkOrderPriority,
};
use std::io::Write;

pub const EPS: f64 = 1e-9;

/// 浮点近似断言
pub fn assert_approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {} but got {}",
        expected,
        actual
    );
}

/// UTC 时间点
pub fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// 设施本地时间
pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

// ==========================================
// InfrastructureAsset 构建器
// ==========================================

pub struct AssetBuilder {
    asset_id: String,
    asset_type: AssetType,
    criticality: AssetCriticality,
    installation_date: NaiveDate,
}

impl AssetBuilder {
    pub fn new(asset_id: &str) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            asset_type: AssetType::HvacSystem,
            criticality: AssetCriticality::Medium,
            installation_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        }
    }

    pub fn asset_type(mut self, asset_type: AssetType) -> Self {
        self.asset_type = asset_type;
        self
    }

    pub fn criticality(mut self, criticality: AssetCriticality) -> Self {
        self.criticality = criticality;
        self
    }

    pub fn installed(mut self, date: NaiveDate) -> Self {
        self.installation_date = date;
        self
    }

    pub fn build(self) -> InfrastructureAsset {
        InfrastructureAsset {
            name: format!("{} (test)", self.asset_id),
            asset_id: self.asset_id,
            asset_type: self.asset_type,
            criticality: self.criticality,
            installation_date: self.installation_date,
            location: Some("Mina camp 12".to_string()),
        }
    }
}

// ==========================================
// SensorReading 构建器
// ==========================================

/// 温度读数: normal 18-26 (中点 22), warning 15-30, critical 10-35, emergency 5-45
pub fn temperature_reading(asset_id: &str, value: f64) -> SensorReading {
    SensorReading {
        asset_id: asset_id.to_string(),
        sensor_type: SensorType::Temperature,
        timestamp: utc(2026, 5, 25, 10),
        value,
        unit: "C".to_string(),
        thresholds: SensorThresholds {
            normal: ThresholdBand::new(18.0, 26.0),
            warning: ThresholdBand::new(15.0, 30.0),
            critical: ThresholdBand::new(10.0, 35.0),
            emergency: ThresholdBand::new(5.0, 45.0),
        },
    }
}

// ==========================================
// MaintenanceRecord / MaintenancePrediction
// ==========================================

pub fn maintenance_record(
    asset_id: &str,
    completed_at: DateTime<Utc>,
    rating: Option<u8>,
) -> MaintenanceRecord {
    MaintenanceRecord {
        record_id: format!("MR-{}-{}", asset_id, completed_at.timestamp()),
        asset_id: asset_id.to_string(),
        work_order_id: None,
        maintenance_type: MaintenanceType::Preventive,
        completed_at,
        effectiveness_rating: rating,
        cost: None,
    }
}

pub fn prediction(asset_id: &str, probability: f64, urgency: UrgencyWindow) -> MaintenancePrediction {
    MaintenancePrediction {
        prediction_id: format!("PRED-{}", asset_id),
        asset_id: asset_id.to_string(),
        probability,
        timeframe: PredictionTimeframe {
            urgency,
            earliest: None,
            latest: None,
        },
        confidence: None,
    }
}

// ==========================================
// MaintenanceWorkOrder
// ==========================================

pub fn work_order(id: &str, priority: WorkOrderPriority, hours: f64) -> MaintenanceWorkOrder {
    MaintenanceWorkOrder::new(
        id,
        format!("ASSET-{}", id),
        MaintenanceType::Corrective,
        priority,
        hours,
    )
}

// ==========================================
// 临时文件
// ==========================================

pub const READINGS_HEADER: &str = "asset_id,sensor_type,timestamp,value,unit,normal_min,normal_max,warning_min,warning_max,critical_min,critical_max,emergency_min,emergency_max";

/// 写入临时文件 (按后缀决定解析器)
pub fn temp_file(suffix: &str, lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}
