// ==========================================
// 智慧朝觐运维平台 - 传感器读数导入器
// ==========================================
// 职责: 原始行 -> SensorReading + 数据质量报告
// 红线: 非法读数 (NaN/缺列/未知类型/阈值嵌套错误) 一律拒收并记录原因,
//       不允许静默纳入健康评分
// ==========================================

use crate::domain::sensor::{SensorReading, SensorThresholds, ThresholdBand};
use crate::domain::types::SensorType;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRow, UniversalFileParser};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 必需列
pub const REQUIRED_COLUMNS: [&str; 13] = [
    "asset_id",
    "sensor_type",
    "timestamp",
    "value",
    "unit",
    "normal_min",
    "normal_max",
    "warning_min",
    "warning_max",
    "critical_min",
    "critical_max",
    "emergency_min",
    "emergency_max",
];

/// 行级违规
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportViolation {
    pub row_number: usize,
    pub asset_id: Option<String>,
    pub field: String,
    pub message: String,
}

/// 导入报告
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub total_rows: usize,
    pub readings: Vec<SensorReading>,
    pub violations: Vec<ImportViolation>,
}

impl ImportReport {
    pub fn accepted(&self) -> usize {
        self.readings.len()
    }

    pub fn rejected(&self) -> usize {
        self.total_rows - self.readings.len()
    }
}

// ==========================================
// SensorReadingImporter - 传感器读数导入器
// ==========================================
pub struct SensorReadingImporter;

impl SensorReadingImporter {
    pub fn new() -> Self {
        Self
    }

    /// 从文件导入 (按扩展名选择 CSV / Excel 解析器)
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ImportReport> {
        let rows = UniversalFileParser.parse(file_path)?;
        self.import_rows(&rows)
    }

    /// 从原始行导入
    ///
    /// # 错误
    /// - 表头缺少必需列 -> ImportError::MissingColumn (整批拒收)
    ///
    /// 行级问题记入 `violations`,该行不进入 `readings`
    ///
    /// 解析器按表头补齐短行,首行的键即表头列
    pub fn import_rows(&self, rows: &[RawRow]) -> ImportResult<ImportReport> {
        if let Some(first) = rows.first() {
            for column in REQUIRED_COLUMNS {
                if !first.fields.contains_key(column) {
                    return Err(ImportError::MissingColumn(column.to_string()));
                }
            }
        }

        let mut report = ImportReport {
            total_rows: rows.len(),
            ..ImportReport::default()
        };

        for row in rows {
            match map_row(row) {
                Ok(reading) => report.readings.push(reading),
                Err(violation) => report.violations.push(violation),
            }
        }

        Ok(report)
    }
}

impl Default for SensorReadingImporter {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 行映射
// ==========================================

fn map_row(row: &RawRow) -> Result<SensorReading, ImportViolation> {
    let asset_id = row.get("asset_id").map(|s| s.to_string());
    let violation = |field: &str, message: String| ImportViolation {
        row_number: row.row_number,
        asset_id: asset_id.clone(),
        field: field.to_string(),
        message,
    };

    let id = asset_id
        .clone()
        .ok_or_else(|| violation("asset_id", "资产ID缺失".to_string()))?;

    let sensor_type: SensorType = required(row, "sensor_type")
        .map_err(|m| violation("sensor_type", m))?
        .parse()
        .map_err(|e: crate::error::EngineError| violation("sensor_type", e.to_string()))?;

    let raw_ts = required(row, "timestamp").map_err(|m| violation("timestamp", m))?;
    let timestamp = DateTime::parse_from_rfc3339(raw_ts)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| violation("timestamp", format!("时间格式错误 (期望 RFC 3339): {}", e)))?;

    let value = number(row, "value").map_err(|m| violation("value", m))?;
    let unit = required(row, "unit")
        .map_err(|m| violation("unit", m))?
        .to_string();

    let band = |prefix: &str| -> Result<ThresholdBand, ImportViolation> {
        let min_col = format!("{}_min", prefix);
        let max_col = format!("{}_max", prefix);
        let min = number(row, &min_col).map_err(|m| violation(&min_col, m))?;
        let max = number(row, &max_col).map_err(|m| violation(&max_col, m))?;
        Ok(ThresholdBand::new(min, max))
    };

    let reading = SensorReading {
        asset_id: id,
        sensor_type,
        timestamp,
        value,
        unit,
        thresholds: SensorThresholds {
            normal: band("normal")?,
            warning: band("warning")?,
            critical: band("critical")?,
            emergency: band("emergency")?,
        },
    };

    reading.validate().map_err(|e| match e {
        crate::error::EngineError::Validation { field, message } => violation(&field, message),
        other => violation("reading", other.to_string()),
    })?;

    Ok(reading)
}

fn required<'a>(row: &'a RawRow, column: &str) -> Result<&'a str, String> {
    row.get(column).ok_or_else(|| format!("{} 缺失", column))
}

fn number(row: &RawRow, column: &str) -> Result<f64, String> {
    let raw = required(row, column)?;
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("无法解析为数值: {}", raw))?;
    if !value.is_finite() {
        return Err(format!("数值非法: {}", raw));
    }
    Ok(value)
}
