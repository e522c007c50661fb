// ==========================================
// 智慧朝觐运维平台 - 数据导入层
// ==========================================
// 职责: 读取外部传感器导出文件 (CSV / Excel),转换为领域读数
// 流程: 文件 -> 原始行 -> 字段映射与校验 -> 读数 + 违规报告
// ==========================================

pub mod error;
pub mod file_parser;
pub mod sensor_importer;

pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRow, UniversalFileParser};
pub use sensor_importer::{ImportReport, ImportViolation, SensorReadingImporter, REQUIRED_COLUMNS};
