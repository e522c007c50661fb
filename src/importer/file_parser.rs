// ==========================================
// 智慧朝觐运维平台 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 输出: 以表头为键的原始行 (保留源文件行号)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 原始行记录
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 源文件行号 (表头为第 1 行)
    pub row_number: usize,
    /// 列名 -> 去除首尾空白后的单元格值
    pub fields: HashMap<String, String>,
}

impl RawRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(|v| v.as_str())
            .filter(|v| !v.is_empty())
    }
}

// ==========================================
// Trait: FileParser
// ==========================================
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录 (跳过完全空白的行)
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

fn check_file(path: &Path, allowed: &[&str]) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !allowed.contains(&ext.as_str()) {
        return Err(ImportError::UnsupportedFormat(ext));
    }
    Ok(())
}

/// 按表头组装行;短行缺失的单元格记为空值,保证每行都带齐表头列
fn build_row(row_number: usize, headers: &[String], values: Vec<String>) -> Option<RawRow> {
    let fields: HashMap<String, String> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let value = values.get(i).map(|v| v.trim().to_string()).unwrap_or_default();
            (header.clone(), value)
        })
        .collect();

    if fields.values().all(|v| v.is_empty()) {
        return None;
    }
    Some(RawRow { row_number, fields })
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        check_file(file_path, &["csv"])?;

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            // 空行不产生记录,行号以源文件位置为准
            let row_number = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2);
            let values = record.iter().map(|v| v.to_string()).collect();
            if let Some(row) = build_row(row_number, &headers, values) {
                rows.push(row);
            }
        }

        Ok(rows)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        check_file(file_path, &["xlsx", "xls"])?;

        // 按文件内容识别 xlsx / xls
        let mut workbook = open_workbook_auto(file_path)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut sheet_rows = range.rows();
        let header_row = sheet_rows.next().ok_or(ImportError::EmptyFile)?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (idx, data_row) in sheet_rows.enumerate() {
            let values = data_row.iter().map(|cell| cell.to_string()).collect();
            if let Some(row) = build_row(idx + 2, &headers, values) {
                rows.push(row);
            }
        }

        Ok(rows)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawRow>> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_rows(path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_rows(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_csv_parser_keeps_row_numbers_and_skips_blank_rows() {
        let file = csv_file(&["asset_id, value", "HVAC-1, 21.5", ",", "HVAC-2,19.0"]);
        let rows = CsvParser.parse_to_raw_rows(file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_number, 2);
        assert_eq!(rows[0].get("asset_id"), Some("HVAC-1"));
        assert_eq!(rows[0].get("value"), Some("21.5"));
        assert_eq!(rows[1].row_number, 4);
    }

    #[test]
    fn test_empty_cell_reads_as_missing() {
        let file = csv_file(&["asset_id,unit", "HVAC-1,"]);
        let rows = CsvParser.parse_to_raw_rows(file.path()).unwrap();
        assert_eq!(rows[0].get("unit"), None);
    }

    #[test]
    fn test_short_row_padded_to_header() {
        let file = csv_file(&["asset_id,sensor_type,unit", "HVAC-1,temperature", "HVAC-2,humidity,%"]);
        let rows = CsvParser.parse_to_raw_rows(file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows[0].fields.contains_key("unit"));
        assert_eq!(rows[0].get("unit"), None);
        assert_eq!(rows[1].get("unit"), Some("%"));
    }

    #[test]
    fn test_excel_parser_reads_first_sheet() {
        let rows = ExcelParser
            .parse_to_raw_rows(Path::new("tests/fixtures/sensor_readings.xlsx"))
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].row_number, 2);
        assert_eq!(rows[0].get("asset_id"), Some("ELV-HARAM-03"));
        assert_eq!(rows[1].get("value"), Some("22"));
        assert_eq!(rows[2].get("value"), Some("high"));
    }

    #[test]
    fn test_file_not_found() {
        let result = CsvParser.parse_to_raw_rows(Path::new("no_such_readings.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let file = Builder::new().suffix(".txt").tempfile().unwrap();
        let result = UniversalFileParser.parse(file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
