// ==========================================
// 智慧朝觐运维平台 - API 层
// ==========================================
// 职责: 提供维护决策接口,供命令行入口及上层服务调用
// ==========================================

pub mod dto;
pub mod error;
pub mod maintenance_api;
pub mod response;

// 重导出核心类型
pub use error::{ApiError, ApiResult, ErrorBody};
pub use maintenance_api::MaintenanceApi;
pub use response::{MaintenanceResponse, ResponseMetadata};
