// ==========================================
// 智慧朝觐运维平台 - API层错误类型
// ==========================================
// 职责: 汇总引擎/导入/配置错误,输出带稳定错误码的用户可读错误
// 红线: 所有错误信息必须包含显式原因 (可解释性)
// ==========================================

use crate::config::ConfigError;
use crate::error::EngineError;
use crate::importer::error::ImportError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("调度规模超限: requested={requested}, limit={limit}")]
    CapacityExceeded { requested: usize, limit: usize },

    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    // ==========================================
    // 外部数据错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 稳定的机器可读错误码
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            ApiError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            ApiError::ImportError(_) => "IMPORT_ERROR",
            ApiError::ConfigError(_) => "CONFIG_ERROR",
            ApiError::Other(_) => "OTHER_ERROR",
        }
    }
}

// ==========================================
// 从引擎错误转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation { .. } | EngineError::UnknownValue { .. } => {
                ApiError::ValidationError(err.to_string())
            }
            EngineError::CapacityExceeded { requested, limit } => {
                ApiError::CapacityExceeded { requested, limit }
            }
            EngineError::InvalidStateTransition { from, to } => {
                ApiError::InvalidStateTransition { from, to }
            }
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportError(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid(engine_err) => ApiError::ConfigError(engine_err.to_string()),
            other => ApiError::ConfigError(other.to_string()),
        }
    }
}

// 请求体无法反序列化 (含未知枚举取值) 视为输入错误
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidInput(format!("请求体解析失败: {}", err))
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 错误响应体
// ==========================================

/// 错误响应 (写入响应信封的 error 字段)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,

    /// 详细信息（可选）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        let details = match err {
            ApiError::CapacityExceeded { requested, limit } => Some(serde_json::json!({
                "requested": requested,
                "limit": limit,
            })),
            ApiError::InvalidStateTransition { from, to } => Some(serde_json::json!({
                "from": from,
                "to": to,
            })),
            _ => None,
        };

        ErrorBody {
            code: err.code().to_string(),
            message: err.to_string(),
            details,
        }
    }
}
