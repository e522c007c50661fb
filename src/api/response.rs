// ==========================================
// 智慧朝觐运维平台 - 统一响应信封
// ==========================================
// 格式: {success, data, metadata:{timestamp, version, request_id}, error?}
// ==========================================

use crate::api::error::{ApiError, ApiResult, ErrorBody};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 响应元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    pub timestamp: DateTime<Utc>, // 响应生成时间 (RFC 3339)
    pub version: String,          // 引擎版本
    pub request_id: String,       // 请求ID (uuid v4)
}

impl ResponseMetadata {
    pub fn new() -> Self {
        Self {
            timestamp: Utc::now(),
            version: crate::VERSION.to_string(),
            request_id: Uuid::new_v4().to_string(),
        }
    }
}

impl Default for ResponseMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// 统一响应信封
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub metadata: ResponseMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> MaintenanceResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            metadata: ResponseMetadata::new(),
            error: None,
        }
    }

    pub fn err(error: &ApiError) -> Self {
        Self {
            success: false,
            data: None,
            metadata: ResponseMetadata::new(),
            error: Some(ErrorBody::from(error)),
        }
    }
}

impl<T> From<ApiResult<T>> for MaintenanceResponse<T> {
    fn from(result: ApiResult<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_shape() {
        let response = MaintenanceResponse::ok(42.5);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 42.5);
        assert_eq!(json["metadata"]["version"], crate::VERSION);
        assert!(json.get("error").is_none());
        assert!(Uuid::parse_str(json["metadata"]["request_id"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_err_envelope_shape() {
        let result: ApiResult<f64> = Err(ApiError::InvalidInput("缺少 now".to_string()));
        let response = MaintenanceResponse::from(result);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
        assert_eq!(json["error"]["code"], "INVALID_INPUT");
    }

    #[test]
    fn test_request_ids_are_unique() {
        let a = ResponseMetadata::new();
        let b = ResponseMetadata::new();
        assert_ne!(a.request_id, b.request_id);
    }
}
