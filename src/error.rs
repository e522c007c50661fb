// ==========================================
// 智慧朝觐运维平台 - 引擎统一错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约定: 所有错误同步返回,计算前完成校验,不做降级猜测
// ==========================================

use thiserror::Error;

/// 维护决策引擎错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    // ===== 输入校验错误 =====
    #[error("输入校验失败 (field={field}): {message}")]
    Validation { field: String, message: String },

    #[error("未知的{kind}取值: {value}")]
    UnknownValue { kind: &'static str, value: String },

    // ===== 容量错误 =====
    #[error("输入规模超限: requested={requested}, limit={limit}")]
    CapacityExceeded { requested: usize, limit: usize },

    // ===== 生命周期错误 =====
    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },
}

impl EngineError {
    /// 构造字段校验错误
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// 是否属于输入校验类错误（调用方修正输入前不可重试）
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::Validation { .. } | EngineError::UnknownValue { .. }
        )
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;

// ==========================================
// 数值校验辅助函数
// ==========================================

/// 要求数值有限（非 NaN / 非无穷）
pub(crate) fn ensure_finite(field: &str, value: f64) -> EngineResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::validation(field, format!("数值非法: {}", value)))
    }
}

/// 要求数值有限且非负
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> EngineResult<f64> {
    let value = ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(EngineError::validation(
            field,
            format!("不允许为负数: {}", value),
        ));
    }
    Ok(value)
}

/// 要求数值位于闭区间 [min, max]
pub(crate) fn ensure_in_range(field: &str, value: f64, min: f64, max: f64) -> EngineResult<f64> {
    let value = ensure_finite(field, value)?;
    if value < min || value > max {
        return Err(EngineError::validation(
            field,
            format!("取值 {} 超出范围 [{}, {}]", value, min, max),
        ));
    }
    Ok(value)
}
