// ==========================================
// 高校考勤系统 - API层错误类型
// ==========================================
// 职责: 把引擎/仓储错误转换为用户友好的错误消息
// 红线: 所有错误信息必须包含显式原因 (可解释性)
// ==========================================

use crate::engine::error::EngineError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 评估业务错误
    // ==========================================
    /// 该学年无选课记录,无法评估
    #[error("数据不足: {0}")]
    InsufficientData(String),

    /// 数据完整性问题,不可静默处理
    #[error("数据完整性错误: {0}")]
    DataIntegrity(String),

    /// 系不存在,策略无法解析
    #[error("策略无法解析: {0}")]
    ConfigNotResolvable(String),

    /// 批量预览整体失败 (收敛后的错误清单)
    #[error("批量预览失败: {0}")]
    PreviewFailed(String),

    // ==========================================
    // 通用业务错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库事务失败: {0}")]
    DatabaseTransactionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InsufficientData { .. } => ApiError::InsufficientData(err.to_string()),
            EngineError::DataIntegrity { .. } => ApiError::DataIntegrity(err.to_string()),
            EngineError::ConfigNotResolvable { .. } => {
                ApiError::ConfigNotResolvable(err.to_string())
            }
            EngineError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            EngineError::PreviewCollated { .. } => ApiError::PreviewFailed(err.to_string()),
            EngineError::Store(inner) => ApiError::Other(inner),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// 目的: 将仓储层的技术错误转换为用户友好的业务错误
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("外键约束违反: {}", msg))
            }
            RepositoryError::ValidationError(msg) => ApiError::InvalidInput(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("字段{}错误: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_conversion() {
        let engine_err = EngineError::InsufficientData {
            student_id: "S001".to_string(),
            academic_year: "2024-2025".to_string(),
        };
        let api_err: ApiError = engine_err.into();
        match api_err {
            ApiError::InsufficientData(msg) => {
                assert!(msg.contains("S001"));
                assert!(msg.contains("2024-2025"));
            }
            _ => panic!("Expected InsufficientData"),
        }
    }

    #[test]
    fn test_repository_error_conversion() {
        let repo_err = RepositoryError::NotFound {
            entity: "Enrollment".to_string(),
            id: "42".to_string(),
        };
        let api_err: ApiError = repo_err.into();
        match api_err {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("Enrollment"));
                assert!(msg.contains("42"));
            }
            _ => panic!("Expected NotFound"),
        }
    }

    #[test]
    fn test_preview_collated_conversion() {
        let engine_err = EngineError::PreviewCollated {
            errors: vec!["错误一".to_string(), "错误二".to_string()],
        };
        let api_err: ApiError = engine_err.into();
        match api_err {
            ApiError::PreviewFailed(msg) => {
                assert!(msg.contains("错误一"));
                assert!(msg.contains("错误二"));
            }
            _ => panic!("Expected PreviewFailed"),
        }
    }
}
