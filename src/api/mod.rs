// ==========================================
// 高校考勤系统 - API 层
// ==========================================
// 职责: 业务接口门面与错误转换
// 红线: 不含判定逻辑,判定一律走引擎层
// ==========================================

pub mod error;
pub mod promotion_api;

// 重导出
pub use error::{ApiError, ApiResult};
pub use promotion_api::PromotionApi;
