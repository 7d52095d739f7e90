// ==========================================
// 高校考勤系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、封闭类型、判定结果对象
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod enrollment;
pub mod material;
pub mod promotion;
pub mod types;

// 重导出核心类型
pub use enrollment::{CarryFlagUpdate, Enrollment, EnrollmentRecord};
pub use material::{Material, Stage, StudentContext, StudentRef};
pub use promotion::{
    reason, EffectivePolicy, FailedMaterialRef, PromotionConfig, PromotionDecision,
};
pub use types::{PromotionOutcome, RepeatMode, ResultStatus, Semester};
