// ==========================================
// 高校考勤系统 - 引擎层
// ==========================================
// 职责: 实现升级决策业务规则,不拼 SQL
// 红线: Engine 不拼 SQL, 所有判定必须输出 reason
// ==========================================

pub mod aggregator;
pub mod batch;
pub mod error;
pub mod evaluator;
pub mod policy;
pub mod promotion_core;
pub mod repositories;
pub mod stores;

// 重导出核心引擎
pub use aggregator::EnrollmentAggregator;
pub use batch::{
    BatchReport, BatchRunner, CommitFailure, CommitResult, SkippedStudent,
    SKIP_INSUFFICIENT_DATA,
};
pub use error::{EngineError, EngineResult};
pub use evaluator::PromotionEvaluator;
pub use policy::PolicyResolver;
pub use promotion_core::PromotionCore;
pub use repositories::PromotionStores;
pub use stores::{
    EnrollmentStore, PolicyStore, SqliteStageDirectory, StageDirectory, StudentDirectory,
};
