// ==========================================
// 高校考勤系统 - 数据仓储层
// ==========================================
// 职责: 封装所有 SQLite 数据访问
// 红线: Repository 不含业务逻辑,引擎层不拼 SQL
// ==========================================

pub mod department_repo;
pub mod enrollment_repo;
pub mod error;
pub mod material_repo;
pub mod promotion_config_repo;
pub mod stage_repo;
pub mod student_repo;

// 重导出
pub use department_repo::DepartmentRepository;
pub use enrollment_repo::EnrollmentRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use material_repo::MaterialRepository;
pub use promotion_config_repo::PromotionConfigRepository;
pub use stage_repo::StageRepository;
pub use student_repo::StudentRepository;
