// ==========================================
// 高校考勤系统 - 引擎层数据源聚合
// ==========================================
// 职责: 聚合升级决策引擎所需的所有外部数据源
// 目标: 减少 BatchRunner/PromotionEvaluator 的构造参数数量
// ==========================================

use std::sync::{Arc, Mutex};

use crate::engine::stores::{
    EnrollmentStore, PolicyStore, SqliteStageDirectory, StageDirectory, StudentDirectory,
};
use crate::repository::{
    DepartmentRepository, EnrollmentRepository, PromotionConfigRepository, StageRepository,
    StudentRepository,
};
use rusqlite::Connection;

/// 升级决策引擎数据源集合
///
/// 聚合引擎所需的四个数据源接口，简化依赖注入，
/// 便于单元测试时 mock 整个数据访问层。
#[derive(Clone)]
pub struct PromotionStores {
    /// 选课记录数据源
    pub enrollments: Arc<dyn EnrollmentStore>,
    /// 升级策略数据源
    pub policies: Arc<dyn PolicyStore>,
    /// 年级目录
    pub stages: Arc<dyn StageDirectory>,
    /// 学生目录
    pub students: Arc<dyn StudentDirectory>,
}

impl PromotionStores {
    /// 创建新的数据源集合
    pub fn new(
        enrollments: Arc<dyn EnrollmentStore>,
        policies: Arc<dyn PolicyStore>,
        stages: Arc<dyn StageDirectory>,
        students: Arc<dyn StudentDirectory>,
    ) -> Self {
        Self {
            enrollments,
            policies,
            stages,
            students,
        }
    }

    /// 从共享 SQLite 连接构建全套数据源
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            enrollments: Arc::new(EnrollmentRepository::from_connection(conn.clone())),
            policies: Arc::new(PromotionConfigRepository::from_connection(conn.clone())),
            stages: Arc::new(SqliteStageDirectory::new(
                StageRepository::from_connection(conn.clone()),
                DepartmentRepository::from_connection(conn.clone()),
            )),
            students: Arc::new(StudentRepository::from_connection(conn)),
        }
    }
}
