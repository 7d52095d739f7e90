// ==========================================
// 高校考勤系统 - 引擎外部数据源 Trait
// ==========================================
// 职责: 定义升级决策引擎所需的数据读取/写回接口
// 红线: 引擎层只经由这些 trait 触达数据,不拼 SQL
// 实现者: repository 层各 SQLite 仓储
// ==========================================

use crate::domain::enrollment::{CarryFlagUpdate, EnrollmentRecord};
use crate::domain::material::{Stage, StudentContext, StudentRef};
use crate::domain::promotion::PromotionConfig;
use crate::repository::{
    DepartmentRepository, EnrollmentRepository, PromotionConfigRepository, StageRepository,
    StudentRepository,
};
use async_trait::async_trait;

// ==========================================
// EnrollmentStore - 选课记录数据源
// ==========================================
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    /// 按学生+学年查询聚合视图 (课程注册顺序)
    ///
    /// # 返回
    /// - 空列表为合法返回值,语义是"无数据,无法评估",不是错误
    async fn get_enrollments(
        &self,
        student_id: &str,
        academic_year: &str,
    ) -> anyhow::Result<Vec<EnrollmentRecord>>;

    /// 按系+学年一次性查询全系聚合视图 (批量评估用,避免 N+1)
    async fn get_enrollments_by_department(
        &self,
        department_id: &str,
        academic_year: &str,
    ) -> anyhow::Result<Vec<(String, EnrollmentRecord)>>;

    /// 批量写回带科标记 (一次调用 = 一名学生的指令组, 组内原子)
    async fn bulk_update_carry_flags(&self, updates: &[CarryFlagUpdate]) -> anyhow::Result<()>;
}

// ==========================================
// PolicyStore - 升级策略数据源
// ==========================================
#[async_trait]
pub trait PolicyStore: Send + Sync {
    /// 按系读取升级策略
    ///
    /// # 返回
    /// - Ok(None): 该系未配置 (正常路径,调用方采用默认策略)
    async fn get_promotion_config(
        &self,
        department_id: &str,
    ) -> anyhow::Result<Option<PromotionConfig>>;
}

// ==========================================
// StageDirectory - 年级目录
// ==========================================
#[async_trait]
pub trait StageDirectory: Send + Sync {
    /// 按系读取年级列表 (用于确定毕业年级 level)
    async fn get_stages(&self, department_id: &str) -> anyhow::Result<Vec<Stage>>;

    /// 系是否存在 (ConfigNotResolvable 的判定依据)
    async fn department_exists(&self, department_id: &str) -> anyhow::Result<bool>;
}

// ==========================================
// StudentDirectory - 学生目录
// ==========================================
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    /// 按系+年级读取学生名册
    async fn get_students(
        &self,
        department_id: &str,
        stage_id: &str,
    ) -> anyhow::Result<Vec<StudentRef>>;

    /// 查询学生归属信息 (单学生评估定位系/年级)
    async fn get_student_context(
        &self,
        student_id: &str,
    ) -> anyhow::Result<Option<StudentContext>>;
}

// ==========================================
// SQLite 仓储实现
// ==========================================
// 说明: rusqlite 为同步驱动,连接受 Mutex 保护,
//       此处实现直接在当前任务中完成同步调用

#[async_trait]
impl EnrollmentStore for EnrollmentRepository {
    async fn get_enrollments(
        &self,
        student_id: &str,
        academic_year: &str,
    ) -> anyhow::Result<Vec<EnrollmentRecord>> {
        Ok(self.find_records_by_student_and_year(student_id, academic_year)?)
    }

    async fn get_enrollments_by_department(
        &self,
        department_id: &str,
        academic_year: &str,
    ) -> anyhow::Result<Vec<(String, EnrollmentRecord)>> {
        Ok(self.find_records_by_department_and_year(department_id, academic_year)?)
    }

    async fn bulk_update_carry_flags(&self, updates: &[CarryFlagUpdate]) -> anyhow::Result<()> {
        Ok(EnrollmentRepository::bulk_update_carry_flags(self, updates)?)
    }
}

#[async_trait]
impl PolicyStore for PromotionConfigRepository {
    async fn get_promotion_config(
        &self,
        department_id: &str,
    ) -> anyhow::Result<Option<PromotionConfig>> {
        Ok(self.find_by_department(department_id)?)
    }
}

// StageDirectory 需要同时触达 stage 与 department 表
pub struct SqliteStageDirectory {
    stage_repo: StageRepository,
    department_repo: DepartmentRepository,
}

impl SqliteStageDirectory {
    pub fn new(stage_repo: StageRepository, department_repo: DepartmentRepository) -> Self {
        Self {
            stage_repo,
            department_repo,
        }
    }
}

#[async_trait]
impl StageDirectory for SqliteStageDirectory {
    async fn get_stages(&self, department_id: &str) -> anyhow::Result<Vec<Stage>> {
        Ok(self.stage_repo.find_by_department(department_id)?)
    }

    async fn department_exists(&self, department_id: &str) -> anyhow::Result<bool> {
        Ok(self.department_repo.exists(department_id)?)
    }
}

#[async_trait]
impl StudentDirectory for StudentRepository {
    async fn get_students(
        &self,
        department_id: &str,
        stage_id: &str,
    ) -> anyhow::Result<Vec<StudentRef>> {
        Ok(self.find_by_department_and_stage(department_id, stage_id)?)
    }

    async fn get_student_context(
        &self,
        student_id: &str,
    ) -> anyhow::Result<Option<StudentContext>> {
        Ok(self.find_context(student_id)?)
    }
}
