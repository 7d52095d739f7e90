// ==========================================
// 高校考勤系统 - 升级决策 API
// ==========================================
// 职责: 对外暴露 评估/预览/提交 三个操作
// 说明: HTTP 序列化由外层系统负责,这里只做门面与错误转换
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::promotion::PromotionDecision;
use crate::engine::batch::{BatchReport, BatchRunner, CommitResult};
use crate::engine::evaluator::PromotionEvaluator;
use crate::engine::repositories::PromotionStores;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

// ==========================================
// PromotionApi - 升级决策接口
// ==========================================
pub struct PromotionApi {
    evaluator: PromotionEvaluator,
    batch: BatchRunner,
}

impl PromotionApi {
    /// 基于数据源集合创建接口实例
    pub fn new(stores: PromotionStores) -> Self {
        Self {
            evaluator: PromotionEvaluator::new(stores.clone()),
            batch: BatchRunner::new(stores),
        }
    }

    /// 基于共享 SQLite 连接创建接口实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self::new(PromotionStores::from_connection(conn))
    }

    /// 评估单个学生
    ///
    /// # 失败
    /// - InsufficientData / DataIntegrity / ConfigNotResolvable
    pub async fn evaluate(
        &self,
        student_id: &str,
        academic_year: &str,
    ) -> ApiResult<PromotionDecision> {
        Ok(self
            .evaluator
            .evaluate_student(student_id, academic_year)
            .await?)
    }

    /// 预览批量评估 (只读,不落库)
    pub async fn preview_batch(
        &self,
        department_id: &str,
        stage_id: &str,
        academic_year: &str,
    ) -> ApiResult<BatchReport> {
        Ok(self
            .batch
            .preview_batch(department_id, stage_id, academic_year)
            .await?)
    }

    /// 提交批量评估 (写回带科标记,逐学生独立)
    pub async fn commit_batch(
        &self,
        department_id: &str,
        stage_id: &str,
        academic_year: &str,
    ) -> ApiResult<CommitResult> {
        Ok(self
            .batch
            .commit_batch(department_id, stage_id, academic_year)
            .await?)
    }
}
