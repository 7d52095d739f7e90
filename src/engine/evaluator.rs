// ==========================================
// 高校考勤系统 - 单学生升级评估引擎
// ==========================================
// 职责: 定位学生归属 → 聚合选课 → 解析策略 → 纯函数判定
// 红线: 评估不落库; 判定逻辑全部在 PromotionCore
// ==========================================

use crate::domain::promotion::PromotionDecision;
use crate::engine::aggregator::EnrollmentAggregator;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::policy::PolicyResolver;
use crate::engine::promotion_core::PromotionCore;
use crate::engine::repositories::PromotionStores;
use tracing::info;

// ==========================================
// PromotionEvaluator - 单学生评估引擎
// ==========================================
pub struct PromotionEvaluator {
    stores: PromotionStores,
    aggregator: EnrollmentAggregator,
    resolver: PolicyResolver,
}

impl PromotionEvaluator {
    /// 创建新的评估引擎实例
    pub fn new(stores: PromotionStores) -> Self {
        Self {
            aggregator: EnrollmentAggregator::new(stores.enrollments.clone()),
            resolver: PolicyResolver::new(stores.policies.clone(), stores.stages.clone()),
            stores,
        }
    }

    /// 评估单个学生一个学年的升级结果
    ///
    /// # 参数
    /// - student_id: 学号
    /// - academic_year: 学年
    ///
    /// # 返回
    /// - Ok(PromotionDecision)
    /// - Err(InsufficientData): 该学年无选课记录 (调用方决定如何呈现)
    /// - Err(DataIntegrity / ConfigNotResolvable): 必须上抛,不得静默
    pub async fn evaluate_student(
        &self,
        student_id: &str,
        academic_year: &str,
    ) -> EngineResult<PromotionDecision> {
        // 定位学生归属 (系/年级)
        let context = self
            .stores
            .students
            .get_student_context(student_id)
            .await?
            .ok_or_else(|| {
                EngineError::InvalidInput(format!("学生 {} 不存在", student_id))
            })?;

        // 策略与年级 level (一次解析)
        let policy = self.resolver.resolve(&context.department_id).await?;
        let stage_level = self
            .stores
            .stages
            .get_stages(&context.department_id)
            .await?
            .iter()
            .find(|s| s.id == context.stage_id)
            .map(|s| s.level);

        // 聚合后判定 (先读全量,再计算,不交错)
        let records = self
            .aggregator
            .aggregate_student(student_id, academic_year)
            .await?;
        let decision = PromotionCore::evaluate(
            student_id,
            academic_year,
            &records,
            &policy,
            stage_level,
        )?;

        info!(
            student_id = %student_id,
            academic_year = %academic_year,
            outcome = %decision.outcome,
            reason = %decision.reason,
            "单学生升级评估完成"
        );
        Ok(decision)
    }
}
