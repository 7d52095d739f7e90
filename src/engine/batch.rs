// ==========================================
// 高校考勤系统 - 批量升级评估引擎 (Batch Runner)
// ==========================================
// 职责: 对 (系, 年级, 学年) 的全体学生执行升级评估并汇总
// 红线: 预览只读; 只有显式提交才写回带科标记
// 红线: 无选课记录的学生记入 skipped, 不得静默丢弃、不得按升级计数
// 红线: 提交按学生独立进行,单个学生内部原子 (全成或全不成)
// ==========================================

use crate::domain::promotion::PromotionDecision;
use crate::domain::types::PromotionOutcome;
use crate::engine::aggregator::EnrollmentAggregator;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::policy::PolicyResolver;
use crate::engine::promotion_core::PromotionCore;
use crate::engine::repositories::PromotionStores;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

// ==========================================
// SkippedStudent - 跳过条目
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedStudent {
    pub student_id: String, // 学号
    pub reason: String,     // 跳过原因代码 (如 insufficient_data)
}

/// 跳过原因代码: 该学年无选课记录
pub const SKIP_INSUFFICIENT_DATA: &str = "insufficient_data";

// ==========================================
// BatchReport - 批量评估报告 (预览输出)
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub report_id: String, // 报告ID (uuid)
    pub department_id: String,
    pub stage_id: String,
    pub academic_year: String,

    // ===== 结果计数 =====
    pub promoted_count: usize,
    pub promoted_with_carry_count: usize,
    pub repeat_year_count: usize,

    // ===== 明细 =====
    pub decisions: Vec<PromotionDecision>,
    pub skipped: Vec<SkippedStudent>,

    pub generated_at: DateTime<Utc>,
}

// ==========================================
// CommitResult - 提交结果
// ==========================================
// 语义: 按学生列出成功/失败; 失败不中断其余学生
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitResult {
    pub report_id: String,
    pub department_id: String,
    pub stage_id: String,
    pub academic_year: String,

    /// 提交成功的学生 (含无需写回的 PROMOTED / REPEAT_YEAR)
    pub committed: Vec<String>,
    /// 提交失败的学生及原因
    pub failed: Vec<CommitFailure>,
    /// 评估阶段即跳过的学生
    pub skipped: Vec<SkippedStudent>,

    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitFailure {
    pub student_id: String,
    pub error: String,
}

// ==========================================
// BatchRunner - 批量评估引擎
// ==========================================
pub struct BatchRunner {
    stores: PromotionStores,
    aggregator: EnrollmentAggregator,
    resolver: PolicyResolver,
}

impl BatchRunner {
    /// 创建新的批量评估引擎实例
    pub fn new(stores: PromotionStores) -> Self {
        Self {
            aggregator: EnrollmentAggregator::new(stores.enrollments.clone()),
            resolver: PolicyResolver::new(stores.policies.clone(), stores.stages.clone()),
            stores,
        }
    }

    /// 预览批量评估 (只读)
    ///
    /// # 流程
    /// 1. 解析策略 (一批一次, 系不存在立即失败)
    /// 2. 读取名册与全系选课 (一次取数, 避免 N+1)
    /// 3. 逐学生纯函数判定; 无数据 → skipped
    /// 4. 任何数据完整性错误收敛后整体失败 (不出部分报告)
    pub async fn preview_batch(
        &self,
        department_id: &str,
        stage_id: &str,
        academic_year: &str,
    ) -> EngineResult<BatchReport> {
        info!(
            department_id = %department_id,
            stage_id = %stage_id,
            academic_year = %academic_year,
            "开始批量升级评估 (预览)"
        );

        // ==========================================
        // 步骤1: 策略解析 (一批一次)
        // ==========================================
        let policy = self.resolver.resolve(department_id).await?;

        // 本批学生的年级 level; 年级元数据缺失时毕业年级规则不适用
        let stage_level = self
            .stores
            .stages
            .get_stages(department_id)
            .await?
            .iter()
            .find(|s| s.id == stage_id)
            .map(|s| s.level);

        // ==========================================
        // 步骤2: 一次取数 (名册 + 全系选课)
        // ==========================================
        let roster = self
            .stores
            .students
            .get_students(department_id, stage_id)
            .await?;
        let mut by_student = self
            .aggregator
            .aggregate_department(department_id, academic_year)
            .await?;

        debug!(
            roster_count = roster.len(),
            students_with_records = by_student.len(),
            "取数完成"
        );

        // ==========================================
        // 步骤3: 逐学生判定
        // ==========================================
        let mut decisions = Vec::new();
        let mut skipped = Vec::new();
        let mut integrity_errors = Vec::new();

        for student in &roster {
            let records = by_student.remove(&student.id).unwrap_or_default();
            match PromotionCore::evaluate(
                &student.id,
                academic_year,
                &records,
                &policy,
                stage_level,
            ) {
                Ok(decision) => decisions.push(decision),
                Err(EngineError::InsufficientData { .. }) => {
                    // 可恢复: 记入 skipped, 绝不按升级计数
                    skipped.push(SkippedStudent {
                        student_id: student.id.clone(),
                        reason: SKIP_INSUFFICIENT_DATA.to_string(),
                    });
                }
                Err(err @ EngineError::DataIntegrity { .. }) => {
                    // 收敛, 预览整体失败
                    integrity_errors.push(err.to_string());
                }
                Err(other) => return Err(other),
            }
        }

        // ==========================================
        // 步骤4: 完整性错误收敛
        // ==========================================
        if !integrity_errors.is_empty() {
            warn!(
                errors_count = integrity_errors.len(),
                "预览因数据完整性错误整体失败"
            );
            return Err(EngineError::PreviewCollated {
                errors: integrity_errors,
            });
        }

        let report = BatchReport {
            report_id: Uuid::new_v4().to_string(),
            department_id: department_id.to_string(),
            stage_id: stage_id.to_string(),
            academic_year: academic_year.to_string(),
            promoted_count: count_outcome(&decisions, PromotionOutcome::Promoted),
            promoted_with_carry_count: count_outcome(
                &decisions,
                PromotionOutcome::PromotedWithCarry,
            ),
            repeat_year_count: count_outcome(&decisions, PromotionOutcome::RepeatYear),
            decisions,
            skipped,
            generated_at: Utc::now(),
        };

        info!(
            report_id = %report.report_id,
            promoted = report.promoted_count,
            promoted_with_carry = report.promoted_with_carry_count,
            repeat_year = report.repeat_year_count,
            skipped = report.skipped.len(),
            "批量升级评估完成 (预览)"
        );
        Ok(report)
    }

    /// 提交批量评估结果
    ///
    /// # 语义
    /// - 重新评估后逐学生写回带科标记
    /// - 一名学生的写回单事务 (组内原子); 失败记入 failed, 继续后续学生
    /// - PROMOTED / REPEAT_YEAR 无需写回, 直接计入 committed
    pub async fn commit_batch(
        &self,
        department_id: &str,
        stage_id: &str,
        academic_year: &str,
    ) -> EngineResult<CommitResult> {
        let report = self
            .preview_batch(department_id, stage_id, academic_year)
            .await?;

        info!(
            report_id = %report.report_id,
            decisions_count = report.decisions.len(),
            "开始提交批量评估结果"
        );

        let mut committed = Vec::new();
        let mut failed = Vec::new();

        for decision in &report.decisions {
            if decision.carry_flag_updates.is_empty() {
                committed.push(decision.student_id.clone());
                continue;
            }

            match self
                .stores
                .enrollments
                .bulk_update_carry_flags(&decision.carry_flag_updates)
                .await
            {
                Ok(()) => committed.push(decision.student_id.clone()),
                Err(err) => {
                    // 单学生失败不影响其余学生
                    warn!(
                        student_id = %decision.student_id,
                        error = %err,
                        "带科标记写回失败"
                    );
                    failed.push(CommitFailure {
                        student_id: decision.student_id.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        let result = CommitResult {
            report_id: report.report_id,
            department_id: department_id.to_string(),
            stage_id: stage_id.to_string(),
            academic_year: academic_year.to_string(),
            committed,
            failed,
            skipped: report.skipped,
            generated_at: Utc::now(),
        };

        info!(
            committed = result.committed.len(),
            failed = result.failed.len(),
            skipped = result.skipped.len(),
            "批量提交完成"
        );
        Ok(result)
    }
}

/// 统计指定结果的判定数量
fn count_outcome(decisions: &[PromotionDecision], outcome: PromotionOutcome) -> usize {
    decisions.iter().filter(|d| d.outcome == outcome).count()
}
