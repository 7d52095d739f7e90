// ==========================================
// 高校考勤系统 - Promotion Core 纯函数库
// ==========================================
// 职责: 提供学年升级三态判定的纯逻辑
// 红线: 无状态、无副作用、无 I/O 操作
// 红线: 规则顺序固定为 阈值 > 毕业年级 > 核心课程 > 带科上限,不得调换
// ==========================================

use crate::domain::enrollment::{CarryFlagUpdate, EnrollmentRecord};
use crate::domain::promotion::{reason, EffectivePolicy, FailedMaterialRef, PromotionDecision};
use crate::domain::types::{PromotionOutcome, ResultStatus};
use crate::engine::error::{EngineError, EngineResult};
use std::collections::HashSet;

// ==========================================
// PromotionCore - 纯函数工具类
// ==========================================
pub struct PromotionCore;

impl PromotionCore {
    /// 学年升级判定
    ///
    /// # 规则 (按序判定,命中即返回)
    /// 1. 选课记录为空 → InsufficientData (调用方不得静默按升级处理)
    /// 2. 同一课程重复出现 → DataIntegrity (不做去重,不双计)
    /// 3. failCount = 0 → PROMOTED (no_failures)
    /// 4. failCount >= fail_threshold_for_repeat → REPEAT_YEAR (fail_count_meets_threshold)
    ///    该检查永远先于带科上限检查;即便阈值配置 <= 带科上限也按此序执行
    /// 5. 毕业年级禁带科 且 学生处于毕业年级 → REPEAT_YEAR (final_year_no_carry)
    /// 6. 核心课程禁带科 且 不及格中含核心课程 → REPEAT_YEAR (core_subject_failed_blocks_carry)
    /// 7. failCount > max_carry_subjects → REPEAT_YEAR (fail_count_exceeds_carry_limit)
    /// 8. 其余 → PROMOTED_WITH_CARRY (carried_within_limit), 全部不及格科目进入带科
    ///
    /// # 参数
    /// - student_id: 学号
    /// - academic_year: 学年
    /// - records: 该生该学年全部选课聚合视图 (课程注册顺序)
    /// - policy: 生效策略 (Policy Resolver 输出)
    /// - student_stage_level: 学生所在年级 level (年级元数据缺失时为 None)
    ///
    /// # 返回
    /// - Ok(PromotionDecision): 判定结果 (含带科标记更新指令,评估器不落库)
    /// - Err(InsufficientData / DataIntegrity)
    ///
    /// # 说明
    /// - PASSED / IN_PROGRESS 不参与判定
    /// - BLOCKED_BY_ABSENCE 不算不及格,只在 notes 中标注
    pub fn evaluate(
        student_id: &str,
        academic_year: &str,
        records: &[EnrollmentRecord],
        policy: &EffectivePolicy,
        student_stage_level: Option<i32>,
    ) -> EngineResult<PromotionDecision> {
        // 规则 1: 无数据不可评估
        if records.is_empty() {
            return Err(EngineError::InsufficientData {
                student_id: student_id.to_string(),
                academic_year: academic_year.to_string(),
            });
        }

        // 规则 2: 数据完整性 - 同一课程不得重复出现
        let mut seen = HashSet::new();
        for record in records {
            if !seen.insert(record.material_id.as_str()) {
                return Err(EngineError::DataIntegrity {
                    student_id: student_id.to_string(),
                    message: format!("课程 {} 在同一学年重复出现", record.material_id),
                });
            }
        }

        // 划分: 只有 FAILED 进入判定
        let failed: Vec<&EnrollmentRecord> = records
            .iter()
            .filter(|r| r.result_status == ResultStatus::Failed)
            .collect();
        let fail_count = failed.len() as i64;

        // 缺勤禁考只标注,不改变判定
        let mut notes = Vec::new();
        if records
            .iter()
            .any(|r| r.result_status == ResultStatus::BlockedByAbsence)
        {
            notes.push(reason::NOTE_HAS_ABSENCE_BLOCKED.to_string());
        }

        let failed_materials: Vec<FailedMaterialRef> = failed
            .iter()
            .map(|r| FailedMaterialRef {
                material_id: r.material_id.clone(),
                material_name: r.material_name.clone(),
                is_core_subject: r.is_core_subject,
            })
            .collect();

        let config = &policy.config;

        // 规则 3: 无不及格科目
        if fail_count == 0 {
            return Ok(Self::decision(
                student_id,
                academic_year,
                PromotionOutcome::Promoted,
                failed_materials,
                Vec::new(),
                reason::NO_FAILURES,
                notes,
                policy,
                Vec::new(),
            ));
        }

        // 规则 4: 留级阈值 (最高优先级)
        if fail_count >= config.fail_threshold_for_repeat {
            return Ok(Self::decision(
                student_id,
                academic_year,
                PromotionOutcome::RepeatYear,
                failed_materials,
                Vec::new(),
                reason::FAIL_COUNT_MEETS_THRESHOLD,
                notes,
                policy,
                Vec::new(),
            ));
        }

        // 规则 5: 毕业年级禁带科
        // 年级元数据缺失 (final_stage_level=None) 时该规则不适用
        if config.disable_carry_for_final_year {
            if let (Some(level), Some(final_level)) = (student_stage_level, policy.final_stage_level)
            {
                if level == final_level {
                    return Ok(Self::decision(
                        student_id,
                        academic_year,
                        PromotionOutcome::RepeatYear,
                        failed_materials,
                        Vec::new(),
                        reason::FINAL_YEAR_NO_CARRY,
                        notes,
                        policy,
                        Vec::new(),
                    ));
                }
            }
        }

        // 规则 6: 核心课程禁带科
        if config.block_carry_for_core && failed.iter().any(|r| r.is_core_subject) {
            return Ok(Self::decision(
                student_id,
                academic_year,
                PromotionOutcome::RepeatYear,
                failed_materials,
                Vec::new(),
                reason::CORE_SUBJECT_FAILED_BLOCKS_CARRY,
                notes,
                policy,
                Vec::new(),
            ));
        }

        // 规则 7: 带科上限 (max_carry_subjects=0 时任一不及格即命中)
        if fail_count > config.max_carry_subjects {
            return Ok(Self::decision(
                student_id,
                academic_year,
                PromotionOutcome::RepeatYear,
                failed_materials,
                Vec::new(),
                reason::FAIL_COUNT_EXCEEDS_CARRY_LIMIT,
                notes,
                policy,
                Vec::new(),
            ));
        }

        // 规则 8: 带科升级
        let carry_flag_updates: Vec<CarryFlagUpdate> = failed
            .iter()
            .map(|r| CarryFlagUpdate {
                enrollment_id: r.enrollment_id,
                is_carried: true,
            })
            .collect();
        let carried_materials = failed_materials.clone();

        Ok(Self::decision(
            student_id,
            academic_year,
            PromotionOutcome::PromotedWithCarry,
            failed_materials,
            carried_materials,
            reason::CARRIED_WITHIN_LIMIT,
            notes,
            policy,
            carry_flag_updates,
        ))
    }

    /// 组装判定结果
    #[allow(clippy::too_many_arguments)]
    fn decision(
        student_id: &str,
        academic_year: &str,
        outcome: PromotionOutcome,
        failed_materials: Vec<FailedMaterialRef>,
        carried_materials: Vec<FailedMaterialRef>,
        reason_code: &str,
        notes: Vec<String>,
        policy: &EffectivePolicy,
        carry_flag_updates: Vec<CarryFlagUpdate>,
    ) -> PromotionDecision {
        PromotionDecision {
            student_id: student_id.to_string(),
            academic_year: academic_year.to_string(),
            outcome,
            failed_materials,
            carried_materials,
            reason: reason_code.to_string(),
            notes,
            repeat_mode: policy.config.repeat_mode,
            carry_flag_updates,
        }
    }
}
