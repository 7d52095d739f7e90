// ==========================================
// 高校考勤系统 - 升级策略与判定结果模型
// ==========================================
// 职责: 系级升级策略配置 + 评估器输出对象
// 红线: 默认策略只允许出现在 default_policy 一处,禁止字面量散落
// 红线: 所有判定必须输出 reason (可解释性)
// ==========================================

use crate::domain::enrollment::CarryFlagUpdate;
use crate::domain::types::{PromotionOutcome, RepeatMode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// 判定原因代码 (reason codes)
// ==========================================
// 用途: PromotionDecision.reason 的取值全集,UI 层经 i18n 渲染
pub mod reason {
    /// 无不及格科目
    pub const NO_FAILURES: &str = "no_failures";
    /// 不及格数达到留级阈值
    pub const FAIL_COUNT_MEETS_THRESHOLD: &str = "fail_count_meets_threshold";
    /// 毕业年级禁止带科
    pub const FINAL_YEAR_NO_CARRY: &str = "final_year_no_carry";
    /// 核心课程不及格禁止带科
    pub const CORE_SUBJECT_FAILED_BLOCKS_CARRY: &str = "core_subject_failed_blocks_carry";
    /// 不及格数超过带科上限
    pub const FAIL_COUNT_EXCEEDS_CARRY_LIMIT: &str = "fail_count_exceeds_carry_limit";
    /// 带科升级 (在上限之内)
    pub const CARRIED_WITHIN_LIMIT: &str = "carried_within_limit";

    /// 附注: 存在缺勤禁考科目 (只标注,不改变判定)
    pub const NOTE_HAS_ABSENCE_BLOCKED: &str = "has_absence_blocked";
}

// ==========================================
// PromotionConfig - 系级升级策略
// ==========================================
// 生命周期: 管理端创建/更新,评估器只读,无配置行时走默认策略
// 对齐: promotion_config 表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionConfig {
    pub department_id: String, // 所属系 (FK department)

    /// 带科升级允许携带的不及格科目上限 (>=0)
    pub max_carry_subjects: i64,
    /// 不及格数达到该值强制留级 (>=1, 优先于带科上限)
    pub fail_threshold_for_repeat: i64,
    /// 毕业年级禁止带科 (任一不及格即留级)
    pub disable_carry_for_final_year: bool,
    /// 核心课程不及格禁止带科
    pub block_carry_for_core: bool,
    /// 留级执行模式 (信息性字段,不参与三态判定)
    pub repeat_mode: RepeatMode,
}

impl PromotionConfig {
    /// 默认升级策略
    ///
    /// 系未配置 promotion_config 行时由 Policy Resolver 统一采用。
    /// 默认值的唯一出处,其他任何地方不得重复这些字面量。
    pub fn default_policy(department_id: &str) -> Self {
        Self {
            department_id: department_id.to_string(),
            max_carry_subjects: 2,
            fail_threshold_for_repeat: 3,
            disable_carry_for_final_year: false,
            block_carry_for_core: false,
            repeat_mode: RepeatMode::RepeatFailedOnly,
        }
    }
}

// ==========================================
// FailedMaterialRef - 不及格科目引用
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedMaterialRef {
    pub material_id: String,   // 课程ID
    pub material_name: String, // 课程名称
    pub is_core_subject: bool, // 是否核心课程
}

// ==========================================
// PromotionDecision - 升级判定结果
// ==========================================
// 用途: 评估器输出,默认不落库,仅在显式提交时生效
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionDecision {
    pub student_id: String,       // 学号
    pub academic_year: String,    // 学年
    pub outcome: PromotionOutcome, // 三态判定结果

    /// 不及格科目 (按课程注册顺序)
    pub failed_materials: Vec<FailedMaterialRef>,
    /// 实际允许带科的科目 (failed_materials 的子集)
    pub carried_materials: Vec<FailedMaterialRef>,

    /// 判定原因代码 (见 reason 模块)
    pub reason: String,
    /// 附注代码 (如缺勤禁考标注,不影响判定)
    pub notes: Vec<String>,

    /// 留级执行模式 (透传自策略,供提交方做后续登记)
    pub repeat_mode: RepeatMode,
    /// 带科标记更新指令 (提交方执行,评估器不落库)
    pub carry_flag_updates: Vec<CarryFlagUpdate>,
}

// ==========================================
// EffectivePolicy - 生效策略
// ==========================================
// 用途: Policy Resolver 输出的不可变策略对象
// 说明: final_stage_level=None 表示年级元数据缺失,
//       此时毕业年级禁带科规则视为不适用 (永不触发)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectivePolicy {
    pub config: PromotionConfig,
    pub final_stage_level: Option<i32>,
    pub resolved_at: DateTime<Utc>,
}
