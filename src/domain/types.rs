// ==========================================
// 高校考勤系统 - 领域类型定义
// ==========================================
// 职责: 升级决策引擎的封闭枚举类型
// 红线: 状态/结果一律用枚举建模,禁止开放字符串进入引擎
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 选课成绩状态 (Result Status)
// ==========================================
// 红线: 只有 FAILED 参与升级结果判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultStatus {
    Passed,           // 通过
    Failed,           // 不及格
    InProgress,       // 成绩未出
    BlockedByAbsence, // 缺勤禁考
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultStatus::Passed => write!(f, "PASSED"),
            ResultStatus::Failed => write!(f, "FAILED"),
            ResultStatus::InProgress => write!(f, "IN_PROGRESS"),
            ResultStatus::BlockedByAbsence => write!(f, "BLOCKED_BY_ABSENCE"),
        }
    }
}

impl ResultStatus {
    /// 从字符串解析成绩状态
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PASSED" => Some(ResultStatus::Passed),
            "FAILED" => Some(ResultStatus::Failed),
            "IN_PROGRESS" => Some(ResultStatus::InProgress),
            "BLOCKED_BY_ABSENCE" => Some(ResultStatus::BlockedByAbsence),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ResultStatus::Passed => "PASSED",
            ResultStatus::Failed => "FAILED",
            ResultStatus::InProgress => "IN_PROGRESS",
            ResultStatus::BlockedByAbsence => "BLOCKED_BY_ABSENCE",
        }
    }
}

// ==========================================
// 学期类型 (Semester)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Semester {
    Semester1, // 上学期
    Semester2, // 下学期
    #[default]
    FullYear, // 全年课
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Semester::Semester1 => write!(f, "SEMESTER_1"),
            Semester::Semester2 => write!(f, "SEMESTER_2"),
            Semester::FullYear => write!(f, "FULL_YEAR"),
        }
    }
}

impl Semester {
    /// 从字符串解析学期类型
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "SEMESTER_1" => Semester::Semester1,
            "SEMESTER_2" => Semester::Semester2,
            _ => Semester::FullYear, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Semester::Semester1 => "SEMESTER_1",
            Semester::Semester2 => "SEMESTER_2",
            Semester::FullYear => "FULL_YEAR",
        }
    }
}

// ==========================================
// 升级判定结果 (Promotion Outcome)
// ==========================================
// 红线: 三态封闭,不存在"部分升级"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionOutcome {
    Promoted,          // 直接升级
    PromotedWithCarry, // 带科升级
    RepeatYear,        // 留级
}

impl fmt::Display for PromotionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromotionOutcome::Promoted => write!(f, "PROMOTED"),
            PromotionOutcome::PromotedWithCarry => write!(f, "PROMOTED_WITH_CARRY"),
            PromotionOutcome::RepeatYear => write!(f, "REPEAT_YEAR"),
        }
    }
}

impl PromotionOutcome {
    /// 从字符串解析判定结果
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PROMOTED" => Some(PromotionOutcome::Promoted),
            "PROMOTED_WITH_CARRY" => Some(PromotionOutcome::PromotedWithCarry),
            "REPEAT_YEAR" => Some(PromotionOutcome::RepeatYear),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PromotionOutcome::Promoted => "PROMOTED",
            PromotionOutcome::PromotedWithCarry => "PROMOTED_WITH_CARRY",
            PromotionOutcome::RepeatYear => "REPEAT_YEAR",
        }
    }
}

// ==========================================
// 留级执行模式 (Repeat Mode)
// ==========================================
// 用途: 仅描述留级后如何落到选课记录上,不影响三态判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepeatMode {
    #[default]
    RepeatFailedOnly, // 只重修不及格科目
    RepeatFullYear, // 重读整学年
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatMode::RepeatFailedOnly => write!(f, "REPEAT_FAILED_ONLY"),
            RepeatMode::RepeatFullYear => write!(f, "REPEAT_FULL_YEAR"),
        }
    }
}

impl RepeatMode {
    /// 从字符串解析留级模式
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "REPEAT_FULL_YEAR" => RepeatMode::RepeatFullYear,
            _ => RepeatMode::RepeatFailedOnly, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            RepeatMode::RepeatFailedOnly => "REPEAT_FAILED_ONLY",
            RepeatMode::RepeatFullYear => "REPEAT_FULL_YEAR",
        }
    }
}
