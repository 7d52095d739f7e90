// ==========================================
// 高校考勤系统 - 课程与教学结构领域模型
// ==========================================
// 职责: 课程/年级/学生名册实体
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

use crate::domain::types::Semester;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Material - 课程 (系+年级下开设)
// ==========================================
// 对齐: material 表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    // ===== 主键 =====
    pub id: String, // 课程ID

    // ===== 基础信息 =====
    pub name: String,          // 课程名称
    pub department_id: String, // 所属系 (FK department)
    pub stage_id: String,      // 所属年级 (FK stage)
    pub semester: Semester,    // 学期类型 (默认 FULL_YEAR)
    pub is_core_subject: bool, // 是否核心课程 (升级规则字段)

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
}

// ==========================================
// Stage - 年级
// ==========================================
// 用途: level 最大者即该系的毕业年级 (final stage)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,            // 年级ID
    pub department_id: String, // 所属系 (FK department)
    pub level: i32,            // 年级序号 (1=一年级)
    pub name: String,          // 年级名称
}

// ==========================================
// StudentContext - 学生归属信息
// ==========================================
// 用途: 单学生评估时定位其所在系/年级
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentContext {
    pub student_id: String,    // 学号
    pub department_id: String, // 所在系
    pub stage_id: String,      // 所在年级
}

// ==========================================
// StudentRef - 学生名册条目
// ==========================================
// 用途: 批量评估的花名册输入,只携带引擎所需字段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRef {
    pub id: String,   // 学号
    pub name: String, // 姓名
}
