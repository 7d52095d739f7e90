// ==========================================
// 高校考勤系统 - 选课领域模型
// ==========================================
// 职责: 选课记录实体与聚合视图
// 红线: 一条记录 = 一名学生 + 一门课程 + 一个学年 (唯一)
// 红线: 成绩定稿后记录永不删除 (历史留痕)
// ==========================================

use crate::domain::types::ResultStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Enrollment - 选课记录
// ==========================================
// 用途: 教务录入成绩,引擎层只读
// 对齐: enrollment 表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    // ===== 主键 =====
    pub id: i64, // 选课记录ID (注册顺序即自增顺序)

    // ===== 关联 =====
    pub student_id: String,    // 学号 (FK student)
    pub material_id: String,   // 课程ID (FK material)
    pub academic_year: String, // 学年 (如 "2024-2025")

    // ===== 成绩与带科标记 =====
    pub result_status: ResultStatus, // 成绩状态
    pub is_carried: bool,            // 是否为上学年带下来的科目

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
    pub updated_at: DateTime<Utc>, // 最后更新时间
}

// ==========================================
// EnrollmentRecord - 聚合视图 (选课 + 课程)
// ==========================================
// 用途: Enrollment Aggregator 输出,升级判定的唯一输入
// 顺序: 按课程注册顺序 (enrollment.id 升序)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    pub enrollment_id: i64,          // 选课记录ID
    pub material_id: String,         // 课程ID
    pub material_name: String,       // 课程名称
    pub is_core_subject: bool,       // 是否核心课程
    pub result_status: ResultStatus, // 成绩状态
    pub is_carried: bool,            // 是否带科科目
}

// ==========================================
// CarryFlagUpdate - 带科标记更新指令
// ==========================================
// 用途: 评估器输出给提交方的指令,评估器自身不落库
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarryFlagUpdate {
    pub enrollment_id: i64, // 目标选课记录
    pub is_carried: bool,   // 目标标记值
}
