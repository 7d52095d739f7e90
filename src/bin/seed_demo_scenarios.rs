// ==========================================
// 高校考勤系统 - 升级场景演示数据种子
// ==========================================
// 用途: 构造 full_pass / carry_1 / carry_2 / repeat 四类典型学生,
//       供 CLI preview/commit 演示与联调
// 用法: seed_demo_scenarios [数据库路径]
// ==========================================

use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Local;
use student_promotion::db::{init_schema, open_sqlite_connection};
use student_promotion::domain::material::{Material, Stage};
use student_promotion::domain::types::{ResultStatus, Semester};
use student_promotion::repository::{
    DepartmentRepository, EnrollmentRepository, MaterialRepository, StageRepository,
    StudentRepository,
};

const DEPARTMENT_ID: &str = "D001";
const STAGE_ID: &str = "ST02";
const ACADEMIC_YEAR: &str = "2024-2025";

fn main() -> Result<(), Box<dyn Error>> {
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "student_promotion.db".to_string());

    backup_and_reset_db(&db_path)?;

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    let conn = Arc::new(Mutex::new(conn));
    let departments = DepartmentRepository::from_connection(conn.clone());
    let stages = StageRepository::from_connection(conn.clone());
    let students = StudentRepository::from_connection(conn.clone());
    let materials = MaterialRepository::from_connection(conn.clone());
    let enrollments = EnrollmentRepository::from_connection(conn);

    // ===== 教学结构 =====
    departments.insert(DEPARTMENT_ID, "计算机系")?;
    for (id, level, name) in [
        ("ST01", 1, "一年级"),
        ("ST02", 2, "二年级"),
        ("ST03", 3, "三年级"),
        ("ST04", 4, "四年级"),
    ] {
        stages.insert(&Stage {
            id: id.to_string(),
            department_id: DEPARTMENT_ID.to_string(),
            level,
            name: name.to_string(),
        })?;
    }

    // ===== 二年级课程 (M001 为核心课程) =====
    for (id, name, core) in [
        ("M001", "数据结构", true),
        ("M002", "操作系统", false),
        ("M003", "离散数学", false),
        ("M004", "计算机网络", false),
        ("M005", "大学英语", false),
    ] {
        materials.insert(&Material {
            id: id.to_string(),
            name: name.to_string(),
            department_id: DEPARTMENT_ID.to_string(),
            stage_id: STAGE_ID.to_string(),
            semester: Semester::FullYear,
            is_core_subject: core,
            created_at: chrono::Utc::now(),
        })?;
    }

    // ===== 四类典型学生 =====
    // full_pass: 5门全过; carry_1: 挂1门; carry_2: 挂2门; repeat: 挂3门(达阈值)
    let scenarios: [(&str, &str, usize); 4] = [
        ("S_FULL_PASS", "张伟", 0),
        ("S_CARRY_1", "李娜", 1),
        ("S_CARRY_2", "王强", 2),
        ("S_REPEAT", "刘洋", 3),
    ];

    let material_ids = ["M001", "M002", "M003", "M004", "M005"];
    for (student_id, name, fail_count) in scenarios {
        students.insert(student_id, name, DEPARTMENT_ID, STAGE_ID)?;
        for (i, material_id) in material_ids.iter().enumerate() {
            // 不及格科目从非核心课程排起,核心课程(M001)最后才挂
            let status = if i >= material_ids.len() - fail_count {
                ResultStatus::Failed
            } else {
                ResultStatus::Passed
            };
            enrollments.insert(student_id, material_id, ACADEMIC_YEAR, status, false)?;
        }
    }

    // 额外构造一名无选课记录的学生 (批量评估应记入 skipped)
    students.insert("S_NO_DATA", "陈静", DEPARTMENT_ID, STAGE_ID)?;

    eprintln!(
        "种子完成: {} (系={}, 年级={}, 学年={})",
        db_path, DEPARTMENT_ID, STAGE_ID, ACADEMIC_YEAR
    );
    eprintln!("可执行: student-promotion preview {} {} {} {}", DEPARTMENT_ID, STAGE_ID, ACADEMIC_YEAR, db_path);
    Ok(())
}

/// 已有库先备份再重建,避免误毁数据
fn backup_and_reset_db(db_path: &str) -> Result<(), Box<dyn Error>> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path)?;
    fs::remove_file(path)?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}
