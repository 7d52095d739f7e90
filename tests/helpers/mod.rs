// ==========================================
// 测试辅助模块
// ==========================================
// 职责: 临时数据库 + 典型教学结构/学生数据的搭建
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use student_promotion::db::{init_schema, open_sqlite_connection};
use student_promotion::domain::material::{Material, Stage};
use student_promotion::domain::types::{ResultStatus, Semester};
use student_promotion::repository::{
    DepartmentRepository, EnrollmentRepository, MaterialRepository, StageRepository,
    StudentRepository,
};
use tempfile::TempDir;

pub const DEPARTMENT_ID: &str = "D001";
pub const STAGE_ID: &str = "ST02";
pub const FINAL_STAGE_ID: &str = "ST04";
pub const ACADEMIC_YEAR: &str = "2024-2025";

/// 创建临时数据库并建表
///
/// 返回 TempDir 用于维持数据库文件存活,测试结束自动清理
pub fn setup_db() -> (TempDir, Arc<Mutex<Connection>>) {
    let dir = TempDir::new().expect("创建临时目录失败");
    let db_path = dir.path().join("test.db");
    let conn = open_sqlite_connection(db_path.to_str().unwrap()).expect("打开数据库失败");
    init_schema(&conn).expect("建表失败");
    (dir, Arc::new(Mutex::new(conn)))
}

/// 搭建教学结构: 系 D001 + 四个年级 + 二年级五门课程 (M001 为核心课程)
pub fn seed_structure(conn: &Arc<Mutex<Connection>>) {
    let departments = DepartmentRepository::from_connection(conn.clone());
    let stages = StageRepository::from_connection(conn.clone());
    let materials = MaterialRepository::from_connection(conn.clone());

    departments.insert(DEPARTMENT_ID, "计算机系").unwrap();
    for (id, level, name) in [
        ("ST01", 1, "一年级"),
        ("ST02", 2, "二年级"),
        ("ST03", 3, "三年级"),
        ("ST04", 4, "四年级"),
    ] {
        stages
            .insert(&Stage {
                id: id.to_string(),
                department_id: DEPARTMENT_ID.to_string(),
                level,
                name: name.to_string(),
            })
            .unwrap();
    }

    for (id, name, core) in [
        ("M001", "数据结构", true),
        ("M002", "操作系统", false),
        ("M003", "离散数学", false),
        ("M004", "计算机网络", false),
        ("M005", "大学英语", false),
    ] {
        materials
            .insert(&Material {
                id: id.to_string(),
                name: name.to_string(),
                department_id: DEPARTMENT_ID.to_string(),
                stage_id: STAGE_ID.to_string(),
                semester: Semester::FullYear,
                is_core_subject: core,
                created_at: chrono::Utc::now(),
            })
            .unwrap();
    }
}

/// 注册学生并录入五门成绩
///
/// # 参数
/// - fail_count: 不及格门数,从 M005 往前挂 (核心课程 M001 最后才挂)
pub fn seed_student(
    conn: &Arc<Mutex<Connection>>,
    student_id: &str,
    stage_id: &str,
    fail_count: usize,
) {
    let students = StudentRepository::from_connection(conn.clone());
    let enrollments = EnrollmentRepository::from_connection(conn.clone());

    students
        .insert(student_id, "测试学生", DEPARTMENT_ID, stage_id)
        .unwrap();

    let material_ids = ["M001", "M002", "M003", "M004", "M005"];
    for (i, material_id) in material_ids.iter().enumerate() {
        let status = if i >= material_ids.len() - fail_count {
            ResultStatus::Failed
        } else {
            ResultStatus::Passed
        };
        enrollments
            .insert(student_id, material_id, ACADEMIC_YEAR, status, false)
            .unwrap();
    }
}

/// 注册学生但不录入任何选课记录 (批量评估应记入 skipped)
pub fn seed_student_without_enrollments(conn: &Arc<Mutex<Connection>>, student_id: &str) {
    let students = StudentRepository::from_connection(conn.clone());
    students
        .insert(student_id, "无数据学生", DEPARTMENT_ID, STAGE_ID)
        .unwrap();
}
