// ==========================================
// 数据仓储层集成测试
// ==========================================
// 测试目标: 唯一约束 / 带科标记事务原子性 / 成绩更新 / 查询口径 / 策略校验
// ==========================================

mod helpers;

use helpers::{seed_structure, seed_student, setup_db, ACADEMIC_YEAR, DEPARTMENT_ID, STAGE_ID};
use student_promotion::domain::enrollment::CarryFlagUpdate;
use student_promotion::domain::promotion::PromotionConfig;
use student_promotion::domain::types::ResultStatus;
use student_promotion::repository::{
    EnrollmentRepository, PromotionConfigRepository, RepositoryError, StudentRepository,
};

// ==========================================
// 测试 1: 同学生同课程同学年重复注册 → 唯一约束
// ==========================================

#[test]
fn test_duplicate_enrollment_hits_unique_constraint() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn);
    seed_student(&conn, "S001", STAGE_ID, 0);

    let enrollments = EnrollmentRepository::from_connection(conn);
    let result = enrollments.insert("S001", "M001", ACADEMIC_YEAR, ResultStatus::InProgress, false);
    assert!(matches!(
        result,
        Err(RepositoryError::UniqueConstraintViolation(_))
    ));
}

// ==========================================
// 测试 2: 外键约束 (学生不存在)
// ==========================================

#[test]
fn test_enrollment_for_unknown_student_hits_foreign_key() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn);

    let enrollments = EnrollmentRepository::from_connection(conn);
    let result = enrollments.insert("S_GHOST", "M001", ACADEMIC_YEAR, ResultStatus::Passed, false);
    assert!(matches!(result, Err(RepositoryError::ForeignKeyViolation(_))));
}

// ==========================================
// 测试 3: 成绩更新
// ==========================================

#[test]
fn test_set_result_status() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn);

    let students = StudentRepository::from_connection(conn.clone());
    students
        .insert("S001", "测试学生", DEPARTMENT_ID, STAGE_ID)
        .unwrap();

    let enrollments = EnrollmentRepository::from_connection(conn);
    let id = enrollments
        .insert("S001", "M001", ACADEMIC_YEAR, ResultStatus::InProgress, false)
        .unwrap();

    enrollments
        .set_result_status(id, ResultStatus::Failed)
        .unwrap();

    let records = enrollments
        .find_by_student_and_year("S001", ACADEMIC_YEAR)
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].result_status, ResultStatus::Failed);

    // 不存在的记录 → NotFound
    let result = enrollments.set_result_status(99999, ResultStatus::Passed);
    assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
}

// ==========================================
// 测试 4: 聚合视图按注册顺序返回
// ==========================================

#[test]
fn test_records_preserve_registration_order() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn);
    seed_student(&conn, "S001", STAGE_ID, 2);

    let enrollments = EnrollmentRepository::from_connection(conn);
    let records = enrollments
        .find_records_by_student_and_year("S001", ACADEMIC_YEAR)
        .unwrap();

    let ids: Vec<&str> = records.iter().map(|r| r.material_id.as_str()).collect();
    assert_eq!(ids, ["M001", "M002", "M003", "M004", "M005"]);
    assert_eq!(records[0].material_name, "数据结构");
    assert!(records[0].is_core_subject);
}

// ==========================================
// 测试 5: 带科标记更新事务原子性
// ==========================================
// 一组更新中混入不存在的记录ID → 整组回滚,合法的更新也不落库

#[test]
fn test_bulk_update_carry_flags_rolls_back_as_a_group() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn);
    seed_student(&conn, "S001", STAGE_ID, 2);

    let enrollments = EnrollmentRepository::from_connection(conn);
    let records = enrollments
        .find_records_by_student_and_year("S001", ACADEMIC_YEAR)
        .unwrap();
    let valid_id = records[4].enrollment_id;

    let updates = vec![
        CarryFlagUpdate {
            enrollment_id: valid_id,
            is_carried: true,
        },
        CarryFlagUpdate {
            enrollment_id: 99999,
            is_carried: true,
        },
    ];

    let result = enrollments.bulk_update_carry_flags(&updates);
    assert!(matches!(result, Err(RepositoryError::NotFound { .. })));

    // 合法的那条也必须保持未标记
    let records = enrollments
        .find_records_by_student_and_year("S001", ACADEMIC_YEAR)
        .unwrap();
    assert!(records.iter().all(|r| !r.is_carried));
}

#[test]
fn test_bulk_update_carry_flags_applies_all() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn);
    seed_student(&conn, "S001", STAGE_ID, 2);

    let enrollments = EnrollmentRepository::from_connection(conn);
    let records = enrollments
        .find_records_by_student_and_year("S001", ACADEMIC_YEAR)
        .unwrap();

    let updates: Vec<CarryFlagUpdate> = records
        .iter()
        .filter(|r| r.result_status == ResultStatus::Failed)
        .map(|r| CarryFlagUpdate {
            enrollment_id: r.enrollment_id,
            is_carried: true,
        })
        .collect();
    assert_eq!(updates.len(), 2);

    enrollments.bulk_update_carry_flags(&updates).unwrap();

    let records = enrollments
        .find_records_by_student_and_year("S001", ACADEMIC_YEAR)
        .unwrap();
    assert_eq!(records.iter().filter(|r| r.is_carried).count(), 2);
}

// ==========================================
// 测试 6: 脏状态值必须上抛
// ==========================================
// 一条被脏写的 FAILED 记录若被静默回落,会少算不及格门数,直接改变升级结果

#[test]
fn test_corrupt_result_status_surfaces_as_error() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn);
    seed_student(&conn, "S001", STAGE_ID, 3);

    // 模拟脏写: 状态列被改成无法识别的值
    conn.lock()
        .unwrap()
        .execute(
            "UPDATE enrollment SET result_status = 'FAILLED' \
             WHERE student_id = 'S001' AND material_id = 'M005'",
            [],
        )
        .unwrap();

    let enrollments = EnrollmentRepository::from_connection(conn);

    let result = enrollments.find_records_by_student_and_year("S001", ACADEMIC_YEAR);
    assert!(matches!(result, Err(RepositoryError::ValidationError(_))));

    // 原始实体查询与全系聚合查询同样不得静默回落
    let result = enrollments.find_by_student_and_year("S001", ACADEMIC_YEAR);
    assert!(matches!(result, Err(RepositoryError::ValidationError(_))));

    let result = enrollments.find_records_by_department_and_year(DEPARTMENT_ID, ACADEMIC_YEAR);
    assert!(matches!(result, Err(RepositoryError::ValidationError(_))));
}

// ==========================================
// 测试 7: 全系聚合视图
// ==========================================

#[test]
fn test_department_records_cover_all_students() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn);
    seed_student(&conn, "S001", STAGE_ID, 0);
    seed_student(&conn, "S002", STAGE_ID, 1);

    let enrollments = EnrollmentRepository::from_connection(conn);
    let rows = enrollments
        .find_records_by_department_and_year(DEPARTMENT_ID, ACADEMIC_YEAR)
        .unwrap();

    assert_eq!(rows.len(), 10);
    assert_eq!(rows.iter().filter(|(sid, _)| sid == "S001").count(), 5);
    assert_eq!(rows.iter().filter(|(sid, _)| sid == "S002").count(), 5);
}

// ==========================================
// 测试 8: 升级策略 upsert 与字段校验
// ==========================================

#[test]
fn test_promotion_config_upsert_overwrites() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn);

    let configs = PromotionConfigRepository::from_connection(conn);
    let mut config = PromotionConfig::default_policy(DEPARTMENT_ID);
    configs.upsert(&config).unwrap();

    config.max_carry_subjects = 5;
    configs.upsert(&config).unwrap();

    let stored = configs.find_by_department(DEPARTMENT_ID).unwrap().unwrap();
    assert_eq!(stored.max_carry_subjects, 5);
}

#[test]
fn test_promotion_config_rejects_invalid_fields() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn);
    let configs = PromotionConfigRepository::from_connection(conn);

    let mut config = PromotionConfig::default_policy(DEPARTMENT_ID);
    config.max_carry_subjects = -1;
    assert!(matches!(
        configs.upsert(&config),
        Err(RepositoryError::FieldValueError { .. })
    ));

    let mut config = PromotionConfig::default_policy(DEPARTMENT_ID);
    config.fail_threshold_for_repeat = 0;
    assert!(matches!(
        configs.upsert(&config),
        Err(RepositoryError::FieldValueError { .. })
    ));

    // 校验失败不落库
    assert!(configs.find_by_department(DEPARTMENT_ID).unwrap().is_none());
}
