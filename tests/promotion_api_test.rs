// ==========================================
// PromotionApi 集成测试 (单学生评估门面)
// ==========================================
// 测试目标: 正常判定 / 学生不存在 / 无数据 / 错误转换
// ==========================================

mod helpers;

use helpers::{
    seed_structure, seed_student, seed_student_without_enrollments, setup_db, ACADEMIC_YEAR,
    STAGE_ID,
};
use student_promotion::api::ApiError;
use student_promotion::domain::promotion::reason;
use student_promotion::domain::types::{PromotionOutcome, RepeatMode, ResultStatus};
use student_promotion::PromotionApi;

#[tokio::test]
async fn test_evaluate_full_pass_student() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn);
    seed_student(&conn, "S001", STAGE_ID, 0);

    let api = PromotionApi::from_connection(conn);
    let decision = api.evaluate("S001", ACADEMIC_YEAR).await.unwrap();

    assert_eq!(decision.student_id, "S001");
    assert_eq!(decision.academic_year, ACADEMIC_YEAR);
    assert_eq!(decision.outcome, PromotionOutcome::Promoted);
    assert_eq!(decision.reason, reason::NO_FAILURES);
    assert!(decision.failed_materials.is_empty());
    assert!(decision.carried_materials.is_empty());
    assert!(decision.carry_flag_updates.is_empty());
    assert_eq!(decision.repeat_mode, RepeatMode::RepeatFailedOnly);
}

#[tokio::test]
async fn test_evaluate_carry_student_lists_failed_materials() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn);
    seed_student(&conn, "S002", STAGE_ID, 2);

    let api = PromotionApi::from_connection(conn.clone());
    let decision = api.evaluate("S002", ACADEMIC_YEAR).await.unwrap();

    assert_eq!(decision.outcome, PromotionOutcome::PromotedWithCarry);
    assert_eq!(decision.reason, reason::CARRIED_WITHIN_LIMIT);
    assert_eq!(decision.failed_materials.len(), 2);
    assert_eq!(decision.carried_materials.len(), 2);
    assert_eq!(decision.carry_flag_updates.len(), 2);

    // 单学生评估同样只读
    let enrollments =
        student_promotion::repository::EnrollmentRepository::from_connection(conn);
    let records = enrollments
        .find_records_by_student_and_year("S002", ACADEMIC_YEAR)
        .unwrap();
    assert!(records.iter().all(|r| !r.is_carried));
}

#[tokio::test]
async fn test_evaluate_unknown_student_is_invalid_input() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn);

    let api = PromotionApi::from_connection(conn);
    let result = api.evaluate("S_GHOST", ACADEMIC_YEAR).await;
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

#[tokio::test]
async fn test_evaluate_student_without_enrollments_is_insufficient_data() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn);
    seed_student_without_enrollments(&conn, "S_NO_DATA");

    let api = PromotionApi::from_connection(conn);
    let result = api.evaluate("S_NO_DATA", ACADEMIC_YEAR).await;
    match result {
        Err(ApiError::InsufficientData(msg)) => assert!(msg.contains("S_NO_DATA")),
        other => panic!("Expected InsufficientData, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_evaluate_rejects_corrupt_result_status() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn);
    // 挂3门,默认策略下应留级
    seed_student(&conn, "S004", STAGE_ID, 3);

    // 脏写其中一门不及格记录的状态列
    conn.lock()
        .unwrap()
        .execute(
            "UPDATE enrollment SET result_status = 'FAILLED' \
             WHERE student_id = 'S004' AND material_id = 'M005'",
            [],
        )
        .unwrap();

    let api = PromotionApi::from_connection(conn);
    let result = api.evaluate("S004", ACADEMIC_YEAR).await;

    // 脏状态必须让评估失败,绝不能少算一门不及格后按带科升级放行
    match result {
        Err(err) => assert!(err.to_string().contains("无效的成绩状态")),
        Ok(decision) => panic!("脏状态被静默消化, 得到 {:?}", decision.outcome),
    }
}

#[tokio::test]
async fn test_evaluate_notes_absence_blocked() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn);
    seed_student(&conn, "S003", STAGE_ID, 0);

    // M005 改为因缺勤被锁定: 不算不及格,但在 notes 中标注
    {
        let enrollments =
            student_promotion::repository::EnrollmentRepository::from_connection(conn.clone());
        let records = enrollments
            .find_records_by_student_and_year("S003", ACADEMIC_YEAR)
            .unwrap();
        let last = records.last().unwrap();
        enrollments
            .set_result_status(last.enrollment_id, ResultStatus::BlockedByAbsence)
            .unwrap();
    }

    let api = PromotionApi::from_connection(conn);
    let decision = api.evaluate("S003", ACADEMIC_YEAR).await.unwrap();

    assert_eq!(decision.outcome, PromotionOutcome::Promoted);
    assert!(decision
        .notes
        .iter()
        .any(|n| n == reason::NOTE_HAS_ABSENCE_BLOCKED));
}
