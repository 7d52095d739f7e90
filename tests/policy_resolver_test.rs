// ==========================================
// PolicyResolver 集成测试
// ==========================================
// 测试目标: 默认策略路径 / 配置覆盖 / 系不存在 / 毕业年级判定
// ==========================================

mod helpers;

use helpers::{seed_structure, setup_db, DEPARTMENT_ID};
use student_promotion::domain::promotion::PromotionConfig;
use student_promotion::domain::types::RepeatMode;
use student_promotion::engine::{EngineError, PolicyResolver, PromotionStores};
use student_promotion::repository::PromotionConfigRepository;

fn resolver(stores: &PromotionStores) -> PolicyResolver {
    PolicyResolver::new(stores.policies.clone(), stores.stages.clone())
}

#[tokio::test]
async fn test_default_policy_when_no_config_row() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn);
    let stores = PromotionStores::from_connection(conn);

    let policy = resolver(&stores).resolve(DEPARTMENT_ID).await.unwrap();

    // 无配置行走默认策略,与 default_policy 完全一致
    assert_eq!(policy.config, PromotionConfig::default_policy(DEPARTMENT_ID));
    assert_eq!(policy.config.max_carry_subjects, 2);
    assert_eq!(policy.config.fail_threshold_for_repeat, 3);
    assert!(!policy.config.disable_carry_for_final_year);
    assert!(!policy.config.block_carry_for_core);
    assert_eq!(policy.config.repeat_mode, RepeatMode::RepeatFailedOnly);
}

#[tokio::test]
async fn test_configured_policy_overrides_default() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn);

    let config_repo = PromotionConfigRepository::from_connection(conn.clone());
    let mut config = PromotionConfig::default_policy(DEPARTMENT_ID);
    config.max_carry_subjects = 1;
    config.fail_threshold_for_repeat = 2;
    config.block_carry_for_core = true;
    config.repeat_mode = RepeatMode::RepeatFullYear;
    config_repo.upsert(&config).unwrap();

    let stores = PromotionStores::from_connection(conn);
    let policy = resolver(&stores).resolve(DEPARTMENT_ID).await.unwrap();

    assert_eq!(policy.config.max_carry_subjects, 1);
    assert_eq!(policy.config.fail_threshold_for_repeat, 2);
    assert!(policy.config.block_carry_for_core);
    assert_eq!(policy.config.repeat_mode, RepeatMode::RepeatFullYear);
}

#[tokio::test]
async fn test_unknown_department_is_config_not_resolvable() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn);
    let stores = PromotionStores::from_connection(conn);

    let result = resolver(&stores).resolve("D999").await;
    assert!(matches!(
        result,
        Err(EngineError::ConfigNotResolvable { .. })
    ));
}

#[tokio::test]
async fn test_final_stage_is_max_level() {
    let (_dir, conn) = setup_db();
    seed_structure(&conn); // 年级 level 1..4
    let stores = PromotionStores::from_connection(conn);

    let policy = resolver(&stores).resolve(DEPARTMENT_ID).await.unwrap();
    assert_eq!(policy.final_stage_level, Some(4));
}

#[tokio::test]
async fn test_missing_stage_metadata_yields_none() {
    let (_dir, conn) = setup_db();
    // 只建系,不建年级
    {
        let departments =
            student_promotion::repository::DepartmentRepository::from_connection(conn.clone());
        departments.insert(DEPARTMENT_ID, "计算机系").unwrap();
    }
    let stores = PromotionStores::from_connection(conn);

    let policy = resolver(&stores).resolve(DEPARTMENT_ID).await.unwrap();
    // 年级元数据缺失 → 毕业年级规则不适用
    assert_eq!(policy.final_stage_level, None);
}
