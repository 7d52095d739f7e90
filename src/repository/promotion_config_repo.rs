// ==========================================
// 高校考勤系统 - 升级策略数据仓储
// ==========================================
// 职责: 管理 promotion_config 表的读写 (一系一策略)
// 红线: Repository 不含业务逻辑,默认策略由 Policy Resolver 决定
// ==========================================

use crate::domain::promotion::PromotionConfig;
use crate::domain::types::RepeatMode;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// PromotionConfigRepository - 升级策略仓储
// ==========================================
pub struct PromotionConfigRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PromotionConfigRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按系查询升级策略
    ///
    /// # 返回
    /// - Ok(Some(PromotionConfig)): 该系已配置策略
    /// - Ok(None): 未配置 (正常路径,调用方采用默认策略)
    pub fn find_by_department(
        &self,
        department_id: &str,
    ) -> RepositoryResult<Option<PromotionConfig>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT department_id, max_carry_subjects, fail_threshold_for_repeat,
                   disable_carry_for_final_year, block_carry_for_core, repeat_mode
            FROM promotion_config
            WHERE department_id = ?1
            "#,
        )?;

        let config = stmt
            .query_row(params![department_id], |row| {
                let mode_str: String = row.get(5)?;
                Ok(PromotionConfig {
                    department_id: row.get(0)?,
                    max_carry_subjects: row.get(1)?,
                    fail_threshold_for_repeat: row.get(2)?,
                    disable_carry_for_final_year: row.get(3)?,
                    block_carry_for_core: row.get(4)?,
                    repeat_mode: RepeatMode::from_str(&mode_str),
                })
            })
            .optional()?;
        Ok(config)
    }

    /// 写入/覆盖升级策略 (管理端)
    ///
    /// # 校验
    /// - max_carry_subjects >= 0
    /// - fail_threshold_for_repeat >= 1
    pub fn upsert(&self, config: &PromotionConfig) -> RepositoryResult<()> {
        if config.max_carry_subjects < 0 {
            return Err(RepositoryError::FieldValueError {
                field: "max_carry_subjects".to_string(),
                message: format!("必须 >= 0, 实际 {}", config.max_carry_subjects),
            });
        }
        if config.fail_threshold_for_repeat < 1 {
            return Err(RepositoryError::FieldValueError {
                field: "fail_threshold_for_repeat".to_string(),
                message: format!("必须 >= 1, 实际 {}", config.fail_threshold_for_repeat),
            });
        }

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO promotion_config
                (department_id, max_carry_subjects, fail_threshold_for_repeat,
                 disable_carry_for_final_year, block_carry_for_core, repeat_mode)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(department_id) DO UPDATE SET
                max_carry_subjects = excluded.max_carry_subjects,
                fail_threshold_for_repeat = excluded.fail_threshold_for_repeat,
                disable_carry_for_final_year = excluded.disable_carry_for_final_year,
                block_carry_for_core = excluded.block_carry_for_core,
                repeat_mode = excluded.repeat_mode
            "#,
            params![
                config.department_id,
                config.max_carry_subjects,
                config.fail_threshold_for_repeat,
                config.disable_carry_for_final_year,
                config.block_carry_for_core,
                config.repeat_mode.to_db_str(),
            ],
        )?;
        Ok(())
    }
}
