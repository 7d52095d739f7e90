// ==========================================
// 高校考勤系统 - 年级数据仓储
// ==========================================
// 职责: 管理 stage 表的读写
// 红线: Repository 不含业务逻辑 (毕业年级判定在 Policy Resolver)
// ==========================================

use crate::domain::material::Stage;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// StageRepository - 年级仓储
// ==========================================
pub struct StageRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StageRepository {
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

    /// 新增年级
    pub fn insert(&self, stage: &Stage) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO stage (id, department_id, level, name) VALUES (?1, ?2, ?3, ?4)",
            params![stage.id, stage.department_id, stage.level, stage.name],
        )?;
        Ok(())
    }

    /// 按ID查询年级
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Stage>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, department_id, level, name FROM stage WHERE id = ?1",
        )?;
        let stage = stmt
            .query_row(params![id], map_stage_row)
            .optional()?;
        Ok(stage)
    }

    /// 按系查询年级列表 (level 升序)
    pub fn find_by_department(&self, department_id: &str) -> RepositoryResult<Vec<Stage>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, department_id, level, name
            FROM stage
            WHERE department_id = ?1
            ORDER BY level
            "#,
        )?;

        let rows = stmt.query_map(params![department_id], map_stage_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

/// 行映射: Stage
fn map_stage_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Stage> {
    Ok(Stage {
        id: row.get(0)?,
        department_id: row.get(1)?,
        level: row.get(2)?,
        name: row.get(3)?,
    })
}
