// ==========================================
// 高校考勤系统 - 系数据仓储
// ==========================================
// 职责: 管理 department 表的读写
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// DepartmentRepository - 系仓储
// ==========================================
pub struct DepartmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DepartmentRepository {
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

    /// 新增系
    pub fn insert(&self, id: &str, name: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO department (id, name) VALUES (?1, ?2)",
            params![id, name],
        )?;
        Ok(())
    }

    /// 系是否存在
    pub fn exists(&self, id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let found: Option<bool> = conn
            .query_row(
                "SELECT 1 FROM department WHERE id = ?1 LIMIT 1",
                params![id],
                |_row| Ok(true),
            )
            .optional()?;
        Ok(found.unwrap_or(false))
    }
}
