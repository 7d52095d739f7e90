// ==========================================
// 高校考勤系统 - 学生名册数据仓储
// ==========================================
// 职责: 管理 student 表的读写
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::material::{StudentContext, StudentRef};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// StudentRepository - 学生名册仓储
// ==========================================
pub struct StudentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StudentRepository {
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

    /// 新增学生
    pub fn insert(
        &self,
        id: &str,
        name: &str,
        department_id: &str,
        stage_id: &str,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO student (id, name, department_id, stage_id) VALUES (?1, ?2, ?3, ?4)",
            params![id, name, department_id, stage_id],
        )?;
        Ok(())
    }

    /// 查询学生归属信息 (单学生评估定位系/年级)
    pub fn find_context(&self, student_id: &str) -> RepositoryResult<Option<StudentContext>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, department_id, stage_id FROM student WHERE id = ?1",
        )?;
        let ctx = stmt
            .query_row(params![student_id], |row| {
                Ok(StudentContext {
                    student_id: row.get(0)?,
                    department_id: row.get(1)?,
                    stage_id: row.get(2)?,
                })
            })
            .optional()?;
        Ok(ctx)
    }

    /// 按系+年级查询学生名册 (学号升序)
    pub fn find_by_department_and_stage(
        &self,
        department_id: &str,
        stage_id: &str,
    ) -> RepositoryResult<Vec<StudentRef>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name
            FROM student
            WHERE department_id = ?1 AND stage_id = ?2
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map(params![department_id, stage_id], |row| {
            Ok(StudentRef {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
