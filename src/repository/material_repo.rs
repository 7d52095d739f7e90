// ==========================================
// 高校考勤系统 - 课程数据仓储
// ==========================================
// 职责: 管理 material 表的读写
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::material::Material;
use crate::domain::types::Semester;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// MaterialRepository - 课程仓储
// ==========================================
pub struct MaterialRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MaterialRepository {
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

    /// 新增课程
    pub fn insert(&self, material: &Material) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO material
                (id, name, department_id, stage_id, semester, is_core_subject, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                material.id,
                material.name,
                material.department_id,
                material.stage_id,
                material.semester.to_db_str(),
                material.is_core_subject,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// 按ID查询课程
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Material>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, department_id, stage_id, semester, is_core_subject, created_at
            FROM material
            WHERE id = ?1
            "#,
        )?;

        let material = stmt
            .query_row(params![id], map_material_row)
            .optional()?;
        Ok(material)
    }

    /// 按系+年级查询课程列表
    pub fn find_by_department_and_stage(
        &self,
        department_id: &str,
        stage_id: &str,
    ) -> RepositoryResult<Vec<Material>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, department_id, stage_id, semester, is_core_subject, created_at
            FROM material
            WHERE department_id = ?1 AND stage_id = ?2
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map(params![department_id, stage_id], map_material_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

/// 行映射: Material
fn map_material_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Material> {
    let semester_str: String = row.get(4)?;
    let created_str: String = row.get(6)?;
    Ok(Material {
        id: row.get(0)?,
        name: row.get(1)?,
        department_id: row.get(2)?,
        stage_id: row.get(3)?,
        semester: Semester::from_str(&semester_str),
        is_core_subject: row.get(5)?,
        created_at: chrono::DateTime::parse_from_rfc3339(&created_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| chrono::DateTime::<Utc>::UNIX_EPOCH),
    })
}
