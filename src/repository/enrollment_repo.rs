// ==========================================
// 高校考勤系统 - 选课记录数据仓储
// ==========================================
// 职责: 管理 enrollment 表的读写
// 红线: Repository 不含业务逻辑
// 红线: 带科标记更新必须单事务 (一名学生的更新要么全成要么全不成)
// ==========================================

use crate::domain::enrollment::{CarryFlagUpdate, Enrollment, EnrollmentRecord};
use crate::domain::types::ResultStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// EnrollmentRepository - 选课记录仓储
// ==========================================
pub struct EnrollmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EnrollmentRepository {
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

    /// 注册选课记录
    ///
    /// # 参数
    /// - student_id: 学号
    /// - material_id: 课程ID
    /// - academic_year: 学年
    /// - result_status: 初始成绩状态
    /// - is_carried: 是否为带科科目
    ///
    /// # 返回
    /// - Ok(i64): 新记录ID
    /// - Err(UniqueConstraintViolation): 同学生同课程同学年重复注册
    pub fn insert(
        &self,
        student_id: &str,
        material_id: &str,
        academic_year: &str,
        result_status: ResultStatus,
        is_carried: bool,
    ) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            r#"
            INSERT INTO enrollment
                (student_id, material_id, academic_year, result_status, is_carried,
                 created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            "#,
            params![
                student_id,
                material_id,
                academic_year,
                result_status.to_db_str(),
                is_carried,
                now
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 更新成绩状态 (教务录入成绩)
    pub fn set_result_status(
        &self,
        enrollment_id: i64,
        result_status: ResultStatus,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let now = Utc::now().to_rfc3339();
        let updated = conn.execute(
            "UPDATE enrollment SET result_status = ?1, updated_at = ?2 WHERE id = ?3",
            params![result_status.to_db_str(), now, enrollment_id],
        )?;
        if updated == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Enrollment".to_string(),
                id: enrollment_id.to_string(),
            });
        }
        Ok(())
    }

    /// 按学生+学年查询选课记录 (原始实体)
    pub fn find_by_student_and_year(
        &self,
        student_id: &str,
        academic_year: &str,
    ) -> RepositoryResult<Vec<Enrollment>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, student_id, material_id, academic_year,
                   result_status, is_carried, created_at, updated_at
            FROM enrollment
            WHERE student_id = ?1 AND academic_year = ?2
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map(params![student_id, academic_year], |row| {
            let status_str: String = row.get(4)?;
            Ok(Enrollment {
                id: row.get(0)?,
                student_id: row.get(1)?,
                material_id: row.get(2)?,
                academic_year: row.get(3)?,
                result_status: parse_result_status(4, &status_str)?,
                is_carried: row.get(5)?,
                created_at: parse_ts(&row.get::<_, String>(6)?),
                updated_at: parse_ts(&row.get::<_, String>(7)?),
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// 按学生+学年查询聚合视图 (选课 JOIN 课程, 注册顺序)
    pub fn find_records_by_student_and_year(
        &self,
        student_id: &str,
        academic_year: &str,
    ) -> RepositoryResult<Vec<EnrollmentRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT e.id, e.material_id, m.name, m.is_core_subject,
                   e.result_status, e.is_carried
            FROM enrollment e
            JOIN material m ON m.id = e.material_id
            WHERE e.student_id = ?1 AND e.academic_year = ?2
            ORDER BY e.id
            "#,
        )?;

        let rows = stmt.query_map(params![student_id, academic_year], map_record_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// 按系+学年一次性查询全系聚合视图 (批量评估用,避免 N+1)
    ///
    /// # 返回
    /// - Vec<(学号, EnrollmentRecord)>: 按学号、注册顺序排列
    pub fn find_records_by_department_and_year(
        &self,
        department_id: &str,
        academic_year: &str,
    ) -> RepositoryResult<Vec<(String, EnrollmentRecord)>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT e.student_id, e.id, e.material_id, m.name, m.is_core_subject,
                   e.result_status, e.is_carried
            FROM enrollment e
            JOIN material m ON m.id = e.material_id
            JOIN student s ON s.id = e.student_id
            WHERE s.department_id = ?1 AND e.academic_year = ?2
            ORDER BY e.student_id, e.id
            "#,
        )?;

        let rows = stmt.query_map(params![department_id, academic_year], |row| {
            let status_str: String = row.get(5)?;
            Ok((
                row.get::<_, String>(0)?,
                EnrollmentRecord {
                    enrollment_id: row.get(1)?,
                    material_id: row.get(2)?,
                    material_name: row.get(3)?,
                    is_core_subject: row.get(4)?,
                    result_status: parse_result_status(5, &status_str)?,
                    is_carried: row.get(6)?,
                },
            ))
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// 批量更新带科标记 (单事务)
    ///
    /// 一次调用对应一名学生的一组更新指令；事务保证组内原子性。
    pub fn bulk_update_carry_flags(
        &self,
        updates: &[CarryFlagUpdate],
    ) -> RepositoryResult<()> {
        if updates.is_empty() {
            return Ok(());
        }

        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let now = Utc::now().to_rfc3339();
        for update in updates {
            let changed = tx.execute(
                "UPDATE enrollment SET is_carried = ?1, updated_at = ?2 WHERE id = ?3",
                params![update.is_carried, now, update.enrollment_id],
            )?;
            if changed == 0 {
                // 指令指向不存在的记录,整组回滚
                return Err(RepositoryError::NotFound {
                    entity: "Enrollment".to_string(),
                    id: update.enrollment_id.to_string(),
                });
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(())
    }
}

/// 行映射: 聚合视图
fn map_record_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EnrollmentRecord> {
    let status_str: String = row.get(4)?;
    Ok(EnrollmentRecord {
        enrollment_id: row.get(0)?,
        material_id: row.get(1)?,
        material_name: row.get(2)?,
        is_core_subject: row.get(3)?,
        result_status: parse_result_status(4, &status_str)?,
        is_carried: row.get(5)?,
    })
}

/// 解析成绩状态列
///
/// 红线: 无法识别的状态值必须上抛,不得静默回落到任何默认值
/// (一条被脏写的 FAILED 记录若被吞掉,会直接改变学生的升级结果)
fn parse_result_status(idx: usize, s: &str) -> rusqlite::Result<ResultStatus> {
    ResultStatus::from_str(s).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("无效的成绩状态: {}", s).into(),
        )
    })
}

/// 解析 RFC3339 时间戳 (历史数据解析失败回落到 epoch)
fn parse_ts(s: &str) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| chrono::DateTime::<Utc>::UNIX_EPOCH)
}
