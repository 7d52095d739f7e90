// ==========================================
// 高校考勤系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为，避免"部分模块外键开启/部分不开启"
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 集中建表语句，保证 enrollment 唯一约束在任何入口都生效
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化数据库表结构（幂等）
///
/// 约束要点：
/// - enrollment 对 (student_id, material_id, academic_year) 唯一
/// - promotion_config 对 department_id 唯一（一系一策略）
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS department (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS stage (
            id            TEXT PRIMARY KEY,
            department_id TEXT NOT NULL REFERENCES department(id),
            level         INTEGER NOT NULL,
            name          TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS student (
            id            TEXT PRIMARY KEY,
            name          TEXT NOT NULL,
            department_id TEXT NOT NULL REFERENCES department(id),
            stage_id      TEXT NOT NULL REFERENCES stage(id)
        );

        CREATE TABLE IF NOT EXISTS material (
            id              TEXT PRIMARY KEY,
            name            TEXT NOT NULL,
            department_id   TEXT NOT NULL REFERENCES department(id),
            stage_id        TEXT NOT NULL REFERENCES stage(id),
            semester        TEXT NOT NULL DEFAULT 'FULL_YEAR',
            is_core_subject INTEGER NOT NULL DEFAULT 0,
            created_at      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS enrollment (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id    TEXT NOT NULL REFERENCES student(id),
            material_id   TEXT NOT NULL REFERENCES material(id),
            academic_year TEXT NOT NULL,
            result_status TEXT NOT NULL DEFAULT 'IN_PROGRESS',
            is_carried    INTEGER NOT NULL DEFAULT 0,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL,
            UNIQUE (student_id, material_id, academic_year)
        );

        CREATE TABLE IF NOT EXISTS promotion_config (
            department_id               TEXT PRIMARY KEY REFERENCES department(id),
            max_carry_subjects          INTEGER NOT NULL,
            fail_threshold_for_repeat   INTEGER NOT NULL,
            disable_carry_for_final_year INTEGER NOT NULL DEFAULT 0,
            block_carry_for_core        INTEGER NOT NULL DEFAULT 0,
            repeat_mode                 TEXT NOT NULL DEFAULT 'REPEAT_FAILED_ONLY'
        );

        CREATE INDEX IF NOT EXISTS idx_enrollment_student_year
            ON enrollment(student_id, academic_year);
        CREATE INDEX IF NOT EXISTS idx_student_dept_stage
            ON student(department_id, stage_id);
        "#,
    )
}
