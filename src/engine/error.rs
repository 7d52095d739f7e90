// ==========================================
// 高校考勤系统 - 引擎层错误类型
// ==========================================
// 职责: 升级决策引擎的错误分类
// 红线: 数据完整性问题永不静默消化,必须显式上抛
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 该学年无选课记录,无法评估
    /// 批量评估时可恢复 (记入 skipped),单学生评估时由调用方决定
    #[error("数据不足: 学生 {student_id} 在学年 {academic_year} 无选课记录")]
    InsufficientData {
        student_id: String,
        academic_year: String,
    },

    /// 数据完整性违反 (如同一课程重复出现)
    #[error("数据完整性错误: 学生 {student_id}: {message}")]
    DataIntegrity {
        student_id: String,
        message: String,
    },

    /// 系本身不存在,策略无法解析
    /// 注意: 系存在但无配置行不是错误,走默认策略
    #[error("策略无法解析: 系 {department_id} 不存在")]
    ConfigNotResolvable { department_id: String },

    /// 输入参数无效 (如空学年)
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 预览整体失败: 收敛所有数据完整性/策略解析错误
    #[error("批量预览失败, 共 {} 个错误: {}", errors.len(), errors.join("; "))]
    PreviewCollated { errors: Vec<String> },

    /// 外部数据源错误 (仓储/目录)
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
