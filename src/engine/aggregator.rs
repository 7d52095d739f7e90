// ==========================================
// 高校考勤系统 - Enrollment Aggregator
// ==========================================
// 职责: 把选课记录聚合成逐学生的评估输入
// 红线: 无副作用; 空结果是合法输出 ("无数据"), 不是错误
// 红线: 批量路径一次取数,禁止逐学生查询 (N+1)
// ==========================================

use crate::domain::enrollment::EnrollmentRecord;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::stores::EnrollmentStore;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

// ==========================================
// EnrollmentAggregator - 选课聚合器
// ==========================================
pub struct EnrollmentAggregator {
    enrollments: Arc<dyn EnrollmentStore>,
}

impl EnrollmentAggregator {
    pub fn new(enrollments: Arc<dyn EnrollmentStore>) -> Self {
        Self { enrollments }
    }

    /// 聚合单个学生一个学年的选课记录
    ///
    /// # 参数
    /// - student_id: 学号
    /// - academic_year: 学年 (非空; 格式校验归存储层)
    ///
    /// # 返回
    /// - Ok(Vec<EnrollmentRecord>): 课程注册顺序; 空列表 = 无数据
    pub async fn aggregate_student(
        &self,
        student_id: &str,
        academic_year: &str,
    ) -> EngineResult<Vec<EnrollmentRecord>> {
        validate_academic_year(academic_year)?;
        let records = self
            .enrollments
            .get_enrollments(student_id, academic_year)
            .await?;
        debug!(
            student_id = %student_id,
            academic_year = %academic_year,
            records_count = records.len(),
            "选课聚合完成"
        );
        Ok(records)
    }

    /// 聚合全系一个学年的选课记录 (批量评估用,一次取数)
    ///
    /// # 返回
    /// - HashMap<学号, Vec<EnrollmentRecord>>: 学生内部保持注册顺序
    pub async fn aggregate_department(
        &self,
        department_id: &str,
        academic_year: &str,
    ) -> EngineResult<HashMap<String, Vec<EnrollmentRecord>>> {
        validate_academic_year(academic_year)?;
        let rows = self
            .enrollments
            .get_enrollments_by_department(department_id, academic_year)
            .await?;

        let mut by_student: HashMap<String, Vec<EnrollmentRecord>> = HashMap::new();
        for (student_id, record) in rows {
            by_student.entry(student_id).or_default().push(record);
        }

        debug!(
            department_id = %department_id,
            academic_year = %academic_year,
            students_count = by_student.len(),
            "全系选课聚合完成"
        );
        Ok(by_student)
    }
}

/// 学年入参校验: 只要求非空,格式归存储层
fn validate_academic_year(academic_year: &str) -> EngineResult<()> {
    if academic_year.trim().is_empty() {
        return Err(EngineError::InvalidInput(
            "academic_year 不能为空".to_string(),
        ));
    }
    Ok(())
}
