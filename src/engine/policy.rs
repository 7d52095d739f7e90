// ==========================================
// 高校考勤系统 - Policy Resolver
// ==========================================
// 职责: 把系级升级策略解析为不可变的生效策略对象
// 红线: 无配置行不是错误 (默认策略); 系不存在才是 ConfigNotResolvable
// 红线: 默认值只来自 PromotionConfig::default_policy, 此处不得出现字面量
// ==========================================

use crate::domain::promotion::{EffectivePolicy, PromotionConfig};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::stores::{PolicyStore, StageDirectory};
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

// ==========================================
// PolicyResolver - 策略解析器
// ==========================================
pub struct PolicyResolver {
    policies: Arc<dyn PolicyStore>,
    stages: Arc<dyn StageDirectory>,
}

impl PolicyResolver {
    pub fn new(policies: Arc<dyn PolicyStore>, stages: Arc<dyn StageDirectory>) -> Self {
        Self { policies, stages }
    }

    /// 解析系的生效策略
    ///
    /// # 逻辑
    /// 1. 系不存在 → ConfigNotResolvable
    /// 2. 读取 promotion_config 行; 无则采用默认策略
    /// 3. 毕业年级 = 该系年级列表中 level 最大者;
    ///    年级元数据为空 → final_stage_level=None (毕业年级规则不适用)
    ///
    /// # 返回
    /// - Ok(EffectivePolicy): 不可变策略对象, 批量评估中可复用 (一批解析一次)
    pub async fn resolve(&self, department_id: &str) -> EngineResult<EffectivePolicy> {
        if !self.stages.department_exists(department_id).await? {
            return Err(EngineError::ConfigNotResolvable {
                department_id: department_id.to_string(),
            });
        }

        let config = match self.policies.get_promotion_config(department_id).await? {
            Some(config) => {
                debug!(department_id = %department_id, "采用系配置的升级策略");
                config
            }
            None => {
                // 正常路径: 该系未配置,走默认策略
                debug!(department_id = %department_id, "该系无策略配置, 采用默认策略");
                PromotionConfig::default_policy(department_id)
            }
        };

        let stages = self.stages.get_stages(department_id).await?;
        let final_stage_level = stages.iter().map(|s| s.level).max();

        debug!(
            department_id = %department_id,
            final_stage_level = ?final_stage_level,
            max_carry = config.max_carry_subjects,
            fail_threshold = config.fail_threshold_for_repeat,
            "策略解析完成"
        );

        Ok(EffectivePolicy {
            config,
            final_stage_level,
            resolved_at: Utc::now(),
        })
    }
}
