// ==========================================
// 列车入段排位系统 - 可行性判定纯函数库
// ==========================================
// 依据: 入段排位规则 - 硬性准入
// 职责: 判定列车能否进入某角色的股道
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::slot::SlotRecord;
use crate::domain::train::TrainRecord;
use crate::domain::types::SlotRole;

// ==========================================
// FeasibilityEvaluator - 纯函数工具类
// ==========================================
pub struct FeasibilityEvaluator;

impl FeasibilityEvaluator {
    /// 判定列车与股道角色是否可行
    ///
    /// # 规则
    /// 1. 作业卡/证书/保洁任一缺失 → 不可行 (保守默认)
    /// 2. Service: 扣车 → 不可行
    /// 3. Service: 任一证书无效 → 不可行
    /// 4. Service: 保洁未完成 → 不可行
    /// 5. 其他角色 (Standby / IBL / 未知) → 可行
    pub fn is_feasible(train: &TrainRecord, role: &SlotRole) -> bool {
        if !train.has_readiness_data() {
            return false;
        }

        if !role.is_service() {
            return true;
        }

        !train.is_blocked() && train.certificates_valid() && train.cleaning_done()
    }

    /// 按原始角色字符串判定 (大小写不敏感)
    pub fn is_feasible_for_role(train: &TrainRecord, raw_role: &str) -> bool {
        Self::is_feasible(train, &SlotRole::parse(raw_role))
    }

    /// 判定列车与股道是否可行
    pub fn is_pair_feasible(train: &TrainRecord, slot: &SlotRecord) -> bool {
        Self::is_feasible(train, &slot.role)
    }
}
