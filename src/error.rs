//! 统一错误处理 - 哈希表可能返回的全部错误类型

use crate::types::{Address, Key, StrategyKind};

/// 哈希表可能发生的错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// 构造时位宽不在 (0, 32] 区间内
    #[error("哈希位数必须满足 0 < bits <= 32 (实际: {bits})")]
    InvalidBits { bits: u32 },

    #[error("无效配置: {reason}")]
    InvalidConfig { reason: String },

    /// 插入失败：单哈希槽位被其他键占用，或Cuckoo踢出轮数耗尽。
    /// `key` 为最后一个未能放置的键，`address` 为最后计算出的地址。
    #[error(
        "插入时发生哈希冲突 ({strategy}): key={:#x}, hash={address:#x}",
        *.key as u32
    )]
    Collision {
        key: Key,
        address: Address,
        strategy: StrategyKind,
    },
}

impl TableError {
    /// 获取错误恢复建议
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidBits { .. } => Some("位宽取值范围为 1..=32"),
            Self::InvalidConfig { .. } => Some("检查配置参数"),
            Self::Collision {
                strategy: StrategyKind::Simple,
                ..
            } => Some("增加表容量或改用Cuckoo哈希"),
            Self::Collision {
                strategy: StrategyKind::Cuckoo,
                ..
            } => Some("增加表容量或提高最大踢出轮数"),
        }
    }

    /// 判断错误后哈希表是否仍可继续使用
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Collision { .. })
    }

    /// 是否为插入冲突
    pub fn is_collision(&self) -> bool {
        matches!(self, Self::Collision { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_message_uses_unsigned_hex() {
        let err = TableError::Collision {
            key: -1,
            address: 0x12,
            strategy: StrategyKind::Cuckoo,
        };
        let msg = err.to_string();
        assert!(msg.contains("key=0xffffffff"), "{msg}");
        assert!(msg.contains("hash=0x12"), "{msg}");
        assert!(err.is_collision());
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_invalid_bits_is_not_recoverable() {
        let err = TableError::InvalidBits { bits: 33 };
        assert!(!err.is_recoverable());
        assert!(!err.is_collision());
        assert!(err.to_string().contains("33"));
        assert!(err.recovery_suggestion().is_some());
    }
}
