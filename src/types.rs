//! 核心类型定义 - 共享类型和接口

use std::fmt;

/// 键类型：32位有符号整数，同时作为哈希输入
pub type Key = i32;

/// 值类型：与键关联的32位有符号整数
pub type Value = i32;

/// 槽位地址，取值范围 [0, 2^bits)
pub type Address = u32;

/// 冲突解决策略类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrategyKind {
    /// 单哈希开放寻址，不做踢出
    Simple,
    /// 多哈希Cuckoo，带有界随机踢出
    #[default]
    Cuckoo,
}

impl StrategyKind {
    /// 由运行时标志选择策略
    pub fn from_cuckoo_flag(cuckoo: bool) -> Self {
        if cuckoo {
            Self::Cuckoo
        } else {
            Self::Simple
        }
    }

    /// 转换为字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Cuckoo => "cuckoo",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 槽位：空，或保存一个键值对
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slot {
    #[default]
    Empty,
    Occupied { key: Key, value: Value },
}

impl Slot {
    /// 检查是否为空槽位
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// 槽位中的键（空槽位返回 None）
    pub fn key(&self) -> Option<Key> {
        match *self {
            Self::Occupied { key, .. } => Some(key),
            Self::Empty => None,
        }
    }

    /// 仅当槽位保存的正是 `key` 时返回其值
    pub fn value_for(&self, key: Key) -> Option<Value> {
        match *self {
            Self::Occupied { key: k, value } if k == key => Some(value),
            _ => None,
        }
    }
}

/// 操作类型，用于统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// 新键写入空槽位
    Insert,
    /// 已有键的值被覆盖
    Update,
    /// 查询
    Search,
    /// 查询命中
    Hit,
    /// 踢出一次已有条目
    Kick,
    /// 插入以冲突告终
    Collision,
}
