//! 冲突解决策略 - 定义插入/查询接口及两种实现的静态分发

use std::sync::Arc;

use crate::{
    error::TableError,
    hash::{cuckoo::CuckooStrategy, functions::HashFunctionSet, simple::SimpleStrategy},
    map::slots::SlotArray,
    stats::OperationStats,
    types::{Key, StrategyKind, Value},
};

/// 冲突解决策略特征
///
/// 策略不拥有存储：每次调用都针对调用方传入的槽位数组读写。
pub trait CollisionStrategy {
    /// 插入或更新键值对
    fn insert(
        &mut self,
        slots: &mut SlotArray,
        key: Key,
        value: Value,
        stats: &mut OperationStats,
    ) -> Result<(), TableError>;

    /// 查询键对应的值
    fn search(&self, slots: &SlotArray, key: Key) -> Option<Value>;

    /// 获取策略类型
    fn kind(&self) -> StrategyKind;
}

/// 构造时选定的策略
#[derive(Debug, Clone)]
pub enum Strategy {
    Simple(SimpleStrategy),
    Cuckoo(CuckooStrategy),
}

impl Strategy {
    /// 按类型创建策略；Cuckoo策略的随机源由 `seed` 决定，`None` 时取系统熵
    pub fn new(
        kind: StrategyKind,
        functions: Arc<HashFunctionSet>,
        max_evictions: usize,
        seed: Option<u64>,
    ) -> Self {
        match kind {
            StrategyKind::Simple => Self::Simple(SimpleStrategy::new(functions)),
            StrategyKind::Cuckoo => {
                let strategy = match seed {
                    Some(seed) => CuckooStrategy::with_seed(functions, seed),
                    None => CuckooStrategy::from_entropy(functions),
                };
                Self::Cuckoo(strategy.with_max_evictions(max_evictions))
            }
        }
    }

    /// 重设随机源种子，单哈希策略忽略
    pub fn reseed(&mut self, seed: u64) {
        if let Self::Cuckoo(strategy) = self {
            strategy.reseed(seed);
        }
    }

    fn as_dyn(&self) -> &dyn CollisionStrategy {
        match self {
            Self::Simple(s) => s,
            Self::Cuckoo(s) => s,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn CollisionStrategy {
        match self {
            Self::Simple(s) => s,
            Self::Cuckoo(s) => s,
        }
    }
}

impl CollisionStrategy for Strategy {
    fn insert(
        &mut self,
        slots: &mut SlotArray,
        key: Key,
        value: Value,
        stats: &mut OperationStats,
    ) -> Result<(), TableError> {
        self.as_dyn_mut().insert(slots, key, value, stats)
    }

    fn search(&self, slots: &SlotArray, key: Key) -> Option<Value> {
        self.as_dyn().search(slots, key)
    }

    fn kind(&self) -> StrategyKind {
        self.as_dyn().kind()
    }
}
