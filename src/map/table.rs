//! 哈希表核心实现 - 槽位数组加构造时选定的冲突解决策略

use std::sync::Arc;

use crate::{
    error::TableError,
    hash::{
        cuckoo::MAX_EVICTIONS,
        functions::HashFunctionSet,
        strategy::{CollisionStrategy, Strategy},
    },
    map::{dump::Dump, slots::SlotArray},
    stats::{OperationStats, OperationStatsSnapshot},
    types::{Key, OperationType, StrategyKind, Value},
};

/// 哈希表配置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableConfig {
    /// 表大小为 2^bits
    pub bits: u32,
    pub strategy: StrategyKind,
    /// Cuckoo策略的最大踢出轮数
    pub max_evictions: usize,
    /// Cuckoo随机源种子，`None` 时取系统熵
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            bits: 10,
            strategy: StrategyKind::Cuckoo,
            max_evictions: MAX_EVICTIONS,
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn new(bits: u32, strategy: StrategyKind) -> Self {
        Self {
            bits,
            strategy,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_evictions(mut self, max_evictions: usize) -> Self {
        self.max_evictions = max_evictions;
        self
    }
}

/// 固定容量的32位整数哈希表
#[derive(Debug, Clone)]
pub struct HashTable {
    slots: SlotArray,
    strategy: Strategy,
    functions: Arc<HashFunctionSet>,
    stats: OperationStats,
}

impl HashTable {
    /// 创建 2^bits 个槽位的空表，`bits` 不在 (0, 32] 内时失败
    pub fn new(bits: u32, strategy: StrategyKind) -> Result<Self, TableError> {
        Self::with_config(TableConfig::new(bits, strategy))
    }

    /// 按配置创建，使用标准哈希函数集
    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        Self::with_functions(config, HashFunctionSet::standard())
    }

    /// 按配置和指定哈希函数集创建
    pub fn with_functions(
        config: TableConfig,
        functions: Arc<HashFunctionSet>,
    ) -> Result<Self, TableError> {
        let slots = SlotArray::new(config.bits)?;
        let strategy = Strategy::new(
            config.strategy,
            Arc::clone(&functions),
            config.max_evictions,
            config.seed,
        );
        log_debug!(
            "hash table created: bits={}, capacity={}, strategy={}",
            config.bits,
            slots.capacity(),
            config.strategy
        );

        Ok(Self {
            slots,
            strategy,
            functions,
            stats: OperationStats::new(),
        })
    }

    /// 插入或更新键值对，策略无法放置时返回冲突错误
    pub fn insert(&mut self, key: Key, value: Value) -> Result<(), TableError> {
        self.strategy
            .insert(&mut self.slots, key, value, &mut self.stats)
    }

    /// 查询键对应的值并记录统计
    pub fn search(&mut self, key: Key) -> Option<Value> {
        self.stats.record(OperationType::Search);
        let found = self.strategy.search(&self.slots, key);
        if found.is_some() {
            self.stats.record(OperationType::Hit);
        }
        found
    }

    /// 查询键对应的值，不记录统计
    pub fn get(&self, key: Key) -> Option<Value> {
        self.strategy.search(&self.slots, key)
    }

    /// 清空全部槽位
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// 已占用槽位的诊断快照
    pub fn dump(&self) -> Dump {
        self.slots.iter_occupied().collect()
    }

    /// 重设Cuckoo随机源种子
    pub fn reseed(&mut self, seed: u64) {
        self.strategy.reseed(seed);
    }

    pub fn bits(&self) -> u32 {
        self.slots.bits()
    }

    pub fn mask(&self) -> u32 {
        self.slots.mask()
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// 已占用槽位数
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn load_factor(&self) -> f32 {
        self.len() as f32 / self.capacity() as f32
    }

    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn hash_functions(&self) -> &Arc<HashFunctionSet> {
        &self.functions
    }

    pub fn stats(&self) -> OperationStatsSnapshot {
        self.stats.snapshot()
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }
}
