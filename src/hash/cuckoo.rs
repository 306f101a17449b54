//! Cuckoo哈希策略 - 多哈希函数探测，全部冲突时进行有界随机踢出
//!
//! 插入分两个阶段：
//! 1. 探测：按固定顺序计算每个函数的地址，任一候选槽位保存着同一个键则原地更新，
//!    否则写入第一个空槽位；
//! 2. 踢出：所有候选槽位都被其他键占用时，每轮随机选一个与上一轮不同的函数，
//!    把当前键值对写入该地址，原占用者成为下一轮待放置的键值对，直到遇到空槽位或轮数耗尽。
//!
//! 轮数耗尽时返回冲突错误，最后一个待放置的键丢失；踢出链上其余键都已重新放置，表保持可用。

use std::sync::Arc;

use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use crate::{
    error::TableError,
    hash::{functions::HashFunctionSet, strategy::CollisionStrategy},
    map::slots::SlotArray,
    stats::OperationStats,
    types::{Address, Key, OperationType, Slot, StrategyKind, Value},
};

/// 默认最大踢出轮数
pub const MAX_EVICTIONS: usize = 60;

/// Cuckoo哈希策略，随机源 `R` 由调用方注入
#[derive(Debug, Clone)]
pub struct CuckooStrategy<R = StdRng> {
    functions: Arc<HashFunctionSet>,
    rng: R,
    max_evictions: usize,
}

impl CuckooStrategy<StdRng> {
    /// 使用固定种子创建，踢出序列可复现
    pub fn with_seed(functions: Arc<HashFunctionSet>, seed: u64) -> Self {
        Self::with_rng(functions, StdRng::seed_from_u64(seed))
    }

    /// 使用系统熵作为种子创建
    pub fn from_entropy(functions: Arc<HashFunctionSet>) -> Self {
        Self::with_rng(functions, StdRng::from_entropy())
    }
}

impl<R: RngCore> CuckooStrategy<R> {
    /// 使用指定随机源创建
    pub fn with_rng(functions: Arc<HashFunctionSet>, rng: R) -> Self {
        Self {
            functions,
            rng,
            max_evictions: MAX_EVICTIONS,
        }
    }

    /// 设置最大踢出轮数
    pub fn with_max_evictions(mut self, max_evictions: usize) -> Self {
        self.max_evictions = max_evictions;
        self
    }

    pub fn max_evictions(&self) -> usize {
        self.max_evictions
    }

    pub fn functions(&self) -> &Arc<HashFunctionSet> {
        &self.functions
    }

    /// 在函数集中均匀随机选取一个不等于 `previous` 的下标，要求函数数不少于2
    fn pick_function(&mut self, previous: usize) -> usize {
        let pick = self.rng.gen_range(0..self.functions.len() - 1);
        if pick >= previous {
            pick + 1
        } else {
            pick
        }
    }

    /// 踢出阶段。进入时 `key` 的全部候选槽位均被其他键占用。
    fn evict(
        &mut self,
        slots: &mut SlotArray,
        mut key: Key,
        mut value: Value,
        stats: &mut OperationStats,
    ) -> Result<(), TableError> {
        let mask = slots.mask();

        // 单函数无法换用其他地址
        if self.functions.len() < 2 || self.max_evictions == 0 {
            stats.record(OperationType::Collision);
            return Err(TableError::Collision {
                key,
                address: self.functions.hash(0, key, mask),
                strategy: StrategyKind::Cuckoo,
            });
        }

        log_debug!("cuckoo eviction start: key={:#x}", key as u32);

        // 首轮排除下标0
        let mut previous = 0;
        let mut address: Address = 0;
        for round in 0..self.max_evictions {
            let index = self.pick_function(previous);
            previous = index;
            address = self.functions.hash(index, key, mask);

            match slots.swap(address, key, value) {
                None => {
                    stats.record(OperationType::Insert);
                    log_debug!(
                        "cuckoo eviction done: key={:#x} placed at {:#x} after {} rounds",
                        key as u32,
                        address,
                        round + 1
                    );
                    return Ok(());
                }
                Some((evicted_key, evicted_value)) => {
                    stats.record(OperationType::Kick);
                    key = evicted_key;
                    value = evicted_value;
                }
            }
        }

        stats.record(OperationType::Collision);
        log_warn!(
            "cuckoo eviction budget {} exhausted: key={:#x}, hash={:#x}",
            self.max_evictions,
            key as u32,
            address
        );
        Err(TableError::Collision {
            key,
            address,
            strategy: StrategyKind::Cuckoo,
        })
    }
}

impl<R: RngCore + SeedableRng> CuckooStrategy<R> {
    /// 重设随机源
    pub fn reseed(&mut self, seed: u64) {
        self.rng = R::seed_from_u64(seed);
    }
}

impl<R: RngCore> CollisionStrategy for CuckooStrategy<R> {
    fn insert(
        &mut self,
        slots: &mut SlotArray,
        key: Key,
        value: Value,
        stats: &mut OperationStats,
    ) -> Result<(), TableError> {
        let mask = slots.mask();
        // 键可能位于任一候选地址，包括排在空槽位之后的地址
        let mut first_empty = None;
        for address in self.functions.addresses(key, mask) {
            match *slots.get(address) {
                Slot::Empty => {
                    first_empty.get_or_insert(address);
                }
                Slot::Occupied { key: existing, .. } if existing == key => {
                    slots.set_value(address, value);
                    stats.record(OperationType::Update);
                    return Ok(());
                }
                Slot::Occupied { .. } => {}
            }
        }

        match first_empty {
            Some(address) => {
                slots.store(address, key, value);
                stats.record(OperationType::Insert);
                Ok(())
            }
            None => self.evict(slots, key, value, stats),
        }
    }

    /// 按固定顺序探测全部函数，代价与负载因子无关
    fn search(&self, slots: &SlotArray, key: Key) -> Option<Value> {
        let mask = slots.mask();
        self.functions
            .addresses(key, mask)
            .find_map(|address| slots.get(address).value_for(key))
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Cuckoo
    }
}
