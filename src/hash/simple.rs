//! 单哈希策略 - 只使用第一个哈希函数，冲突时直接失败

use std::sync::Arc;

use crate::{
    error::TableError,
    hash::{functions::HashFunctionSet, strategy::CollisionStrategy},
    map::slots::SlotArray,
    stats::OperationStats,
    types::{Address, Key, OperationType, Slot, StrategyKind, Value},
};

/// 单哈希策略：键只能位于 `h0(key) & mask`
#[derive(Debug, Clone)]
pub struct SimpleStrategy {
    functions: Arc<HashFunctionSet>,
}

impl SimpleStrategy {
    /// 创建新单哈希策略，使用函数集中的第一个函数
    pub fn new(functions: Arc<HashFunctionSet>) -> Self {
        Self { functions }
    }

    #[inline]
    fn address(&self, key: Key, mask: u32) -> Address {
        self.functions.hash(0, key, mask)
    }
}

impl CollisionStrategy for SimpleStrategy {
    /// 槽位为空则写入；槽位中是同一个键则覆盖值；被其他键占用则返回冲突，不重试、不踢出。
    fn insert(
        &mut self,
        slots: &mut SlotArray,
        key: Key,
        value: Value,
        stats: &mut OperationStats,
    ) -> Result<(), TableError> {
        let address = self.address(key, slots.mask());
        match *slots.get(address) {
            Slot::Empty => {
                slots.store(address, key, value);
                stats.record(OperationType::Insert);
                Ok(())
            }
            Slot::Occupied { key: existing, .. } if existing == key => {
                slots.set_value(address, value);
                stats.record(OperationType::Update);
                Ok(())
            }
            Slot::Occupied { .. } => {
                stats.record(OperationType::Collision);
                log_debug!("simple insert collision: key={:#x}, hash={:#x}", key as u32, address);
                Err(TableError::Collision {
                    key,
                    address,
                    strategy: StrategyKind::Simple,
                })
            }
        }
    }

    /// 槽位为空与槽位被其他键占用都返回 `None`，两种情况不作区分。
    fn search(&self, slots: &SlotArray, key: Key) -> Option<Value> {
        slots.get(self.address(key, slots.mask())).value_for(key)
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Simple
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(bits: u32) -> (SimpleStrategy, SlotArray, OperationStats) {
        (
            SimpleStrategy::new(HashFunctionSet::standard()),
            SlotArray::new(bits).unwrap(),
            OperationStats::new(),
        )
    }

    #[test]
    fn test_insert_search_update() {
        let (mut strategy, mut slots, mut stats) = setup(8);

        assert_eq!(strategy.search(&slots, 0), None);
        strategy.insert(&mut slots, 0, 100, &mut stats).unwrap();
        assert_eq!(strategy.search(&slots, 0), Some(100));

        strategy.insert(&mut slots, 1, 200, &mut stats).unwrap();
        assert_eq!(strategy.search(&slots, 1), Some(200));

        strategy.insert(&mut slots, 0, 300, &mut stats).unwrap();
        assert_eq!(strategy.search(&slots, 0), Some(300));
        assert_eq!(slots.len(), 2);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.insert_count, 2);
        assert_eq!(snapshot.update_count, 1);
    }

    #[test]
    fn test_key_stored_at_first_hash() {
        let (mut strategy, mut slots, mut stats) = setup(8);
        strategy.insert(&mut slots, 0, 1, &mut stats).unwrap();
        // IEEE hash(0) = 0x2144DF1C
        assert_eq!(slots.get(0x1C).value_for(0), Some(1));
    }

    #[test]
    fn test_collision_120_284() {
        let (mut strategy, mut slots, mut stats) = setup(8);
        strategy.insert(&mut slots, 120, 120, &mut stats).unwrap();

        let err = strategy.insert(&mut slots, 284, 284, &mut stats).unwrap_err();
        assert_eq!(
            err,
            TableError::Collision {
                key: 284,
                address: 0x12,
                strategy: StrategyKind::Simple,
            }
        );
        assert_eq!(stats.snapshot().collision_count, 1);

        // 被其他键占用的地址查询为未找到，原键不受影响
        assert_eq!(strategy.search(&slots, 284), None);
        assert_eq!(strategy.search(&slots, 120), Some(120));
    }
}
