//! 槽位数组 - 固定大小 2^bits 的存储，各策略共享

use crate::{
    error::TableError,
    types::{Address, Key, Slot, Value},
};

/// 最大位宽
pub const MAX_BITS: u32 = 32;

/// 固定容量的槽位数组
#[derive(Debug, Clone)]
pub struct SlotArray {
    slots: Vec<Slot>,
    bits: u32,
    mask: u32,
    occupied: usize,
}

impl SlotArray {
    /// 分配 2^bits 个空槽位，`bits` 必须满足 0 < bits <= 32
    pub fn new(bits: u32) -> Result<Self, TableError> {
        if bits == 0 || bits > MAX_BITS {
            return Err(TableError::InvalidBits { bits });
        }
        let size = usize::try_from(1u64 << bits).map_err(|_| TableError::InvalidConfig {
            reason: format!("2^{bits} 个槽位超出本平台地址空间"),
        })?;

        Ok(Self {
            slots: vec![Slot::Empty; size],
            bits,
            mask: u32::MAX >> (MAX_BITS - bits),
            occupied: 0,
        })
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// 地址掩码 2^bits - 1
    pub fn mask(&self) -> u32 {
        self.mask
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// 已占用槽位数
    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    #[inline]
    pub fn get(&self, address: Address) -> &Slot {
        &self.slots[address as usize]
    }

    /// 写入键值对并标记占用
    pub fn store(&mut self, address: Address, key: Key, value: Value) {
        let slot = &mut self.slots[address as usize];
        if slot.is_empty() {
            self.occupied += 1;
        }
        *slot = Slot::Occupied { key, value };
    }

    /// 原地覆盖已占用槽位的值；空槽位不受影响
    pub fn set_value(&mut self, address: Address, new_value: Value) {
        if let Slot::Occupied { value, .. } = &mut self.slots[address as usize] {
            *value = new_value;
        }
    }

    /// 写入键值对，返回被替换出来的原条目
    pub fn swap(&mut self, address: Address, key: Key, value: Value) -> Option<(Key, Value)> {
        let previous = std::mem::replace(
            &mut self.slots[address as usize],
            Slot::Occupied { key, value },
        );
        match previous {
            Slot::Occupied { key, value } => Some((key, value)),
            Slot::Empty => {
                self.occupied += 1;
                None
            }
        }
    }

    /// 所有槽位置空
    pub fn clear(&mut self) {
        self.slots.fill(Slot::Empty);
        self.occupied = 0;
    }

    /// 按地址升序遍历已占用槽位
    pub fn iter_occupied(&self) -> impl Iterator<Item = (Address, Key, Value)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(address, slot)| match *slot {
                Slot::Occupied { key, value } => Some((address as Address, key, value)),
                Slot::Empty => None,
            })
    }
}
