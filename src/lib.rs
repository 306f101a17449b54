//! 固定容量的32位整数哈希表
//!
//! 支持两种冲突解决方式：
//! - 单哈希：只用第一个哈希函数，目标槽位被其他键占用即返回冲突；
//! - Cuckoo哈希：5个基于不同CRC-32多项式的哈希函数，全部冲突时做有界随机踢出。
//!
//! 另附蒙特卡洛模拟器，用于估计碰撞概率与负载因子的关系。
//!
//! ## 快速开始
//!
//! ```rust
//! use cuckoo_hashing::*;
//!
//! fn main() -> Result<(), TableError> {
//!     // 2^14 个槽位的Cuckoo哈希表，固定种子使踢出序列可复现
//!     let mut table = HashTable::with_config(
//!         TableConfig::new(14, StrategyKind::Cuckoo).with_seed(7),
//!     )?;
//!
//!     table.insert(120, 1)?;
//!     table.insert(284, 2)?;
//!     assert_eq!(table.search(284), Some(2));
//!
//!     // 打印已占用槽位
//!     print!("{}", table.dump());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

#[cfg(feature = "logging")]
#[doc(hidden)]
pub use log as __log;

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::__log::debug!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::__log::info!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::__log::warn!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::__log::error!($($arg)*)
    };
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {};
}

// 核心模块导出
pub mod error;
pub mod hash;
pub mod map;
pub mod simulation;
pub mod stats;
pub mod types;

// 公共接口导出
pub use crate::{
    error::TableError,
    hash::{
        CollisionStrategy, CuckooStrategy, HashFunction, HashFunctionSet, SimpleStrategy,
        MAX_EVICTIONS,
    },
    map::{Dump, DumpEntry, HashTable, TableConfig},
    simulation::{SimulationConfig, SimulationReport, Simulator, DEFAULT_TRIALS},
    stats::OperationStatsSnapshot,
    types::{Address, Key, Slot, StrategyKind, Value},
};

/// 由位宽与模式标志创建哈希表
pub fn create(bits: u32, cuckoo: bool) -> Result<HashTable, TableError> {
    HashTable::new(bits, StrategyKind::from_cuckoo_flag(cuckoo))
}

/// 批量插入，返回成功条数
pub fn batch_insert(table: &mut HashTable, items: impl IntoIterator<Item = (Key, Value)>) -> usize {
    items
        .into_iter()
        .filter(|&(key, value)| table.insert(key, value).is_ok())
        .count()
}
