//! 哈希模块 - CRC-32哈希函数集合与两种冲突解决策略

pub mod crc;
pub mod cuckoo;
pub mod functions;
pub mod simple;
pub mod strategy;

pub use cuckoo::{CuckooStrategy, MAX_EVICTIONS};
pub use functions::{encode_key, HashFunction, HashFunctionSet, STANDARD_POLYNOMIALS};
pub use simple::SimpleStrategy;
pub use strategy::{CollisionStrategy, Strategy};
