//! 哈希表核心模块 - 存储、诊断转储与对外的表接口

pub mod dump;
pub mod slots;
pub mod table;

pub use dump::{Dump, DumpEntry};
pub use slots::{SlotArray, MAX_BITS};
pub use table::{HashTable, TableConfig};
