//! 诊断转储 - 已占用槽位的只读快照

use std::fmt;

use crate::types::{Address, Key, Value};

/// 一个已占用槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpEntry {
    pub address: Address,
    pub key: Key,
    pub value: Value,
}

/// 按地址升序排列的已占用槽位及其数量
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dump {
    pub entries: Vec<DumpEntry>,
}

impl Dump {
    /// 已占用槽位数
    pub fn occupied(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DumpEntry> + '_ {
        self.entries.iter()
    }
}

impl FromIterator<(Address, Key, Value)> for Dump {
    fn from_iter<I: IntoIterator<Item = (Address, Key, Value)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(address, key, value)| DumpEntry { address, key, value })
                .collect(),
        }
    }
}

/// 每个条目一行 `(地址)键->值`（十六进制，键值按无符号32位输出），末行为条目数
impl fmt::Display for Dump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(
                f,
                "({:x}){:x}->{:x}",
                entry.address, entry.key as u32, entry.value as u32
            )?;
        }
        writeln!(f, "{} elements", self.occupied())
    }
}
