//! 哈希函数集合 - 一组有序、不可变的CRC-32哈希函数
//!
//! 每个函数将键按大端序编码为4字节，用各自的多项式计算CRC-32，再与掩码相与得到槽位地址。
//! 顺序是契约的一部分：Cuckoo探测与踢出按此顺序索引，第一个函数同时供单哈希策略使用。

use std::{fmt, sync::Arc};

use once_cell::sync::Lazy;

use crate::{
    error::TableError,
    hash::crc::{self, Crc32},
    types::{Address, Key},
};

/// 标准函数集使用的多项式（反射形式），按探测顺序排列
pub const STANDARD_POLYNOMIALS: [(&str, u32); 5] = [
    ("ieee", crc::IEEE),
    ("castagnoli", crc::CASTAGNOLI),
    ("koopman", crc::KOOPMAN),
    ("crc32q", crc::CRC32Q),
    ("crc32d", crc::CRC32D),
];

/// 全局共享的标准函数集，只构建一次
static STANDARD_SET: Lazy<Arc<HashFunctionSet>> = Lazy::new(|| {
    Arc::new(HashFunctionSet {
        functions: STANDARD_POLYNOMIALS
            .iter()
            .map(|&(name, poly)| HashFunction::new(name, poly))
            .collect(),
    })
});

/// 键的字节编码（大端序）
#[inline]
pub fn encode_key(key: Key) -> [u8; 4] {
    key.to_be_bytes()
}

/// 单个哈希函数
#[derive(Clone)]
pub struct HashFunction {
    name: &'static str,
    crc: Crc32,
}

impl HashFunction {
    fn new(name: &'static str, reflected: u32) -> Self {
        Self {
            name,
            crc: Crc32::new(reflected),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 反射形式多项式
    pub fn polynomial(&self) -> u32 {
        self.crc.polynomial()
    }

    /// 未截断的32位哈希值
    #[inline]
    pub fn raw(&self, key: Key) -> u32 {
        self.crc.checksum(&encode_key(key))
    }

    /// 截断到掩码范围内的地址
    #[inline]
    pub fn address(&self, key: Key, mask: u32) -> Address {
        self.raw(key) & mask
    }
}

impl fmt::Debug for HashFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:#010x})", self.name, self.polynomial())
    }
}

/// 有序、不可变的哈希函数集合
#[derive(Debug, Clone)]
pub struct HashFunctionSet {
    functions: Vec<HashFunction>,
}

impl HashFunctionSet {
    /// 用自定义多项式创建函数集。
    ///
    /// 多项式为反射形式，必须非空、两两不同，且都是合法的生成多项式。
    pub fn new(polynomials: &[(&'static str, u32)]) -> Result<Self, TableError> {
        if polynomials.is_empty() {
            return Err(TableError::InvalidConfig {
                reason: "哈希函数集不能为空".into(),
            });
        }
        for (i, &(name, poly)) in polynomials.iter().enumerate() {
            if !crc::is_valid_generator(poly) {
                return Err(TableError::InvalidConfig {
                    reason: format!("多项式 {name} ({poly:#010x}) 缺少 x^0 项"),
                });
            }
            if polynomials[..i].iter().any(|&(_, p)| p == poly) {
                return Err(TableError::InvalidConfig {
                    reason: format!("多项式 {name} ({poly:#010x}) 重复"),
                });
            }
        }

        Ok(Self {
            functions: polynomials
                .iter()
                .map(|&(name, poly)| HashFunction::new(name, poly))
                .collect(),
        })
    }

    /// 标准的5函数集合（共享实例）
    pub fn standard() -> Arc<Self> {
        Arc::clone(&STANDARD_SET)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HashFunction> {
        self.functions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HashFunction> + '_ {
        self.functions.iter()
    }

    /// 第 `index` 个函数计算的地址。`index` 越界属于调用方的契约错误。
    #[inline]
    pub fn hash(&self, index: usize, key: Key, mask: u32) -> Address {
        self.functions[index].address(key, mask)
    }

    /// 按固定顺序给出键在每个函数下的地址
    pub fn addresses(&self, key: Key, mask: u32) -> impl Iterator<Item = Address> + '_ {
        self.functions.iter().map(move |f| f.address(key, mask))
    }
}
