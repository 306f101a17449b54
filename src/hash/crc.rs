//! CRC-32校验 - 查表法实现，多项式使用反射(LSB优先)位序
//!
//! 约定与 zlib / IEEE 802.3 相同：初值 `0xFFFF_FFFF`，结果再异或 `0xFFFF_FFFF`。
//! 下列常量均为反射形式，注释中给出常规(MSB优先)形式。

/// IEEE 802.3 (常规形式 0x04C11DB7)
pub const IEEE: u32 = 0xEDB8_8320;
/// Castagnoli, CRC-32C (常规形式 0x1EDC6F41)
pub const CASTAGNOLI: u32 = 0x82F6_3B78;
/// Koopman, CRC-32K (常规形式 0x741B8CD7)
pub const KOOPMAN: u32 = 0xEB31_D82E;
/// CRC-32Q (常规形式 0x814141AB)
pub const CRC32Q: u32 = 0xD582_8281;
/// CRC-32D (常规形式 0xA833982B)
pub const CRC32D: u32 = 0xD419_CC15;

const TABLE_SIZE: usize = 256;

/// 生成反射多项式对应的字节查找表
const fn make_table(poly: u32) -> [u32; TABLE_SIZE] {
    let mut table = [0u32; TABLE_SIZE];
    let mut i = 0;
    while i < TABLE_SIZE {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 == 1 { (crc >> 1) ^ poly } else { crc >> 1 };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// 检查反射形式的多项式是否为合法生成多项式：必须含 x^0 项。
/// 反射形式中 x^0 对应最高位，缺少该项的多项式可被 x 整除，会丢失输入的一位信息。
pub const fn is_valid_generator(reflected: u32) -> bool {
    reflected & 0x8000_0000 != 0
}

/// 单个多项式的CRC-32计算器
#[derive(Clone)]
pub struct Crc32 {
    polynomial: u32,
    table: [u32; TABLE_SIZE],
}

impl Crc32 {
    /// 以反射形式的多项式创建
    pub const fn new(reflected: u32) -> Self {
        Self {
            polynomial: reflected,
            table: make_table(reflected),
        }
    }

    /// 反射形式多项式
    pub fn polynomial(&self) -> u32 {
        self.polynomial
    }

    /// 常规(MSB优先)形式多项式
    pub fn normal_polynomial(&self) -> u32 {
        self.polynomial.reverse_bits()
    }

    /// 在已有校验值上继续累加数据
    pub fn update(&self, crc: u32, data: &[u8]) -> u32 {
        let mut crc = !crc;
        for &byte in data {
            crc = self.table[((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8);
        }
        !crc
    }

    /// 计算数据的校验值
    pub fn checksum(&self, data: &[u8]) -> u32 {
        self.update(0, data)
    }
}

impl std::fmt::Debug for Crc32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crc32")
            .field("polynomial", &format_args!("{:#010x}", self.polynomial))
            .finish()
    }
}
