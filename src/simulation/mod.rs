//! 蒙特卡洛模拟 - 估计碰撞概率与元素数量（负载因子）的关系
//!
//! 对每个采样的元素数 n，重复 `trials` 次：清空表，插入 n 个均匀随机键，
//! 只要有一次插入返回冲突错误就记该次试验为碰撞。碰撞试验占比即为该 n 下的碰撞概率。

pub mod runner;
pub mod schedule;

use std::{collections::BTreeMap, fmt};

pub use runner::Simulator;
pub use schedule::StepSchedule;

use crate::{error::TableError, hash::MAX_EVICTIONS, map::MAX_BITS, types::StrategyKind};

/// 默认试验次数，95%置信区间下精度约为 ±0.01
pub const DEFAULT_TRIALS: usize = 10_000;

/// 模拟配置
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub bits: u32,
    pub strategy: StrategyKind,
    pub trials: usize,
    /// 固定种子时结果可复现，`None` 时取系统熵
    pub seed: Option<u64>,
    /// 概率超过该值后细化步长
    pub refine_threshold: f32,
    /// 概率超过该值后停止扫描
    pub stop_threshold: f32,
    pub max_evictions: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            bits: 10,
            strategy: StrategyKind::Cuckoo,
            trials: DEFAULT_TRIALS,
            seed: None,
            refine_threshold: 0.05,
            stop_threshold: 0.99,
            max_evictions: MAX_EVICTIONS,
        }
    }
}

impl SimulationConfig {
    pub fn new(bits: u32, strategy: StrategyKind) -> Self {
        Self {
            bits,
            strategy,
            ..Self::default()
        }
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 检查配置参数
    pub fn validate(&self) -> Result<(), TableError> {
        if self.bits == 0 || self.bits > MAX_BITS {
            return Err(TableError::InvalidBits { bits: self.bits });
        }
        if self.trials == 0 {
            return Err(TableError::InvalidConfig {
                reason: "试验次数必须大于0".into(),
            });
        }
        let in_unit = |p: f32| (0.0..=1.0).contains(&p);
        if !in_unit(self.refine_threshold) || !in_unit(self.stop_threshold) {
            return Err(TableError::InvalidConfig {
                reason: format!(
                    "概率阈值必须位于 [0, 1] (refine={}, stop={})",
                    self.refine_threshold, self.stop_threshold
                ),
            });
        }
        if self.refine_threshold > self.stop_threshold {
            return Err(TableError::InvalidConfig {
                reason: "细化阈值不能大于停止阈值".into(),
            });
        }
        Ok(())
    }
}

/// 模拟结果：元素数 -> 碰撞概率，按元素数升序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationReport {
    points: BTreeMap<usize, f32>,
}

impl SimulationReport {
    pub fn record(&mut self, elements: usize, probability: f32) {
        self.points.insert(elements, probability);
    }

    pub fn get(&self, elements: usize) -> Option<f32> {
        self.points.get(&elements).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 按元素数升序遍历
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.points.iter().map(|(&n, &p)| (n, p))
    }
}

/// 每行 `<元素数> <概率>`，概率保留6位小数
impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (elements, probability) in self.iter() {
            writeln!(f, "{elements} {probability:.6}")?;
        }
        Ok(())
    }
}
