//! 采样步长 - 概率较低时大步前进，超过阈值后细化一次

use crate::types::StrategyKind;

/// 元素数采样进度
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSchedule {
    step: usize,
    refined: bool,
}

impl StepSchedule {
    /// 起始元素数
    pub const START: usize = 2;

    /// 初始步长：Cuckoo在 bits >= 8 时为 2^(bits-5)，否则为1；单哈希为 2^bits / 500 + 1
    pub fn new(bits: u32, strategy: StrategyKind) -> Self {
        let step = match strategy {
            StrategyKind::Cuckoo if bits >= 8 => 1usize << (bits - 5),
            StrategyKind::Cuckoo => 1,
            StrategyKind::Simple => (1usize << bits) / 500 + 1,
        };
        Self {
            step,
            refined: false,
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn is_refined(&self) -> bool {
        self.refined
    }

    /// 首次观测到概率超过阈值时把步长缩为 step / 5 + 1
    pub fn observe(&mut self, probability: f32, refine_threshold: f32) {
        if !self.refined && probability > refine_threshold {
            self.step = self.step / 5 + 1;
            self.refined = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_steps() {
        assert_eq!(StepSchedule::new(14, StrategyKind::Cuckoo).step(), 512);
        assert_eq!(StepSchedule::new(8, StrategyKind::Cuckoo).step(), 8);
        assert_eq!(StepSchedule::new(7, StrategyKind::Cuckoo).step(), 1);
        assert_eq!(StepSchedule::new(16, StrategyKind::Simple).step(), 132);
        assert_eq!(StepSchedule::new(4, StrategyKind::Simple).step(), 1);
    }

    #[test]
    fn test_refines_once() {
        let mut schedule = StepSchedule::new(14, StrategyKind::Cuckoo);
        schedule.observe(0.01, 0.05);
        assert_eq!(schedule.step(), 512);
        schedule.observe(0.2, 0.05);
        assert_eq!(schedule.step(), 103);
        assert!(schedule.is_refined());
        schedule.observe(0.5, 0.05);
        assert_eq!(schedule.step(), 103);
    }
}
