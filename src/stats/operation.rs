// src/stats/operation.rs
//! 操作统计 - 跟踪哈希表操作次数

use std::fmt::Write;

use crate::types::OperationType;

/// 操作统计快照
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OperationStatsSnapshot {
    pub insert_count: u64,
    pub update_count: u64,
    pub search_count: u64,
    pub hit_count: u64,
    pub kick_count: u64,
    pub collision_count: u64,
}

impl OperationStatsSnapshot {
    /// 以冲突告终的写入占全部写入尝试的比例
    pub fn collision_rate(&self) -> f32 {
        let attempts = self.insert_count + self.update_count + self.collision_count;
        if attempts == 0 {
            0.0
        } else {
            self.collision_count as f32 / attempts as f32
        }
    }

    /// 查询命中率
    pub fn hit_rate(&self) -> f32 {
        if self.search_count == 0 {
            0.0
        } else {
            self.hit_count as f32 / self.search_count as f32
        }
    }

    /// 导出Prometheus文本格式指标
    pub fn export_prometheus(&self, prefix: &str) -> String {
        let mut output = String::new();
        for (name, value) in [
            ("insert_count", self.insert_count),
            ("update_count", self.update_count),
            ("search_count", self.search_count),
            ("hit_count", self.hit_count),
            ("kick_count", self.kick_count),
            ("collision_count", self.collision_count),
        ] {
            let _ = writeln!(output, "# TYPE {prefix}_{name} counter");
            let _ = writeln!(output, "{prefix}_{name} {value}");
        }
        output
    }
}

/// 单线程操作计数器，由所属哈希表独占
#[derive(Debug, Default, Clone)]
pub struct OperationStats {
    counters: OperationStatsSnapshot,
}

impl OperationStats {
    /// 创建新统计
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次操作
    #[inline]
    pub fn record(&mut self, op_type: OperationType) {
        let counter = match op_type {
            OperationType::Insert => &mut self.counters.insert_count,
            OperationType::Update => &mut self.counters.update_count,
            OperationType::Search => &mut self.counters.search_count,
            OperationType::Hit => &mut self.counters.hit_count,
            OperationType::Kick => &mut self.counters.kick_count,
            OperationType::Collision => &mut self.counters.collision_count,
        };
        *counter += 1;
    }

    /// 获取统计快照
    pub fn snapshot(&self) -> OperationStatsSnapshot {
        self.counters
    }

    /// 重置统计
    pub fn reset(&mut self) {
        self.counters = OperationStatsSnapshot::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_reset() {
        let mut stats = OperationStats::new();
        stats.record(OperationType::Insert);
        stats.record(OperationType::Insert);
        stats.record(OperationType::Kick);
        stats.record(OperationType::Collision);
        stats.record(OperationType::Search);
        stats.record(OperationType::Hit);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.insert_count, 2);
        assert_eq!(snapshot.kick_count, 1);
        assert_eq!(snapshot.collision_count, 1);
        assert!((snapshot.collision_rate() - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(snapshot.hit_rate(), 1.0);

        stats.reset();
        assert_eq!(stats.snapshot(), OperationStatsSnapshot::default());
    }

    #[test]
    fn test_empty_rates() {
        let snapshot = OperationStatsSnapshot::default();
        assert_eq!(snapshot.collision_rate(), 0.0);
        assert_eq!(snapshot.hit_rate(), 0.0);
    }

    #[test]
    fn test_export_prometheus() {
        let mut stats = OperationStats::new();
        stats.record(OperationType::Kick);
        let metrics = stats.snapshot().export_prometheus("cuckoo_table");
        assert!(metrics.contains("cuckoo_table_kick_count 1"));
        assert!(metrics.contains("# TYPE cuckoo_table_insert_count counter"));
    }
}
