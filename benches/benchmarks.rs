//! 哈希表性能基准测试

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};

use cuckoo_hashing::{
    HashFunctionSet, HashTable, SimulationConfig, Simulator, StrategyKind, TableConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

// 基准测试配置
const SEED: u64 = 42;
const BITS: u32 = 16;
const LOAD_FACTORS: [f32; 3] = [0.1, 0.25, 0.45];
const STRATEGIES: [StrategyKind; 2] = [StrategyKind::Simple, StrategyKind::Cuckoo];

/// 生成随机键（值与键相同）
fn generate_keys(count: usize) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..count).map(|_| rng.gen::<u32>() as i32).collect()
}

fn new_table(kind: StrategyKind) -> HashTable {
    HashTable::with_config(TableConfig::new(BITS, kind).with_seed(SEED)).unwrap()
}

fn keys_for_load(load: f32) -> Vec<i32> {
    generate_keys(((1usize << BITS) as f32 * load) as usize)
}

/// CRC地址计算基准测试
fn bench_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("Hash");
    let functions = HashFunctionSet::standard();
    let keys = generate_keys(10_000);
    let mask = (1u32 << BITS) - 1;

    group.throughput(Throughput::Elements(keys.len() as u64));
    for (index, function) in functions.iter().enumerate() {
        group.bench_with_input(BenchmarkId::from_parameter(function.name()), &keys, |b, keys| {
            b.iter(|| {
                for &key in keys {
                    black_box(functions.hash(index, key, mask));
                }
            });
        });
    }
    group.finish();
}

/// 插入操作基准测试，单哈希的冲突失败同样计入耗时
fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("Insert");

    for &load in LOAD_FACTORS.iter() {
        let keys = keys_for_load(load);
        group.throughput(Throughput::Elements(keys.len() as u64));

        for kind in STRATEGIES {
            group.bench_with_input(BenchmarkId::new(kind.as_str(), load), &keys, |b, keys| {
                b.iter_batched(
                    || new_table(kind),
                    |mut table| {
                        for &key in keys {
                            let _ = black_box(table.insert(key, key));
                        }
                    },
                    BatchSize::LargeInput,
                );
            });
        }
    }
    group.finish();
}

/// 查询操作基准测试
fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Search");

    for &load in LOAD_FACTORS.iter() {
        let keys = keys_for_load(load);
        group.throughput(Throughput::Elements(keys.len() as u64));

        for kind in STRATEGIES {
            // 预填充哈希表
            let mut table = new_table(kind);
            for &key in &keys {
                let _ = table.insert(key, key);
            }

            group.bench_with_input(BenchmarkId::new(kind.as_str(), load), &keys, |b, keys| {
                b.iter(|| {
                    for &key in keys {
                        black_box(table.get(key));
                    }
                });
            });
        }
    }
    group.finish();
}

/// 单个模拟点的耗时
fn bench_simulation_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("Simulation");
    let bits = 10;

    for kind in STRATEGIES {
        let simulator = Simulator::new(
            SimulationConfig::new(bits, kind)
                .with_trials(1_000)
                .with_seed(SEED),
        )
        .unwrap();
        let template = HashTable::new(bits, kind).unwrap();

        group.bench_function(BenchmarkId::from_parameter(kind.as_str()), |b| {
            b.iter(|| black_box(simulator.measure(&template, 256)));
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(5))
        .noise_threshold(0.05);
    targets =
        bench_hash,
        bench_insert,
        bench_search,
        bench_simulation_point
);
criterion_main!(benches);
