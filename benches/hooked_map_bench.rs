use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use hooked_map::{HookedMap, Hooks};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

// Lightweight transforming hook set, to measure the per-call overhead of a
// non-trivial hook against the pass-through baseline.
struct Scaling;

impl Hooks<String, u64> for Scaling {
    fn pre_set(&self, _map: &HookedMap<String, u64, (), Self>, _key: &String, value: u64) -> u64 {
        value.wrapping_mul(2)
    }
    fn post_get(
        &self,
        _map: &HookedMap<String, u64, (), Self>,
        _key: &String,
        value: Option<u64>,
    ) -> Option<u64> {
        value.map(|v| v / 2)
    }
}

fn bench_set(c: &mut Criterion) {
    c.bench_function("hooked_map_set_10k", |b| {
        b.iter_batched(
            HookedMap::<String, u64>::new,
            |m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.set(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_set_suppressed(c: &mut Criterion) {
    c.bench_function("hooked_map_set_10k_without_hooks", |b| {
        b.iter_batched(
            HookedMap::<String, u64>::new,
            |m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.set_without_hooks(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("hooked_map_get_hit", |b| {
        let m: HookedMap<String, u64> = HookedMap::new();
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            m.set(k.clone(), i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k));
        })
    });
}

fn bench_get_hit_transforming(c: &mut Criterion) {
    c.bench_function("hooked_map_get_hit_transforming_hooks", |b| {
        let m: HookedMap<String, u64, (), Scaling> = HookedMap::with_hooks(Scaling);
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            m.set(k.clone(), i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k));
        })
    });
}

fn bench_clear(c: &mut Criterion) {
    c.bench_function("hooked_map_clear_1k", |b| {
        b.iter_batched(
            || {
                let m = HookedMap::<String, u64>::new();
                for (i, x) in lcg(3).take(1_000).enumerate() {
                    m.set(key(x), i as u64);
                }
                m
            },
            |m| {
                m.clear();
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_set, bench_set_suppressed, bench_get_hit, bench_get_hit_transforming, bench_clear
}
criterion_main!(benches);
