//! Benchmarks for normalization and intent detection.
//!
//! Run with: cargo bench -p viet-intent-text-processing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use viet_intent_core::IntentDefinition;
use viet_intent_text_processing::{normalize, IntentEngine};

const QUERIES: &[&str] = &[
    "Xin chào!",
    "chào bạn nhé",
    "cho tôi hai tô phở bò lúc 7 giờ tối",
    "giá bánh mì bao nhiêu",
    "thời tiết hôm nay đẹp quá",
];

/// Default intents plus `extra` synthetic ones
fn build_engine(extra: usize) -> IntentEngine {
    let engine = IntentEngine::with_default_intents();
    for i in 0..extra {
        engine
            .add_intent(
                IntentDefinition::new(
                    format!("synthetic_{}", i),
                    [format!("mẫu câu số {}", i), format!("câu hỏi thử {} nhé", i)],
                )
                .with_keywords([format!("từ{}", i)]),
            )
            .unwrap();
    }
    engine
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize", |b| {
        b.iter(|| {
            for query in QUERIES {
                black_box(normalize(black_box(query)));
            }
        });
    });
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect");

    for extra in [0, 100, 1_000] {
        let engine = build_engine(extra);
        group.bench_with_input(BenchmarkId::new("intents", engine.len()), &extra, |b, _| {
            b.iter(|| {
                for query in QUERIES {
                    black_box(engine.detect(black_box(query)));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_detect);
criterion_main!(benches);
