use calcpro::{Context, Evaluator};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use evalexpr::*;

/// Benchmark simple arithmetic formulas
fn benchmark_simple_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Simple arithmetic Formula Evaluation");

    let mut evaluator = Evaluator::new(100);
    let mut uncached = Evaluator::new(0);
    let context = Context::new();

    let formula = "ADD(2, MULTIPLY(3, 4))";
    let infix = "2 + 3 * 4";
    let parsed = evaluator.parse_expression(formula).unwrap();
    let precompiled_evalexpr = build_operator_tree::<DefaultNumericTypes>(infix).unwrap();

    group.bench_function("parse_and_evaluate", |b| {
        b.iter(|| uncached.evaluate_expression(black_box(formula), black_box(&context)))
    });

    group.bench_function("cached_parse_and_evaluate", |b| {
        b.iter(|| evaluator.evaluate_expression(black_box(formula), black_box(&context)))
    });

    group.bench_function("preparsed_evaluate", |b| {
        b.iter(|| parsed.evaluate(black_box(&context)))
    });

    group.bench_function("native_rust_arithmetic", |b| {
        b.iter(|| black_box(2.0 + 3.0 * 4.0))
    });

    group.bench_function("meval_arithmetic", |b| {
        b.iter(|| meval::eval_str(black_box(infix)).unwrap())
    });

    group.bench_function("evalexpr_arithmetic", |b| {
        b.iter(|| evalexpr::eval(black_box(infix)).unwrap())
    });

    group.bench_function("precompiled_evalexpr_arithmetic", |b| {
        b.iter(|| precompiled_evalexpr.eval().unwrap())
    });
}

/// Benchmark formulas that read variables
fn benchmark_variables(c: &mut Criterion) {
    let mut group = c.benchmark_group("Variable Formula Evaluation");

    let mut evaluator = Evaluator::default();
    let context: Context = [("x", 5.0), ("y", 2.0), ("rate", 0.25)].into_iter().collect();

    let formula = "MULTIPLY(ADD(x, 3), DIVIDE(POWER(y, 3), rate))";
    let parsed = evaluator.parse_expression(formula).unwrap();

    group.bench_function("preparsed_variables", |b| {
        b.iter(|| parsed.evaluate(black_box(&context)))
    });

    group.bench_function("cached_parse_and_evaluate_variables", |b| {
        b.iter(|| evaluator.evaluate_expression(black_box(formula), black_box(&context)))
    });
}

/// Benchmark one parse evaluated against many contexts
fn benchmark_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Batch Evaluation");

    let mut evaluator = Evaluator::default();
    let parsed = evaluator
        .parse_expression("DIVIDE(SUBTRACT(price, cost), price)")
        .unwrap();
    let contexts: Vec<Context> = (1..=10_000)
        .map(|i| [("price", 100.0 + i as f64), ("cost", 50.0 + i as f64)].into_iter().collect())
        .collect();

    group.bench_function("sequential_batch", |b| {
        b.iter(|| {
            contexts
                .iter()
                .map(|context| parsed.evaluate(context))
                .collect::<Vec<_>>()
        })
    });

    group.bench_function("parallel_batch", |b| {
        b.iter(|| evaluator.evaluate_batch(black_box(&parsed), black_box(&contexts)))
    });
}

criterion_group!(
    benches,
    benchmark_simple_arithmetic,
    benchmark_variables,
    benchmark_batch
);
criterion_main!(benches);
