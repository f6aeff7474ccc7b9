use criterion::{black_box, criterion_group, criterion_main, Criterion};

use casefile_core::builtin::high_seas;
use casefile_core::matcher::contains_alias;
use casefile_core::normalize::normalize;
use casefile_core::AnswerEvaluator;

fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");

    let short = normalize("Sophia,Marcus Reid, Dr. Elena Vasquez");
    let long = {
        let mut s = String::new();
        for i in 0..200 {
            s.push_str(&format!("witness {i} saw helena near the deck, "));
        }
        s.push_str("dr. elena vasquez");
        normalize(&s)
    };

    group.bench_function("normalize", |b| {
        b.iter(|| normalize(black_box("  Sophia,Marcus Reid,Dr. Elena Vasquez  ")))
    });

    group.bench_function("contains_alias_short", |b| {
        b.iter(|| contains_alias(black_box(&short), black_box("dr. elena vasquez")))
    });

    group.bench_function("contains_alias_long", |b| {
        b.iter(|| contains_alias(black_box(&long), black_box("elena")))
    });

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    let case = high_seas().expect("built-in case should parse");
    let evaluator = AnswerEvaluator::new(&case);

    group.bench_function("multi_suspect_full", |b| {
        b.iter(|| {
            evaluator.evaluate(
                black_box(Some("1")),
                black_box("Sophia, The Viper, Nightingale, Rachel Harlow"),
            )
        })
    });

    group.bench_function("multi_suspect_decoy", |b| {
        b.iter(|| evaluator.evaluate(black_box(Some("1")), black_box("sophia, yvonne")))
    });

    group.bench_function("single_suspect", |b| {
        b.iter(|| evaluator.evaluate(black_box(Some("2")), black_box("Mrs. Grayson")))
    });

    group.finish();
}

criterion_group!(benches, bench_matching, bench_evaluate);
criterion_main!(benches);
