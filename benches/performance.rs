use criterion::{black_box, criterion_group, criterion_main, Criterion};
use seqline_query::prelude::*;

#[derive(Clone)]
struct Row {
    group: u32,
    order: u32,
    word: String,
}

fn make_rows(rows: usize) -> Vec<Row> {
    (0..rows)
        .map(|i| Row {
            group: (i % 4) as u32,
            order: ((i * 7919) % rows) as u32,
            word: format!("w{}", i % 50),
        })
        .collect()
}

fn bench_sort_subsort(c: &mut Criterion) {
    let rows = Enumerable::new(make_rows(512));
    let sorted = rows
        .sort_by(|r: &Row| r.group, Direction::Ascending)
        .subsort(|r: &Row| r.order, Direction::Descending);
    c.bench_function("sort_subsort_512", |b| {
        b.iter(|| black_box(sorted.count()))
    });
}

fn bench_join(c: &mut Criterion) {
    let outer = Enumerable::new(make_rows(1024));
    let inner = Enumerable::new((0..50).map(|i| format!("w{}", i)).collect::<Vec<_>>());
    let joined = outer.join(
        &inner,
        |r: &Row| r.word.clone(),
        |w: &String| w.clone(),
        |r: &Row, _: &String| r.order,
    );
    c.bench_function("hash_join_1024x50", |b| {
        b.iter(|| black_box(joined.fold(0u64, |acc, x| acc + x as u64)))
    });
}

fn bench_group(c: &mut Criterion) {
    let rows = Enumerable::new(make_rows(4096));
    let groups = rows.group(|r: &Row| r.word.clone());
    c.bench_function("group_4096", |b| b.iter(|| black_box(groups.count())));
}

criterion_group!(pipelines, bench_sort_subsort, bench_join, bench_group);
criterion_main!(pipelines);
