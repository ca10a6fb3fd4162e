use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use xpr_core::op::{fetch, is_in, slice};
use xpr_core::val::{IntWidth, Kind, MapVal, Record, RecordType, Val};

fn bench_fetch(c: &mut Criterion) {
    let list = Val::from((0..1024).collect::<Vec<i64>>());
    let map = Val::map(MapVal::with_entries(
        Kind::Int(IntWidth::I64),
        (0..1024i64).map(|i| (format!("k{i}"), i)),
    ));
    let ty = Arc::new(
        RecordType::new("Row")
            .field("id", Kind::Int(IntWidth::I64))
            .field("name", Kind::Str),
    );
    let record = Val::record(Record::new(ty));

    let idx = Val::from(512);
    let hit = Val::from("k512");
    let miss = Val::from("nope");
    let field = Val::from("name");

    c.bench_function("fetch_list_index", |b| b.iter(|| fetch(black_box(&list), black_box(&idx), false)));
    c.bench_function("fetch_map_hit", |b| b.iter(|| fetch(black_box(&map), black_box(&hit), false)));
    c.bench_function("fetch_map_zero_value", |b| {
        b.iter(|| fetch(black_box(&map), black_box(&miss), false))
    });
    c.bench_function("fetch_record_field", |b| {
        b.iter(|| fetch(black_box(&record), black_box(&field), false))
    });
}

fn bench_collections(c: &mut Criterion) {
    let list = Val::from((0..1024).collect::<Vec<i64>>());
    let needle = Val::from(1000u16);
    let (from, to) = (Val::from(100), Val::from(5000));

    c.bench_function("in_list_linear", |b| b.iter(|| is_in(black_box(&needle), black_box(&list))));
    c.bench_function("slice_clamped", |b| {
        b.iter(|| slice(black_box(&list), black_box(&from), black_box(&to)))
    });
}

criterion_group!(benches, bench_fetch, bench_collections);
criterion_main!(benches);
