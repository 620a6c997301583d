use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use csv_wrangler::source::{self, SourceOptions};
use csv_wrangler::{Operation, WranglerState};
use tempfile::TempDir;

fn generate_customers(rows: usize) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let csv_path = temp_dir.path().join("customers.csv");
    let mut file = File::create(&csv_path).expect("create csv");
    writeln!(file, "id,full_name,city,spend,active").expect("header");
    for i in 0..rows {
        let city = match i % 3 {
            0 => "london",
            1 => "paris",
            _ => "",
        };
        let active = if i % 2 == 0 { "yes" } else { "no" };
        writeln!(
            file,
            "{i},customer {i} smith,{city},{}.{:02},{active}",
            i % 500,
            i % 100
        )
        .expect("row");
    }
    (temp_dir, csv_path)
}

fn bench_load_and_apply(c: &mut Criterion) {
    let (temp_dir, csv_path) = generate_customers(20_000);
    let dataset =
        source::load_dataset(&csv_path, &SourceOptions::default()).expect("load dataset");
    let loaded = WranglerState::load_ordered(dataset.table.clone(), dataset.headers.clone());
    let script = vec![
        Operation::split(" ", "full_name", "given", "family"),
        Operation::titlecase("family"),
        Operation::merge("city", "family", "/", "key"),
        Operation::substring("key", 0, 4, "prefix"),
        Operation::rename("spend", "amount"),
        Operation::drop("full_name"),
    ];

    let mut group = c.benchmark_group("wrangler");

    group.bench_function("initial_load", |b| {
        b.iter_batched(
            || (dataset.table.clone(), dataset.headers.clone()),
            |(table, headers)| WranglerState::load_ordered(table, headers),
            BatchSize::LargeInput,
        );
    });

    group.bench_function("apply_script", |b| {
        b.iter(|| {
            script
                .iter()
                .fold(loaded.clone(), |state, operation| state.apply(operation))
        });
    });

    drop(temp_dir);
    group.finish();
}

criterion_group!(benches, bench_load_and_apply);
criterion_main!(benches);
