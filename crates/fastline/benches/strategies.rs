//! Throughput of every reader strategy over the same generated file.
#![expect(missing_docs)]
use std::{io::Write, time::Duration};

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fastline::{ImportOptions, ReaderOptions, StrategyKind, import};

/// Writes `lines` points of the usual `metric timestamp value tags` shape.
fn make_points(lines: usize) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for i in 0..lines {
        writeln!(
            file,
            "sys.cpu.user {} {}.{} host=web{:02} cpu={}",
            1_356_998_400 + i,
            i % 100,
            i % 7,
            i % 16,
            i % 8
        )
        .unwrap();
    }
    file.flush().unwrap();
    file
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategies");
    let options = ImportOptions {
        progress_interval: 0,
    };

    for &lines in &[10_000usize, 100_000] {
        let file = make_points(lines);
        let bytes = std::fs::metadata(file.path()).unwrap().len();
        group.throughput(Throughput::Bytes(bytes));

        for kind in StrategyKind::ALL {
            group.bench_with_input(BenchmarkId::new(kind.as_str(), lines), &lines, |b, &_l| {
                b.iter(|| {
                    let mut reader = kind.build(ReaderOptions::default());
                    reader.open(file.path()).unwrap();
                    let stats = import(reader.as_mut(), &options).unwrap();
                    black_box(stats.points);
                });
            });
        }
    }

    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(10));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_strategies }
criterion_main!(benches);
