use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use isodump_decoder::DumpDecoder;
use isodump_tests::fixtures::{binary_record, t112_record};

fn synthetic_binary_dump(records: usize) -> Vec<u8> {
    let mut dump = Vec::new();
    for i in 0..records {
        dump.extend(binary_record(
            "1240",
            &[
                (2, "5412345678901234567"),
                (3, "000000"),
                (4, "000000012345"),
                (7, "0828120533"),
                (11, &format!("{:06}", i % 1_000_000)),
                (41, "TERM0001"),
            ],
        ));
    }
    dump
}

fn synthetic_text_dump(records: usize) -> String {
    t112_record(
        "1240",
        &[
            ("PAN", "5412345678901234567"),
            ("Amount Transaction", "000000012345"),
            ("Local Transaction Date/Time", "0828120533"),
            ("Card Acceptor Terminal ID", "TERM0001"),
        ],
    )
    .repeat(records)
}

fn bench_decode_binary(c: &mut Criterion) {
    let engine = DumpDecoder::new();
    let mut group = c.benchmark_group("decode_binary");

    for records in [10usize, 100, 1000] {
        let dump = synthetic_binary_dump(records);
        group.throughput(Throughput::Bytes(dump.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(records), &dump, |b, dump| {
            b.iter(|| engine.decode(dump, "bench.001"));
        });
    }

    group.finish();
}

fn bench_decode_text(c: &mut Criterion) {
    let engine = DumpDecoder::new();
    let mut group = c.benchmark_group("decode_text");

    // One long unframed line: the boundary heuristic has to carve every
    // record out itself, which dominates the text path.
    for records in [10usize, 100] {
        let dump = synthetic_text_dump(records);
        group.throughput(Throughput::Bytes(dump.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(records), &dump, |b, dump| {
            b.iter(|| engine.decode(dump.as_bytes(), "bench.txt"));
        });
    }

    group.finish();
}

fn bench_resync_heavy(c: &mut Criterion) {
    // Garbage between records: measures the fault + resynchronization
    // path rather than the clean one. The field-7 bitmap puts an STX
    // byte at each record's bitmap start, so every record after a
    // corrupt segment is recoverable.
    let mut dump = Vec::new();
    for _ in 0..50 {
        dump.extend(binary_record("1240", &[(7, "0828120533")]));
        dump.extend_from_slice(b"????CORRUPT SEGMENT????");
    }

    c.bench_function("decode_binary_resync_heavy", |b| {
        let engine = DumpDecoder::new();
        b.iter(|| engine.decode(&dump, "bench.001"));
    });
}

criterion_group!(
    benches,
    bench_decode_binary,
    bench_decode_text,
    bench_resync_heavy
);
criterion_main!(benches);
