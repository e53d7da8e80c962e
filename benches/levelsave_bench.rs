use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use levelsave::envelope::{decrypt_level_string, encrypt_level_string};
use levelsave::{LevelObjectCollection, ObjectDecoder, Registry, Scalar};

fn level_text(objects: usize) -> String {
    let mut out = String::new();
    for i in 0..objects {
        match i % 4 {
            0 => out.push_str(&format!("1,1,2,{},3,15,57,{}.{};", i * 30 + 15, i % 50 + 1, i % 7 + 60)),
            1 => out.push_str(&format!("1,901,2,{},3,105,36,1,10,0.5,28,30,30,2,51,{},87,1;", i * 30, i % 50 + 1)),
            2 => out.push_str(&format!("1,1006,2,{},3,135,7,0,8,125,9,255,45,0.1,46,0.2,47,0.5,49,0a1a1a0a0;", i * 30)),
            _ => out.push_str(&format!("1,8,2,{},3,15,6,90,21,1004,43,-30a0.5a1a1a0;", i * 30 + 15)),
        }
    }
    out
}

pub fn scalar_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar");
    for data in ["15", "-1234567", "0.5", "123456789012"].iter() {
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("to_f64", data), data, |b, data| {
            b.iter(|| Scalar::new(black_box(data)).to_f64())
        });
    }
    group.finish();
}

pub fn decode_benchmark(c: &mut Criterion) {
    let registry = Registry::new();
    let mut group = c.benchmark_group("decode");
    for size in [100, 10_000].iter() {
        let text = level_text(*size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("sequential", size), &text, |b, text| {
            b.iter(|| LevelObjectCollection::decode_all(black_box(text), &registry))
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &text, |b, text| {
            let decoder = ObjectDecoder::new(&registry);
            b.iter(|| decoder.decode_parallel(black_box(text), 4))
        });
    }
    group.finish();
}

pub fn encode_benchmark(c: &mut Criterion) {
    let registry = Registry::new();
    let mut group = c.benchmark_group("encode");
    let text = level_text(10_000);
    let (objects, _) = LevelObjectCollection::decode_all(&text, &registry);
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("encode_all", |b| b.iter(|| black_box(&objects).encode_all()));
    group.finish();
}

pub fn envelope_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope");
    let text = level_text(10_000);
    let packed = encrypt_level_string(&text).unwrap();
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("encrypt_level_string", |b| {
        b.iter(|| encrypt_level_string(black_box(&text)))
    });
    group.bench_function("decrypt_level_string", |b| {
        b.iter(|| decrypt_level_string(black_box(&packed)))
    });
    group.finish();
}

criterion_group!(
    benches,
    scalar_benchmark,
    decode_benchmark,
    encode_benchmark,
    envelope_benchmark,
);

criterion_main!(benches);
