use commonware_bencode::{decode, decode_cfg, to_bytes, Config, Reader};
use criterion::{criterion_group, Criterion};
use std::{hint::black_box, io::BufReader};

fn bench_decode(c: &mut Criterion) {
    for n in [10, 100, 1_000, 10_000] {
        let encoded = to_bytes(&crate::document(n));

        c.bench_function(&format!("{}/slice/n={}", module_path!(), n), |b| {
            b.iter(|| decode(&mut black_box(&encoded[..])).unwrap())
        });

        let cfg = Config::canonical();
        c.bench_function(&format!("{}/canonical/n={}", module_path!(), n), |b| {
            b.iter(|| decode_cfg(&mut black_box(&encoded[..]), &cfg).unwrap())
        });

        c.bench_function(&format!("{}/reader/n={}", module_path!(), n), |b| {
            b.iter(|| {
                let mut reader = Reader::new(BufReader::new(black_box(&encoded[..])));
                decode(&mut reader).unwrap()
            })
        });
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_decode
}
