use bytes::BytesMut;
use commonware_bencode::{encode, EncodeSize, Writer};
use criterion::{criterion_group, Criterion};
use std::{hint::black_box, io};

fn bench_encode(c: &mut Criterion) {
    for n in [10, 100, 1_000, 10_000] {
        let value = crate::document(n);
        let size = value.encode_size();

        c.bench_function(&format!("{}/buffer/n={}", module_path!(), n), |b| {
            b.iter(|| {
                let mut buf = BytesMut::with_capacity(size);
                encode(&mut buf, black_box(&value)).unwrap();
                buf
            })
        });

        c.bench_function(&format!("{}/writer/n={}", module_path!(), n), |b| {
            b.iter(|| {
                let mut writer = Writer::new(io::sink());
                encode(&mut writer, black_box(&value)).unwrap()
            })
        });
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_encode
}
