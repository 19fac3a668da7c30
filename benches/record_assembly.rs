//! Performance benchmarks for record reassembly and hello codecs.
//!
//! Run with: `cargo bench --bench record_assembly`
//!
//! Parsing sits on the hot path when the probe is fanned out across
//! many hosts, so the assemblers should stay well under a microsecond
//! per hello-sized record.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use tls_probe::wire::common::{
    CONTENT_TYPE_HANDSHAKE, HANDSHAKE_TYPE_SERVER_HELLO, HANDSHAKE_TYPE_SERVER_HELLO_DONE,
};
use tls_probe::wire::{
    frame, ByteCursor, ClientHello, Extension, ProtocolVersion, RecordAssembler, ServerHello,
    DEFAULT_CIPHER_SUITES,
};

// ============================================================================
// Test data generation
// ============================================================================

fn sample_client_hello() -> ClientHello {
    ClientHello {
        version: ProtocolVersion::TLS_1_2,
        random: [0x42; 32],
        session_id: Vec::new(),
        cipher_suites: DEFAULT_CIPHER_SUITES.to_vec(),
        compression_methods: vec![0x00],
        extensions: vec![
            Extension::server_name("benchmark.example.com"),
            Extension::supported_groups(&[0x001d, 0x0017, 0x0018]),
            Extension::ec_point_formats(&[0x00]),
        ],
    }
}

fn server_hello_record() -> Vec<u8> {
    let mut body = ByteCursor::new();
    body.write_u16(0x0303);
    body.write_bytes(&[0x77; 32]);
    body.write_u8(32);
    body.write_bytes(&[0x11; 32]);
    body.write_u16(0x002F);
    body.write_u8(0);

    let mut payload = ByteCursor::new();
    payload.write_u8(HANDSHAKE_TYPE_SERVER_HELLO);
    payload.write_u24(body.len() as u32);
    payload.write_bytes(body.as_bytes());
    payload.write_u8(HANDSHAKE_TYPE_SERVER_HELLO_DONE);
    payload.write_u24(0);

    frame(CONTENT_TYPE_HANDSHAKE, ProtocolVersion::TLS_1_2, payload.as_bytes()).unwrap()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_client_hello_encode(c: &mut Criterion) {
    let hello = sample_client_hello();
    let encoded_len = hello.encode().unwrap().len() as u64;

    let mut group = c.benchmark_group("client_hello_encode");
    group.throughput(Throughput::Bytes(encoded_len));
    group.bench_function("encode", |b| {
        b.iter(|| black_box(&hello).encode().unwrap());
    });
    group.finish();
}

fn bench_client_hello_decode(c: &mut Criterion) {
    let encoded = sample_client_hello().encode().unwrap();
    let body = encoded[4..].to_vec();

    let mut group = c.benchmark_group("client_hello_decode");
    group.throughput(Throughput::Bytes(body.len() as u64));
    group.bench_function("decode", |b| {
        b.iter(|| ClientHello::decode(black_box(&body)).unwrap());
    });
    group.finish();
}

fn bench_server_hello_decode(c: &mut Criterion) {
    let record = server_hello_record();
    // Strip record header (5) and handshake header (4)
    let body = record[9..record.len() - 4].to_vec();

    let mut group = c.benchmark_group("server_hello_decode");
    group.throughput(Throughput::Bytes(body.len() as u64));
    group.bench_function("decode", |b| {
        b.iter(|| ServerHello::decode(black_box(&body)).unwrap());
    });
    group.finish();
}

fn bench_record_reassembly(c: &mut Criterion) {
    let record = server_hello_record();

    let mut group = c.benchmark_group("record_reassembly");
    group.throughput(Throughput::Bytes(record.len() as u64));

    group.bench_function("single_feed", |b| {
        b.iter(|| {
            let mut asm = RecordAssembler::new();
            asm.feed(black_box(&record));
            asm.next_record().unwrap().unwrap()
        });
    });

    group.bench_function("chunked_feed_8b", |b| {
        b.iter(|| {
            let mut asm = RecordAssembler::new();
            for chunk in record.chunks(8) {
                asm.feed(black_box(chunk));
            }
            asm.next_record().unwrap().unwrap()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_client_hello_encode,
    bench_client_hello_decode,
    bench_server_hello_decode,
    bench_record_reassembly
);
criterion_main!(benches);
