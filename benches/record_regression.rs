//! iai-callgrind regression benchmarks for the record codec and generator.
//!
//! These count CPU instructions (via Valgrind) rather than wall-clock time, so
//! they are deterministic on CI. Extra copies in the encode path or extra
//! allocations in the generator show up as an instruction count increase.
//!
//! Run locally (requires valgrind):
//!   cargo bench --bench record_regression

use iai_callgrind::{library_benchmark, library_benchmark_group, main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

use sensorlog::{RECORD_SIZE, SensorRecord, generate};

const FIXTURE: SensorRecord = SensorRecord {
    sensor_id: 1042,
    temperature_celsius: 21.5,
    humidity_percent: 63.25,
    timestamp: 1_750_000_000,
};

fn fixture_batch(n: usize) -> Vec<SensorRecord> {
    generate::generate(n, &mut StdRng::seed_from_u64(42)).unwrap()
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

#[library_benchmark]
fn encode_one() -> [u8; RECORD_SIZE] {
    black_box(black_box(FIXTURE).to_bytes())
}

#[library_benchmark]
fn decode_one() -> SensorRecord {
    let bytes = FIXTURE.to_bytes();
    black_box(SensorRecord::from_bytes(black_box(&bytes)))
}

#[library_benchmark]
fn encode_batch_1k() -> Vec<u8> {
    let records = fixture_batch(1000);
    let mut buf = Vec::with_capacity(records.len() * RECORD_SIZE);
    for r in &records {
        r.encode_into(&mut buf);
    }
    black_box(buf)
}

#[library_benchmark]
fn generate_1k() -> Vec<SensorRecord> {
    let mut rng = StdRng::seed_from_u64(42);
    black_box(generate::generate(black_box(1000), &mut rng).unwrap())
}

// ---------------------------------------------------------------------------

library_benchmark_group!(
    name = codec_group;
    benchmarks = encode_one, decode_one, encode_batch_1k
);

library_benchmark_group!(
    name = generate_group;
    benchmarks = generate_1k
);

main!(library_benchmark_groups = codec_group, generate_group);
