use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use sensorlog::{RECORD_SIZE, generate, store};
use std::path::Path;
use std::time::{Duration, Instant};

fn mb_per_sec(bytes: u64, dur: Duration) -> f64 {
    bytes as f64 / (1024.0 * 1024.0) / dur.as_secs_f64()
}

/// Auto-calibrate iteration count to fill ~2 seconds at ~500 MB/s.
fn calibrate(bytes: usize) -> u64 {
    let iters = (2.0 * 5e8 / bytes as f64) as u64;
    iters.max(10)
}

fn bench_generate(label: &str, count: usize) {
    let bytes = count * RECORD_SIZE;
    let iters = calibrate(bytes).min(200);
    let mut rng = StdRng::seed_from_u64(42);

    // Warmup
    for _ in 0..3 {
        let _ = generate::generate(count, &mut rng).unwrap();
    }

    let start = Instant::now();
    for _ in 0..iters {
        let _ = generate::generate(count, &mut rng).unwrap();
    }
    let elapsed = start.elapsed();
    let mbs = mb_per_sec(bytes as u64 * iters, elapsed);
    println!(
        "  {label:<35} {mbs:8.1} MB/s  ({iters} iters in {:.2}s)",
        elapsed.as_secs_f64()
    );
}

fn bench_write_all(label: &str, path: &Path, count: usize) {
    let records = generate::generate(count, &mut StdRng::seed_from_u64(42)).unwrap();
    let bytes = count * RECORD_SIZE;
    let iters = calibrate(bytes).min(200);

    // Warmup
    for _ in 0..3 {
        store::write_all(path, &records).unwrap();
    }

    let start = Instant::now();
    for _ in 0..iters {
        store::write_all(path, &records).unwrap();
    }
    let elapsed = start.elapsed();
    let mbs = mb_per_sec(bytes as u64 * iters, elapsed);
    println!(
        "  {label:<35} {mbs:8.1} MB/s  ({iters} iters in {:.2}s)",
        elapsed.as_secs_f64()
    );
}

fn bench_read_at(label: &str, path: &Path, count: usize) {
    let reads: u64 = 100_000;
    let mut rng = StdRng::seed_from_u64(7);
    let indices: Vec<i64> = (0..reads)
        .map(|_| rng.gen_range(0..count as i64))
        .collect();

    // Warmup
    for &i in indices.iter().take(1000) {
        let _ = store::read_at(path, i).unwrap();
    }

    let start = Instant::now();
    for &i in &indices {
        let _ = store::read_at(path, i).unwrap();
    }
    let elapsed = start.elapsed();
    let per_read = elapsed.as_nanos() as f64 / reads as f64;
    println!(
        "  {label:<35} {per_read:8.0} ns/read  ({reads} reads in {:.2}s)",
        elapsed.as_secs_f64()
    );
}

fn main() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("bench.bin");

    for count in [1_000, 100_000, 1_000_000] {
        let mb = (count * RECORD_SIZE) as f64 / (1024.0 * 1024.0);
        println!("{count} records ({mb:.1} MB):");
        bench_generate("generate", count);
        bench_write_all("write_all", &path, count);
        bench_read_at("read_at (random index)", &path, count);
        println!();
    }
}
