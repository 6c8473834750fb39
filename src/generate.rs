//! Synthetic record generation.
//!
//! The random source is passed in by the caller. `main` seeds it from the
//! wall clock; tests use a fixed seed.

use std::ops::Range;

use jiff::Timestamp;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::debug;

use crate::record::SensorRecord;

/// Id given to the first record of a run; record `n` gets `FIRST_SENSOR_ID + n`.
pub const FIRST_SENSOR_ID: u32 = 1000;

pub const TEMPERATURE_RANGE: Range<f32> = -5.0..55.0;
pub const HUMIDITY_RANGE: Range<f32> = 10.0..100.0;

/// Largest count whose last id still fits a `u32`.
pub const MAX_COUNT: usize = (u32::MAX - FIRST_SENSOR_ID) as usize + 1;

#[derive(Debug, Error)]
pub enum Error {
    #[error("count must be a positive number")]
    ZeroCount,
    #[error("count {0} exceeds the sensor id space (max {max})", max = MAX_COUNT)]
    TooManyRecords(usize),
    #[error("failed to allocate {0} records")]
    Allocation(usize, #[source] std::collections::TryReserveError),
}

/// Random source seeded from the current wall-clock second.
pub fn clock_seeded_rng() -> StdRng {
    let seed = Timestamp::now().as_second() as u64;
    debug!(seed, "seeded generator from clock");
    StdRng::seed_from_u64(seed)
}

/// Build one record with the given id, stamped with the current time.
pub fn random_record<R: Rng>(sensor_id: u32, rng: &mut R) -> SensorRecord {
    SensorRecord {
        sensor_id,
        temperature_celsius: rng.gen_range(TEMPERATURE_RANGE),
        humidity_percent: rng.gen_range(HUMIDITY_RANGE),
        timestamp: Timestamp::now().as_second(),
    }
}

/// Generate `count` records with ids `1000..1000 + count`.
pub fn generate<R: Rng>(count: usize, rng: &mut R) -> Result<Vec<SensorRecord>, Error> {
    if count == 0 {
        return Err(Error::ZeroCount);
    }
    if count > MAX_COUNT {
        return Err(Error::TooManyRecords(count));
    }

    let mut records = Vec::new();
    records
        .try_reserve_exact(count)
        .map_err(|e| Error::Allocation(count, e))?;

    // count <= MAX_COUNT, so every id fits
    for sensor_id in (FIRST_SENSOR_ID..=u32::MAX).take(count) {
        records.push(random_record(sensor_id, rng));
    }
    debug!(count, "generated records");
    Ok(records)
}
