#![no_main]
use jiff::tz::{self, TimeZone};
use libfuzzer_sys::fuzz_target;
use sensorlog::output::write_record;
use sensorlog::{RECORD_SIZE, SensorRecord};

// Decode arbitrary bytes as a record and render it in a few zones.
// Catches panics on out-of-range timestamps and non-finite floats.
fuzz_target!(|data: &[u8]| {
    let Some(bytes) = data.first_chunk::<RECORD_SIZE>() else {
        return;
    };
    let record = SensorRecord::from_bytes(bytes);

    let zones = [
        TimeZone::UTC,
        TimeZone::fixed(tz::offset(-12)),
        TimeZone::fixed(tz::offset(14)),
    ];
    for zone in &zones {
        let mut out = Vec::new();
        write_record(&mut out, &record, zone).unwrap();
        assert!(out.starts_with(b"Sensor #"));
    }
});
