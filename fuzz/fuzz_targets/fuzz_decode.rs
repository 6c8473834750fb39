#![no_main]
use libfuzzer_sys::fuzz_target;
use sensorlog::{RECORD_SIZE, SensorRecord};

// Decode every whole record in the input and re-encode it. Everything but
// the padding word must come back byte for byte.
fuzz_target!(|data: &[u8]| {
    for chunk in data.chunks_exact(RECORD_SIZE) {
        let bytes: &[u8; RECORD_SIZE] = chunk.try_into().unwrap();
        let record = SensorRecord::from_bytes(bytes);
        let again = record.to_bytes();
        assert_eq!(&again[..12], &bytes[..12]);
        assert_eq!(&again[12..16], &[0u8; 4]);
        assert_eq!(&again[16..], &bytes[16..]);
        assert!(SensorRecord::from_bytes(&again).bit_eq(&record));
    }
});
