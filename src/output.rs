/// Console rendering of a single record.
///
/// Writes straight to a `Write` sink. Timestamps use the classic `ctime`
/// shape in whatever time zone the caller passes (the binary passes the
/// system zone; tests pin UTC).
use std::io::{self, Write};

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::record::SensorRecord;

/// `ctime`-style layout, e.g. `Wed Jun  3 14:05:09 2026`.
pub const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Format epoch seconds in `tz`. Falls back to the raw number when the
/// value is outside the range jiff can represent.
pub fn format_timestamp(secs: i64, tz: &TimeZone) -> String {
    match Timestamp::from_second(secs) {
        Ok(ts) => ts.to_zoned(tz.clone()).strftime(CTIME_FORMAT).to_string(),
        Err(_) => secs.to_string(),
    }
}

/// Write the four-line display block for `record`.
pub fn write_record(out: &mut impl Write, record: &SensorRecord, tz: &TimeZone) -> io::Result<()> {
    writeln!(out, "Sensor #{}", record.sensor_id)?;
    writeln!(out, "  Temperature: {:.2}°C", record.temperature_celsius)?;
    writeln!(out, "  Humidity:    {:.2}%", record.humidity_percent)?;
    writeln!(
        out,
        "  Timestamp:   {}",
        format_timestamp(record.timestamp, tz)
    )
}
