//! File-backed record store.
//!
//! A store file is a bare array of [`RECORD_SIZE`]-byte records: no header,
//! no length prefix, no checksum. Record `n` lives at `n * RECORD_SIZE`, so a
//! point read is one seek and one read. Every operation opens the file, does
//! its transfer and drops the handle before returning.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::record::{RECORD_SIZE, SensorRecord};

/// Permission bits for newly created store files (rw-r--r--).
pub const FILE_MODE: u32 = 0o644;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open {} for writing", .path.display())]
    OpenWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write to {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("short write to {}: {written} of {expected} bytes", .path.display())]
    ShortWrite {
        path: PathBuf,
        written: usize,
        expected: usize,
    },
    #[error("failed to open {} for reading", .path.display())]
    OpenRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to seek to record {index} in {}", .path.display())]
    Seek {
        path: PathBuf,
        index: i64,
        #[source]
        source: io::Error,
    },
    #[error("failed to read record {index} from {}", .path.display())]
    Read {
        path: PathBuf,
        index: i64,
        #[source]
        source: io::Error,
    },
    #[error("offset of record {index} overflows")]
    OffsetOverflow { index: i64 },
    #[error("invalid index or incomplete record (index {index})")]
    InvalidIndex { index: i64 },
    #[error("failed to stat {}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} has {len} bytes, not a whole number of records", .path.display())]
    TrailingBytes { path: PathBuf, len: u64 },
}

/// Byte offset of record `index`.
///
/// Negative indices are invalid; offsets past `i64::MAX` cannot be seeked to.
pub fn record_offset(index: i64) -> Result<u64, Error> {
    let position = u64::try_from(index).map_err(|_| Error::InvalidIndex { index })?;
    position
        .checked_mul(RECORD_SIZE as u64)
        .filter(|offset| *offset <= i64::MAX as u64)
        .ok_or(Error::OffsetOverflow { index })
}

/// Buffer size for store writes.
pub const WRITE_BUFFER_SIZE: usize = 64 * 1024;

/// Create or truncate `path` and write `records` to it back to back.
///
/// A failed write leaves whatever reached the disk in place, possibly ending
/// in a partial record.
pub fn write_all(path: &Path, records: &[SensorRecord]) -> Result<(), Error> {
    let mut opts = OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(FILE_MODE);
    }
    let file = opts.open(path).map_err(|source| Error::OpenWrite {
        path: path.to_path_buf(),
        source,
    })?;

    let written = write_records(path, file, records)?;
    debug!(path = %path.display(), records = records.len(), bytes = written, "wrote records");
    Ok(())
}

/// Tracks how many bytes the underlying sink actually accepted.
struct CountingWriter<W> {
    inner: W,
    written: usize,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Stream `records` into `sink` one encoded record at a time.
///
/// Returns the number of bytes the sink accepted. A sink that stops
/// accepting bytes is [`Error::ShortWrite`].
fn write_records<W: Write>(path: &Path, sink: W, records: &[SensorRecord]) -> Result<usize, Error> {
    let expected = records.len() * RECORD_SIZE;
    let mut out = BufWriter::with_capacity(
        WRITE_BUFFER_SIZE,
        CountingWriter {
            inner: sink,
            written: 0,
        },
    );
    let result = records
        .iter()
        .try_for_each(|record| out.write_all(&record.to_bytes()))
        .and_then(|()| out.flush());
    // into_parts skips the flush-on-drop retry after a failure
    let (counter, _) = out.into_parts();
    let written = counter.written;

    match result {
        Ok(()) => Ok(written),
        Err(e) if e.kind() == io::ErrorKind::WriteZero => {
            warn!(path = %path.display(), written, expected, "short write");
            Err(Error::ShortWrite {
                path: path.to_path_buf(),
                written,
                expected,
            })
        }
        Err(source) => Err(Error::Write {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read record `index` from `path` with a single seek and read.
///
/// Fewer than [`RECORD_SIZE`] bytes at the offset (past the end, or a
/// truncated tail) is [`Error::InvalidIndex`].
pub fn read_at(path: &Path, index: i64) -> Result<SensorRecord, Error> {
    let mut file = File::open(path).map_err(|source| Error::OpenRead {
        path: path.to_path_buf(),
        source,
    })?;

    let offset = record_offset(index)?;
    file.seek(SeekFrom::Start(offset))
        .map_err(|source| Error::Seek {
            path: path.to_path_buf(),
            index,
            source,
        })?;

    let mut buf = Vec::with_capacity(RECORD_SIZE);
    file.take(RECORD_SIZE as u64)
        .read_to_end(&mut buf)
        .map_err(|source| Error::Read {
            path: path.to_path_buf(),
            index,
            source,
        })?;

    let Ok(bytes) = <[u8; RECORD_SIZE]>::try_from(buf.as_slice()) else {
        debug!(path = %path.display(), index, got = buf.len(), "incomplete record");
        return Err(Error::InvalidIndex { index });
    };
    debug!(path = %path.display(), index, offset, "read record");
    Ok(SensorRecord::from_bytes(&bytes))
}

/// Number of whole records in `path`.
pub fn record_count(path: &Path) -> Result<u64, Error> {
    let len = fs::metadata(path)
        .map_err(|source| Error::Metadata {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    if len % RECORD_SIZE as u64 != 0 {
        return Err(Error::TrailingBytes {
            path: path.to_path_buf(),
            len,
        });
    }
    Ok(len / RECORD_SIZE as u64)
}
