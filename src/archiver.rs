//! Raw-message archival into date-partitioned, hour-bucketed files

use chrono::{DateTime, Datelike, Timelike, Utc};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

const WRITE_BUFFER_SIZE: usize = 4 * 1024 * 1024;

/// UTC calendar bucket a file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UtcHourBucket {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
}

impl UtcHourBucket {
    fn of(timestamp: DateTime<Utc>) -> Self {
        Self {
            year: timestamp.year(),
            month: timestamp.month(),
            day: timestamp.day(),
            hour: timestamp.hour(),
        }
    }
}

/// Persists raw market-data messages into rotating flat files.
///
/// Messages land in `<root>/<YYYYMMDD>/<prefix>_<HH>.dat`. A new file is
/// opened whenever the UTC calendar day or hour of an incoming timestamp
/// differs from the currently open file; writes are buffered and flushed
/// on rotation and on close.
#[derive(Debug)]
pub struct MarketDataArchiver {
    prefix: String,
    archive_dir: PathBuf,
    current: Option<UtcHourBucket>,
    writer: Option<BufWriter<File>>,
}

impl MarketDataArchiver {
    pub fn new(archive_dir: impl Into<PathBuf>, filename_prefix: impl Into<String>) -> Self {
        Self {
            prefix: filename_prefix.into(),
            archive_dir: archive_dir.into(),
            current: None,
            writer: None,
        }
    }

    fn dir(&self, bucket: UtcHourBucket) -> PathBuf {
        self.archive_dir.join(format!(
            "{:04}{:02}{:02}",
            bucket.year, bucket.month, bucket.day
        ))
    }

    fn file_path(&self, bucket: UtcHourBucket) -> PathBuf {
        self.dir(bucket)
            .join(format!("{}_{:02}.dat", self.prefix, bucket.hour))
    }

    /// True when `timestamp` falls outside the current bucket; the bucket
    /// is advanced as a side effect.
    fn check_should_rotate(&mut self, timestamp: DateTime<Utc>) -> bool {
        let bucket = UtcHourBucket::of(timestamp);
        if self.current != Some(bucket) {
            self.current = Some(bucket);
            return true;
        }
        false
    }

    /// Flushes and closes the open file, then opens the bucket's file
    /// behind a fresh write buffer.
    fn rotate_file(&mut self, bucket: UtcHourBucket) -> io::Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }

        let dir = self.dir(bucket);
        fs::create_dir_all(&dir)?;

        let path = self.file_path(bucket);
        tracing::debug!(path = %path.display(), "rotating archive file");
        let file = File::create(&path)?;
        self.writer = Some(BufWriter::with_capacity(WRITE_BUFFER_SIZE, file));
        Ok(())
    }

    /// Appends `msg` followed by a separator byte, rotating first when the
    /// timestamp falls into a new UTC day or hour. Returns the number of
    /// bytes written including the separator.
    pub fn archive_message(
        &mut self,
        timestamp: DateTime<Utc>,
        msg: &[u8],
        sep: u8,
    ) -> io::Result<usize> {
        if self.check_should_rotate(timestamp) {
            let bucket = UtcHourBucket::of(timestamp);
            self.rotate_file(bucket)?;
        }

        let writer = match self.writer.as_mut() {
            Some(writer) => writer,
            None => return Err(io::Error::new(io::ErrorKind::Other, "archive file not open")),
        };
        writer.write_all(msg)?;
        writer.write_all(&[sep])?;
        Ok(msg.len() + 1)
    }

    /// Flushes any buffered data and closes the file.
    pub fn close(&mut self) -> io::Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for MarketDataArchiver {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
