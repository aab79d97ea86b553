//! Append-only JSON-lines journal of notifications.
//!
//! One line per notification:
//! ```text
//! {"frame":12,"elapsed":0.2,"type":"agent_spawned","agent":1,...}
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RuntimeError};
use crate::notification::Notification;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub frame: u64,
    /// Level time when the notification was produced.
    pub elapsed: f64,
    #[serde(flatten)]
    pub notification: Notification,
}

pub struct Journal {
    path: PathBuf,
    writer: BufWriter<File>,
    entries: u64,
}

impl Journal {
    /// Open or create a journal, appending to existing content.
    pub fn open_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(RuntimeError::Journal)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(RuntimeError::Journal)?;

        tracing::debug!("Opened journal: {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            entries: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries written through this handle.
    pub fn entries(&self) -> u64 {
        self.entries
    }

    pub fn append(&mut self, frame: u64, elapsed: f64, notifications: &[Notification]) -> Result<()> {
        for notification in notifications {
            let entry = JournalEntry {
                frame,
                elapsed,
                notification: notification.clone(),
            };
            serde_json::to_writer(&mut self.writer, &entry)?;
            self.writer
                .write_all(b"\n")
                .map_err(RuntimeError::Journal)?;
            self.entries += 1;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(RuntimeError::Journal)
    }

    /// Read every entry of a journal file.
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<JournalEntry>> {
        let file = File::open(path.as_ref()).map_err(RuntimeError::Journal)?;
        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(RuntimeError::Journal)?;
            if line.trim().is_empty() {
                continue;
            }
            entries.push(serde_json::from_str(&line)?);
        }
        Ok(entries)
    }
}

impl Drop for Journal {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!("Failed to flush journal {}: {}", self.path.display(), e);
        }
    }
}
