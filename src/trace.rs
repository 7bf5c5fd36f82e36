//! Session trace - JSON-lines export of engine snapshots.
//!
//! One serialized snapshot per engine mutation, appended to a file.
//! Useful for replaying a session offline or diffing engine behavior
//! across changes.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::GameSnapshot;

pub struct SessionTrace {
    writer: BufWriter<File>,
}

impl SessionTrace {
    /// Open a trace file for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("trace: cannot open {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Append one snapshot as a JSON line.
    pub fn record(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        serde_json::to_writer(&mut self.writer, snapshot)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
