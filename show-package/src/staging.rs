use crate::error::{Error, Result};
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const OBJECTS_FILE: &str = "objects.txt";
pub const RULEBASE_FILE: &str = "rulebase.txt";

/// Append target inside the staging directory holding one JSON array in the
/// making. Opened with `[`; the renderer closes it with [`seal`](Self::seal).
#[derive(Debug)]
pub struct AccumulationFile {
    path: PathBuf,
    file: File,
    records: usize,
}

impl AccumulationFile {
    fn create(path: PathBuf) -> Result<Self> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| Error::io("open accumulation file", &path, e))?;
        file.write_all(b"[").map_err(|e| Error::io("write accumulation file", &path, e))?;
        Ok(Self { path, file, records: 0 })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> usize {
        self.records
    }

    /// Writes one record, preceded by a comma unless it is the first.
    pub fn append_record<T: Serialize>(&mut self, record: &T) -> Result<()> {
        let body = serde_json::to_vec(record).map_err(|e| {
            Error::io("encode record", &self.path, io::Error::new(io::ErrorKind::InvalidData, e))
        })?;
        if self.records > 0 {
            self.write_all(b",").map_err(|e| Error::io("write accumulation file", &self.path, e))?;
        }
        self.write_all(&body).map_err(|e| Error::io("write accumulation file", &self.path, e))?;
        self.records += 1;
        Ok(())
    }

    /// Terminates the array.
    pub fn seal(&mut self) -> Result<()> {
        self.write_all(b"]").map_err(|e| Error::io("write accumulation file", &self.path, e))?;
        self.flush().map_err(|e| Error::io("flush accumulation file", &self.path, e))
    }

    fn close_and_delete(self) -> io::Result<()> {
        let AccumulationFile { path, file, .. } = self;
        file.sync_all()?;
        drop(file);
        fs::remove_file(&path)
    }
}

impl Write for AccumulationFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// The two accumulation files of a run. Whatever is still open when the area
/// is dropped gets closed and deleted.
#[derive(Debug)]
pub struct StagingArea {
    dir: PathBuf,
    objects: Option<AccumulationFile>,
    rulebase: Option<AccumulationFile>,
}

impl StagingArea {
    pub fn open(staging_dir: &Path) -> Result<Self> {
        let objects = AccumulationFile::create(staging_dir.join(OBJECTS_FILE))?;
        // objects is dropped (and removed by Drop below) if rulebase fails
        let mut area = Self { dir: staging_dir.to_path_buf(), objects: Some(objects), rulebase: None };
        area.rulebase = Some(AccumulationFile::create(staging_dir.join(RULEBASE_FILE))?);
        debug!(dir = %staging_dir.display(), "accumulation files opened");
        Ok(area)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn objects(&mut self) -> Option<&mut AccumulationFile> {
        self.objects.as_mut()
    }

    pub fn rulebase(&mut self) -> Option<&mut AccumulationFile> {
        self.rulebase.as_mut()
    }

    pub fn is_open(&self) -> bool {
        self.objects.is_some() || self.rulebase.is_some()
    }

    /// Closes and deletes both files, objects first. Each file is attempted
    /// regardless of the other; returns true only if both succeeded.
    pub fn close(&mut self) -> bool {
        let objects_ok = release(self.objects.take());
        let rulebase_ok = release(self.rulebase.take());
        objects_ok && rulebase_ok
    }
}

fn release(file: Option<AccumulationFile>) -> bool {
    let Some(file) = file else {
        return true;
    };
    let path = file.path().to_path_buf();
    match file.close_and_delete() {
        Ok(()) => true,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to close accumulation file");
            false
        }
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        if self.is_open() {
            self.close();
        }
    }
}
