//! CSV workbook backend.
//!
//! Each table lives in its own CSV file inside one directory. Appends take
//! an exclusive lock and are synced to disk before returning; reads take a
//! shared lock.

use crate::error::StoreError;
use crate::store::{check_width, Sheet, StoreResult, TabularStore};
use crate::types::Table;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Directory of CSV files, one per table
pub struct CsvWorkbook {
    dir: PathBuf,
}

impl CsvWorkbook {
    /// Create a workbook rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing a table
    pub fn path_for(&self, table: Table) -> PathBuf {
        self.dir.join(format!("{}.csv", table.name()))
    }

    fn ensure_dir(&self) -> StoreResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }
}

impl TabularStore for CsvWorkbook {
    fn read_all(&self, table: Table) -> StoreResult<Sheet> {
        let path = self.path_for(table);
        if !path.exists() {
            tracing::debug!("No file for table {} at {:?}", table, path);
            return Ok(Sheet::default());
        }

        let file = File::open(&path)?;
        file.lock_shared()?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(&file);

        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            match record {
                Ok(record) => rows.push(record.iter().map(String::from).collect()),
                Err(e) => {
                    // Row 1 is the header
                    tracing::warn!("Skipping unreadable row {} of {}: {}", line + 2, table, e);
                }
            }
        }
        drop(reader);

        file.unlock()?;
        tracing::debug!("Read {} rows from {}", rows.len(), table);
        Ok(Sheet { headers, rows })
    }

    fn append_many(&mut self, table: Table, rows: Vec<Vec<String>>) -> StoreResult<()> {
        for row in &rows {
            check_width(table, row)?;
        }
        if rows.is_empty() {
            return Ok(());
        }

        self.ensure_dir()?;
        let path = self.path_for(table);
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)?;
        file.lock_exclusive()?;

        let needs_headers = file.metadata()?.len() == 0;

        // Encode the whole batch first so it reaches the file in one write
        let mut buf = Vec::new();
        if !needs_headers && !ends_with_newline(&file)? {
            // Last stored record was saved without a terminator
            buf.push(b'\n');
        }
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut buf);
            if needs_headers {
                writer.write_record(table.headers())?;
            }
            for row in &rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }

        (&file).write_all(&buf)?;
        file.sync_all()?;
        file.unlock()?;

        tracing::info!("Appended {} rows to {}", rows.len(), table);
        Ok(())
    }
}

/// Whether a non-empty file's last byte is a line feed
fn ends_with_newline(file: &File) -> StoreResult<bool> {
    let mut reader = file;
    reader.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    reader.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Surface a missing workbook directory as an availability problem
pub fn open_existing(dir: &Path) -> StoreResult<CsvWorkbook> {
    if dir.exists() && !dir.is_dir() {
        return Err(StoreError::Unavailable(format!(
            "{} is not a directory",
            dir.display()
        )));
    }
    Ok(CsvWorkbook::new(dir))
}
