// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use tracing::info;

use crate::config::consts::CSV_MIME;
use crate::core::sanitize::sanitize_scope;
use crate::error::{Result, ScrapeError};

/// A finished export, ready to hand to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub mime: &'static str,
    pub content: String,
}

impl Download {
    pub fn csv(filename: impl Into<String>, content: String) -> Self {
        Self { filename: filename.into(), mime: CSV_MIME, content }
    }
}

/// `2024-03-09` → `09-03-24`
pub fn to_ddmmyy(date: NaiveDate) -> String {
    date.format("%d-%m-%y").to_string()
}

/// `<inbox>_<DD-MM-YY start>_<DD-MM-YY end>.csv`
pub fn export_filename(inbox: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!("{}_{}_{}.csv", sanitize_scope(inbox), to_ddmmyy(start), to_ddmmyy(end))
}

/// Where finished exports go. Returns the location written to.
pub trait OutputSink {
    fn deliver(&self, download: &Download) -> Result<PathBuf>;
}

/// Writes each download as `<dir>/<filename>`, replacing any previous file.
#[derive(Clone, Debug)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl OutputSink for DirSink {
    fn deliver(&self, download: &Download) -> Result<PathBuf> {
        ensure_directory(&self.dir)?;
        let path = self.dir.join(&download.filename);

        let file = File::create(&path)?; // truncate/overwrite
        let mut out = BufWriter::new(file);
        out.write_all(download.content.as_bytes())?;
        out.flush()?;

        info!(path = %path.display(), mime = download.mime, bytes = download.content.len(), "Export written");
        Ok(path)
    }
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScrapeError::Config(format!(
            "Path exists but is not a directory: {}",
            dir.display()
        )));
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn filename_uses_short_dates_and_safe_inbox() {
        assert_eq!(
            export_filename("acme corp", d(2024, 3, 9), d(2025, 12, 31)),
            "acme_corp_09-03-24_31-12-25.csv"
        );
    }

    #[test]
    fn dir_sink_writes_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = DirSink::new(tmp.path().join("nested"));

        let first = sink.deliver(&Download::csv("a.csv", "one".into())).unwrap();
        let second = sink.deliver(&Download::csv("a.csv", "two".into())).unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read_to_string(&second).unwrap(), "two");
    }

    #[test]
    fn dir_sink_rejects_file_as_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("taken");
        fs::write(&blocker, "x").unwrap();
        let err = DirSink::new(&blocker).deliver(&Download::csv("a.csv", String::new())).unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)));
    }
}
