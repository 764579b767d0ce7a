//! Local puzzle input lookup

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// File-based store of puzzle inputs
///
/// Directory structure: `{input_dir}/{year}/day{day:02}/input.txt`
pub struct InputStore {
    input_dir: PathBuf,
}

impl InputStore {
    pub fn new(input_dir: PathBuf) -> Self {
        Self { input_dir }
    }

    /// Path of the input file for a specific year/day
    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        self.input_dir
            .join(year.to_string())
            .join(format!("day{:02}", day))
            .join("input.txt")
    }

    /// Check if an input file exists
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_file()
    }

    /// Read the input for a year/day
    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.path(year, day);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => InputError::Missing(path),
            _ => InputError::Io { path, source },
        })
    }
}
