//! Test case discovery.
//!
//! A test case is an input artifact (`<name>.cpp`, `<name>.mm`, ...) in the test directory.
//! Everything else about the case hangs off its name:
//!
//! | File                  | Role                                             |
//! |-----------------------|--------------------------------------------------|
//! | `<name>.flags`        | optional extra tool arguments, whitespace-split  |
//! | `<name>.txt`          | expected (golden) output                         |
//! | `<name>.txt.actual`   | actual output, written on failure                |

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::error::HarnessError;

pub const FLAGS_SUFFIX: &str = ".flags";
pub const EXPECTED_SUFFIX: &str = ".txt";
pub const ACTUAL_SUFFIX: &str = ".txt.actual";

/// A single golden-file test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    /// File name of the input, relative to the test directory.
    pub input_file: String,
    pub input_path: PathBuf,
    pub flags_path: PathBuf,
    pub expected_path: PathBuf,
    pub actual_path: PathBuf,
    /// Tokens from `<name>.flags`, empty when the file is absent.
    pub extra_args: Vec<String>,
}

impl TestCase {
    /// Derive a case from an input file name inside `dir` and load its flags.
    pub fn load(dir: &Path, input_file: &str) -> io::Result<Self> {
        let mut case = Self::from_input(dir, input_file);
        case.extra_args = read_flags(&case.flags_path)?;
        Ok(case)
    }

    /// Derive a case without touching the filesystem.
    pub fn from_input(dir: &Path, input_file: &str) -> Self {
        let name = Path::new(input_file)
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or(input_file)
            .to_string();

        Self {
            input_path: dir.join(input_file),
            flags_path: dir.join(format!("{name}{FLAGS_SUFFIX}")),
            expected_path: dir.join(format!("{name}{EXPECTED_SUFFIX}")),
            actual_path: dir.join(format!("{name}{ACTUAL_SUFFIX}")),
            input_file: input_file.to_string(),
            extra_args: Vec::new(),
            name,
        }
    }
}

/// Read a `.flags` file. A missing file means no extra arguments.
pub fn read_flags(path: &Path) -> io::Result<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents.split_whitespace().map(str::to_string).collect()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// Lazy scan over the input artifacts of a test directory.
///
/// Yields cases in filesystem enumeration order. The scan is finite; start a new one with
/// [`CaseIter::new`] (or `GoldenFileTestHarness::discover_cases`) to restart.
#[derive(Debug)]
pub struct CaseIter {
    dir: PathBuf,
    entries: fs::ReadDir,
    extensions: Vec<String>,
}

impl CaseIter {
    pub fn new(dir: &Path, extensions: &[String]) -> Result<Self, HarnessError> {
        let entries = fs::read_dir(dir).map_err(|source| HarnessError::Scan {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
            entries,
            extensions: extensions.to_vec(),
        })
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    fn scan_error(&self, source: io::Error) -> HarnessError {
        HarnessError::Scan {
            path: self.dir.clone(),
            source,
        }
    }
}

impl Iterator for CaseIter {
    type Item = Result<TestCase, HarnessError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(self.scan_error(e))),
            };
            let path = entry.path();
            if !self.matches(&path) || !path.is_file() {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::warn!("Skipping non UTF-8 test input: {}", path.display());
                continue;
            };

            return Some(TestCase::load(&self.dir, &file_name).map_err(|source| HarnessError::Scan {
                path: self.dir.join(format!("{}{FLAGS_SUFFIX}", stem_of(&file_name))),
                source,
            }));
        }
    }
}

fn stem_of(file_name: &str) -> &str {
    Path::new(file_name).file_stem().and_then(OsStr::to_str).unwrap_or(file_name)
}
