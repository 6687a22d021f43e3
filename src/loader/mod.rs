/*!
 * Workload Loader
 * Reads the resource budget header and process descriptors
 *
 * Invalid descriptor lines are skipped and reported; only header problems
 * are fatal.
 */

mod header;
mod validation;

use crate::core::errors::{ConfigError, DescriptorError};
use crate::core::limits::HEADER_LINES;
use crate::core::types::{Pid, Units};
use crate::process::ProcessDescriptor;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

pub use header::Header;

/// A descriptor line that was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedLine {
    /// 1-based line number in the input
    pub line: usize,
    pub text: String,
    pub error: DescriptorError,
}

/// Rejections collected while loading
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub rejected: Vec<RejectedLine>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Validated input ready for the scheduler
#[derive(Debug, Clone)]
pub struct LoadedWorkload {
    pub header: Header,
    /// Accepted descriptors in input order, pids unique
    pub descriptors: Vec<ProcessDescriptor>,
    pub report: LoadReport,
}

impl LoadedWorkload {
    /// Total resource units available to the scheduler
    #[inline]
    pub fn budget(&self) -> Units {
        self.header.budget()
    }
}

/// Load a workload file from disk
pub fn load_file(path: impl AsRef<Path>) -> Result<LoadedWorkload, ConfigError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    info!(path = %path.display(), "Loading workload");
    load_reader(BufReader::new(file), &path.display().to_string())
}

/// Load a workload from in-memory text
pub fn load_str(input: &str) -> Result<LoadedWorkload, ConfigError> {
    load_reader(input.as_bytes(), "<memory>")
}

fn load_reader<R: BufRead>(reader: R, source_name: &str) -> Result<LoadedWorkload, ConfigError> {
    let mut lines = reader.split(b'\n').enumerate();

    let mut header_lines = Vec::with_capacity(HEADER_LINES);
    for _ in 0..HEADER_LINES {
        match lines.next() {
            Some((_, Ok(bytes))) => header_lines.push(decode_line(bytes)),
            Some((_, Err(source))) => return Err(io_error(source_name, source)),
            None => {
                return Err(ConfigError::MalformedHeader {
                    line: header_lines.len() + 1,
                    reason: "missing header line".to_string(),
                })
            }
        }
    }
    let header = Header::parse(&header_lines[0], &header_lines[1])?;

    let mut descriptors = Vec::new();
    let mut report = LoadReport::default();
    let mut seen: AHashSet<Pid> = AHashSet::new();

    for (index, line) in lines {
        let text = decode_line(line.map_err(|source| io_error(source_name, source))?);
        let line_no = index + 1;
        if text.trim().is_empty() {
            continue;
        }

        let result = validation::parse_descriptor(&text).and_then(|descriptor| {
            if seen.insert(descriptor.pid) {
                Ok(descriptor)
            } else {
                Err(DescriptorError::DuplicatePid(descriptor.pid))
            }
        });

        match result {
            Ok(descriptor) => descriptors.push(descriptor),
            Err(error) => {
                warn!(line = line_no, text = %text, error = %error, "Skipping invalid descriptor");
                report.rejected.push(RejectedLine {
                    line: line_no,
                    text,
                    error,
                });
            }
        }
    }

    info!(
        processors = header.processors,
        threads_per_processor = header.threads_per_processor,
        budget = header.budget(),
        accepted = descriptors.len(),
        rejected = report.rejected.len(),
        "Workload loaded"
    );

    Ok(LoadedWorkload {
        header,
        descriptors,
        report,
    })
}

/// Decode one raw line, replacing invalid UTF-8 instead of failing
///
/// Only the opaque `pc` field may legitimately hold such bytes; a numeric
/// field containing them fails validation like any other non-digit.
fn decode_line(bytes: Vec<u8>) -> String {
    let mut text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };
    if text.ends_with('\r') {
        text.pop();
    }
    text
}

fn io_error(source_name: &str, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: source_name.to_string(),
        source,
    }
}
