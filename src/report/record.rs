use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use sha1::{Digest, Sha1};

use crate::discovery::orchestrator::DiscoveryOutcome;
use crate::discovery::run::RunSummary;
use crate::field::field_model::FieldDescriptor;

// ============================================================================
// Persisted discovery record
// ============================================================================

/// JSON record written for each discovered form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRecord {
    /// URL the run was started from
    pub url: String,

    /// URL of the page the form lives on (after redirects)
    pub page_url: String,

    pub page_title: String,

    /// RFC 3339 capture time
    pub timestamp: String,

    pub form_inputs: Vec<FieldDescriptor>,

    pub summary: RunSummary,
}

impl FormRecord {
    pub fn new(url: &str, page_url: &str, page_title: &str, outcome: DiscoveryOutcome) -> Self {
        Self {
            url: url.to_string(),
            page_url: page_url.to_string(),
            page_title: page_title.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            form_inputs: outcome.fields,
            summary: outcome.summary,
        }
    }
}

/// First 12 hex chars of the SHA-1 of `url`; stable across runs.
pub fn url_fingerprint(url: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(url.trim().as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..12].to_string()
}

/// `form_<fingerprint>_<unix millis>.json`, with `_<n>` before the extension
/// for the n-th retry after a name clash.
pub fn record_filename(url: &str, unix_millis: i64, attempt: u32) -> String {
    match attempt {
        0 => format!("form_{}_{}.json", url_fingerprint(url), unix_millis),
        n => format!("form_{}_{}_{}.json", url_fingerprint(url), unix_millis, n),
    }
}

/// Write `record` as pretty JSON under `dir`, creating it if needed.
///
/// Never overwrites an earlier record of the same URL.
pub fn save_record(record: &FormRecord, dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(record)?;
    let millis = Utc::now().timestamp_millis();

    let mut attempt = 0;
    loop {
        let path = dir.join(record_filename(&record.url, millis, attempt));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(json.as_bytes())?;
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e.into()),
        }
    }
}
