use super::stats::Statistic;
use serde::Serialize;
use std::path::PathBuf;

/// JSON output mode for machine-readable sync events
/// Uses NDJSON format (newline-delimited JSON)
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncEvent {
    Start {
        source: PathBuf,
        destination: PathBuf,
        pattern: String,
        dry_run: bool,
    },
    Extension {
        extension: String,
        copied: usize,
        skipped: usize,
        deleted: usize,
    },
    Summary {
        copied: usize,
        skipped: usize,
        deleted: usize,
        message: String,
    },
}

impl SyncEvent {
    pub fn extension(stat: &Statistic) -> Self {
        Self::Extension {
            extension: stat.extension.clone(),
            copied: stat.copied,
            skipped: stat.skipped,
            deleted: stat.deleted,
        }
    }

    pub fn summary(merged: &Statistic) -> Self {
        Self::Summary {
            copied: merged.copied,
            skipped: merged.skipped,
            deleted: merged.deleted,
            message: merged.message(),
        }
    }

    /// Emit this event as JSON to stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }
}
