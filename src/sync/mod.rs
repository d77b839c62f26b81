pub mod output;
pub mod scanner;
pub mod stats;
pub mod transfer;

use crate::error::{Result, SyncError};
use crate::exclude::ExcludeSet;
use indicatif::{ProgressBar, ProgressStyle};
use scanner::{file_identity, Scanner};
use stats::{Statistic, SyncReport};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use transfer::{CopyOutcome, DeleteOutcome, Transferrer};

/// Extensions synced on every run, in processing order
pub const TRACKED_EXTENSIONS: [&str; 3] = ["dll", "pdb", "deps.json"];

pub struct SyncEngine {
    dry_run: bool,
    quiet: bool,
}

impl SyncEngine {
    pub fn new(dry_run: bool, quiet: bool) -> Self {
        Self { dry_run, quiet }
    }

    /// Reconcile `destination` with the build outputs in `source`
    ///
    /// Runs one pass per tracked extension. The first filesystem error aborts
    /// the remaining passes.
    pub fn sync(
        &self,
        source: &Path,
        destination: &Path,
        pattern: &str,
        excludes: &ExcludeSet,
    ) -> Result<SyncReport> {
        tracing::info!(
            "Starting sync: {} → {} (pattern '{}', {} exclude rule(s))",
            source.display(),
            destination.display(),
            pattern,
            excludes.len()
        );

        if excludes.is_empty() {
            tracing::debug!("No exclude rules configured");
        }

        let pb = self.progress_bar();
        let mut report = SyncReport::default();

        for extension in TRACKED_EXTENSIONS {
            pb.set_message(format!("{}: scanning", extension));
            let stat = self.sync_extension(source, destination, pattern, excludes, extension)?;
            pb.set_message(stat.to_string());
            pb.inc(1);
            report.extensions.push(stat);
        }

        let merged = report.merged();
        pb.finish_with_message(format!("Sync complete: {}", merged.message()));
        tracing::info!("Sync complete: {}", merged.message());

        Ok(report)
    }

    fn sync_extension(
        &self,
        source: &Path,
        destination: &Path,
        pattern: &str,
        excludes: &ExcludeSet,
        extension: &str,
    ) -> Result<Statistic> {
        let mut stat = Statistic::new(extension);

        if !self.dry_run {
            fs::create_dir_all(destination).map_err(|e| SyncError::WriteError {
                path: destination.to_path_buf(),
                extension: extension.to_string(),
                source: e,
            })?;
        }

        let candidates = Scanner::new(source).scan(pattern, extension)?;
        if candidates.is_empty() {
            // Never prune when the build produced nothing for this extension
            tracing::info!("{}: no source files match '{}.{}', skipping", extension, pattern, extension);
            return Ok(stat);
        }

        let mut kept = HashSet::new();
        let mut source_files = Vec::new();
        for candidate in candidates {
            if excludes.is_excluded(&candidate.file_name, extension) {
                tracing::debug!("Excluded: {}", candidate.file_name);
                stat.skipped += 1;
            } else {
                kept.insert(candidate.file_name.clone());
                source_files.push(candidate);
            }
        }

        let transferrer = Transferrer::new(extension, self.dry_run);

        for file in &source_files {
            let dest_path = destination.join(&file.file_name);
            match transferrer.copy_if_changed(&file.path, &dest_path)? {
                CopyOutcome::Unchanged => {
                    tracing::trace!("Unchanged: {}", file.file_name);
                    stat.skipped += 1;
                }
                outcome => {
                    tracing::debug!("{:?}: {}", outcome, dest_path.display());
                    stat.copied += 1;
                }
            }
        }

        // Case-folding filesystems can list a kept file under another spelling
        let kept_ids: HashSet<_> = source_files
            .iter()
            .filter_map(|f| file_identity(&destination.join(&f.file_name)))
            .collect();

        let existing = Scanner::new(destination).scan("*", extension)?;
        for garbage in existing.iter().filter(|f| !kept.contains(&f.file_name)) {
            if file_identity(&garbage.path).is_some_and(|id| kept_ids.contains(&id)) {
                tracing::debug!("Same file as a kept entry: {}", garbage.path.display());
                continue;
            }
            match transferrer.delete(&garbage.path)? {
                DeleteOutcome::Deleted => {
                    tracing::debug!("Deleted: {}", garbage.path.display());
                    stat.deleted += 1;
                }
                DeleteOutcome::AlreadyGone => {
                    tracing::trace!("Already gone: {}", garbage.path.display());
                }
            }
        }

        tracing::info!("{} ({} file(s) processed)", stat, stat.total());
        Ok(stat)
    }

    fn progress_bar(&self) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(TRACKED_EXTENSIONS.len() as u64);
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{pos}/{len}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb
    }
}
