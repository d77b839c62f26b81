mod cli;
mod config;
mod error;
mod exclude;
mod sync;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use colored::Colorize;
use config::Settings;
use exclude::ExcludeSet;
use std::path::{Path, PathBuf};
use sync::output::SyncEvent;
use sync::SyncEngine;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().as_str()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match cli.command {
        Command::Init { force } => init(&cli.settings, force, cli.quiet),
        Command::Validate => validate(&cli.settings, cli.quiet),
        Command::Run { dry_run, json } => run(&cli.settings, dry_run, json, cli.quiet),
    }
}

fn init(settings_path: &Path, force: bool, quiet: bool) -> Result<()> {
    if settings_path.exists() && !force {
        anyhow::bail!(
            "Settings file already exists: {} (use --force to overwrite)",
            settings_path.display()
        );
    }

    Settings::default()
        .save(settings_path)
        .with_context(|| format!("Failed to write {}", settings_path.display()))?;

    if !quiet {
        println!("{} {}", "✓ Created".green().bold(), settings_path.display());
    }
    Ok(())
}

fn load_validated(settings_path: &Path) -> Result<(Settings, PathBuf)> {
    let settings = Settings::load(settings_path)?;
    let root = Settings::project_root(settings_path);
    settings.validate(&root)?;
    Ok((settings, root))
}

fn validate(settings_path: &Path, quiet: bool) -> Result<()> {
    let (settings, root) = load_validated(settings_path)?;

    if !quiet {
        println!("{}", "✓ Settings are valid".green().bold());
        println!("  Source:          {}", settings.source_dir(&root).display());
        println!("  Destination:     {}", settings.destination_dir(&root).display());
        println!("  Pattern:         {}", settings.pattern);
        println!("  Excludes:        {}", settings.excludes.len());
        println!("  Exclude folders: {}", settings.exclude_folders.len());
    }
    Ok(())
}

fn run(settings_path: &Path, dry_run: bool, json: bool, quiet: bool) -> Result<()> {
    let (settings, root) = load_validated(settings_path)?;
    let source = settings.source_dir(&root);
    let destination = settings.destination_dir(&root);

    let resolved = exclude::resolve(&settings.excludes, &settings.exclude_folders, &root)?;
    let excludes = ExcludeSet::parse(resolved.as_slice())?;

    if json {
        SyncEvent::Start {
            source: source.clone(),
            destination: destination.clone(),
            pattern: settings.pattern.clone(),
            dry_run,
        }
        .emit();
    } else if !quiet {
        println!("buildsync v{}", env!("CARGO_PKG_VERSION"));
        println!("Syncing {} → {}", source.display(), destination.display());
        if dry_run {
            println!("Mode: Dry-run (no changes will be made)");
        }
        println!();
    }

    let engine = SyncEngine::new(dry_run, quiet || json);
    let report = engine.sync(&source, &destination, &settings.pattern, &excludes)?;
    let merged = report.merged();

    if json {
        for stat in &report.extensions {
            SyncEvent::extension(stat).emit();
        }
        SyncEvent::summary(&merged).emit();
        return Ok(());
    }

    if !quiet {
        if dry_run {
            println!("\n{}\n", "✓ Dry-run complete (no changes made)".green().bold());
        } else {
            println!("\n{}\n", "✓ Sync complete".green().bold());
        }

        for stat in &report.extensions {
            println!(
                "  {:<10} copied {}, skipped {}, deleted {}",
                format!("{}:", stat.extension),
                stat.copied.to_string().green(),
                stat.skipped.to_string().bright_black(),
                stat.deleted.to_string().red()
            );
        }
        println!();
        println!("  {}", merged.message().cyan());
    }

    Ok(())
}
