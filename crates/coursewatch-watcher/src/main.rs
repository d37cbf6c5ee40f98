//! Catalog watcher binary.
//!
//! Polls a course catalog and reports offering changes:
//!
//!   coursewatch init                  # capture the first snapshot
//!   coursewatch check                 # run a single cycle
//!   coursewatch watch --interval 3600 # poll forever
//!   coursewatch diff old.list new.list
//!
//! Change reports go to the log, or to a webhook when `--webhook` is set.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use coursewatch_catalog::{BannerCatalog, BannerConfig, CatalogSource, SectionFilter};
use coursewatch_diff::diff;
use coursewatch_model::Snapshot;
use coursewatch_notify::{LogNotifier, Notifier, WebhookNotifier};
use coursewatch_store::SnapshotStore;
use coursewatch_watcher::{run_cycle, CycleOutcome};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "coursewatch")]
#[command(about = "Watches a course catalog and reports offering changes")]
struct Args {
    /// Path to the snapshot file
    #[arg(short, long, default_value = "courses.list")]
    snapshot: PathBuf,

    /// Webhook URL for change reports (reports go to the log when omitted)
    #[arg(long)]
    webhook: Option<String>,

    /// Base URL of the registration self-service deployment
    #[arg(long)]
    base_url: Option<String>,

    /// Term code to search
    #[arg(long)]
    term: Option<String>,

    /// Subject code to search
    #[arg(long)]
    subject: Option<String>,

    /// Lower bound of the course-number range
    #[arg(long)]
    number_low: Option<String>,

    /// Upper bound of the course-number range
    #[arg(long)]
    number_high: Option<String>,

    /// Keep only these sections for numbers matching --filter-prefix,
    /// e.g. --filter-prefix 4 --keep-section 02
    #[arg(long)]
    filter_prefix: Option<String>,

    /// Sections kept by the filter (repeatable)
    #[arg(long)]
    keep_section: Vec<String>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Capture the catalog once and write the snapshot file
    Init {
        /// Overwrite an existing snapshot file
        #[arg(long)]
        force: bool,
    },

    /// Run a single reconciliation cycle
    Check,

    /// Run reconciliation cycles forever
    Watch {
        /// Seconds between cycles
        #[arg(long, default_value = "28800")]
        interval: u64,
    },

    /// Compare two snapshot files and print the changes
    Diff { old: PathBuf, new: PathBuf },
}

impl Args {
    fn catalog_config(&self) -> BannerConfig {
        let mut config = BannerConfig::default();
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(term) = &self.term {
            config.term = term.clone();
        }
        if let Some(subject) = &self.subject {
            config.subject = subject.clone();
        }
        if let Some(low) = &self.number_low {
            config.number_low = low.clone();
        }
        if let Some(high) = &self.number_high {
            config.number_high = high.clone();
        }
        if let Some(prefix) = &self.filter_prefix {
            config.section_filter = Some(SectionFilter {
                number_prefix: prefix.clone(),
                keep_sections: self.keep_section.clone(),
            });
        }
        config
    }

    fn notifier(&self) -> Box<dyn Notifier> {
        match &self.webhook {
            Some(url) => Box::new(WebhookNotifier::new(url.clone())),
            None => Box::new(LogNotifier),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let store = SnapshotStore::new(&args.snapshot);

    match &args.command {
        Command::Init { force } => {
            if store.exists().await && !force {
                bail!(
                    "snapshot file {} already exists (use --force to overwrite)",
                    store.path().display()
                );
            }
            let catalog = BannerCatalog::new(args.catalog_config())?;
            let snapshot = catalog.fetch().await?;
            store.save(&snapshot).await?;
            info!(
                count = snapshot.len(),
                path = %store.path().display(),
                "snapshot initialized"
            );
            Ok(ExitCode::SUCCESS)
        }

        Command::Check => {
            let catalog = BannerCatalog::new(args.catalog_config())?;
            let notifier = args.notifier();
            report(run_cycle(&catalog, &store, notifier.as_ref()).await?);
            Ok(ExitCode::SUCCESS)
        }

        Command::Watch { interval: seconds } => {
            let catalog = BannerCatalog::new(args.catalog_config())?;
            let notifier = args.notifier();
            info!(
                interval = seconds,
                path = %store.path().display(),
                "watching catalog"
            );

            let mut ticker = interval(Duration::from_secs(*seconds));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                // A failed cycle is logged and skipped; the next tick gets
                // a fresh attempt against unchanged persisted state.
                match run_cycle(&catalog, &store, notifier.as_ref()).await {
                    Ok(outcome) => report(outcome),
                    Err(err) => warn!(error = %err, "cycle failed"),
                }
            }
        }

        Command::Diff { old, new } => {
            let old = load_snapshot(old)?;
            let new = load_snapshot(new)?;
            let changes = diff(&old, &new);
            print!("{changes}");
            if changes.is_empty() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(1))
            }
        }
    }
}

fn report(outcome: CycleOutcome) {
    match outcome {
        CycleOutcome::Initialized { count } => info!(count, "snapshot initialized"),
        CycleOutcome::Unchanged => debug!("catalog unchanged"),
        CycleOutcome::Changed(changes) => info!(count = changes.len(), "changes reported"),
    }
}

fn load_snapshot(path: &PathBuf) -> Result<Snapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot file {}", path.display()))?;
    Snapshot::from_json(&text)
        .with_context(|| format!("failed to parse snapshot file {}", path.display()))
}
