//! Scan command implementation
//!
//! This module implements the `scan` command: open the camera, capture one
//! frame, send it for analysis and record the report in history.

use super::show::print_entry;
use crate::adapters::camera::StillImageCamera;
use crate::adapters::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::adapters::vision::GeminiAnalyzer;
use crate::config::{load_config, GlossaConfig};
use crate::core::history::HistoryStore;
use crate::core::scan::progress::TICK_INTERVAL;
use crate::core::scan::{AnalysisProgress, AnalysisResponse, Completion, ScanController, ScanSettings};
use crate::domain::{FacingMode, GlossaError, Language};
use crate::log_error_with_context;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Capture from this JPEG instead of the configured camera images
    #[arg(short, long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Camera to use (front or back)
    #[arg(long)]
    pub facing: Option<FacingMode>,

    /// Report language (hi or en)
    #[arg(long)]
    pub language: Option<Language>,

    /// Analyze without saving the report to history
    #[arg(long)]
    pub dry_run: bool,
}

impl ScanArgs {
    /// Execute the scan command
    pub async fn execute(
        &self,
        config_path: &str,
        mut shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting scan command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };
        self.apply_overrides(&mut config);

        let analyzer = match GeminiAnalyzer::new(&config.analysis) {
            Ok(a) => a,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create analyzer");
                eprintln!("{e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if self.dry_run {
            tracing::info!("Dry run mode enabled - history will not be saved");
            println!("🔍 DRY RUN MODE - The report will not be saved to history");
            println!();
        }

        let history = self.open_history(&config);
        let camera = Arc::new(StillImageCamera::from_config(&config.camera));
        let mut controller = ScanController::new(
            camera,
            Arc::new(analyzer),
            history,
            ScanSettings::from_config(&config),
        );

        println!("📷 Opening {} camera...", controller.settings().facing);
        if controller.start_scan().await? != Completion::Applied {
            eprintln!(
                "❌ {}",
                controller.last_error().unwrap_or("Camera could not be started")
            );
            return Ok(3); // Device error exit code
        }

        if *shutdown_signal.borrow() {
            controller.cancel_scan()?;
            return Ok(abandoned());
        }

        let request = match controller.capture().await {
            Ok(r) => r,
            Err(e @ GlossaError::Device(_)) => {
                eprintln!("❌ {e}");
                return Ok(3); // Device error exit code
            }
            Err(e) => return Err(e.into()),
        };

        if *shutdown_signal.borrow() {
            controller.abandon_analysis()?;
            return Ok(abandoned());
        }

        println!(
            "🚀 Analyzing with {} ({})...",
            controller.analyzer().model(),
            request.language().display_name()
        );

        let generation = request.generation();
        let analyzer = controller.analyzer();
        let analysis = analyzer.analyze(request.image(), request.language());
        tokio::pin!(analysis);

        let mut progress = AnalysisProgress::new();
        let mut ticker = tokio::time::interval(TICK_INTERVAL);

        let mut signal_open = true;
        let outcome = loop {
            tokio::select! {
                outcome = &mut analysis => break Some(outcome),
                _ = ticker.tick() => {
                    print!("\r   ⏳ {:>3.0}%", progress.tick());
                    let _ = std::io::stdout().flush();
                }
                changed = shutdown_signal.changed(), if signal_open => match changed {
                    Ok(()) if *shutdown_signal.borrow() => break None,
                    Ok(()) => {}
                    // Sender gone; no signal can arrive any more
                    Err(_) => signal_open = false,
                },
            }
        };

        let Some(outcome) = outcome else {
            controller.abandon_analysis()?;
            println!();
            return Ok(abandoned());
        };

        progress.complete();
        println!("\r   ✅ {:>3.0}%", progress.percent());
        println!();

        match controller.complete_analysis(AnalysisResponse::new(generation, outcome)) {
            Ok(Completion::Applied) => {
                if let Some(entry) = controller.displayed_entry() {
                    print_entry(entry);
                }
                Ok(0)
            }
            Ok(_) => {
                eprintln!(
                    "❌ {}",
                    controller
                        .last_error()
                        .unwrap_or("AI analysis failed. Try again with a clearer photo.")
                );
                Ok(4) // Service error exit code
            }
            Err(e) => {
                log_error_with_context!(&e, "Failed to save report");
                eprintln!("❌ Failed to save report: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    fn apply_overrides(&self, config: &mut GlossaConfig) {
        if let Some(image) = &self.image {
            tracing::info!(image = %image.display(), "Capturing from image given on the command line");
            config.camera.front_image = Some(image.clone());
            config.camera.back_image = Some(image.clone());
        }

        if let Some(facing) = self.facing {
            tracing::info!(facing = %facing, "Overriding camera facing from CLI");
            config.camera.facing = facing;
        }

        if let Some(language) = self.language {
            tracing::info!(language = %language, "Overriding report language from CLI");
            config.application.language = language;
        }
    }

    /// History backed by disk, or by a scratch copy of it in dry-run mode
    ///
    /// An unreadable history starts the scratch copy empty, as loading does.
    fn open_history(&self, config: &GlossaConfig) -> HistoryStore {
        let key = config.history.storage_key.clone();
        let disk = FileStore::new(config.history.data_dir.clone());

        if !self.dry_run {
            return HistoryStore::load(Arc::new(disk), key);
        }

        let stored = disk.read(&key).unwrap_or_else(|e| {
            tracing::warn!(key = %key, error = %e, "Discarding unreadable history for dry run");
            None
        });
        let scratch = match stored {
            Some(bytes) => MemoryStore::with_value(key.clone(), bytes),
            None => MemoryStore::new(),
        };
        HistoryStore::load(Arc::new(scratch), key)
    }
}

fn abandoned() -> i32 {
    println!("⚠️  Scan abandoned. Nothing was saved.");
    130 // SIGINT exit code (standard Unix convention)
}
