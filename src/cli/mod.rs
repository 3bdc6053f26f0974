// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train` — loads-or-trains the model, evaluates it, and
//                prints smoke-test predictions
//   2. `heal`  — classifies every catalog record and applies
//                confidence-gated label corrections
//
// Exit codes: returning Err from a handler bubbles out of main
// as a non-zero exit. A healing run where some individual
// record updates failed still exits 0 — those failures are
// reported in the summary, not fatal.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, HealArgs, TrainArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "catalog-heal",
    version = "0.1.0",
    about = "Train a food/drink name classifier, then auto-heal mislabeled catalog records."
)]
pub struct Cli {
    /// The subcommand to run (train or heal)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    /// The handlers are associated functions: the args carry
    /// everything they need, so nothing borrows `self` after the
    /// command has been moved out of it.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => Self::run_train(args),
            Commands::Heal(args)  => Self::run_heal(args),
        }
    }

    /// Handles the `train` subcommand.
    /// Converts CLI args into a TrainConfig and hands off to Layer 2.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting auto-train against catalog '{}'", args.catalog);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Snapshot saved.");
        Ok(())
    }

    /// Handles the `heal` subcommand.
    /// Any unrecovered error (no trained model, unreadable
    /// catalog) propagates to a non-zero exit; per-record write
    /// failures are inside the report and do not.
    fn run_heal(args: HealArgs) -> Result<()> {
        use crate::application::heal_use_case::HealUseCase;

        let use_case = HealUseCase::new(args.into());
        let report   = use_case.execute()?;

        if report.errors > 0 {
            tracing::warn!(
                "{} record update(s) failed — see the log above",
                report.errors,
            );
        }
        Ok(())
    }
}
