// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `heal`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::heal_use_case::HealConfig;
use crate::application::train_use_case::TrainConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train (or load) the classifier and print an evaluation
    Train(TrainArgs),

    /// Reconcile catalog labels against the trained model
    Heal(HealArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Path to the catalog JSON file
    #[arg(long, default_value = "data/catalog.json")]
    pub catalog: String,

    /// Directory where the model snapshot is stored
    #[arg(long, default_value = "model")]
    pub model_dir: String,

    /// Number of hidden units in the network
    #[arg(long, default_value_t = 8)]
    pub hidden_size: usize,

    /// How fast the model learns — too high causes instability,
    /// too low causes slow convergence
    #[arg(long, default_value_t = 0.3)]
    pub lr: f64,

    /// Number of full passes over the training corpus
    #[arg(long, default_value_t = 500)]
    pub iterations: usize,

    /// Seed for weight initialisation — same seed, same model
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Minimum acceptable evaluation accuracy (percent).
    /// Below this the model is retrained exactly once.
    #[arg(long, default_value_t = 90.0)]
    pub accuracy_threshold: f64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            catalog_path:       a.catalog,
            model_dir:          a.model_dir,
            hidden_size:        a.hidden_size,
            learning_rate:      a.lr,
            iterations:         a.iterations,
            seed:               a.seed,
            accuracy_threshold: a.accuracy_threshold,
        }
    }
}

/// All arguments for the `heal` command
#[derive(Args, Debug)]
pub struct HealArgs {
    /// Path to the catalog JSON file
    #[arg(long, default_value = "data/catalog.json")]
    pub catalog: String,

    /// Directory where the model snapshot is stored
    #[arg(long, default_value = "model")]
    pub model_dir: String,

    /// Minimum prediction confidence before a label is fixed
    /// automatically instead of flagged for review
    #[arg(long, default_value_t = 0.75)]
    pub confidence_threshold: f64,

    /// Compute and report all decisions without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress per-item logs (the final summary still prints)
    #[arg(long)]
    pub quiet: bool,
}

impl From<HealArgs> for HealConfig {
    fn from(a: HealArgs) -> Self {
        HealConfig {
            catalog_path:         a.catalog,
            model_dir:            a.model_dir,
            confidence_threshold: a.confidence_threshold,
            dry_run:              a.dry_run,
            quiet:                a.quiet,
        }
    }
}
