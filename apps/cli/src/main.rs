//! Kiln CLI - versioned training and inference around an external detector
//! toolchain.
//!
//! The `kiln` command wraps the external `yolo` and `dagshub` CLIs with
//! versioned artifact bookkeeping: each training run lands in a fresh
//! `{model}_v{N}` directory, inference resolves weights by version, and
//! dataset utilities merge/stage folder trees for remote upload.

mod backends;
mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "kiln",
    author,
    version,
    about = "Versioned detector training and inference",
    long_about = "Kiln orchestrates an external detector toolchain with automatic output \
versioning: training runs are organized into {model}_vN artifact directories, inference \
resolves weights by version, and dataset folders can be merged and uploaded to a remote \
data-versioning service."
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a versioned training attempt
    ///
    /// Allocates the next free model version, runs the external trainer
    /// into a fresh run folder, and archives the results. A failed run
    /// is preserved on disk for manual resumption.
    Train {
        /// Dataset descriptor passed to the trainer (e.g. data.yaml)
        #[arg(long)]
        data: PathBuf,

        /// Project name grouping the model versions
        #[arg(long)]
        project: String,

        /// Base model name (versions become {model}_vN)
        #[arg(long)]
        model: String,

        /// Base output path holding the project tree
        #[arg(long, default_value = ".")]
        output: PathBuf,

        /// Extra key=value options forwarded to the trainer
        #[arg(long = "opt", value_name = "KEY=VALUE")]
        opts: Vec<String>,
    },

    /// Run inference with a trained model version
    Predict {
        /// Input image, video, or directory
        source: PathBuf,

        /// Project name
        #[arg(long)]
        project: String,

        /// Base model name
        #[arg(long)]
        model: String,

        /// Model version number
        #[arg(long)]
        version: u32,

        /// Output folder name under INFERENCE/ for directory inputs
        #[arg(long, default_value = "predictions")]
        save_dir: String,

        /// Base output path holding the project tree
        #[arg(long, default_value = ".")]
        output: PathBuf,

        /// Disable persisting annotated outputs (directory inputs only)
        #[arg(long)]
        no_save: bool,

        /// Extra key=value options forwarded to the predictor
        #[arg(long = "opt", value_name = "KEY=VALUE")]
        opts: Vec<String>,
    },

    /// List trained versions of a model
    Models {
        /// Project name
        #[arg(long)]
        project: String,

        /// Base model name
        #[arg(long)]
        model: String,

        /// Base output path holding the project tree
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },

    /// Merge one dataset folder tree into another
    ///
    /// Copies every file in {train,valid,test}/{images,labels} from the
    /// source tree into the destination, overwriting same-named files.
    Merge {
        /// Source dataset root
        src: PathBuf,

        /// Destination dataset root
        dest: PathBuf,
    },

    /// Stage directories and upload them to the remote data registry
    Upload {
        /// Source directories to include
        #[arg(required = true)]
        dirs: Vec<PathBuf>,

        /// Remote repository, as username/repo_name
        #[arg(long)]
        repo: String,

        /// Remote datasource name
        #[arg(long, default_value = "my-datasource")]
        datasource: String,

        /// Local staging folder
        #[arg(long, default_value = "data")]
        staging: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber =
        FmtSubscriber::builder().with_max_level(level).without_time().with_target(false).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Train { data, project, model, output, opts } => {
            commands::train::execute(data, &project, &model, output, &opts)
        }
        Command::Predict { source, project, model, version, save_dir, output, no_save, opts } => {
            commands::predict::execute(
                source, &project, &model, version, &save_dir, output, no_save, &opts,
            )
        }
        Command::Models { project, model, output } => {
            commands::models::execute(&project, &model, &output)
        }
        Command::Merge { src, dest } => commands::merge::execute(&src, &dest),
        Command::Upload { dirs, repo, datasource, staging } => {
            commands::upload::execute(&dirs, &repo, &datasource, staging)
        }
    }
}
