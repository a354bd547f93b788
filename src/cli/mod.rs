//! Command-line interface

use crate::data::SeriesFrame;
use crate::io;
use crate::tracking::{JsonlSink, MetricsSink};
use crate::train::{train_loop, Hyperparameters, RunOptions};
use crate::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pronosticar", version, about = "Sequence forecasting trainer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Train a model from a hyperparameter file and a series frame
    Train {
        /// Hyperparameter bundle (YAML)
        config: PathBuf,

        /// Series frame with split membership columns (JSON)
        #[arg(long)]
        data: PathBuf,

        /// Run identifier, defaults to a UTC timestamp
        #[arg(long)]
        run_id: Option<String>,

        /// Fold validation rows into training and evaluate on test rows
        #[arg(long)]
        merge_train_val: bool,

        /// Epochs without improvement before stopping
        #[arg(long, default_value_t = 10)]
        patience: usize,

        /// Disable metric tracking
        #[arg(long)]
        no_track: bool,

        /// Metrics file, relative paths resolve under the run directory
        #[arg(long, default_value = "metrics.jsonl")]
        metrics_file: PathBuf,
    },

    /// Check a hyperparameter file without training
    Validate {
        /// Hyperparameter bundle (YAML)
        config: PathBuf,
    },

    /// Summarize the checkpoint in a run directory
    Info {
        /// Run directory containing model.json
        run_dir: PathBuf,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Train {
            config,
            data,
            run_id,
            merge_train_val,
            patience,
            no_track,
            metrics_file,
        } => {
            let hp = Hyperparameters::from_yaml_file(&config)?;
            let frame = SeriesFrame::from_json_file(&data)?;

            let run_id = run_id
                .unwrap_or_else(|| chrono::Utc::now().format("%Y%m%d-%H%M%S").to_string());
            let opts = RunOptions { run_id, merge_train_val, patience };

            let best = if no_track {
                train_loop(&hp, &frame, &opts, None)?
            } else {
                let path = if metrics_file.is_absolute() {
                    metrics_file
                } else {
                    hp.save_path.join(&opts.run_id).join(metrics_file)
                };
                let mut sink = JsonlSink::open(path).map_err(crate::Error::Tracking)?;
                train_loop(&hp, &frame, &opts, Some(&mut sink as &mut dyn MetricsSink))?
            };

            println!("run {} finished: best_val_loss={best:.6}", opts.run_id);
            Ok(())
        }

        Command::Validate { config } => {
            let hp = Hyperparameters::from_yaml_file(&config)?;
            println!(
                "ok: {} epochs, batch_size {}, lr {} -> {}",
                hp.epochs, hp.batch_size, hp.learning_rate, hp.min_lr
            );
            Ok(())
        }

        Command::Info { run_dir } => {
            let state = io::load_model(run_dir.join("model.json"))?;
            println!("format v{}", state.format_version);
            println!("past_len {}, horizon {}", state.past_len, state.horizon);
            for p in &state.params {
                println!("  {}: {} values", p.name, p.values.len());
            }
            Ok(())
        }
    }
}
