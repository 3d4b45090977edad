// ============================================================
// CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with clap. All
// business logic is delegated to the application layer.
//
// Three commands are supported:
//   1. `train`         - trains the frame classifier
//   2. `evaluate`      - scores a checkpoint against gold files
//   3. `evaluate-fees` - scores the rule-based trigger identifier

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EvalArgs, FeeArgs, TrainArgs};

/// The main CLI struct; clap reads the fields and generates the
/// argument parsing code via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "framenet-id",
    version = "0.1.0",
    about = "Train and evaluate a frame identification model on gold-annotated corpora."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// The CLI layer only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => Self::run_train(args),
            Commands::Evaluate(args) => Self::run_evaluate(args),
            Commands::EvaluateFees(args) => Self::run_evaluate_fees(args),
        }
    }

    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on '{}'", args.train_sentences);

        TrainUseCase::new(args.into()).execute()?;

        println!("Training complete. Checkpoint saved.");
        Ok(())
    }

    fn run_evaluate(args: EvalArgs) -> Result<()> {
        use crate::application::evaluate_use_case::evaluate_frame_identification;

        let reports = evaluate_frame_identification(&args.into_config()?)?;
        for report in reports {
            println!(
                "{}: precision={:.4} recall={:.4} f1={:.4} (tp={} fp={} fn={})",
                report.file, report.precision, report.recall, report.f1,
                report.tp, report.fp, report.fn_,
            );
        }
        Ok(())
    }

    fn run_evaluate_fees(args: FeeArgs) -> Result<()> {
        use crate::application::evaluate_use_case::evaluate_fee_identification;
        use crate::data::fee::StaticFeeIdentifier;

        let report =
            evaluate_fee_identification(&args.sentences, &args.elements, &StaticFeeIdentifier)?;
        println!(
            "{}: precision={:.4} recall={:.4} f1={:.4} (tp={} fp={} fn={})",
            report.file, report.precision, report.recall, report.f1,
            report.tp, report.fp, report.fn_,
        );
        Ok(())
    }
}
