// ============================================================
// CLI - Commands and Arguments
// ============================================================
// Defines the three subcommands: `train`, `evaluate` and
// `evaluate-fees`, with all their configurable flags. clap's derive
// macros generate help text, missing-argument errors and the string
// to usize/f64 conversions.

use clap::{Args, Subcommand};

use crate::application::evaluate_use_case::EvalConfig;
use crate::application::train_use_case::TrainConfig;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the frame classifier on a gold-annotated corpus
    Train(TrainArgs),

    /// Score a trained classifier's frame labels against gold files
    Evaluate(EvalArgs),

    /// Score the rule-based trigger identifier against gold files
    EvaluateFees(FeeArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Training sentence file, one whitespace-tokenized sentence per line
    #[arg(long, default_value = "data/experiments/xp_001/data/train.sentences")]
    pub train_sentences: String,

    /// Training annotation file, tab-separated frame elements
    #[arg(long, default_value = "data/experiments/xp_001/data/train.frame.elements")]
    pub train_elements: String,

    /// Development sentence file, scored after every epoch
    #[arg(long, default_value = "data/experiments/xp_001/data/dev.sentences")]
    pub dev_sentences: String,

    /// Development annotation file
    #[arg(long, default_value = "data/experiments/xp_001/data/dev.frames")]
    pub dev_elements: String,

    /// Directory for checkpoints, vocabularies and the metrics CSV
    #[arg(long, default_value = "data/models")]
    pub model_dir: String,

    /// Hidden layer widths, comma separated
    #[arg(long, value_delimiter = ',', default_value = "512,256")]
    pub hidden_sizes: Vec<usize>,

    /// Number of annotations processed together in one forward pass
    #[arg(long, default_value_t = 10)]
    pub batch_size: usize,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 5)]
    pub num_epochs: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 0.001)]
    pub learning_rate: f64,

    /// Width of each learned token embedding
    #[arg(long, default_value_t = 300)]
    pub embedding_size: usize,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            train_sentences: a.train_sentences,
            train_elements:  a.train_elements,
            dev_sentences:   a.dev_sentences,
            dev_elements:    a.dev_elements,
            model_dir:       a.model_dir,
            hidden_sizes:    a.hidden_sizes,
            batch_size:      a.batch_size,
            num_epochs:      a.num_epochs,
            learning_rate:   a.learning_rate,
            embedding_size:  a.embedding_size,
        }
    }
}

/// All arguments for the `evaluate` command
#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Sentence files to score, paired positionally with --elements
    #[arg(long, required = true, num_args = 1..)]
    pub sentences: Vec<String>,

    /// Annotation files to score, one per --sentences entry
    #[arg(long, required = true, num_args = 1..)]
    pub elements: Vec<String>,

    /// Directory where the checkpoint was saved during training
    #[arg(long, default_value = "data/models")]
    pub model_dir: String,

    /// Number of annotations per forward pass
    #[arg(long, default_value_t = 10)]
    pub batch_size: usize,
}

impl EvalArgs {
    /// Pairs the sentence and annotation file lists. Lengths must
    /// match; clap cannot express that constraint, so it is checked
    /// here.
    pub fn into_config(self) -> anyhow::Result<EvalConfig> {
        if self.sentences.len() != self.elements.len() {
            anyhow::bail!(
                "got {} sentence files but {} annotation files",
                self.sentences.len(),
                self.elements.len(),
            );
        }
        Ok(EvalConfig {
            eval_files: self.sentences.into_iter().zip(self.elements).collect(),
            model_dir:  self.model_dir,
            batch_size: self.batch_size,
        })
    }
}

/// All arguments for the `evaluate-fees` command
#[derive(Args, Debug)]
pub struct FeeArgs {
    /// Sentence file with gold trigger annotations
    #[arg(long)]
    pub sentences: String,

    /// Annotation file with gold trigger annotations
    #[arg(long)]
    pub elements: String,
}

// ─── Unit Tests ──────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_args_pairing_mismatch_is_rejected() {
        let args = EvalArgs {
            sentences:  vec!["a.sentences".to_string(), "b.sentences".to_string()],
            elements:   vec!["a.frames".to_string()],
            model_dir:  "data/models".to_string(),
            batch_size: 10,
        };
        assert!(args.into_config().is_err());
    }

    #[test]
    fn test_eval_args_pairing_preserves_order() {
        let args = EvalArgs {
            sentences:  vec!["a.sentences".to_string(), "b.sentences".to_string()],
            elements:   vec!["a.frames".to_string(), "b.frames".to_string()],
            model_dir:  "data/models".to_string(),
            batch_size: 10,
        };
        let cfg = args.into_config().unwrap();
        assert_eq!(cfg.eval_files[0].0, "a.sentences");
        assert_eq!(cfg.eval_files[0].1, "a.frames");
        assert_eq!(cfg.eval_files[1].0, "b.sentences");
        assert_eq!(cfg.eval_files[1].1, "b.frames");
    }

    #[test]
    fn test_train_args_convert_to_config() {
        let args = TrainArgs {
            train_sentences: "t.sentences".to_string(),
            train_elements:  "t.frames".to_string(),
            dev_sentences:   "d.sentences".to_string(),
            dev_elements:    "d.frames".to_string(),
            model_dir:       "out".to_string(),
            hidden_sizes:    vec![64, 32],
            batch_size:      4,
            num_epochs:      1,
            learning_rate:   0.01,
            embedding_size:  16,
        };
        let cfg: crate::application::train_use_case::TrainConfig = args.into();
        assert_eq!(cfg.hidden_sizes, vec![64, 32]);
        assert_eq!(cfg.model_dir, "out");
    }
}
