// ============================================================
// Application - Evaluation Use Cases
// ============================================================
// Corpus-level scoring against gold annotation files:
//
//   evaluate_frame_identification - load the saved classifier and
//     compare its frame label per gold annotation against the gold
//     label, reporting precision/recall/F1 per file pair
//   evaluate_fee_identification - score the rule-based trigger
//     detection alone, ignoring frame labels entirely

use anyhow::Result;
use burn::data::dataloader::batcher::Batcher;
use serde::{Deserialize, Serialize};

use crate::data::batcher::FrameBatcher;
use crate::data::dataset::{gold_instances, FrameSample};
use crate::data::reader::CorpusReader;
use crate::domain::annotation::Corpus;
use crate::domain::errors::FrameError;
use crate::domain::traits::FeeIdentifier;
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::calc_f;
use crate::ml::model::FrameIdNetwork;
use crate::ml::trainer::{train_device, EvalBackend};

/// Which files to score against which saved model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    /// (sentence file, annotation file) pairs.
    pub eval_files: Vec<(String, String)>,
    pub model_dir: String,
    pub batch_size: usize,
}

/// Scores for one evaluated file pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub file: String,
    pub tp: usize,
    pub fp: usize,
    pub fn_: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl EvaluationReport {
    fn from_counts(file: impl Into<String>, tp: usize, fp: usize, fn_: usize) -> Self {
        let (precision, recall, f1) = calc_f(tp, fp, fn_);
        Self { file: file.into(), tp, fp, fn_, precision, recall, f1 }
    }
}

/// Loads the saved model and scores its frame labels against every
/// gold annotation of every evaluation file pair.
pub fn evaluate_frame_identification(cfg: &EvalConfig) -> Result<Vec<EvaluationReport>> {
    let device = train_device();
    let ckpt = CheckpointManager::new(&cfg.model_dir);

    let (tokens, frames) = ckpt.load_vocabs()?;
    let network_config = ckpt.load_network_config()?;
    let model: FrameIdNetwork<EvalBackend> = network_config.init(&device);
    let model = ckpt.load_model(model, &device)?;
    let batcher = FrameBatcher::<EvalBackend>::new(device);

    let mut reports = Vec::with_capacity(cfg.eval_files.len());

    for (sentence_file, annotation_file) in &cfg.eval_files {
        tracing::info!("Evaluating '{}'", sentence_file);

        let corpus = CorpusReader::with_paths(sentence_file, annotation_file).read_data()?;
        let instances = gold_instances(&corpus, &tokens, &frames)?;

        let mut predicted = Vec::with_capacity(instances.len());
        for chunk in instances.chunks(cfg.batch_size.max(1)) {
            let samples: Vec<FrameSample> =
                chunk.iter().map(|instance| instance.sample.clone()).collect();
            let batch = batcher.batch(samples);
            for class in model.predict(batch.token_ids, batch.mean_weights)? {
                predicted.push(frames.name(class).unwrap_or("<unknown>").to_string());
            }
        }

        let gold: Vec<String> = instances.iter().map(|i| i.frame.clone()).collect();
        let (tp, fp, fn_) = score_frame_predictions(&gold, &predicted)?;

        let report = EvaluationReport::from_counts(sentence_file.clone(), tp, fp, fn_);
        tracing::info!(
            "'{}': tp={} fp={} fn={} precision={:.4} recall={:.4} f1={:.4}",
            report.file, report.tp, report.fp, report.fn_,
            report.precision, report.recall, report.f1,
        );
        reports.push(report);
    }

    Ok(reports)
}

/// Per-annotation frame comparison: a correct label is one true
/// positive, a wrong label is one false positive and one false
/// negative.
pub fn score_frame_predictions(
    gold: &[String],
    predicted: &[String],
) -> Result<(usize, usize, usize), FrameError> {
    if gold.len() != predicted.len() {
        return Err(FrameError::BatchShape {
            sentences: gold.len(),
            labels: predicted.len(),
        });
    }

    let mut tp = 0;
    let mut fp = 0;
    let mut fn_ = 0;
    for (g, p) in gold.iter().zip(predicted) {
        if g == p {
            tp += 1;
        } else {
            fp += 1;
            fn_ += 1;
        }
    }
    Ok((tp, fp, fn_))
}

/// Scores trigger detection alone: the gold corpus is re-predicted
/// with the FEE identifier and matched per sentence.
pub fn evaluate_fee_identification(
    sentence_file: &str,
    annotation_file: &str,
    fee: &dyn FeeIdentifier,
) -> Result<EvaluationReport> {
    let gold = CorpusReader::with_paths(sentence_file, annotation_file).read_data()?;
    let predicted = gold.predict_fees(fee);

    let (tp, fp, fn_) = count_fee_matches(&gold, &predicted);
    let report = EvaluationReport::from_counts(sentence_file, tp, fp, fn_);

    tracing::info!(
        "FEE identification on '{}': tp={} fp={} fn={} precision={:.4} recall={:.4} f1={:.4}",
        report.file, report.tp, report.fp, report.fn_,
        report.precision, report.recall, report.f1,
    );

    Ok(report)
}

/// Surface-string set matching per sentence: a gold trigger is a true
/// positive when its raw surface form appears anywhere among the
/// sentence's predicted surfaces; unmatched gold triggers are false
/// negatives, predicted surfaces absent from the gold set are false
/// positives.
///
/// Matching is deliberately positional-blind, which tolerates
/// tokenization offset differences but overcounts when one surface
/// form occurs twice in a sentence. Known imprecision, kept as is.
pub fn count_fee_matches(gold: &Corpus, predicted: &Corpus) -> (usize, usize, usize) {
    let mut tp = 0;
    let mut fp = 0;
    let mut fn_ = 0;

    for (gold_anns, pred_anns) in gold.annotations().iter().zip(predicted.annotations()) {
        let gold_surfaces: Vec<&str> =
            gold_anns.iter().filter_map(|a| a.surface.as_deref()).collect();
        let pred_surfaces: Vec<&str> =
            pred_anns.iter().filter_map(|a| a.surface.as_deref()).collect();

        for surface in &gold_surfaces {
            if pred_surfaces.contains(surface) {
                tp += 1;
            } else {
                fn_ += 1;
            }
        }
        for surface in &pred_surfaces {
            if !gold_surfaces.contains(surface) {
                fp += 1;
            }
        }
    }

    (tp, fp, fn_)
}
