// ============================================================
// ML - Training Loop
// ============================================================
// Epochs over batched gold data: forward, cross-entropy, backward,
// one Adam step per batch, in exactly the order the loader yields
// batches. Loss is reported every 100 steps through tracing, which
// never changes the numbers. After each epoch: dev accuracy, a CSV
// metrics row, and a checkpoint.

use anyhow::Result;
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::batcher::{FrameBatch, FrameBatcher};
use crate::data::dataset::FrameDataset;
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{FrameIdNetwork, FrameIdNetworkConfig};

pub type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;
pub type EvalBackend = burn::backend::NdArray;

pub fn train_device() -> burn::backend::ndarray::NdArrayDevice {
    burn::backend::ndarray::NdArrayDevice::Cpu
}

/// Trains a fresh network and checkpoints it after every epoch.
pub fn run_training(
    cfg: &TrainConfig,
    network_config: FrameIdNetworkConfig,
    train_dataset: FrameDataset,
    dev_dataset: FrameDataset,
    ckpt: &CheckpointManager,
) -> Result<()> {
    let device = train_device();

    let mut model: FrameIdNetwork<TrainBackend> = network_config.init(&device);
    tracing::info!(
        "Network ready: {} embedding rows x {}, hidden {:?}, {} classes",
        network_config.vocab_size,
        network_config.embedding_size,
        network_config.hidden_sizes,
        network_config.num_classes,
    );

    let mut optim = AdamConfig::new().with_epsilon(1e-8).init();

    // Fixed shuffle seed keeps the batch order deterministic from
    // run to run; updates are applied strictly in yielded order.
    let train_batcher = FrameBatcher::<TrainBackend>::new(device.clone());
    let train_loader = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(42)
        .num_workers(1)
        .build(train_dataset);

    let dev_batcher = FrameBatcher::<EvalBackend>::new(device.clone());
    let dev_loader = DataLoaderBuilder::new(dev_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(dev_dataset);

    let metrics = MetricsLogger::new(&cfg.model_dir)?;
    let mut step = 0usize;

    for epoch in 1..=cfg.num_epochs {
        let mut loss_sum = 0.0f64;
        let mut batches = 0usize;

        for batch in train_loader.iter() {
            let (loss, _logits) = model.forward_loss(batch)?;

            let loss_value: f64 = loss.clone().into_scalar().elem::<f64>();
            loss_sum += loss_value;
            batches += 1;
            step += 1;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.learning_rate, model, grads);

            if step % 100 == 0 {
                tracing::info!(
                    "Epoch [{}/{}], step {}, loss: {:.4}",
                    epoch,
                    cfg.num_epochs,
                    step,
                    loss_value,
                );
            }
        }

        let train_loss = if batches > 0 {
            loss_sum / batches as f64
        } else {
            f64::NAN
        };

        let dev_accuracy = evaluate(&model.valid(), dev_loader.as_ref());

        tracing::info!(
            "Epoch [{}/{}] complete: train_loss={:.4} dev_accuracy={:.4}",
            epoch,
            cfg.num_epochs,
            train_loss,
            dev_accuracy,
        );

        metrics.log(&EpochMetrics::new(epoch, train_loss, dev_accuracy))?;
        ckpt.save_model(&model)?;
    }

    tracing::info!("Training complete after {} steps", step);
    Ok(())
}

/// Classification accuracy over gold-labeled batches.
///
/// Only meaningful when the corpus's trigger positions are gold:
/// predicted triggers need not align 1:1 with gold labels, so
/// realistic scoring goes through the corpus-level P/R/F1 evaluator
/// instead.
pub fn evaluate<B: Backend>(
    model: &FrameIdNetwork<B>,
    loader: &dyn DataLoader<FrameBatch<B>>,
) -> f64 {
    let mut correct = 0usize;
    let mut total = 0usize;

    for batch in loader.iter() {
        let [batch_size] = batch.labels.dims();

        let predicted = model
            .forward(batch.token_ids, batch.mean_weights)
            .argmax(1)
            .flatten::<1>(0, 1);

        let agreeing: i64 = predicted
            .equal(batch.labels)
            .int()
            .sum()
            .into_scalar()
            .elem::<i64>();

        correct += agreeing as usize;
        total += batch_size;
    }

    if total > 0 {
        correct as f64 / total as f64
    } else {
        0.0
    }
}
