//! Train a small classifier on synthetic frames and print its predictions.
//!
//! Usage:
//!   cargo run -p teachable --example train_demo

use backbone::{ClassifierInput, ImageFrame};
use burn::backend::ndarray::NdArray;
use burn::backend::Autodiff;

use teachable::mocks::HashingExtractor;
use teachable::training::{EpochLogs, TrainingObserver, TrainingParams};
use teachable::TeachableModel;

type B = Autodiff<NdArray<f32>>;

struct PrintLogs;

impl TrainingObserver for PrintLogs {
    fn on_epoch_end(&mut self, epoch: usize, logs: &EpochLogs) {
        println!(
            "epoch {epoch:>2}  loss {:.4}  acc {:.2}  val_loss {:.4}  val_acc {:.2}",
            logs.loss, logs.accuracy, logs.val_loss, logs.val_accuracy
        );
    }
}

fn frame(fill: f32) -> ClassifierInput {
    ClassifierInput::Frame(ImageFrame::new(vec![fill; 16 * 16 * 3], 16, 16))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "teachable=info".into()),
        )
        .init();

    let labels = vec!["dark".to_string(), "mid".to_string(), "bright".to_string()];
    let mut model =
        TeachableModel::<B, _>::image(HashingExtractor::new(32), labels, Default::default());
    model.set_seed(42);

    // Synthetic "webcam" frames: one brightness band per class.
    for i in 0..30 {
        model.add_example(0, &frame(30.0 + i as f32))?;
        model.add_example(1, &frame(110.0 + i as f32))?;
        model.add_example(2, &frame(190.0 + i as f32))?;
    }

    let params = TrainingParams::new()
        .with_epochs(20)
        .with_hidden_units(16)
        .with_learning_rate(1e-2);
    let summary = model.train(&params, &mut PrintLogs)?;
    println!("trained for {} epochs", summary.epochs_run);

    let (reference, predicted) = model.evaluate_validation()?;
    let correct = reference
        .iter()
        .zip(&predicted)
        .filter(|(r, p)| r == p)
        .count();
    println!("validation: {correct}/{} correct", reference.len());

    for fill in [45.0, 125.0, 205.0] {
        let top = model.predict_top_k(&frame(fill), 1)?;
        println!(
            "fill {fill:>5.1} -> {} ({:.1}%)",
            top[0].class_name,
            top[0].probability * 100.0
        );
    }

    Ok(())
}
