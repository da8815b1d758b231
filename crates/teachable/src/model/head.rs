use burn::nn::{Initializer, Linear, LinearConfig};
use burn::prelude::*;

/// Configuration for the classifier head.
///
/// A two-layer dense network on top of frozen backbone features:
///
/// ```text
/// (batch, num_features)
///   → Linear(num_features → hidden_units, bias) → ReLU
///   → Linear(hidden_units → num_classes, no bias)
///   → logits: (batch, num_classes)
/// ```
///
/// Softmax is applied at prediction time, not inside `forward`, so the
/// training loss can work on logits directly.
#[derive(Config, Debug)]
pub struct ClassifierHeadConfig {
    /// Backbone output dimensionality.
    pub num_features: usize,
    /// Number of target classes.
    pub num_classes: usize,
    /// Hidden layer width.
    #[config(default = 100)]
    pub hidden_units: usize,
}

/// The only trainable component in the pipeline — the backbone is frozen.
///
/// Created fresh on every training run, never incrementally updated.
#[derive(Module, Debug)]
pub struct ClassifierHead<B: Backend> {
    hidden: Linear<B>,
    output: Linear<B>,
}

impl ClassifierHeadConfig {
    /// Initialize a ClassifierHead with variance-scaling weight init.
    pub fn init<B: Backend>(&self, device: &B::Device) -> ClassifierHead<B> {
        let initializer = Initializer::KaimingNormal {
            gain: 1.0,
            fan_out_only: false,
        };
        ClassifierHead {
            hidden: LinearConfig::new(self.num_features, self.hidden_units)
                .with_initializer(initializer.clone())
                .init(device),
            output: LinearConfig::new(self.hidden_units, self.num_classes)
                .with_bias(false)
                .with_initializer(initializer)
                .init(device),
        }
    }
}

impl<B: Backend> ClassifierHead<B> {
    /// Forward pass to class logits.
    ///
    /// Input shape: `(batch, num_features)`
    /// Output shape: `(batch, num_classes)`
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.hidden.forward(features);
        let x = burn::tensor::activation::relu(x);
        self.output.forward(x)
    }

    /// Forward pass to softmax probabilities, one distribution per row.
    pub fn probabilities(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        burn::tensor::activation::softmax(self.forward(features), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::ndarray::NdArray;
    use burn::backend::Autodiff;
    use burn::optim::GradientsParams;
    use burn::tensor::Distribution;

    type TestBackend = NdArray<f32>;
    type TestAutodiffBackend = Autodiff<NdArray<f32>>;

    #[test]
    fn test_forward_shape() {
        let device = Default::default();
        let model = ClassifierHeadConfig::new(1280, 4).init::<TestBackend>(&device);
        let input = Tensor::<TestBackend, 2>::random(
            [8, 1280],
            Distribution::Normal(0.0, 1.0),
            &device,
        );
        assert_eq!(model.forward(input).dims(), [8, 4]);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let device = Default::default();
        let model = ClassifierHeadConfig::new(16, 3)
            .with_hidden_units(8)
            .init::<TestBackend>(&device);
        let input = Tensor::<TestBackend, 2>::random(
            [4, 16],
            Distribution::Normal(0.0, 1.0),
            &device,
        );
        let probs = model.probabilities(input);
        let row_sums: Vec<f32> = probs.sum_dim(1).into_data().to_vec().unwrap();
        for sum in row_sums {
            assert!((sum - 1.0).abs() < 1e-5, "row sum {sum} should be 1");
        }
    }

    #[test]
    fn test_gradient_flows_through_both_layers() {
        let device = Default::default();
        let model = ClassifierHeadConfig::new(16, 3)
            .with_hidden_units(8)
            .init::<TestAutodiffBackend>(&device);
        let input = Tensor::<TestAutodiffBackend, 2>::random(
            [4, 16],
            Distribution::Normal(0.0, 1.0),
            &device,
        );
        let loss = model.forward(input).sum();
        let grads = GradientsParams::from_grads(loss.backward(), &model);

        let hidden_grad = grads
            .get::<NdArray<f32>, 2>(model.hidden.weight.id)
            .expect("hidden weight should have gradient");
        let hidden_sum: f32 = hidden_grad.abs().sum().into_scalar().elem();
        assert!(hidden_sum > 0.0, "hidden gradient is zero");

        let output_grad = grads
            .get::<NdArray<f32>, 2>(model.output.weight.id)
            .expect("output weight should have gradient");
        let output_sum: f32 = output_grad.abs().sum().into_scalar().elem();
        assert!(output_sum > 0.0, "output gradient is zero");
    }

    #[test]
    fn test_output_layer_has_no_bias() {
        let device = Default::default();
        let model = ClassifierHeadConfig::new(16, 3).init::<TestBackend>(&device);
        assert!(model.hidden.bias.is_some());
        assert!(model.output.bias.is_none());
    }
}
