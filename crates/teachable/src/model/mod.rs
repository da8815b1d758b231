//! Classifier head model components: the dense head itself and the tensor
//! bridge between extracted `Vec<f32>` features and burn tensors.

pub mod bridge;
pub mod head;
