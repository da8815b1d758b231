//! Per-class buffers of extracted feature vectors.

use crate::error::TeachableError;

/// Buffered examples, one bucket of feature vectors per class index.
///
/// The store owns the vectors exclusively. Reassigning classes is
/// destructive: all previously collected examples are discarded. Buckets are
/// only ever created through [`set_classes`](ExampleStore::set_classes) —
/// adding to an index that was never configured is a caller error, reported
/// as [`TeachableError::ClassOutOfRange`].
#[derive(Debug, Clone, Default)]
pub struct ExampleStore {
    buckets: Vec<Vec<Vec<f32>>>,
    total: usize,
}

impl ExampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to `num_classes` empty buckets, discarding everything collected
    /// so far.
    pub fn set_classes(&mut self, num_classes: usize) {
        self.buckets = vec![Vec::new(); num_classes];
        self.total = 0;
    }

    /// Append an extracted feature vector to the bucket for `class_index`.
    pub fn add(&mut self, class_index: usize, features: Vec<f32>) -> Result<(), TeachableError> {
        let num_classes = self.buckets.len();
        let bucket = self
            .buckets
            .get_mut(class_index)
            .ok_or(TeachableError::ClassOutOfRange {
                index: class_index,
                num_classes,
            })?;
        bucket.push(features);
        self.total += 1;
        Ok(())
    }

    pub fn num_classes(&self) -> usize {
        self.buckets.len()
    }

    /// Total examples across all classes.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Per-class example counts, in class order.
    pub fn counts(&self) -> Vec<usize> {
        self.buckets.iter().map(Vec::len).collect()
    }

    pub fn bucket(&self, class_index: usize) -> Option<&[Vec<f32>]> {
        self.buckets.get(class_index).map(Vec::as_slice)
    }

    pub fn buckets(&self) -> &[Vec<Vec<f32>>] {
        &self.buckets
    }

    /// Index of the first class with no examples, if any.
    pub fn first_empty_class(&self) -> Option<usize> {
        self.buckets.iter().position(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_classes_creates_empty_buckets() {
        let mut store = ExampleStore::new();
        store.set_classes(3);
        assert_eq!(store.num_classes(), 3);
        assert_eq!(store.counts(), vec![0, 0, 0]);
        assert_eq!(store.total(), 0);
    }

    #[test]
    fn test_add_increments_bucket_and_total() {
        let mut store = ExampleStore::new();
        store.set_classes(2);
        store.add(0, vec![1.0, 2.0]).unwrap();
        store.add(1, vec![3.0, 4.0]).unwrap();
        store.add(1, vec![5.0, 6.0]).unwrap();

        assert_eq!(store.counts(), vec![1, 2]);
        assert_eq!(store.total(), 3);
        assert_eq!(store.bucket(1).unwrap()[0], vec![3.0, 4.0]);
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let mut store = ExampleStore::new();
        store.set_classes(2);
        let err = store.add(2, vec![0.0]).unwrap_err();
        assert!(matches!(
            err,
            TeachableError::ClassOutOfRange { index: 2, num_classes: 2 }
        ));
    }

    #[test]
    fn test_add_before_set_classes_rejected() {
        let mut store = ExampleStore::new();
        let err = store.add(0, vec![0.0]).unwrap_err();
        assert!(matches!(
            err,
            TeachableError::ClassOutOfRange { index: 0, num_classes: 0 }
        ));
    }

    #[test]
    fn test_reset_discards_examples() {
        let mut store = ExampleStore::new();
        store.set_classes(2);
        store.add(0, vec![1.0]).unwrap();
        store.add(1, vec![2.0]).unwrap();

        store.set_classes(3);
        assert_eq!(store.counts(), vec![0, 0, 0]);
        assert_eq!(store.total(), 0);
    }

    #[test]
    fn test_first_empty_class() {
        let mut store = ExampleStore::new();
        store.set_classes(3);
        store.add(0, vec![1.0]).unwrap();
        store.add(2, vec![2.0]).unwrap();
        assert_eq!(store.first_empty_class(), Some(1));

        store.add(1, vec![3.0]).unwrap();
        assert_eq!(store.first_empty_class(), None);
    }
}
