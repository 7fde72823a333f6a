use std::fmt::Debug;

/// Defines the order in which a `DataLoader` visits the items of a dataset.
pub trait Sampler: Debug + Send + Sync {
    /// Returns an iterator over the indices of one pass through a dataset of
    /// `dataset_len` items. Every call starts a new pass.
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync>;

    /// Number of indices a pass yields for a dataset of `dataset_len` items.
    ///
    /// Defaults to one index per item.
    fn len(&self, dataset_len: usize) -> usize {
        dataset_len
    }
}
