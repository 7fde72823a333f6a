use minigrad_core::MinigradError;

/// Represents a dataset that can be accessed by index.
///
/// A dataset is a collection of items, where each item can be a single tensor,
/// a group of tensors (e.g. features and target), or any other type that is
/// `Send + 'static`.
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    type Item: Send + 'static;

    /// Returns the item at the given index.
    ///
    /// # Errors
    ///
    /// Returns `MinigradError::IndexOutOfBounds` if the index is out of bounds,
    /// or any error raised while building the item.
    fn get(&self, index: usize) -> Result<Self::Item, MinigradError>;

    /// Returns the total number of items in the dataset.
    fn len(&self) -> usize;

    /// Checks if the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
