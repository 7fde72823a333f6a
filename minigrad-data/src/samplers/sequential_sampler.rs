use super::traits::Sampler;

/// Visits `0..dataset_len` in ascending order on every pass.
///
/// Used by evaluation loaders and anywhere batches must be reproducible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequentialSampler;

impl SequentialSampler {
    pub const fn new() -> Self {
        Self
    }
}

impl Sampler for SequentialSampler {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        Box::new(0..dataset_len)
    }
}

#[cfg(test)]
#[path = "sequential_sampler_test.rs"]
mod tests;
