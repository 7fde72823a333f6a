use super::*;
use std::collections::HashSet;

#[test]
fn test_random_sampler_len() {
    assert_eq!(RandomSampler::new(false, None).len(10), 10);
    assert_eq!(RandomSampler::new(false, Some(5)).len(10), 5);
    assert_eq!(RandomSampler::new(false, Some(15)).len(10), 10);
    assert_eq!(RandomSampler::new(true, Some(15)).len(10), 15);
    assert_eq!(RandomSampler::new(true, Some(5)).len(0), 0);
}

#[test]
fn test_random_sampler_without_replacement_is_a_permutation() {
    let sampler = RandomSampler::new(false, None);
    let indices: Vec<usize> = sampler.iter(10).collect();
    assert_eq!(indices.len(), 10);
    let unique: HashSet<usize> = indices.into_iter().collect();
    assert_eq!(unique, (0..10).collect::<HashSet<usize>>());
}

#[test]
fn test_random_sampler_without_replacement_subset() {
    let sampler = RandomSampler::new(false, Some(4));
    let indices: Vec<usize> = sampler.iter(10).collect();
    assert_eq!(indices.len(), 4);
    let unique: HashSet<usize> = indices.iter().copied().collect();
    assert_eq!(unique.len(), 4);
    assert!(indices.iter().all(|&i| i < 10));
}

#[test]
fn test_random_sampler_oversized_request_is_clamped() {
    let sampler = RandomSampler::new(false, Some(10));
    let indices: Vec<usize> = sampler.iter(5).collect();
    assert_eq!(indices.len(), 5);
}

#[test]
fn test_random_sampler_with_replacement() {
    let sampler = RandomSampler::new(true, Some(20));
    let indices: Vec<usize> = sampler.iter(5).collect();
    assert_eq!(indices.len(), 20);
    assert!(indices.iter().all(|&i| i < 5));
}

#[test]
fn test_random_sampler_empty_dataset() {
    assert_eq!(RandomSampler::new(false, None).iter(0).count(), 0);
    assert_eq!(RandomSampler::new(true, Some(5)).iter(0).count(), 0);
}

#[test]
fn test_random_sampler_seed_is_reproducible() {
    let a = RandomSampler::with_seed(false, None, 42);
    let b = RandomSampler::with_seed(false, None, 42);
    let a_passes: Vec<Vec<usize>> = (0..3).map(|_| a.iter(50).collect()).collect();
    let b_passes: Vec<Vec<usize>> = (0..3).map(|_| b.iter(50).collect()).collect();
    assert_eq!(a_passes, b_passes);
    // Consecutive passes draw fresh permutations.
    assert_ne!(a_passes[0], a_passes[1]);
}
