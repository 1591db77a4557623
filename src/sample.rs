//! Bounded, uniform sampling of a document source (reservoir sampling, Algorithm R).
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::source::DocumentSource;
use crate::value::Document;

#[derive(Debug)]
pub struct Sampler {
    sample_size: usize,
    rng: StdRng,
}

impl Sampler {
    pub fn new(sample_size: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { sample_size, rng }
    }

    /// At most `sample_size` documents, each source document equally likely.
    pub fn sample(&mut self, source: &(impl DocumentSource + ?Sized)) -> Result<Vec<Document>> {
        let mut reservoir = Vec::with_capacity(self.sample_size.min(4096));
        let mut seen = 0usize;
        let sample_size = self.sample_size;
        let rng = &mut self.rng;

        source.for_each_document(&mut |doc| {
            seen += 1;
            if reservoir.len() < sample_size {
                reservoir.push(doc);
            } else {
                let slot = rng.gen_range(0..seen);
                if slot < sample_size {
                    reservoir[slot] = doc;
                }
            }
        })?;

        tracing::debug!(seen, sampled = reservoir.len(), "sampled documents");
        Ok(reservoir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::RawValue;

    fn numbered(n: usize) -> Vec<Document> {
        (0..n)
            .map(|i| {
                let mut d = Document::new();
                d.insert("i".to_string(), RawValue::Int64(i as i64));
                d
            })
            .collect()
    }

    #[test]
    fn small_sources_are_taken_whole() {
        let docs = numbered(5);
        let sampled = Sampler::new(10, Some(1)).sample(&docs).unwrap();
        assert_eq!(sampled, docs);
    }

    #[test]
    fn large_sources_are_bounded_without_duplicates() {
        let docs = numbered(1000);
        let sampled = Sampler::new(50, Some(7)).sample(&docs).unwrap();
        assert_eq!(sampled.len(), 50);
        let mut ids = sampled
            .iter()
            .map(|d| match d["i"] {
                RawValue::Int64(i) => i,
                _ => unreachable!(),
            })
            .collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let docs = numbered(500);
        let a = Sampler::new(20, Some(42)).sample(&docs).unwrap();
        let b = Sampler::new(20, Some(42)).sample(&docs).unwrap();
        assert_eq!(a, b);
    }
}
