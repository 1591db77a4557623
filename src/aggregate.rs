//! Parallel schema aggregation.
//!
//! Documents are typed independently and folded with the struct merge. The merge
//! is commutative and associative, so the reduction may split, reorder and
//! combine partial results any way the substrate likes.
use rayon::prelude::*;

use crate::canonical::canonicalize_schema;
use crate::config::InferConfig;
use crate::error::Result;
use crate::inference::{merge_structs, observe_document};
use crate::ir::StructType;
use crate::sample::Sampler;
use crate::source::DocumentSource;
use crate::value::Document;

/// Tree-shaped reduction: fold each partition from `zero` with `seq_op`, then
/// combine partition results pairwise with `comb_op`, in no particular order.
pub trait TreeAggregate {
    fn tree_aggregate<T, A, Z, S, C>(&self, items: &[T], zero: Z, seq_op: S, comb_op: C) -> A
    where
        T: Sync,
        A: Send,
        Z: Fn() -> A + Sync + Send,
        S: Fn(A, &T) -> A + Sync + Send,
        C: Fn(A, A) -> A + Sync + Send;
}

/// Single partition, left to right.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialAggregator;

impl TreeAggregate for SequentialAggregator {
    fn tree_aggregate<T, A, Z, S, C>(&self, items: &[T], zero: Z, seq_op: S, _comb_op: C) -> A
    where
        T: Sync,
        A: Send,
        Z: Fn() -> A + Sync + Send,
        S: Fn(A, &T) -> A + Sync + Send,
        C: Fn(A, A) -> A + Sync + Send,
    {
        items.iter().fold(zero(), seq_op)
    }
}

/// Work-stealing reduction on rayon, optionally on a dedicated pool.
#[derive(Debug)]
pub struct RayonAggregator {
    pool: Option<rayon::ThreadPool>,
    min_partition_len: usize,
}

impl RayonAggregator {
    /// Runs on rayon's global pool.
    pub fn new() -> Self {
        Self { pool: None, min_partition_len: 1 }
    }

    pub fn from_config(config: &InferConfig) -> Result<Self> {
        let pool = match config.threads {
            Some(n) => Some(rayon::ThreadPoolBuilder::new().num_threads(n).build()?),
            None => None,
        };
        Ok(Self { pool, min_partition_len: config.min_partition_len.max(1) })
    }

    #[must_use]
    pub fn with_min_partition_len(mut self, len: usize) -> Self {
        self.min_partition_len = len.max(1);
        self
    }
}

impl Default for RayonAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeAggregate for RayonAggregator {
    fn tree_aggregate<T, A, Z, S, C>(&self, items: &[T], zero: Z, seq_op: S, comb_op: C) -> A
    where
        T: Sync,
        A: Send,
        Z: Fn() -> A + Sync + Send,
        S: Fn(A, &T) -> A + Sync + Send,
        C: Fn(A, A) -> A + Sync + Send,
    {
        let run = || {
            items
                .par_iter()
                .with_min_len(self.min_partition_len.max(1))
                .fold(&zero, &seq_op)
                .reduce(&zero, &comb_op)
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}

/// Merged, canonical schema of `documents`.
pub fn infer_schema(documents: &[Document], aggregator: &impl TreeAggregate) -> StructType {
    tracing::debug!(documents = documents.len(), "aggregating document types");
    let merged = aggregator.tree_aggregate(
        documents,
        StructType::empty,
        |acc, doc| merge_structs(&acc, &observe_document(doc)),
        |left, right| merge_structs(&left, &right),
    );
    tracing::debug!(fields = merged.len(), "merged document types");
    canonicalize_schema(&merged)
}

/// Sample `source`, aggregate in parallel per `config`, canonicalize.
pub fn infer_from_source(
    source: &(impl DocumentSource + ?Sized),
    config: &InferConfig,
) -> Result<StructType> {
    config.validate()?;
    let documents = Sampler::new(config.sample_size, config.seed).sample(source)?;
    let aggregator = RayonAggregator::from_config(config)?;
    Ok(infer_schema(&documents, &aggregator))
}
