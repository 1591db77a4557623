//! Structural schema inference over samples of semi-structured documents.
//!
//! raw documents → [`inference::observe_document`] (per document, in parallel)
//! → [`aggregate::infer_schema`] folds them with [`inference::merge`]
//! → [`canonical::canonicalize_schema`] → one [`ir::StructType`].
pub mod aggregate;
pub mod canonical;
pub mod cli;
pub mod config;
pub mod error;
pub mod inference;
pub mod ir;
pub mod path_de;
pub mod sample;
pub mod source;
pub mod value;

pub use aggregate::{RayonAggregator, SequentialAggregator, TreeAggregate, infer_from_source, infer_schema};
pub use config::InferConfig;
pub use error::{Error, Result};
pub use inference::merge;
pub use ir::{ArrayType, StructField, StructType, StructuralType};
pub use value::{Document, RawValue, ValueTag};
