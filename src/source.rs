//! Where documents come from.
//!
//! A [`DocumentSource`] streams documents to a callback; it is unordered from the
//! point of view of inference and may be arbitrarily large (the sampler bounds it).
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Error, Result};
use crate::value::{Document, document_from_json};

pub trait DocumentSource {
    fn for_each_document(&self, apply: &mut dyn FnMut(Document)) -> Result<()>;
}

impl DocumentSource for [Document] {
    fn for_each_document(&self, apply: &mut dyn FnMut(Document)) -> Result<()> {
        self.iter().cloned().for_each(apply);
        Ok(())
    }
}

impl DocumentSource for Vec<Document> {
    fn for_each_document(&self, apply: &mut dyn FnMut(Document)) -> Result<()> {
        self.as_slice().for_each_document(apply)
    }
}

/// JSON / NDJSON files on disk.
///
/// A JSON file holding an array contributes each element; any other value is one
/// document. Values that are not objects are skipped with a warning.
#[derive(Debug, Clone)]
pub struct FileSource {
    paths: Vec<PathBuf>,
    ndjson: bool,
    json_pointer: Option<String>,
}

impl FileSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths, ndjson: false, json_pointer: None }
    }

    /// Literal paths or glob patterns.
    pub fn from_patterns<I>(patterns: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Ok(Self::new(resolve_file_path_patterns(patterns)?))
    }

    #[must_use]
    pub fn with_ndjson(mut self, ndjson: bool) -> Self {
        self.ndjson = ndjson;
        self
    }

    /// JSON Pointer selecting the document (or array of documents) inside each value.
    #[must_use]
    pub fn with_json_pointer(mut self, pointer: Option<String>) -> Self {
        self.json_pointer = pointer;
        self
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    fn emit(&self, path: &Path, value: Value, apply: &mut dyn FnMut(Document)) {
        let value = match &self.json_pointer {
            None => value,
            Some(ptr) => match value.pointer(ptr) {
                Some(selected) => selected.clone(),
                None => {
                    tracing::warn!(path = %path.display(), pointer = %ptr, "json pointer matched nothing");
                    return;
                }
            },
        };
        match value {
            Value::Array(items) if !self.ndjson => {
                for item in items {
                    emit_document(path, item, apply);
                }
            }
            other => emit_document(path, other, apply),
        }
    }
}

fn emit_document(path: &Path, value: Value, apply: &mut dyn FnMut(Document)) {
    match document_from_json(value) {
        Some(doc) => apply(doc),
        None => tracing::warn!(path = %path.display(), "skipping non-document value"),
    }
}

impl DocumentSource for FileSource {
    fn for_each_document(&self, apply: &mut dyn FnMut(Document)) -> Result<()> {
        for path in &self.paths {
            let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            let json_error = |source| Error::Json { path: path.clone(), source };
            if self.ndjson {
                for line in source.lines().filter(|l| !l.trim().is_empty()) {
                    let value = serde_json::from_str::<Value>(line).map_err(json_error)?;
                    self.emit(path, value, apply);
                }
            } else {
                let value = serde_json::from_str::<Value>(&source).map_err(json_error)?;
                self.emit(path, value, apply);
            }
            tracing::debug!(path = %path.display(), "read input file");
        }
        Ok(())
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let before = out.len();
            for entry in glob::glob(pattern)? {
                out.push(entry?);
            }
            if out.len() == before {
                return Err(Error::NoMatch { pattern: pattern.to_string() });
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
