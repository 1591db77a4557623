//! Runs every fixture in `fixtures/` through the public inference API and checks
//! the compact type string, under both the sequential and the rayon aggregator.
//!
//! ```text
//! cargo run -p dev-test-runner [-- <fixture dir>]
//! ```
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use docschema::{Document, RayonAggregator, SequentialAggregator, infer_schema};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Fixture {
    name: String,
    documents: Vec<serde_json::Value>,
    expected: String,
}

fn load_fixture(path: &Path) -> Result<Fixture> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let de = &mut serde_json::Deserializer::from_str(&src);
    serde_path_to_error::deserialize(de)
        .map_err(|err| anyhow::anyhow!("{} at JSON path {}: {}", path.display(), err.path(), err.inner()))
}

fn run_fixture(fixture: &Fixture) -> Result<()> {
    let documents = fixture
        .documents
        .iter()
        .cloned()
        .map(|v| docschema::value::document_from_json(v).context("fixture document is not an object"))
        .collect::<Result<Vec<Document>>>()?;

    let sequential = infer_schema(&documents, &SequentialAggregator).to_string();
    let parallel = infer_schema(&documents, &RayonAggregator::new()).to_string();
    if sequential != parallel {
        bail!("aggregators disagree: sequential {sequential}, rayon {parallel}");
    }
    if sequential != fixture.expected {
        bail!("expected {}, got {sequential}", fixture.expected);
    }
    Ok(())
}

fn main() -> Result<()> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures"));

    let mut paths = std::fs::read_dir(&dir)
        .with_context(|| format!("failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect::<Vec<_>>();
    paths.sort();

    let mut failed = 0usize;
    for path in &paths {
        let fixture = load_fixture(path)?;
        match run_fixture(&fixture) {
            Ok(()) => eprintln!("✅ {}", fixture.name),
            Err(error) => {
                failed += 1;
                eprintln!("❌ {}: {error:#}", fixture.name);
            }
        }
    }

    eprintln!("{} fixtures, {failed} failed", paths.len());
    if failed > 0 {
        bail!("{failed} fixture(s) failed");
    }
    Ok(())
}
