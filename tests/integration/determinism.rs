//! Repeated resolution of the same tree must give identical output.

use anyhow::Result;
use jsp_insights::constants::{DEEP_OUTPUT_FILE, SHALLOW_OUTPUT_FILE};
use jsp_insights::output::write_json;
use jsp_insights::test_utils::CorpusFixture;

use crate::common::resolve;

async fn dense_corpus() -> Result<CorpusFixture> {
    let corpus = CorpusFixture::sample()?;
    // Every page includes the next two, wrapping around, so every tree has cycles.
    for i in 0..6 {
        let content = format!(
            r#"<jsp:include page="P{}.jsp"/><%@ include file="P{}.jsp" %>"#,
            (i + 1) % 6,
            (i + 2) % 6
        );
        corpus.add_page(&format!("Misc/P{i}.jsp"), &content)?;
    }
    Ok(corpus)
}

#[tokio::test]
async fn test_resolution_is_byte_identical_across_runs() -> Result<()> {
    let corpus = dense_corpus().await?;

    let (shallow_a, deep_a) = resolve(&corpus).await?;
    let (shallow_b, deep_b) = resolve(&corpus).await?;

    assert_eq!(serde_json::to_string(&shallow_a)?, serde_json::to_string(&shallow_b)?);
    assert_eq!(serde_json::to_string(&deep_a)?, serde_json::to_string(&deep_b)?);
    Ok(())
}

#[tokio::test]
async fn test_output_files_are_byte_identical_across_runs() -> Result<()> {
    let corpus = dense_corpus().await?;
    let first = corpus.root().join("first");
    let second = corpus.root().join("second");

    for dir in [&first, &second] {
        let (shallow, deep) = resolve(&corpus).await?;
        write_json(dir, SHALLOW_OUTPUT_FILE, &shallow).await?;
        write_json(dir, DEEP_OUTPUT_FILE, &deep).await?;
    }

    for file in [SHALLOW_OUTPUT_FILE, DEEP_OUTPUT_FILE] {
        let a = tokio::fs::read(first.join(file)).await?;
        let b = tokio::fs::read(second.join(file)).await?;
        assert_eq!(a, b, "{file} differs between runs");
    }
    Ok(())
}
