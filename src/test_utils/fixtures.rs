//! On-disk store tree fixtures.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::InsightsConfig;
use crate::utils::{join_page_path, page_path_from};

/// A temporary `Stores/WebContent` tree.
///
/// The directory is removed when the fixture is dropped.
pub struct CorpusFixture {
    temp: TempDir,
    stores_dir: PathBuf,
}

impl CorpusFixture {
    /// Create an empty `Stores/WebContent` tree in a fresh temporary directory.
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("Failed to create temp dir")?;
        // Canonical so page keys match what the walker records.
        let base = temp.path().canonicalize().context("Failed to canonicalize temp dir")?;
        let stores_dir = base.join("Stores");
        fs::create_dir_all(stores_dir.join("WebContent"))
            .context("Failed to create content root")?;

        Ok(Self {
            temp,
            stores_dir,
        })
    }

    /// A small store tree with a cycle, a shared include, a macro reference and
    /// a reference to a missing page.
    ///
    /// ```text
    /// USBC/Cart.jsp           -> USBC/include/Header.jspf, USBC/include/Footer.jspf, Missing.jsp
    /// USBC/include/Header.jspf -> companyGLOBALSAS/include/Logo.jsp, USBC/Cart.jsp
    /// USBC/include/Footer.jspf -> companyGLOBALSAS/include/Logo.jsp
    /// companyGLOBALSAS/include/Logo.jsp
    /// ```
    pub fn sample() -> Result<Self> {
        let corpus = Self::new()?;
        corpus.add_page(
            "USBC/Cart.jsp",
            r#"<%@ include file="include/Header.jspf" %>
<jsp:include page="${jspStoreDir}/include/Footer.jspf"/>
<jsp:include page="/Missing.jsp"/>"#,
        )?;
        corpus.add_page(
            "USBC/include/Header.jspf",
            r#"<c:import url="../../companyGLOBALSAS/include/Logo.jsp"/>
<jsp:include page="../Cart.jsp"/>"#,
        )?;
        corpus.add_page(
            "USBC/include/Footer.jspf",
            r#"<jsp:include page='/companyGLOBALSAS/include/Logo.jsp'/>"#,
        )?;
        corpus.add_page("companyGLOBALSAS/include/Logo.jsp", "<img src=\"logo.png\"/>")?;
        Ok(corpus)
    }

    /// Root of the temporary directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// The `Stores` directory.
    #[must_use]
    pub fn stores_dir(&self) -> &Path {
        &self.stores_dir
    }

    /// The `Stores/WebContent` directory.
    #[must_use]
    pub fn content_root(&self) -> PathBuf {
        self.stores_dir.join("WebContent")
    }

    /// Output directory used by [`config`](Self::config).
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.stores_dir.with_file_name("processor-output")
    }

    /// Write a page at `relative` under the content root, creating directories.
    pub fn add_page(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.content_root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Corpus-wide key of the page at `relative`.
    #[must_use]
    pub fn page_key(&self, relative: &str) -> String {
        join_page_path(&page_path_from(&self.content_root()), relative)
    }

    /// Configuration pointing at this tree.
    #[must_use]
    pub fn config(&self) -> InsightsConfig {
        InsightsConfig {
            stores_dir: self.stores_dir.clone(),
            output_dir: self.output_dir(),
            ..InsightsConfig::default()
        }
    }

    /// Write `jsp-insights.toml` for [`config`](Self::config) into the temp root.
    pub fn write_config(&self) -> Result<PathBuf> {
        let path = self.root().join("jsp-insights.toml");
        let content = toml::to_string(&self.config()).context("Failed to serialize config")?;
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
