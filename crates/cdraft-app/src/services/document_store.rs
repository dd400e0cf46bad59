//! Persistence and export of drafted complaints

use std::path::{Path, PathBuf};

use cdraft_core::prelude::*;
use cdraft_core::{DraftedComplaint, ExportFormat};

const DRAFT_FILENAME: &str = "draft.json";
const EXPORT_STEM: &str = "complaint";

/// Destination for saved and exported drafts
#[trait_variant::make(DocumentStore: Send)]
pub trait LocalDocumentStore {
    /// Save the working draft; returns the written path
    async fn persist(&self, document: &DraftedComplaint) -> Result<PathBuf>;

    /// Render and write the draft in `format`; returns the written path
    async fn export(&self, document: &DraftedComplaint, format: ExportFormat) -> Result<PathBuf>;
}

/// Render a draft in an export format
pub fn render(document: &DraftedComplaint, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::PlainText => Ok(document.render_plain_text()),
        ExportFormat::Markdown => Ok(document.render_markdown()),
        ExportFormat::Json => serde_json::to_string_pretty(document).context("Serializing draft"),
    }
}

/// Store writing into a single directory on the local filesystem
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    directory: PathBuf,
}

impl FileDocumentStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    async fn write(&self, filename: &str, content: &str) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.directory).await?;
        let path = self.directory.join(filename);
        tokio::fs::write(&path, content).await?;
        Ok(path)
    }
}

impl DocumentStore for FileDocumentStore {
    async fn persist(&self, document: &DraftedComplaint) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(document)?;
        let path = self
            .write(DRAFT_FILENAME, &json)
            .await
            .map_err(|e| Error::persist(format!("{}: {}", self.directory.display(), e)))?;
        debug!("Persisted draft to {:?}", path);
        Ok(path)
    }

    async fn export(&self, document: &DraftedComplaint, format: ExportFormat) -> Result<PathBuf> {
        let content = render(document, format)?;
        let filename = format!("{}.{}", EXPORT_STEM, format.extension());
        let path = self
            .write(&filename, &content)
            .await
            .map_err(|e| Error::export(format!("{}: {}", self.directory.display(), e)))?;
        debug!("Exported draft to {:?}", path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::{DocumentStore, FileDocumentStore};
    use cdraft_core::fixtures::sample_counts;
    use cdraft_core::prelude::*;
    use cdraft_core::{generate, DraftedComplaint, ExportFormat};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn draft() -> DraftedComplaint {
        let counts: Vec<_> = sample_counts().into_iter().filter(|c| c.selected).collect();
        generate(&counts, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    }

    #[tokio::test]
    async fn test_persist_round_trips_json() {
        let temp = tempdir().unwrap();
        let store = FileDocumentStore::new(temp.path().join("drafts"));
        let document = draft();

        let path = store.persist(&document).await.unwrap();

        assert_eq!(path, temp.path().join("drafts/draft.json"));
        let saved: DraftedComplaint =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved, document);
    }

    #[tokio::test]
    async fn test_export_plain_text() {
        let temp = tempdir().unwrap();
        let store = FileDocumentStore::new(temp.path());

        let path = store
            .export(&draft(), ExportFormat::PlainText)
            .await
            .unwrap();

        assert_eq!(path.file_name().unwrap(), "complaint.txt");
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("FIRST COUNT\n(NEGLIGENCE)"));
        assert!(text.contains("SECOND COUNT"));
    }

    #[test]
    fn test_export_markdown() {
        let temp = tempdir().unwrap();
        let store = FileDocumentStore::new(temp.path());

        let path = tokio_test::assert_ok!(tokio_test::block_on(
            store.export(&draft(), ExportFormat::Markdown)
        ));

        assert_eq!(path.extension().unwrap(), "md");
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("## FIRST COUNT: Negligence"));
    }

    #[tokio::test]
    async fn test_persist_into_file_path_fails() {
        let temp = tempdir().unwrap();
        let blocker = temp.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();
        let store = FileDocumentStore::new(&blocker);

        let err = store.persist(&draft()).await.unwrap_err();

        assert!(matches!(err, Error::Persist { .. }));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_export_failure_is_export_error() {
        let temp = tempdir().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let store = FileDocumentStore::new(&blocker);

        let err = store.export(&draft(), ExportFormat::Json).await.unwrap_err();
        assert!(matches!(err, Error::Export { .. }));
    }
}
