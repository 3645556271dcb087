//! Filesystem pathway catalog.
//!
//! Reads pathway documents from a configured directory, one `*.json`
//! file per pathway, the file stem being the pathway id. Documents are
//! parsed on every load; they are small, hand-authored files and the
//! catalog must pick up edits without a restart.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::warn;

use crate::domain::foundation::{DomainError, ErrorCode, PathwayId};
use crate::domain::pathway::PathwayDocument;
use crate::ports::{PathwayStore, PathwaySummary};

/// Pathway store backed by a directory of JSON documents.
#[derive(Debug, Clone)]
pub struct FilePathwayStore {
    directory: PathBuf,
}

impl FilePathwayStore {
    /// Creates a store over the given directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn document_path(&self, id: &PathwayId) -> Option<PathBuf> {
        // Ids come from URLs; anything that could escape the catalog
        // directory is treated as simply not present.
        let id = id.as_str();
        if id.contains('/') || id.contains('\\') || id.contains("..") {
            return None;
        }
        Some(self.directory.join(format!("{}.json", id)))
    }

    async fn parse_file(path: &Path) -> Result<PathwayDocument, DomainError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            DomainError::new(
                ErrorCode::StorageError,
                format!("Failed to read {}: {}", path.display(), e),
            )
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            DomainError::new(
                ErrorCode::StorageError,
                format!("Failed to parse {}: {}", path.display(), e),
            )
        })
    }
}

#[async_trait]
impl PathwayStore for FilePathwayStore {
    async fn list(&self) -> Result<Vec<PathwaySummary>, DomainError> {
        let mut dir = tokio::fs::read_dir(&self.directory).await.map_err(|e| {
            DomainError::new(
                ErrorCode::StorageError,
                format!(
                    "Failed to read pathway directory {}: {}",
                    self.directory.display(),
                    e
                ),
            )
        })?;

        let mut paths = Vec::new();
        while let Some(entry) = dir.next_entry().await.map_err(|e| {
            DomainError::new(ErrorCode::StorageError, format!("Directory walk failed: {}", e))
        })? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut summaries = Vec::new();
        for path in paths {
            let stem = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };
            // A malformed document hides one catalog entry, not the
            // whole selection screen.
            match Self::parse_file(&path).await {
                Ok(document) => summaries.push(PathwaySummary {
                    id: PathwayId::new(stem)?,
                    title: document.metadata.title,
                    description: document.metadata.subtitle,
                }),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable pathway document");
                }
            }
        }

        Ok(summaries)
    }

    async fn load(&self, id: &PathwayId) -> Result<Option<PathwayDocument>, DomainError> {
        let path = match self.document_path(id) {
            Some(path) => path,
            None => return Ok(None),
        };
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }
        Self::parse_file(&path).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ANKLE_DOC: &str = r#"{
        "metadata": {"title": "Ankle fractures", "subtitle": "Malleolar triage"},
        "root": {
            "id": "root",
            "type": "question",
            "question": "Q1",
            "answers": [{"text": "Yes", "next_node_id": "n1"}]
        },
        "nodes": {
            "n1": {"id": "n1", "type": "recommendation", "recommendations": ["Rest"]}
        }
    }"#;

    const HEEL_DOC: &str = r#"{
        "metadata": {"title": "Heel fractures"},
        "root": {"id": "root", "type": "question", "question": "Q1"}
    }"#;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let mut file = std::fs::File::create(dir.join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[tokio::test]
    async fn lists_documents_sorted_by_filename() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "heel.json", HEEL_DOC);
        write_file(dir.path(), "ankle.json", ANKLE_DOC);
        write_file(dir.path(), "notes.txt", "not a pathway");

        let store = FilePathwayStore::new(dir.path());
        let summaries = store.list().await.unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id.as_str(), "ankle");
        assert_eq!(summaries[0].title, "Ankle fractures");
        assert_eq!(summaries[0].description.as_deref(), Some("Malleolar triage"));
        assert_eq!(summaries[1].id.as_str(), "heel");
    }

    #[tokio::test]
    async fn list_skips_malformed_documents() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "ankle.json", ANKLE_DOC);
        write_file(dir.path(), "broken.json", "{ not json");

        let store = FilePathwayStore::new(dir.path());
        let summaries = store.list().await.unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id.as_str(), "ankle");
    }

    #[tokio::test]
    async fn loads_document_by_id() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "ankle.json", ANKLE_DOC);

        let store = FilePathwayStore::new(dir.path());
        let doc = store
            .load(&PathwayId::new("ankle").unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(doc.metadata.title, "Ankle fractures");
        assert_eq!(doc.root.answers.len(), 1);
    }

    #[tokio::test]
    async fn load_unknown_id_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePathwayStore::new(dir.path());

        assert!(store
            .load(&PathwayId::new("missing").unwrap())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn load_rejects_path_escapes() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "ankle.json", ANKLE_DOC);

        let store = FilePathwayStore::new(dir.path());
        assert!(store
            .load(&PathwayId::new("../ankle").unwrap())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn load_malformed_document_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "broken.json", "{ not json");

        let store = FilePathwayStore::new(dir.path());
        let err = store
            .load(&PathwayId::new("broken").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
    }
}
