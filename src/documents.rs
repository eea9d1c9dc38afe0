use std::path::{Path, PathBuf};

use serde::Serialize;
use ulid::Ulid;

/// Accepted uploads, kept as `<id>.<ext>` files under one directory.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct StoredDocument {
    pub id: String,
    pub filename: String,
    pub size: usize,
}

impl DocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the upload directory if it does not exist yet.
    pub async fn prepare(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tracing::info!("upload directory ready at {}", self.dir.display());
        Ok(())
    }

    pub async fn save(
        &self,
        original_name: &str,
        extension: &str,
        content: &[u8],
    ) -> std::io::Result<StoredDocument> {
        let id = Ulid::new().to_string();
        let path = self.dir.join(format!("{id}.{extension}"));
        tokio::fs::write(&path, content).await?;

        tracing::info!(
            "stored document {original_name} as {} ({} bytes)",
            path.display(),
            content.len()
        );
        Ok(StoredDocument {
            id,
            filename: original_name.to_string(),
            size: content.len(),
        })
    }
}
