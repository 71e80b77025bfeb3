//! Implements ExportSink. Writes export documents into one directory.

use crate::domain::DomainError;
use crate::ports::ExportSink;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

pub struct FsExportSink {
    root: PathBuf,
}

impl FsExportSink {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl ExportSink for FsExportSink {
    async fn write(&self, name: &str, contents: &str) -> Result<PathBuf, DomainError> {
        let file_name = Path::new(name)
            .file_name()
            .ok_or_else(|| DomainError::Export(format!("invalid export name: {:?}", name)))?;
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| DomainError::Export(format!("create export dir: {}", e)))?;
        let path = self.root.join(file_name);
        fs::write(&path, contents)
            .await
            .map_err(|e| DomainError::Export(format!("write {}: {}", path.display(), e)))?;
        info!(path = %path.display(), bytes = contents.len(), "export written");
        Ok(path)
    }

    fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_dir_and_strips_components() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FsExportSink::new(dir.path().join("exports"));
        let path = sink.write("../escape.csv", "a,b\n").await.unwrap();
        assert_eq!(path, dir.path().join("exports").join("escape.csv"));
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "a,b\n");
    }
}
