use crate::core::loader::LineSource;
use crate::core::Storage;
use crate::domain::ports::Lines;
use crate::utils::error::{ReportError, Result};
use std::fs;
use std::path::PathBuf;

/// 以本機目錄為根的檔案存取；絕對路徑會直接使用
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    fn open_lines(&self, path: &str) -> Result<Lines> {
        let full_path = self.resolve(path);
        tracing::debug!("Opening {}", full_path.display());

        let source = LineSource::open(&full_path).map_err(|source| ReportError::SourceError {
            path: full_path.display().to_string(),
            source,
        })?;
        Ok(Box::new(source))
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);
        let export_error = |e: std::io::Error| ReportError::ExportError {
            message: format!("Cannot write '{}': {}", full_path.display(), e),
        };

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(export_error)?;
        }

        fs::write(&full_path, data).map_err(export_error)?;
        Ok(())
    }
}
