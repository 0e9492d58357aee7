use crate::domain::model::{Extraction, ExportTarget, LoadResult, Ranking};
use crate::utils::error::Result;

/// Lazy, single-pass line sequence. Dropping it releases the underlying handle.
pub type Lines = Box<dyn Iterator<Item = std::io::Result<String>>>;

pub trait Storage {
    /// Opens `path` and yields its data lines; the header line is already consumed.
    fn open_lines(&self, path: &str) -> Result<Lines>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn top_n(&self) -> usize;
    fn export(&self) -> Option<ExportTarget>;
}

pub trait Pipeline {
    fn extract(&mut self) -> Result<Extraction>;
    fn transform(&mut self, extraction: Extraction) -> Result<Ranking>;
    fn load(&mut self, ranking: Ranking) -> Result<LoadResult>;
}
