use serde::{Deserialize, Serialize};

/// 一筆解析成功的資料列；建立後欄位不可變
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    code: i32,
    territory: String,
    consumption: i32,
}

impl Record {
    pub fn new(code: i32, territory: impl Into<String>, consumption: i32) -> Self {
        Self {
            code,
            territory: territory.into(),
            consumption,
        }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn territory(&self) -> &str {
        &self.territory
    }

    pub fn consumption(&self) -> i32 {
        self.consumption
    }
}

/// 數值欄位無法解析的資料列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub line_number: usize,
    pub line: String,
    pub column: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Parsed(Record),
    /// Four fields or fewer. Not an error.
    Skipped,
    Rejected(Rejection),
}

#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// In file order.
    pub records: Vec<Record>,
    pub skipped_lines: usize,
    pub rejections: Vec<Rejection>,
}

#[derive(Debug, Clone)]
pub struct Ranking {
    /// Sorted by consumption, descending; ties keep file order.
    pub records: Vec<Record>,
    pub limit: usize,
}

impl Ranking {
    pub fn top(&self) -> &[Record] {
        &self.records[..self.limit.min(self.records.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    pub path: String,
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadResult {
    pub reported: usize,
    pub export_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub parsed: usize,
    pub skipped: usize,
    pub rejected: usize,
    pub reported: usize,
    pub export_path: Option<String>,
}
