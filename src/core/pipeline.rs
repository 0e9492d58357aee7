use crate::core::builder::build_record;
use crate::core::reporter;
use crate::core::{ConfigProvider, Extraction, LineOutcome, LoadResult, Pipeline, Ranking, Storage};
use crate::utils::error::{ReportError, Result};
use std::io::Write;

/// 讀取 CSV、取用量前 N 名並輸出報表的管道
pub struct ConsumptionPipeline<S: Storage, C: ConfigProvider, W: Write> {
    storage: S,
    config: C,
    out: W,
}

impl<S: Storage, C: ConfigProvider, W: Write> ConsumptionPipeline<S, C, W> {
    pub fn new(storage: S, config: C, out: W) -> Self {
        Self {
            storage,
            config,
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

impl<S: Storage, C: ConfigProvider, W: Write> Pipeline for ConsumptionPipeline<S, C, W> {
    fn extract(&mut self) -> Result<Extraction> {
        let path = self.config.input_path().to_string();
        tracing::info!("📂 Reading records from: {}", path);

        // lines 在函式結束時 drop，檔案隨之關閉（包含錯誤提早返回）
        let lines = self.storage.open_lines(&path)?;
        let mut extraction = Extraction::default();

        for (index, line) in lines.enumerate() {
            let line = line.map_err(|source| ReportError::SourceError {
                path: path.clone(),
                source,
            })?;
            let line_number = index + 2;

            match build_record(line_number, &line) {
                LineOutcome::Parsed(record) => {
                    tracing::debug!("Line {}: parsed {:?}", line_number, record);
                    extraction.records.push(record);
                }
                LineOutcome::Skipped => {
                    tracing::debug!("Line {}: fewer than 5 fields, skipped", line_number);
                    extraction.skipped_lines += 1;
                }
                LineOutcome::Rejected(rejection) => {
                    tracing::warn!(
                        "⚠️ Line {}: invalid {} ({})",
                        rejection.line_number,
                        rejection.column,
                        rejection.reason
                    );
                    reporter::write_diagnostic(&mut self.out, &rejection)?;
                    extraction.rejections.push(rejection);
                }
            }
        }

        tracing::info!(
            "Extracted {} records ({} skipped, {} rejected)",
            extraction.records.len(),
            extraction.skipped_lines,
            extraction.rejections.len()
        );
        Ok(extraction)
    }

    fn transform(&mut self, extraction: Extraction) -> Result<Ranking> {
        tracing::info!("📊 Ranking {} records by consumption", extraction.records.len());
        Ok(reporter::rank(extraction.records, self.config.top_n()))
    }

    fn load(&mut self, ranking: Ranking) -> Result<LoadResult> {
        tracing::info!("📝 Writing top {} report", ranking.limit);
        let reported = reporter::render_report(&ranking, &mut self.out)?;

        let export_path = match self.config.export() {
            Some(target) => {
                let data = reporter::export_bytes(ranking.top(), target.format)?;
                self.storage.write_file(&target.path, &data)?;
                tracing::info!("💾 Exported {} ranking to: {}", target.format.as_str(), target.path);
                Some(target.path)
            }
            None => None,
        };

        Ok(LoadResult {
            reported,
            export_path,
        })
    }
}
