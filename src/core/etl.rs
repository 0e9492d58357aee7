use crate::core::{Pipeline, RunSummary};
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
    monitor: RunMonitor,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: RunMonitor::new(monitor_enabled),
        }
    }

    /// Runs extract → transform → load once. A failing stage aborts the run;
    /// nothing from later stages is produced.
    pub fn run(&mut self) -> Result<RunSummary> {
        tracing::info!("🚀 Starting consumption report");

        let extraction = self.pipeline.extract()?;
        self.monitor.log_stats("Extract");
        let parsed = extraction.records.len();
        let skipped = extraction.skipped_lines;
        let rejected = extraction.rejections.len();

        let ranking = self.pipeline.transform(extraction)?;
        self.monitor.log_stats("Transform");

        let loaded = self.pipeline.load(ranking)?;
        self.monitor.log_stats("Load");

        Ok(RunSummary {
            parsed,
            skipped,
            rejected,
            reported: loaded.reported,
            export_path: loaded.export_path,
        })
    }

    pub fn into_pipeline(self) -> P {
        self.pipeline
    }
}
