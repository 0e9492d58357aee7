pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::ExportTarget;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, Validate};

#[cfg(feature = "cli")]
use crate::domain::model::ExportFormat;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

pub const DEFAULT_INPUT_PATH: &str = "datos.csv";
pub const DEFAULT_TOP_N: usize = 3;
pub const MAX_TOP_N: usize = 1000;

/// 合併 TOML 與命令列之後的最終設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    pub input_path: String,
    pub top_n: usize,
    pub export: Option<ExportTarget>,
    pub monitor: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            input_path: DEFAULT_INPUT_PATH.to_string(),
            top_n: DEFAULT_TOP_N,
            export: None,
            monitor: false,
        }
    }
}

impl ConfigProvider for ReportSettings {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn top_n(&self) -> usize {
        self.top_n
    }

    fn export(&self) -> Option<ExportTarget> {
        self.export.clone()
    }
}

impl Validate for ReportSettings {
    fn validate(&self) -> Result<()> {
        validate_path("input.path", &self.input_path)?;
        validate_range("report.top", self.top_n, 1, MAX_TOP_N)?;
        if let Some(export) = &self.export {
            validate_path("export.path", &export.path)?;
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "consumption-top")]
#[command(about = "Print the territories with the highest consumption from a semicolon-delimited CSV")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Input CSV file [default: datos.csv]
    #[arg(long)]
    pub input_path: Option<String>,

    /// Number of records to report [default: 3]
    #[arg(long)]
    pub top: Option<usize>,

    /// Also write the ranking to this file
    #[arg(long)]
    pub output_path: Option<String>,

    /// Format of the exported ranking [default: csv]
    #[arg(long, value_enum)]
    pub output_format: Option<ExportFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log memory usage and timing after each stage")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 讀取設定檔（若有），再以命令列參數覆蓋
    pub fn resolve(&self) -> Result<ReportSettings> {
        let base = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.into_settings(),
            None => ReportSettings::default(),
        };
        Ok(self.apply_overrides(base))
    }

    pub fn apply_overrides(&self, mut settings: ReportSettings) -> ReportSettings {
        if let Some(input_path) = &self.input_path {
            settings.input_path = input_path.clone();
        }
        if let Some(top) = self.top {
            settings.top_n = top;
        }

        if let Some(path) = &self.output_path {
            let format = settings
                .export
                .as_ref()
                .map(|export| export.format)
                .unwrap_or_default();
            settings.export = Some(ExportTarget {
                path: path.clone(),
                format,
            });
        }
        if let (Some(format), Some(export)) = (self.output_format, &mut settings.export) {
            export.format = format;
        }

        settings.monitor |= self.monitor;
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = ReportSettings::default();
        assert_eq!(settings.input_path(), "datos.csv");
        assert_eq!(settings.top_n(), 3);
        assert!(settings.export().is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_top_is_invalid() {
        let settings = ReportSettings {
            top_n: 0,
            ..ReportSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides_settings() {
        let cli = CliConfig::parse_from([
            "consumption-top",
            "--input-path",
            "consumo.csv",
            "--top",
            "5",
            "--output-path",
            "top.json",
            "--output-format",
            "json",
        ]);

        let settings = cli.apply_overrides(ReportSettings::default());
        assert_eq!(settings.input_path, "consumo.csv");
        assert_eq!(settings.top_n, 5);
        assert_eq!(
            settings.export,
            Some(ExportTarget {
                path: "top.json".to_string(),
                format: ExportFormat::Json,
            })
        );
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_without_flags_keeps_settings() {
        let cli = CliConfig::parse_from(["consumption-top"]);
        let base = ReportSettings {
            input_path: "from_toml.csv".to_string(),
            top_n: 10,
            export: None,
            monitor: true,
        };

        assert_eq!(cli.apply_overrides(base.clone()), base);
    }
}
