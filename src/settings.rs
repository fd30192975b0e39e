use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow, bail, ensure};
use ara_finder::EngineTuning;
use clap::ValueEnum;
use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::cli::{CliArgs, OutputFormat};
use ara_finder::app_dirs;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    fixtures: FixturesSection,
    palette: PaletteSection,
    deep_link: DeepLinkSection,
    output: OutputSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FixturesSection {
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PaletteSection {
    preview_len: Option<usize>,
    result_limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct DeepLinkSection {
    scroll_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct OutputSection {
    format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Fixture file to load; `None` selects the built-in corpus.
    pub fixtures: Option<PathBuf>,
    pub tuning: EngineTuning,
    pub output: OutputFormat,
}

impl ResolvedConfig {
    pub fn print_summary(&self) {
        println!("Effective configuration:");
        match &self.fixtures {
            Some(path) => println!("  Fixtures: {}", path.display()),
            None => println!("  Fixtures: (built-in sample corpus)"),
        }
        println!("  Palette preview: {}", self.tuning.palette_preview_len);
        println!("  Palette result limit: {}", self.tuning.palette_result_limit);
        println!(
            "  Deep-link scroll delay: {}ms",
            self.tuning.scroll_delay.as_millis()
        );
        println!("  Output: {}", self.output.as_str());
    }
}

pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
    let builder = build_config(cli)?;
    let mut raw: RawConfig = builder
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.apply_cli_overrides(cli);
    raw.resolve()
}

fn build_config(cli: &CliArgs) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        for path in default_config_files() {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("ara")
            .separator("__")
            .try_parsing(true),
    );

    builder.build().map_err(|err| match err {
        ConfigError::Frozen => anyhow!("configuration builder is frozen"),
        other => other.into(),
    })
}

fn default_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(dir) = app_dirs::get_config_dir() {
        files.push(dir.join("config.toml"));
    }

    if let Ok(current_dir) = env::current_dir() {
        files.push(current_dir.join(".ara.toml"));
        files.push(current_dir.join("ara.toml"));
    }

    files
}

impl RawConfig {
    fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(path) = cli.fixtures.clone() {
            self.fixtures.path = Some(path);
        }
        if let Some(format) = cli.output {
            self.output.format = Some(format.as_str().to_string());
        }
    }

    fn resolve(self) -> Result<ResolvedConfig> {
        let defaults = EngineTuning::default();

        let palette_preview_len = self
            .palette
            .preview_len
            .unwrap_or(defaults.palette_preview_len);
        ensure!(
            palette_preview_len > 0,
            "palette.preview_len must be at least 1"
        );
        let palette_result_limit = self
            .palette
            .result_limit
            .unwrap_or(defaults.palette_result_limit);
        ensure!(
            palette_result_limit > 0,
            "palette.result_limit must be at least 1"
        );
        let scroll_delay = self
            .deep_link
            .scroll_delay_ms
            .map_or(defaults.scroll_delay, Duration::from_millis);

        let output = match self.output.format {
            Some(format) => parse_format(&format)?,
            None => OutputFormat::default(),
        };

        let fixtures = self
            .fixtures
            .path
            .filter(|path| !path.as_os_str().is_empty());

        Ok(ResolvedConfig {
            fixtures,
            tuning: EngineTuning {
                palette_preview_len,
                palette_result_limit,
                scroll_delay,
            },
            output,
        })
    }
}

fn parse_format(value: &str) -> Result<OutputFormat> {
    match OutputFormat::from_str(value.trim(), true) {
        Ok(format) => Ok(format),
        Err(_) => bail!("unknown output format '{}'", value.trim()),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use tempfile::tempdir;

    use super::*;

    fn cli(args: &[&str]) -> CliArgs {
        let mut argv = vec!["ara", "--no-config"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["search", "x"]);
        CliArgs::try_parse_from(argv).expect("parses")
    }

    #[test]
    fn defaults_match_engine_tuning() {
        let resolved = RawConfig::default().resolve().expect("resolves");
        assert_eq!(resolved.tuning, EngineTuning::default());
        assert_eq!(resolved.output, OutputFormat::Plain);
        assert_eq!(resolved.fixtures, None);
    }

    #[test]
    fn file_values_are_applied_and_cli_wins() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("ara.toml");
        fs::write(
            &path,
            "[palette]\npreview_len = 3\nresult_limit = 5\n\n\
             [deep_link]\nscroll_delay_ms = 250\n\n\
             [output]\nformat = \"json\"\n\n\
             [fixtures]\npath = \"corpus.json\"\n",
        )
        .expect("write config");

        let config = path.to_string_lossy().into_owned();
        let resolved = load(&cli(&["--config", &config, "--output", "plain"])).expect("loads");
        assert_eq!(resolved.tuning.palette_preview_len, 3);
        assert_eq!(resolved.tuning.palette_result_limit, 5);
        assert_eq!(resolved.tuning.scroll_delay, Duration::from_millis(250));
        assert_eq!(resolved.output, OutputFormat::Plain);
        assert_eq!(resolved.fixtures, Some(PathBuf::from("corpus.json")));
    }

    #[test]
    fn zero_limits_are_rejected() {
        let raw = RawConfig {
            palette: PaletteSection {
                preview_len: Some(0),
                result_limit: None,
            },
            ..RawConfig::default()
        };
        let err = raw.resolve().expect_err("rejects zero preview");
        assert!(err.to_string().contains("preview_len"));

        let raw = RawConfig {
            palette: PaletteSection {
                preview_len: None,
                result_limit: Some(0),
            },
            ..RawConfig::default()
        };
        assert!(raw.resolve().is_err());
    }

    #[test]
    fn unknown_output_format_is_an_error() {
        let raw = RawConfig {
            output: OutputSection {
                format: Some("yaml".into()),
            },
            ..RawConfig::default()
        };
        let err = raw.resolve().expect_err("rejects yaml");
        assert!(err.to_string().contains("yaml"));
    }

    #[test]
    fn missing_explicit_config_file_fails() {
        let dir = tempdir().expect("tempdir");
        let missing = dir.path().join("absent.toml");
        let missing = missing.to_string_lossy().into_owned();
        assert!(load(&cli(&["--config", &missing])).is_err());
    }

    #[test]
    fn cli_fixture_path_overrides_config() {
        let mut raw = RawConfig::default();
        raw.fixtures.path = Some(PathBuf::from("from-file.json"));
        raw.apply_cli_overrides(&cli(&["--fixtures", "from-cli.json"]));
        let resolved = raw.resolve().expect("resolves");
        assert_eq!(resolved.fixtures, Some(PathBuf::from("from-cli.json")));
    }
}
