//! Sample input shared by every subcommand

use std::path::PathBuf;

use anyhow::Context;
use freqtab_stats::{
    analysis::{Analysis, Grouping},
    sample::Sample,
};

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InputArg {
    /// File containing the sample, or `-` to read it from stdin
    #[arg(required_unless_present = "data", conflicts_with = "data")]
    pub input: Option<PathBuf>,

    /// Sample given on the command line, e.g. "4, 8, 15, 16"
    #[arg(long)]
    pub data: Option<String>,

    /// Group the sample into equal-width class intervals
    #[arg(long)]
    pub grouped: bool,

    /// Number of class intervals used with `--grouped`
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..=1000))]
    pub classes: u16,

    /// Drop tokens that are not numbers instead of failing
    #[arg(long)]
    pub skip_invalid: bool,

    /// Extra percentile points to report (comma-separated, 0 to 100)
    #[arg(long, value_delimiter = ',', value_parser = parse_percentile)]
    pub percentiles: Vec<f64>,
}

fn parse_percentile(s: &str) -> Result<f64, String> {
    let p = s
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if (0.0..=100.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("percentile {p} is outside 0..=100"))
    }
}

impl InputArg {
    pub(crate) fn grouping(&self) -> Grouping {
        if self.grouped {
            Grouping::Grouped {
                classes: usize::from(self.classes),
            }
        } else {
            Grouping::Ungrouped
        }
    }

    fn source_name(&self) -> String {
        match &self.input {
            Some(path) if path.as_os_str() == "-" => "stdin".to_string(),
            Some(path) => path.display().to_string(),
            None => "--data".to_string(),
        }
    }

    pub(crate) fn load_sample(&self) -> anyhow::Result<Sample> {
        let text = match (&self.data, &self.input) {
            (Some(data), _) => data.clone(),
            (None, Some(path)) => util::read_input_text(path)?,
            (None, None) => anyhow::bail!("no input given: pass a file, `-` or --data"),
        };
        let source = self.source_name();

        let sample = if self.skip_invalid {
            let parsed = Sample::parse_lenient(&text)
                .with_context(|| format!("Failed to read sample from {source}"))?;
            if !parsed.skipped_tokens.is_empty() {
                tracing::warn!(
                    skipped = parsed.skipped_tokens.len(),
                    tokens = ?parsed.skipped_tokens,
                    "ignored invalid tokens"
                );
            }
            parsed.sample
        } else {
            Sample::parse(&text).with_context(|| format!("Failed to read sample from {source}"))?
        };
        tracing::info!(n = sample.len(), %source, "loaded sample");
        Ok(sample)
    }

    /// Loads the sample and runs the analysis selected by the flags.
    pub(crate) fn analyze(&self) -> anyhow::Result<Analysis> {
        let sample = self.load_sample()?;
        let analysis = Analysis::run_with_percentiles(sample, self.grouping(), &self.percentiles)?;
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_arg(data: &str) -> InputArg {
        InputArg {
            input: None,
            data: Some(data.to_string()),
            grouped: false,
            classes: 5,
            skip_invalid: false,
            percentiles: vec![],
        }
    }

    #[test]
    fn test_strict_input_rejects_bad_token() {
        let err = data_arg("1 2 x").load_sample().unwrap_err();
        assert!(format!("{err:#}").contains("'x' (token #3) is not a number"));
    }

    #[test]
    fn test_skip_invalid_drops_bad_tokens() {
        let arg = InputArg {
            skip_invalid: true,
            ..data_arg("3, x, 1,, 2")
        };
        let sample = arg.load_sample().unwrap();
        assert_eq!(sample.as_slice(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_grouping_from_flags() {
        assert_eq!(data_arg("1").grouping(), Grouping::Ungrouped);
        let arg = InputArg {
            grouped: true,
            classes: 7,
            ..data_arg("1")
        };
        assert_eq!(arg.grouping(), Grouping::Grouped { classes: 7 });
    }

    #[test]
    fn test_grouping_rejects_overflowing_range() {
        let arg = InputArg {
            grouped: true,
            ..data_arg("-1e308, 1e308")
        };
        let err = arg.analyze().unwrap_err();
        assert!(err.to_string().contains("too wide to split into classes"));
        assert!(data_arg("-1e308, 1e308").analyze().is_ok());
    }

    #[test]
    fn test_reads_sample_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        std::fs::write(&path, "5\n4\n4\n").unwrap();
        let arg = InputArg {
            input: Some(path),
            data: None,
            ..data_arg("")
        };
        let analysis = arg.analyze().unwrap();
        assert_eq!(analysis.sample.as_slice(), [4.0, 4.0, 5.0]);
    }

    #[test]
    fn test_missing_file_error_names_path() {
        let arg = InputArg {
            input: Some(PathBuf::from("/nonexistent/freqtab/sample.txt")),
            data: None,
            ..data_arg("")
        };
        let err = arg.load_sample().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/freqtab/sample.txt"));
    }

    #[test]
    fn test_parse_percentile() {
        assert_eq!(parse_percentile(" 12.5"), Ok(12.5));
        assert!(parse_percentile("-1").is_err());
        assert!(parse_percentile("ten").is_err());
    }
}
