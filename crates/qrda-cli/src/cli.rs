//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use qrda_ingest::DEFAULT_ROW_TAG;
use qrda_model::{DocumentShape, ShapeSelection};

#[derive(Parser)]
#[command(
    name = "qrda",
    version,
    about = "Flatten QRDA clinical documents into patient/observation rows",
    long_about = "Flatten QRDA-style clinical XML documents into one row per observation.\n\n\
                  Single-patient documents (one recordTarget patient) and multi-patient\n\
                  documents (a patient embedded in every entry) are detected automatically."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient values in trace-level logs.
    ///
    /// Off by default: row-level fields are logged as [REDACTED].
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Flatten documents into patient/observation rows.
    Extract(ExtractArgs),

    /// List the known document shapes and their anchors.
    Shapes,
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// XML files or directories of XML files.
    #[arg(value_name = "PATH", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Document shape: auto, single-patient or multi-patient.
    ///
    /// Auto runs detection on every document; a named shape skips it.
    #[arg(
        long = "shape",
        value_name = "SHAPE",
        default_value = "auto",
        value_parser = parse_shape_selection
    )]
    pub shape: ShapeSelection,

    /// Fail a multi-patient document when an entry has no patient.
    ///
    /// By default such entries are kept as rows with empty patient fields.
    #[arg(long = "reject-inconsistent-entries")]
    pub reject_inconsistent_entries: bool,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Write rows to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Local name of the element that delimits one document.
    #[arg(long = "row-tag", value_name = "TAG", default_value = DEFAULT_ROW_TAG)]
    pub row_tag: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Csv,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_shape_selection(value: &str) -> Result<ShapeSelection, String> {
    if value.eq_ignore_ascii_case("auto") {
        return Ok(ShapeSelection::Auto);
    }
    value
        .parse::<DocumentShape>()
        .map(ShapeSelection::Force)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_selection_values() {
        assert_eq!(parse_shape_selection("auto"), Ok(ShapeSelection::Auto));
        assert_eq!(
            parse_shape_selection("single-patient"),
            Ok(ShapeSelection::Force(DocumentShape::SinglePatient))
        );
        assert_eq!(
            parse_shape_selection("MULTI_PATIENT"),
            Ok(ShapeSelection::Force(DocumentShape::MultiPatient))
        );
        assert!(parse_shape_selection("mixed").is_err());
    }

    #[test]
    fn extract_args_parse_forced_shape() {
        let cli = Cli::try_parse_from(["qrda", "extract", "--shape", "multi", "a.xml"])
            .expect("parse");
        let Command::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(
            args.shape,
            ShapeSelection::Force(DocumentShape::MultiPatient)
        );
        assert_eq!(args.row_tag, DEFAULT_ROW_TAG);
    }
}
