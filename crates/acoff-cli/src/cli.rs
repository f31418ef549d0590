//! CLI argument definitions for `acoff`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "acoff",
    version,
    about = "Autocomplete-off module - render page scripts and resolve field values",
    long_about = "Render the script that turns browser autocomplete off for configured\n\
                  fields, and resolve stored record values the way the module displays\n\
                  them, from a project's data dictionary and record exports."
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

    /// Allow record identifiers and values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the script injected at the top of an instrument page.
    Script(ScriptArgs),

    /// Print one selector per line for the fields that get autocomplete off.
    Selectors(InstrumentArgs),

    /// Resolve one field of one record and print it as JSON.
    Resolve(ResolveArgs),

    /// List one field's resolved value for every record.
    Values(ValuesArgs),

    /// Print the choices of a field.
    Choices(ChoicesArgs),
}

/// Project exports shared by every subcommand.
#[derive(Args)]
pub struct ProjectArgs {
    /// Data dictionary CSV export.
    #[arg(long = "dictionary", value_name = "CSV")]
    pub dictionary: PathBuf,

    /// Instrument/event mapping CSV (arm_num,unique_event_name,form).
    #[arg(long = "mapping", value_name = "CSV")]
    pub mapping: Option<PathBuf>,

    /// Mark a form as repeating (may be given more than once).
    #[arg(long = "repeating", value_name = "FORM")]
    pub repeating: Vec<String>,
}

#[derive(Args)]
pub struct InstrumentArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Module settings JSON.
    #[arg(long = "settings", value_name = "JSON")]
    pub settings: PathBuf,

    /// Instrument (form) name.
    #[arg(long = "instrument", value_name = "FORM")]
    pub instrument: String,
}

#[derive(Args)]
pub struct ScriptArgs {
    #[command(flatten)]
    pub target: InstrumentArgs,

    /// Render the survey page hook instead of the data entry form hook.
    #[arg(long = "survey")]
    pub survey: bool,
}

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Flat record export (JSON array or CSV).
    #[arg(long = "records", value_name = "PATH")]
    pub records: PathBuf,

    /// Record identifier.
    #[arg(long = "record", value_name = "ID")]
    pub record: String,

    /// Field name.
    #[arg(long = "field", value_name = "FIELD")]
    pub field: String,

    /// Keep stored codes for select and radio fields.
    #[arg(long = "raw")]
    pub raw: bool,
}

#[derive(Args)]
pub struct ValuesArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Flat record export (JSON array or CSV).
    #[arg(long = "records", value_name = "PATH")]
    pub records: PathBuf,

    /// Field name.
    #[arg(long = "field", value_name = "FIELD")]
    pub field: String,

    /// Order rows by the field's date value.
    #[arg(long = "by-date")]
    pub by_date: bool,

    /// Reverse the order.
    #[arg(long = "desc")]
    pub descending: bool,
}

#[derive(Args)]
pub struct ChoicesArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Field name.
    #[arg(long = "field", value_name = "FIELD")]
    pub field: String,
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
