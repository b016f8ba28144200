//! CLI module - Command-line interface definition and handler

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::{FileConfig, CONFIG_ENV};
use crate::core::file_reader::EncodingStrategy;
use crate::core::model::ScanReport;
use crate::core::render::{OutputFormat, RenderConfig, Renderer};
use crate::core::util::summary_line;
use crate::scan::{scan, ScanParams};

/// wordcrawl - search a directory tree for a regular expression and report
/// per-file match statistics.
#[derive(Parser, Debug)]
#[command(name = "wordcrawl")]
#[command(
    author,
    version,
    about,
    long_about = r#"wordcrawl walks one or more files or directories, skips excluded
subdirectories, filters by extension, drops binary files and runs a
case-insensitive regular expression over every remaining text file.

Each file with at least one match yields one result:
  file_name, pattern, match_count, unique_match_count,
  matched_strings, unique_matched_strings

Results go to stdout; diagnostics and the summary line go to stderr.

Output formats:
- json: a single JSON array (default)
- jsonl: one JSON object per line
- md: human-friendly Markdown

Examples:
    wordcrawl cat
    wordcrawl "(wo)?m(a|e)n" docs notes.txt
    wordcrawl TODO --include-ext rs,toml --exclude-dir target
    wordcrawl "foo bar" --collapse-whitespace --format jsonl
"#
)]
pub struct Cli {
    /// Regular expression to search for (always case-insensitive).
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Files or directories to search.
    #[arg(
        value_name = "PATH",
        num_args = 0..,
        long_help = "Files or directories to search. A leading ~ expands to the home directory.\n\n\
If omitted, the current directory is searched. Every path must exist."
    )]
    pub paths: Vec<String>,

    /// Directory names never descended into (default: .git,.idea).
    #[arg(
        long = "exclude-dir",
        value_name = "NAME",
        value_delimiter = ',',
        long_help = "Directory basenames that are never descended into, at any depth.\n\n\
Comma-separated or repeated. Giving this flag replaces the defaults (.git, .idea);\n\
pass an empty value to prune nothing."
    )]
    pub exclude_dir: Option<Vec<String>>,

    /// Only search files with these extensions.
    #[arg(
        long = "include-ext",
        value_name = "EXT",
        value_delimiter = ',',
        long_help = "Only search files with these extensions. A missing leading dot is added.\n\n\
Cannot be combined with --exclude-ext."
    )]
    pub include_ext: Option<Vec<String>>,

    /// Skip files with these extensions.
    #[arg(
        long = "exclude-ext",
        value_name = "EXT",
        value_delimiter = ',',
        long_help = "Skip files with these extensions. A missing leading dot is added.\n\n\
Cannot be combined with --include-ext."
    )]
    pub exclude_ext: Option<Vec<String>>,

    /// Search files whose content looks binary.
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub include_binary: Option<bool>,

    /// Fold newlines and whitespace runs into single spaces before matching.
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        long_help = "Replace newlines with spaces and collapse every run of whitespace into one\n\
space before matching, so a pattern like \"foo bar\" also matches across a line break.\n\n\
Matched strings are reported from the collapsed text."
    )]
    pub collapse_whitespace: Option<bool>,

    /// Follow symlinked directories.
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub follow_symlinks: Option<bool>,

    /// Also honor .gitignore and .ignore files.
    #[arg(
        long = "respect-ignore",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub respect_ignore: Option<bool>,

    /// How file bytes are decoded (utf8, utf8-lossy, latin1).
    #[arg(
        long,
        value_name = "ENCODING",
        long_help = "How file bytes are decoded before matching.\n\n\
Supported values:\n\
- utf8 (default): files that are not valid UTF-8 are skipped\n\
- utf8-lossy: invalid sequences are replaced\n\
- latin1: every byte is one character; never fails"
    )]
    pub encoding: Option<EncodingStrategy>,

    /// Skip files larger than this many bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// JSON config file.
    #[arg(
        long,
        env = CONFIG_ENV,
        value_name = "FILE",
        long_help = "JSON config file. Values in the file override built-in defaults; flags given\n\
on the command line override the file. Unknown keys are rejected."
    )]
    pub config: Option<PathBuf>,

    /// Output format (json/jsonl/md).
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long)]
    pub pretty: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Quiet mode (errors only, no summary line).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build scan parameters: defaults, then the config file, then flags
    pub fn scan_params(&self, file_config: &FileConfig) -> ScanParams {
        let mut params = ScanParams::new(self.pattern.clone());
        file_config.apply_to(&mut params);

        if !self.paths.is_empty() {
            params.search_paths = self.paths.clone();
        }
        if let Some(names) = &self.exclude_dir {
            params.excluded_subdirectories = names.clone();
        }
        // An extension flag replaces the whole filter from the config file;
        // giving both flags is still a conflict.
        if self.include_ext.is_some() || self.exclude_ext.is_some() {
            params.included_extensions = self.include_ext.clone().unwrap_or_default();
            params.excluded_extensions = self.exclude_ext.clone().unwrap_or_default();
        }
        if let Some(value) = self.include_binary {
            params.include_binary_files = value;
        }
        if let Some(value) = self.collapse_whitespace {
            params.collapse_whitespace = value;
        }
        if let Some(value) = self.follow_symlinks {
            params.follow_symlinks = value;
        }
        if let Some(value) = self.respect_ignore {
            params.respect_ignore_files = value;
        }
        if let Some(encoding) = self.encoding {
            params.encoding = encoding;
        }
        if let Some(limit) = self.max_file_size {
            params.max_file_size = Some(limit);
        }
        params
    }

    fn output_format(&self, file_config: &FileConfig) -> Result<OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        match &file_config.format {
            Some(name) => name
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .context("Invalid format in config file"),
            None => Ok(OutputFormat::default()),
        }
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over the flags.
fn setup_logging(verbose: bool, quiet: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if quiet {
            "error"
        } else if verbose {
            "debug,ignore=warn,globset=warn"
        } else {
            "info"
        };
        tracing_subscriber::EnvFilter::new(level)
    });

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn print_summary(report: &ScanReport) {
    let stats = &report.stats;
    let line = summary_line(stats.files_matched, stats.files_inspected);
    let styled = if stats.files_matched > 0 {
        line.green()
    } else {
        line.yellow()
    };
    eprintln!("{}", styled);
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let format = cli.output_format(&file_config)?;
    let params = cli.scan_params(&file_config);

    let report = scan(params)?;

    let renderer = Renderer::with_config(RenderConfig::with_pretty(format, cli.pretty));
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    renderer
        .render_to(&report.results, &mut handle)
        .context("Failed to write results")?;
    handle.flush()?;

    if !cli.quiet {
        print_summary(&report);
    }

    Ok(())
}
