//! Renderer module
//!
//! Renders scan results to different output formats: json, jsonl, md

use crate::core::model::ScanResult;
use std::io::Write;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Jsonl,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for scan results
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render results to a string
    pub fn render(&self, results: &[ScanResult]) -> String {
        match self.config.format {
            OutputFormat::Json => self.render_json(results),
            OutputFormat::Jsonl => self.render_jsonl(results),
            OutputFormat::Markdown => self.render_markdown(results),
        }
    }

    /// Render to a writer
    pub fn render_to<W: Write>(&self, results: &[ScanResult], mut writer: W) -> std::io::Result<()> {
        let output = self.render(results);
        writer.write_all(output.as_bytes())?;
        if !output.is_empty() {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Render as a single JSON array
    fn render_json(&self, results: &[ScanResult]) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(results).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, results: &[ScanResult]) -> String {
        results
            .iter()
            .filter_map(|result| {
                if self.config.pretty {
                    serde_json::to_string_pretty(result).ok()
                } else {
                    serde_json::to_string(result).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as Markdown
    fn render_markdown(&self, results: &[ScanResult]) -> String {
        let mut output = String::new();
        if results.is_empty() {
            return output;
        }

        output.push_str(&format!("## Matches for {}\n\n", code_span(&results[0].pattern)));
        output.push_str("| File | Matches | Unique |\n");
        output.push_str("| --- | ---: | ---: |\n");
        for result in results {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                table_cell(&result.file_name),
                result.match_count,
                result.unique_match_count
            ));
        }
        output.push('\n');

        for result in results {
            output.push_str(&format!("### {}\n\n", code_span(&result.file_name)));
            for matched in &result.unique_matched_strings {
                output.push_str(&format!("- {}\n", code_span(matched)));
            }
            output.push('\n');
        }

        output
    }
}

/// Inline code span that survives any content: line breaks are shown as
/// `\n`/`\r` and the fence is longer than any backtick run inside.
fn code_span(text: &str) -> String {
    let text = text.replace('\r', "\\r").replace('\n', "\\n");
    let longest_run = text.split(|c| c != '`').map(str::len).max().unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    if text.starts_with('`') || text.ends_with('`') {
        format!("{} {} {}", fence, text, fence)
    } else {
        format!("{}{}{}", fence, text, fence)
    }
}

/// Code span for a table cell; pipes must be escaped even inside code
fn table_cell(text: &str) -> String {
    code_span(text).replace('|', "\\|")
}
