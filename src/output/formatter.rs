//! Console and JSON rendering of match results

use crate::config::OutputFormat;
use crate::error::Result;
use crate::processing::matcher::MatchResult;
use crate::processing::scoring::{Selection, WeightTier};
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_result(&self, result: &MatchResult) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".blue().bold(), title.blue().bold())
        } else {
            format!("\n# {}\n", title)
        }
    }

    fn format_verdict(&self, selection: Selection) -> String {
        let color = match selection {
            Selection::Selected => Color::Green,
            Selection::NotSelected => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", selection.label().color(color).bold())
        } else {
            format!("[{}]", selection.label())
        }
    }

    fn format_tier(tier: WeightTier) -> String {
        let (content, skill) = tier.weights();
        format!("content x{:.1} + skills x{:.1}", content, skill)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_result(&self, result: &MatchResult) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME MATCH"));
        output.push_str(&format!(
            "{} final score {:.2}\n",
            self.format_verdict(result.selection),
            result.final_score
        ));
        output.push_str(&format!("  Content similarity: {:.2}%\n", result.content_similarity));
        output.push_str(&format!("  Skill match:        {:.2}%\n", result.skill_match));
        output.push_str(&format!("  Weighting:          {}\n", Self::format_tier(result.tier)));

        if result.matched_skills.is_empty() {
            output.push_str(&format!("  {}\n", self.colorize("No matching skills", Color::Yellow)));
        } else {
            let skills: Vec<&str> = result.matched_skills.iter().collect();
            output.push_str(&format!(
                "  Matched skills:     {}\n",
                self.colorize(&skills.join(", "), Color::Cyan)
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_result(&self, result: &MatchResult) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(result)?)
        } else {
            Ok(serde_json::to_string(result)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
}

impl ReportGenerator {
    pub fn new(use_colors: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(true),
        }
    }

    pub fn generate(&self, result: &MatchResult, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_result(result),
            OutputFormat::Json => self.json_formatter.format_result(result),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(true)
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}
