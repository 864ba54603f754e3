//! Reports produced by the `probe` and `lex` subcommands and their rendering.

use argbind_core::{OptionKind, ParseOutcome, split_option};
use serde::Serialize;

use crate::manifest::BoundValue;

/// Supported report formats.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

/// Result of parsing tokens against a manifest.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub program: String,
    pub outcome: &'static str,
    pub options: Vec<ProbedOption>,
}

/// State of one option after the pass.
#[derive(Debug, Clone, Serialize)]
pub struct ProbedOption {
    pub aliases: Vec<String>,
    pub kind: OptionKind,
    pub matched: bool,
    /// Tokens collected for the option, including ones beyond its slots.
    pub raw: Vec<String>,
    pub values: Vec<BoundValue>,
}

/// Classification of one token.
#[derive(Debug, Clone, Serialize)]
pub struct LexedToken {
    pub token: String,
    pub is_option: bool,
    pub name: String,
    pub value: String,
}

pub fn outcome_label(outcome: ParseOutcome) -> &'static str {
    match outcome {
        ParseOutcome::Parsed => "parsed",
        ParseOutcome::Help => "help",
        ParseOutcome::AlreadyParsed => "already-parsed",
    }
}

pub fn lex_tokens(tokens: &[String]) -> Vec<LexedToken> {
    tokens
        .iter()
        .map(|token| {
            let split = split_option(token);
            LexedToken {
                token: token.clone(),
                is_option: split.is_option,
                name: split.name.to_string(),
                value: split.value.to_string(),
            }
        })
        .collect()
}

/// Formats a probe report in the requested output format.
pub fn format_probe(report: &ProbeReport, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(probe_to_table(report)),
    }
}

/// Formats lexed tokens in the requested output format.
pub fn format_lexed(tokens: &[LexedToken], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(tokens)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(tokens).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Table => Ok(lexed_to_table(tokens)),
    }
}

fn probe_to_table(report: &ProbeReport) -> String {
    let mut out = format!("Program: {}\nOutcome: {}\n", report.program, report.outcome);
    if report.options.is_empty() {
        return out;
    }

    let names: Vec<String> = report.options.iter().map(|o| o.aliases.join(", ")).collect();
    let width = names
        .iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0)
        .max("OPTION".len());

    out.push('\n');
    out.push_str(&format!("{:<width$}  {:<7}  VALUES\n", "OPTION", "MATCHED"));
    for (name, option) in names.iter().zip(&report.options) {
        let values = match option.kind {
            OptionKind::Flag => option.matched.to_string(),
            OptionKind::Option => option
                .values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" "),
        };
        let matched = if option.matched { "yes" } else { "no" };
        out.push_str(&format!("{name:<width$}  {matched:<7}  {values}\n"));
    }
    out
}

fn lexed_to_table(tokens: &[LexedToken]) -> String {
    let width = tokens
        .iter()
        .map(|t| t.token.chars().count())
        .max()
        .unwrap_or(0)
        .max("TOKEN".len());

    let mut out = format!("{:<width$}  {:<6}  NAME  VALUE\n", "TOKEN", "KIND");
    for token in tokens {
        let kind = if token.is_option { "option" } else { "value" };
        out.push_str(&format!(
            "{:<width$}  {kind:<6}  {}  {}\n",
            token.token, token.name, token.value
        ));
    }
    out
}
