//! Help listing built from registered option descriptions.

use serde::{Deserialize, Serialize};

use crate::option::OptionKind;

/// Read-only description of one registered option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionInfo {
    /// Aliases in declaration order.
    pub aliases: Vec<String>,
    /// Free-text description given at registration.
    pub description: String,
    /// Number of bound destinations (always 0 for flags).
    pub arity: usize,
    /// Option or flag.
    pub kind: OptionKind,
}

impl OptionInfo {
    /// Aliases joined for display, e.g. `-o, --output`.
    pub fn display_names(&self) -> String {
        self.aliases.join(", ")
    }

    /// Value placeholders, e.g. `<ARG1> <ARG2>`; empty for flags.
    pub fn value_hint(&self) -> String {
        match self.kind {
            OptionKind::Flag => String::new(),
            OptionKind::Option if self.arity == 1 => "<ARG>".to_string(),
            OptionKind::Option => (1..=self.arity)
                .map(|idx| format!("<ARG{idx}>"))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    fn usage_column(&self) -> String {
        let hint = self.value_hint();
        if hint.is_empty() {
            self.display_names()
        } else {
            format!("{} {hint}", self.display_names())
        }
    }
}

/// Supported help layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum HelpFormat {
    /// Aligned plain-text columns.
    #[default]
    Table,
    /// Markdown table.
    Markdown,
    /// Pretty-printed JSON.
    Json,
}

#[derive(Serialize)]
struct HelpDocument<'h> {
    program: &'h str,
    options: &'h [OptionInfo],
}

/// Renders the help listing for `program`.
///
/// # Examples
///
/// ```
/// use argbind_core::{ArgParser, HelpFormat, render_help};
///
/// let mut verbose = false;
/// let mut parser = ArgParser::named("tool");
/// parser.add_flag("-v, --verbose", "Enable verbose output", &mut verbose).unwrap();
///
/// let help = render_help("tool", &parser.describe(), HelpFormat::Table);
/// assert!(help.starts_with("Usage: tool [OPTIONS]"));
/// assert!(help.contains("-v, --verbose"));
/// ```
pub fn render_help(program: &str, options: &[OptionInfo], format: HelpFormat) -> String {
    match format {
        HelpFormat::Table => help_to_table(program, options),
        HelpFormat::Markdown => help_to_markdown(program, options),
        HelpFormat::Json => help_to_json(program, options),
    }
}

fn help_to_table(program: &str, options: &[OptionInfo]) -> String {
    let mut out = format!("Usage: {program} [OPTIONS]\n");
    if options.is_empty() {
        return out;
    }

    let columns: Vec<String> = options.iter().map(OptionInfo::usage_column).collect();
    let width = columns.iter().map(|c| c.chars().count()).max().unwrap_or(0);

    out.push_str("\nOptions:\n");
    for (column, option) in columns.iter().zip(options) {
        if option.description.is_empty() {
            out.push_str(&format!("  {column}\n"));
        } else {
            out.push_str(&format!(
                "  {column:<width$}  {}\n",
                option.description
            ));
        }
    }
    out
}

fn help_to_markdown(program: &str, options: &[OptionInfo]) -> String {
    let mut out = format!("# {program}\n\n");
    out.push_str(&format!("**Usage:** `{program} [OPTIONS]`\n\n"));

    if options.is_empty() {
        return out;
    }

    out.push_str("| Option | Values | Description |\n");
    out.push_str("|--------|--------|-------------|\n");
    for option in options {
        let names = option
            .aliases
            .iter()
            .map(|a| format!("`{a}`"))
            .collect::<Vec<_>>()
            .join(", ");
        let values = match option.kind {
            OptionKind::Flag => "flag".to_string(),
            OptionKind::Option => option.arity.to_string(),
        };
        out.push_str(&format!(
            "| {names} | {values} | {} |\n",
            option.description
        ));
    }
    out
}

fn help_to_json(program: &str, options: &[OptionInfo]) -> String {
    let document = HelpDocument { program, options };
    let mut out =
        serde_json::to_string_pretty(&document).expect("help document serializes to JSON");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<OptionInfo> {
        vec![
            OptionInfo {
                aliases: vec!["-n".to_string(), "--number".to_string()],
                description: "Specify two numbers".to_string(),
                arity: 2,
                kind: OptionKind::Option,
            },
            OptionInfo {
                aliases: vec!["--string".to_string()],
                description: "One value".to_string(),
                arity: 1,
                kind: OptionKind::Option,
            },
            OptionInfo {
                aliases: vec!["-f".to_string()],
                description: String::new(),
                arity: 0,
                kind: OptionKind::Flag,
            },
        ]
    }

    #[test]
    fn test_value_hint() {
        let options = sample();
        assert_eq!(options[0].value_hint(), "<ARG1> <ARG2>");
        assert_eq!(options[1].value_hint(), "<ARG>");
        assert_eq!(options[2].value_hint(), "");
    }

    #[test]
    fn test_table_aligns_descriptions() {
        let help = render_help("demo", &sample(), HelpFormat::Table);
        let expected = "\
Usage: demo [OPTIONS]

Options:
  -n, --number <ARG1> <ARG2>  Specify two numbers
  --string <ARG>              One value
  -f
";
        assert_eq!(help, expected);
    }

    #[test]
    fn test_table_without_options() {
        assert_eq!(
            render_help("demo", &[], HelpFormat::Table),
            "Usage: demo [OPTIONS]\n"
        );
    }

    #[test]
    fn test_markdown_lists_every_option() {
        let help = render_help("demo", &sample(), HelpFormat::Markdown);
        assert!(help.starts_with("# demo\n"));
        assert!(help.contains("| `-n`, `--number` | 2 | Specify two numbers |"));
        assert!(help.contains("| `-f` | flag |  |"));
    }

    #[test]
    fn test_json_document() {
        let help = render_help("demo", &sample(), HelpFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&help).unwrap();
        assert_eq!(value["program"], "demo");
        assert_eq!(value["options"][0]["aliases"][1], "--number");
        assert_eq!(value["options"][2]["kind"], "flag");
    }
}
