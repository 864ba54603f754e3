mod manifest;
mod output;

use std::path::{Path, PathBuf};

use argbind_core::{ArgParser, HelpFormat, OptionHandle, OptionInfo, ParseOutcome, render_help};
use clap::{Args, Parser, Subcommand};

use manifest::{BoundValue, Manifest};
use output::{
    OutputFormat, ProbeReport, ProbedOption, format_lexed, format_probe, lex_tokens, outcome_label,
};

#[derive(Debug, Parser)]
#[command(name = "argbind")]
#[command(about = "Probe option declarations with the argbind parsing engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse tokens against the options declared in a manifest.
    Probe(ProbeArgs),
    /// Print the help listing of a manifest.
    Describe(DescribeArgs),
    /// Show how each token is classified and split.
    Lex(LexArgs),
}

#[derive(Debug, Args)]
struct ProbeArgs {
    /// Manifest file (YAML, or JSON with a .json extension).
    #[arg(long)]
    manifest: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
    /// Tokens to parse, after `--`.
    #[arg(last = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct DescribeArgs {
    /// Manifest file (YAML, or JSON with a .json extension).
    #[arg(long)]
    manifest: PathBuf,
    /// Help layout (defaults to the manifest's `help_format`).
    #[arg(long)]
    format: Option<HelpFormat>,
}

#[derive(Debug, Args)]
struct LexArgs {
    /// Output format.
    #[arg(long, default_value = "table")]
    format: OutputFormat,
    /// Tokens to classify, after `--`.
    #[arg(last = true)]
    tokens: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Probe(args) => run_probe(args),
        Command::Describe(args) => run_describe(args),
        Command::Lex(args) => run_lex(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn load_manifest(path: &Path) -> Result<Manifest, String> {
    Manifest::load(path).map_err(|err| format!("Failed to load '{}': {err}", path.display()))
}

/// Registers every manifest option, binding values and flags to the given
/// storage.
fn register_manifest<'a>(
    parser: &mut ArgParser<'a>,
    manifest: &Manifest,
    values: &'a mut [Vec<BoundValue>],
    flags: &'a mut [bool],
) -> Result<Vec<OptionHandle>, String> {
    let mut handles = Vec::with_capacity(manifest.options.len());
    for ((spec, slot_values), flag) in manifest.options.iter().zip(values).zip(flags) {
        let handle = if spec.flag {
            parser.add_flag(&spec.declaration, &spec.description, flag)
        } else {
            parser.add_option(&spec.declaration, &spec.description, spec.bind(slot_values))
        }
        .map_err(|err| err.to_string())?;
        handles.push(handle);
    }
    Ok(handles)
}

fn run_probe(args: ProbeArgs) -> Result<(), String> {
    let manifest = load_manifest(&args.manifest)?;

    let mut values: Vec<Vec<BoundValue>> =
        manifest.options.iter().map(|o| o.unset_values()).collect();
    let mut flags = vec![false; manifest.options.len()];

    let (program, outcome, probed) = {
        let mut parser = ArgParser::with_config(manifest.parser.clone());
        let handles = register_manifest(&mut parser, &manifest, &mut values, &mut flags)?;

        let outcome = parser.parse(args.tokens).map_err(|err| err.to_string())?;

        let probed: Vec<(OptionInfo, bool, Vec<String>)> = parser
            .describe()
            .into_iter()
            .zip(&handles)
            .map(|(info, &handle)| {
                (
                    info,
                    parser.is_matched(handle),
                    parser.raw_results(handle).to_vec(),
                )
            })
            .collect();
        (parser.name().to_string(), outcome, probed)
    };

    if outcome == ParseOutcome::Help {
        return Ok(());
    }

    let options = probed
        .into_iter()
        .zip(values)
        .map(|((info, matched, raw), values)| ProbedOption {
            aliases: info.aliases,
            kind: info.kind,
            matched,
            raw,
            values,
        })
        .collect();

    let report = ProbeReport {
        program,
        outcome: outcome_label(outcome),
        options,
    };
    println!("{}", format_probe(&report, args.format)?.trim_end());
    Ok(())
}

fn run_describe(args: DescribeArgs) -> Result<(), String> {
    let manifest = load_manifest(&args.manifest)?;
    let format = args.format.unwrap_or(manifest.parser.help_format);

    let mut values: Vec<Vec<BoundValue>> =
        manifest.options.iter().map(|o| o.unset_values()).collect();
    let mut flags = vec![false; manifest.options.len()];

    let mut parser = ArgParser::with_config(manifest.parser.clone());
    register_manifest(&mut parser, &manifest, &mut values, &mut flags)?;

    print!("{}", render_help(parser.name(), &parser.describe(), format));
    Ok(())
}

fn run_lex(args: LexArgs) -> Result<(), String> {
    let lexed = lex_tokens(&args.tokens);
    println!("{}", format_lexed(&lexed, args.format)?.trim_end());
    Ok(())
}
