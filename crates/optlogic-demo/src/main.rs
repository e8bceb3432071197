use std::process::ExitCode;

use anyhow::{Context, Result};
use optlogic::{OptionDef, OptionSet, ParsedResult, extractor, help, parse, rule};
use tracing_subscriber::{EnvFilter, fmt};

const USAGE: &str = "Usage: optlogic-demo [OPTIONS] --input <FILE> [--] [ARGS]...";

fn main() -> ExitCode {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            eprintln!("\n{USAGE}\nTry '--help' for more information.");
            ExitCode::from(2)
        }
    }
}

fn run(args: &[String]) -> Result<()> {
    let options = declare_options().context("failed to declare options")?;

    if wants_help(&options, args) {
        print!("{USAGE}\n\n{}", help::render(&options));
        return Ok(());
    }

    let parsed = parse(&options, args).context("invalid command line")?;
    tracing::debug!(arguments = parsed.arguments().len(), "command line accepted");
    print!("{}", summary(&parsed));
    Ok(())
}

fn declare_options() -> optlogic::Result<OptionSet> {
    let mut options = OptionSet::new();
    options
        .add_option(
            OptionDef::builder()
                .short_alias("h")?
                .long_alias("help")?
                .description("Print help")?
                .build()?,
        )?
        .add_option(
            OptionDef::builder()
                .short_alias("v")?
                .long_alias("verbose")?
                .description("Print every parsed argument")?
                .build()?,
        )?
        .add_option(
            OptionDef::builder()
                .short_alias("i")?
                .long_alias("input")?
                .required()?
                .expects_parameter()?
                .description("Path to the input file")?
                .build()?,
        )?
        .add_option(
            OptionDef::builder()
                .short_alias("l")?
                .long_alias("level")?
                .extractor(extractor::integer_in(0, 9)?)?
                .description("Debug level from 0 to 9, needs --debug")?
                .build()?,
        )?
        .add_option(
            OptionDef::builder()
                .long_alias("debug")?
                .description("Build in debug mode")?
                .build()?,
        )?
        .add_option(
            OptionDef::builder()
                .long_alias("release")?
                .description("Build in release mode")?
                .build()?,
        )?
        .add_option(
            OptionDef::builder()
                .short_alias("r")?
                .long_alias("ranges")?
                .extractor(extractor::list_of(
                    ",",
                    extractor::list_of("-", extractor::integer())?,
                )?)?
                .description("Comma-separated integer ranges, e.g. 1-4,8-9")?
                .build()?,
        )?;
    options
        .add_rule(rule::xor("release", "debug"))
        .add_rule(rule::implies("level", "debug"));
    Ok(options)
}

/// `--help` short-circuits the rules, so it is looked for before parsing.
///
/// Follows the parser's option phase: stops where plain arguments begin and
/// skips the value token of every parameterized option.
fn wants_help(options: &OptionSet, args: &[String]) -> bool {
    let mut tokens = args.iter();
    while let Some(token) = tokens.next() {
        if token == optlogic::PLAIN_ARGS_DELIMITER || !token.starts_with(optlogic::SHORT_PREFIX) {
            return false;
        }
        if token == "-h" || token == "--help" {
            return true;
        }
        let alias = token
            .strip_prefix(optlogic::LONG_PREFIX)
            .or_else(|| token.strip_prefix(optlogic::SHORT_PREFIX))
            .unwrap_or(token);
        if options.find_option(alias).is_some_and(|o| !o.is_flag()) {
            tokens.next();
        }
    }
    false
}

fn summary(parsed: &ParsedResult) -> String {
    let mut out = String::new();
    let input = parsed.value::<String>("input").map(String::as_str).unwrap_or_default();
    out.push_str(&format!("input: {input}\n"));

    let mode = if parsed.is_present("debug") { "debug" } else { "release" };
    out.push_str(&format!("mode: {mode}\n"));

    if let Some(level) = parsed.value::<i32>("level") {
        out.push_str(&format!("level: {level}\n"));
    }
    if let Some(ranges) = parsed.value::<Vec<Vec<i32>>>("ranges") {
        let rendered: Vec<String> = ranges
            .iter()
            .map(|r| r.iter().map(i32::to_string).collect::<Vec<_>>().join("-"))
            .collect();
        out.push_str(&format!("ranges: {}\n", rendered.join(" ")));
    }
    if parsed.is_present("verbose") {
        for arg in parsed.arguments() {
            let raw = arg.raw_value().unwrap_or("-");
            out.push_str(&format!("  {:8} {}\n", arg.handler(), raw));
        }
    }
    if !parsed.plain_args().is_empty() {
        out.push_str(&format!("args: {}\n", parsed.plain_args().join(" ")));
    }
    out
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
