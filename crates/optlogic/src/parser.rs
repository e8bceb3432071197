//! Token scanning: matches raw command-line tokens against an [`OptionSet`].

use crate::error::{ParseError, Result};
use crate::option::{OptionDef, is_valid_long_alias, is_valid_short_alias};
use crate::option_set::OptionSet;
use crate::parsed::{ArgKind, ParsedArgument, ParsedResult};

/// Token ending the option phase; everything after it is a plain argument.
pub const PLAIN_ARGS_DELIMITER: &str = "--";
pub const SHORT_PREFIX: &str = "-";
pub const LONG_PREFIX: &str = "--";

/// Parse `tokens` against `options`.
///
/// Options must come first. Scanning stops at `--` (which is consumed), at
/// an empty token, or at the first token not starting with `-`; all
/// remaining tokens are plain arguments, even if they look like options.
/// Short options cannot be bundled (`-ab` is invalid).
///
/// After scanning, mandatory options are checked, every unmatched option
/// gets an unmatched entry, and all rules of the set are enforced. The
/// first failure is returned.
pub fn parse<S: AsRef<str>>(options: &OptionSet, tokens: &[S]) -> Result<ParsedResult> {
    let mut result = ParsedResult::default();

    tracing::debug!(
        tokens = tokens.len(),
        options = options.len(),
        "scanning option tokens"
    );

    let mut i = 0usize;
    while i < tokens.len() {
        let token = tokens[i].as_ref();

        if token == PLAIN_ARGS_DELIMITER {
            i += 1;
            break;
        }
        // Also true for the empty token.
        if !token.starts_with(SHORT_PREFIX) {
            break;
        }

        let alias = option_alias(token)?;
        let Some(option) = options.find_option(alias) else {
            return Err(ParseError::UndefinedOption(token.to_string()).into());
        };
        if result.has_argument(option.handler()) {
            return Err(ParseError::DuplicateOption(token.to_string()).into());
        }

        let argument = match option.extractor() {
            None => ParsedArgument::flag(option.handler(), token),
            Some(extractor) => {
                // The value token is taken verbatim, even if it starts with `-`.
                i += 1;
                let Some(raw) = tokens.get(i) else {
                    return Err(ParseError::MissingParameter(token.to_string()).into());
                };
                let raw = raw.as_ref();
                let value = extractor.parse(raw)?;
                ParsedArgument::parameter(option.handler(), raw, value)
            }
        };
        tracing::trace!(handler = option.handler(), token, "matched option");
        result.push_argument(argument);
        i += 1;
    }

    tracing::debug!(plain = tokens.len() - i, "collecting plain arguments");
    for token in &tokens[i..] {
        result.push_plain(token.as_ref());
    }

    check_mandatory(options, &result)?;
    fill_unmatched(options, &mut result);
    enforce_rules(options, &result)?;

    Ok(result)
}

/// Check `tokens` against `options`, discarding the parsed result.
pub fn validate<S: AsRef<str>>(options: &OptionSet, tokens: &[S]) -> Result<()> {
    parse(options, tokens).map(|_| ())
}

/// Strip the dash prefix of an option-like token, checking its shape.
fn option_alias(token: &str) -> std::result::Result<&str, ParseError> {
    if let Some(alias) = token.strip_prefix(LONG_PREFIX) {
        if is_valid_long_alias(alias) {
            return Ok(alias);
        }
        return Err(ParseError::InvalidOption(token.to_string()));
    }
    if let Some(alias) = token.strip_prefix(SHORT_PREFIX) {
        if is_valid_short_alias(alias) {
            return Ok(alias);
        }
    }
    Err(ParseError::InvalidOption(token.to_string()))
}

fn check_mandatory(options: &OptionSet, result: &ParsedResult) -> Result<()> {
    let missing = options
        .options()
        .iter()
        .filter(|o| o.is_required())
        .find(|o| !result.has_argument(o.handler()));
    match missing {
        Some(option) => Err(ParseError::MissingMandatory(option.display_name()).into()),
        None => Ok(()),
    }
}

fn fill_unmatched(options: &OptionSet, result: &mut ParsedResult) {
    for option in options.options() {
        if result.has_argument(option.handler()) {
            continue;
        }
        result.push_argument(ParsedArgument::unmatched(option.handler(), kind_of(option)));
    }
}

fn kind_of(option: &OptionDef) -> ArgKind {
    if option.is_flag() {
        ArgKind::Flag
    } else {
        ArgKind::Parameter
    }
}

fn enforce_rules(options: &OptionSet, result: &ParsedResult) -> Result<()> {
    for rule in options.rules() {
        if !rule.holds(result) {
            tracing::debug!(%rule, "rule violated");
            return Err(crate::error::LogicError::RuleViolated(rule.to_string()).into());
        }
    }
    tracing::debug!(rules = options.rules().len(), "all rules hold");
    Ok(())
}
