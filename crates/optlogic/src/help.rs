//! Help text for an [`OptionSet`].

use crate::option::OptionDef;
use crate::option_set::OptionSet;

fn format_option_left(option: &OptionDef) -> String {
    let mut out = option
        .short_aliases()
        .iter()
        .map(|s| format!("-{s}"))
        .chain(option.long_aliases().iter().map(|l| format!("--{l}")))
        .collect::<Vec<_>>()
        .join(", ");
    if !option.is_flag() {
        out.push_str(" <VALUE>");
    }
    out
}

fn format_option_help(option: &OptionDef) -> String {
    let mut out = option.description().unwrap_or_default().trim().to_string();
    if option.is_required() {
        if out.is_empty() {
            out.push_str("(required)");
        } else {
            out.push_str(" (required)");
        }
    }
    out
}

/// Render an aligned `Options:` table, one row per option in declaration
/// order. Empty for an empty set.
pub fn render(options: &OptionSet) -> String {
    let mut out = String::new();
    if options.is_empty() {
        return out;
    }

    out.push_str("Options:\n");
    let rows: Vec<(String, String)> = options
        .options()
        .iter()
        .map(|o| (format_option_left(o), format_option_help(o)))
        .collect();
    let width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    for (left, help) in rows {
        if help.is_empty() {
            out.push_str(&format!("  {}\n", left));
        } else {
            out.push_str(&format!("  {:width$}  {}\n", left, help, width = width));
        }
    }
    out
}

/// Every option in its `Display` form, one per line.
pub fn listing(options: &OptionSet) -> String {
    options
        .options()
        .iter()
        .map(|o| format!("{o}\n"))
        .collect()
}
