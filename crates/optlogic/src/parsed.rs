//! The outcome of a successful parse.

use std::any::Any;

use crate::extractor::Value;

/// Whether an option is a presence flag or takes a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Flag,
    Parameter,
}

/// Whether an option appeared among the option tokens.
#[derive(Debug, PartialEq)]
pub enum ArgState {
    /// `raw` is the option token for a flag, or the parameter token.
    Matched { raw: String, value: Box<dyn Value> },
    Unmatched,
}

impl Clone for ArgState {
    fn clone(&self) -> Self {
        match self {
            Self::Matched { raw, value } => Self::Matched {
                raw: raw.clone(),
                value: (**value).clone_value(),
            },
            Self::Unmatched => Self::Unmatched,
        }
    }
}

/// The parse outcome for one declared option.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedArgument {
    handler: String,
    kind: ArgKind,
    state: ArgState,
}

impl ParsedArgument {
    pub(crate) fn flag(handler: &str, token: &str) -> Self {
        Self {
            handler: handler.to_string(),
            kind: ArgKind::Flag,
            state: ArgState::Matched {
                raw: token.to_string(),
                value: Box::new(true),
            },
        }
    }

    pub(crate) fn parameter(handler: &str, raw: &str, value: Box<dyn Value>) -> Self {
        Self {
            handler: handler.to_string(),
            kind: ArgKind::Parameter,
            state: ArgState::Matched {
                raw: raw.to_string(),
                value,
            },
        }
    }

    pub(crate) fn unmatched(handler: &str, kind: ArgKind) -> Self {
        Self {
            handler: handler.to_string(),
            kind,
            state: ArgState::Unmatched,
        }
    }

    pub fn handler(&self) -> &str {
        &self.handler
    }

    pub fn kind(&self) -> ArgKind {
        self.kind
    }

    pub fn state(&self) -> &ArgState {
        &self.state
    }

    pub fn is_matched(&self) -> bool {
        matches!(self.state, ArgState::Matched { .. })
    }

    pub fn raw_value(&self) -> Option<&str> {
        match &self.state {
            ArgState::Matched { raw, .. } => Some(raw),
            ArgState::Unmatched => None,
        }
    }

    /// The extracted value. Flags always have one (`true` or `false`);
    /// parameterized options only when matched.
    pub fn value_dyn(&self) -> Option<&dyn Value> {
        match (&self.state, self.kind) {
            (ArgState::Matched { value, .. }, _) => Some(&**value),
            (ArgState::Unmatched, ArgKind::Flag) => Some(&false as &dyn Value),
            (ArgState::Unmatched, ArgKind::Parameter) => None,
        }
    }

    /// The extracted value as `T`, or `None` if absent or of another type.
    pub fn value<T: Any>(&self) -> Option<&T> {
        self.value_dyn().and_then(|v| v.downcast_ref::<T>())
    }
}

/// All parsed arguments (exactly one per declared option) and the plain
/// arguments in their original order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedResult {
    arguments: Vec<ParsedArgument>,
    plain_args: Vec<String>,
}

impl ParsedResult {
    pub(crate) fn push_argument(&mut self, argument: ParsedArgument) {
        debug_assert!(
            !self.has_argument(argument.handler()),
            "duplicate parsed argument for handler {}",
            argument.handler()
        );
        self.arguments.push(argument);
    }

    pub(crate) fn push_plain(&mut self, token: &str) {
        self.plain_args.push(token.to_string());
    }

    pub fn find_argument(&self, handler: &str) -> Option<&ParsedArgument> {
        self.arguments.iter().find(|a| a.handler() == handler)
    }

    pub fn has_argument(&self, handler: &str) -> bool {
        self.find_argument(handler).is_some()
    }

    /// Whether the option with `handler` appeared on the command line.
    pub fn is_present(&self, handler: &str) -> bool {
        self.find_argument(handler)
            .is_some_and(ParsedArgument::is_matched)
    }

    pub fn raw_value(&self, handler: &str) -> Option<&str> {
        self.find_argument(handler)
            .and_then(ParsedArgument::raw_value)
    }

    pub fn value_dyn(&self, handler: &str) -> Option<&dyn Value> {
        self.find_argument(handler)
            .and_then(ParsedArgument::value_dyn)
    }

    /// Typed value lookup, e.g. `result.value::<i32>("level")`.
    pub fn value<T: Any>(&self, handler: &str) -> Option<&T> {
        self.find_argument(handler)
            .and_then(|a| a.value::<T>())
    }

    pub fn arguments(&self) -> &[ParsedArgument] {
        &self.arguments
    }

    pub fn plain_args(&self) -> &[String] {
        &self.plain_args
    }

    pub fn into_plain_args(self) -> Vec<String> {
        self.plain_args
    }
}
