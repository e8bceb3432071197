//! Logical constraints between options, checked after parsing.
//!
//! A [`Rule`] is a boolean expression over the parsed result. Leaves are
//! either [`exists`] checks or [`atomic`] predicates over chosen options;
//! inner nodes negate or combine them:
//!
//! ```
//! use optlogic::rule;
//!
//! // exactly one build mode, and --level only together with --debug
//! let rules = [rule::xor("release", "debug"), rule::implies("level", "debug")];
//! assert_eq!(rules[0].to_string(), "(release xor debug)");
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::parsed::{ParsedArgument, ParsedResult};

/// Boolean connective of a binary rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Xor,
    Nand,
    Implies,
    ImpliedBy,
    Or,
}

impl BinaryOp {
    pub fn apply(self, left: bool, right: bool) -> bool {
        match self {
            Self::Eq => left == right,
            Self::Xor => left != right,
            Self::Nand => !(left && right),
            Self::Implies => !left || right,
            Self::ImpliedBy => left || !right,
            Self::Or => left || right,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Xor => "xor",
            Self::Nand => "nand",
            Self::Implies => "implies",
            Self::ImpliedBy => "impliedby",
            Self::Or => "or",
        }
    }
}

/// The parsed arguments an atomic predicate asked for, keyed by handler in
/// the order they were requested.
///
/// Handlers without an entry in the parsed result are left out.
#[derive(Debug)]
pub struct RuleArgs<'a> {
    args: IndexMap<&'a str, &'a ParsedArgument>,
}

impl<'a> RuleArgs<'a> {
    fn collect(handlers: &'a [String], target: &'a ParsedResult) -> Self {
        let args = handlers
            .iter()
            .filter_map(|h| target.find_argument(h).map(|arg| (h.as_str(), arg)))
            .collect();
        Self { args }
    }

    pub fn get(&self, handler: &str) -> Option<&'a ParsedArgument> {
        self.args.get(handler).copied()
    }

    pub fn is_present(&self, handler: &str) -> bool {
        self.get(handler).is_some_and(ParsedArgument::is_matched)
    }

    pub fn value<T: Any>(&self, handler: &str) -> Option<&'a T> {
        self.get(handler).and_then(|arg| arg.value::<T>())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a ParsedArgument)> + '_ {
        self.args.iter().map(|(h, arg)| (*h, *arg))
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

type Predicate = dyn Fn(&RuleArgs<'_>) -> bool + Send + Sync;

/// A caller-supplied predicate bound to a list of option handlers.
#[derive(Clone)]
pub struct AtomicRule {
    handlers: Vec<String>,
    predicate: Arc<Predicate>,
}

impl AtomicRule {
    pub fn handlers(&self) -> &[String] {
        &self.handlers
    }

    fn holds(&self, target: &ParsedResult) -> bool {
        let args = RuleArgs::collect(&self.handlers, target);
        (self.predicate)(&args)
    }
}

impl fmt::Debug for AtomicRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicRule")
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}

/// A boolean constraint on a parsed result.
#[derive(Debug, Clone)]
pub enum Rule {
    /// True iff the option with this handler was matched.
    Exists(String),
    Atomic(AtomicRule),
    Not(Box<Rule>),
    Binary {
        left: Box<Rule>,
        op: BinaryOp,
        right: Box<Rule>,
    },
}

impl Rule {
    /// Evaluate the rule against `target`.
    pub fn holds(&self, target: &ParsedResult) -> bool {
        match self {
            Self::Exists(handler) => target.is_present(handler),
            Self::Atomic(atomic) => atomic.holds(target),
            Self::Not(inner) => !inner.holds(target),
            Self::Binary { left, op, right } => op.apply(left.holds(target), right.holds(target)),
        }
    }

    pub fn binary(self, op: BinaryOp, other: impl Into<Rule>) -> Rule {
        Rule::Binary {
            left: Box::new(self),
            op,
            right: Box::new(other.into()),
        }
    }

    pub fn iff(self, other: impl Into<Rule>) -> Rule {
        self.binary(BinaryOp::Eq, other)
    }

    pub fn xor(self, other: impl Into<Rule>) -> Rule {
        self.binary(BinaryOp::Xor, other)
    }

    pub fn nand(self, other: impl Into<Rule>) -> Rule {
        self.binary(BinaryOp::Nand, other)
    }

    pub fn implies(self, other: impl Into<Rule>) -> Rule {
        self.binary(BinaryOp::Implies, other)
    }

    pub fn implied_by(self, other: impl Into<Rule>) -> Rule {
        self.binary(BinaryOp::ImpliedBy, other)
    }

    pub fn or(self, other: impl Into<Rule>) -> Rule {
        self.binary(BinaryOp::Or, other)
    }
}

impl std::ops::Not for Rule {
    type Output = Rule;

    fn not(self) -> Rule {
        Rule::Not(Box::new(self))
    }
}

/// A bare handler name is shorthand for [`exists`].
impl From<&str> for Rule {
    fn from(handler: &str) -> Self {
        exists(handler)
    }
}

impl From<String> for Rule {
    fn from(handler: String) -> Self {
        Rule::Exists(handler)
    }
}

impl From<AtomicRule> for Rule {
    fn from(atomic: AtomicRule) -> Self {
        Rule::Atomic(atomic)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exists(handler) => f.write_str(handler),
            Self::Atomic(atomic) => write!(f, "atomic({})", atomic.handlers.join(", ")),
            Self::Not(inner) => write!(f, "not {inner}"),
            Self::Binary { left, op, right } => write!(f, "({left} {} {right})", op.symbol()),
        }
    }
}

/// True iff the option with `handler` was matched.
pub fn exists(handler: &str) -> Rule {
    Rule::Exists(handler.to_string())
}

/// A predicate over the parsed arguments of `handlers`.
pub fn atomic<I, S, F>(handlers: I, predicate: F) -> Rule
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    F: Fn(&RuleArgs<'_>) -> bool + Send + Sync + 'static,
{
    Rule::Atomic(AtomicRule {
        handlers: handlers.into_iter().map(Into::into).collect(),
        predicate: Arc::new(predicate),
    })
}

pub fn not(rule: impl Into<Rule>) -> Rule {
    Rule::Not(Box::new(rule.into()))
}

pub fn iff(left: impl Into<Rule>, right: impl Into<Rule>) -> Rule {
    Rule::iff(left.into(), right)
}

pub fn xor(left: impl Into<Rule>, right: impl Into<Rule>) -> Rule {
    Rule::xor(left.into(), right)
}

pub fn nand(left: impl Into<Rule>, right: impl Into<Rule>) -> Rule {
    Rule::nand(left.into(), right)
}

pub fn implies(left: impl Into<Rule>, right: impl Into<Rule>) -> Rule {
    Rule::implies(left.into(), right)
}

pub fn implied_by(left: impl Into<Rule>, right: impl Into<Rule>) -> Rule {
    Rule::implied_by(left.into(), right)
}

pub fn or(left: impl Into<Rule>, right: impl Into<Rule>) -> Rule {
    Rule::or(left.into(), right)
}
