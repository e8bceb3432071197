//! Option declarations.

use std::fmt;

use crate::error::BuilderError;
use crate::extractor::{self, AnyExtractor, Extractor};

/// Whether `alias` can be used as a short alias (`-x`).
pub fn is_valid_short_alias(alias: &str) -> bool {
    let mut chars = alias.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic())
}

/// Whether `alias` can be used as a long alias (`--xyz`): a letter followed
/// by at least one letter or digit.
pub fn is_valid_long_alias(alias: &str) -> bool {
    let mut chars = alias.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            let rest = chars.as_str();
            !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

/// Kind of alias, used to pick the namespace for lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasKind {
    Short,
    Long,
}

/// A declared command-line option.
///
/// Created through [`OptionDef::builder`] and immutable afterwards. An option
/// without an extractor is a flag; one with an extractor consumes the next
/// token as its value.
#[derive(Debug, Clone)]
pub struct OptionDef {
    required: bool,
    short_aliases: Vec<String>,
    long_aliases: Vec<String>,
    handler: String,
    description: Option<String>,
    extractor: Option<AnyExtractor>,
}

impl OptionDef {
    pub fn builder() -> OptionBuilder {
        OptionBuilder::new()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn short_aliases(&self) -> &[String] {
        &self.short_aliases
    }

    pub fn long_aliases(&self) -> &[String] {
        &self.long_aliases
    }

    pub fn handler(&self) -> &str {
        &self.handler
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn extractor(&self) -> Option<&AnyExtractor> {
        self.extractor.as_ref()
    }

    pub fn is_flag(&self) -> bool {
        self.extractor.is_none()
    }

    /// Whether this option answers to `alias` (without its dash prefix).
    pub fn has_alias(&self, alias: &str) -> bool {
        self.has_alias_of(alias, AliasKind::Short) || self.has_alias_of(alias, AliasKind::Long)
    }

    pub fn has_alias_of(&self, alias: &str, kind: AliasKind) -> bool {
        let aliases = match kind {
            AliasKind::Short => &self.short_aliases,
            AliasKind::Long => &self.long_aliases,
        };
        aliases.iter().any(|a| a == alias)
    }

    /// The alias shown to users: the first long alias, else the first short
    /// one, with its dash prefix.
    pub fn display_name(&self) -> String {
        self.long_aliases
            .first()
            .map(|l| format!("--{l}"))
            .or_else(|| self.short_aliases.first().map(|s| format!("-{s}")))
            .unwrap_or_else(|| self.handler.clone())
    }

    pub(crate) fn is_same(&self, other: &OptionDef) -> bool {
        self.handler == other.handler
            && self.short_aliases == other.short_aliases
            && self.long_aliases == other.long_aliases
    }
}

impl fmt::Display for OptionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.short_aliases {
            write!(f, "-{s}, ")?;
        }
        for l in &self.long_aliases {
            write!(f, "--{l}, ")?;
        }
        writeln!(f)?;
        writeln!(f, "    Required: {},", self.required)?;
        write!(
            f,
            "    {}",
            self.description.as_deref().unwrap_or("No description.")
        )
    }
}

/// Single-use builder for [`OptionDef`].
///
/// Every setter fails with [`BuilderError::Inactive`] once [`build`] has
/// succeeded.
///
/// [`build`]: OptionBuilder::build
#[derive(Debug, Default)]
pub struct OptionBuilder {
    required: bool,
    short_aliases: Vec<String>,
    long_aliases: Vec<String>,
    handler: Option<String>,
    description: Option<String>,
    extractor: Option<AnyExtractor>,
    built: bool,
}

impl OptionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_active(&self) -> Result<(), BuilderError> {
        if self.built {
            return Err(BuilderError::Inactive);
        }
        Ok(())
    }

    /// Mark the option as mandatory. Only valid for options with a parameter.
    pub fn required(&mut self) -> Result<&mut Self, BuilderError> {
        self.ensure_active()?;
        self.required = true;
        Ok(self)
    }

    pub fn short_alias(&mut self, alias: &str) -> Result<&mut Self, BuilderError> {
        self.ensure_active()?;
        if !is_valid_short_alias(alias) {
            return Err(BuilderError::InvalidShortAlias(alias.to_string()));
        }
        if self.short_aliases.iter().any(|a| a == alias) {
            return Err(BuilderError::DuplicateAlias(alias.to_string()));
        }
        self.short_aliases.push(alias.to_string());
        Ok(self)
    }

    /// Add several short aliases in order.
    ///
    /// Stops at the first invalid alias; aliases added before it stay.
    pub fn short_aliases<I, S>(&mut self, aliases: I) -> Result<&mut Self, BuilderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for alias in aliases {
            self.short_alias(alias.as_ref())?;
        }
        Ok(self)
    }

    pub fn long_alias(&mut self, alias: &str) -> Result<&mut Self, BuilderError> {
        self.ensure_active()?;
        if !is_valid_long_alias(alias) {
            return Err(BuilderError::InvalidLongAlias(alias.to_string()));
        }
        if self.long_aliases.iter().any(|a| a == alias) {
            return Err(BuilderError::DuplicateAlias(alias.to_string()));
        }
        self.long_aliases.push(alias.to_string());
        Ok(self)
    }

    /// Add several long aliases in order.
    ///
    /// Stops at the first invalid alias; aliases added before it stay.
    pub fn long_aliases<I, S>(&mut self, aliases: I) -> Result<&mut Self, BuilderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for alias in aliases {
            self.long_alias(alias.as_ref())?;
        }
        Ok(self)
    }

    /// Make the option take a string parameter, unless an extractor is
    /// already set.
    pub fn expects_parameter(&mut self) -> Result<&mut Self, BuilderError> {
        self.ensure_active()?;
        if self.extractor.is_none() {
            self.extractor = Some(AnyExtractor::new(extractor::string()));
        }
        Ok(self)
    }

    /// Set or replace the extractor; the option then takes a parameter.
    pub fn extractor<E: Extractor>(&mut self, extractor: E) -> Result<&mut Self, BuilderError> {
        self.ensure_active()?;
        self.extractor = Some(AnyExtractor::new(extractor));
        Ok(self)
    }

    pub fn handler(&mut self, handler: &str) -> Result<&mut Self, BuilderError> {
        self.ensure_active()?;
        if handler.is_empty() {
            return Err(BuilderError::EmptyHandler);
        }
        self.handler = Some(handler.to_string());
        Ok(self)
    }

    pub fn description(&mut self, description: &str) -> Result<&mut Self, BuilderError> {
        self.ensure_active()?;
        self.description = Some(description.to_string());
        Ok(self)
    }

    fn resolve_handler(&self) -> Result<String, BuilderError> {
        if let Some(handler) = &self.handler {
            return Ok(handler.clone());
        }
        match (self.long_aliases.as_slice(), self.short_aliases.as_slice()) {
            ([long], _) => Ok(long.clone()),
            (_, [short]) => Ok(short.clone()),
            _ => Err(BuilderError::AmbiguousHandler),
        }
    }

    /// Validate the configuration and produce the option.
    ///
    /// On failure the builder stays usable so the caller can fix it.
    pub fn build(&mut self) -> Result<OptionDef, BuilderError> {
        self.ensure_active()?;
        if self.short_aliases.is_empty() && self.long_aliases.is_empty() {
            return Err(BuilderError::NoAliases);
        }
        let handler = self.resolve_handler()?;
        if self.extractor.is_none() && self.required {
            return Err(BuilderError::RequiredFlag(handler));
        }

        self.built = true;
        Ok(OptionDef {
            required: self.required,
            short_aliases: std::mem::take(&mut self.short_aliases),
            long_aliases: std::mem::take(&mut self.long_aliases),
            handler,
            description: self.description.take(),
            extractor: self.extractor.take(),
        })
    }
}
