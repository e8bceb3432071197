//! Registry of declared options and the rules enforced on parse results.

use crate::error::RegistryError;
use crate::option::{AliasKind, OptionDef};
use crate::rule::Rule;

/// The declared options of a command line plus the rules its parsed result
/// must satisfy.
///
/// Aliases and handlers are unique across the set. Options keep their
/// registration order.
#[derive(Debug, Clone, Default)]
pub struct OptionSet {
    options: Vec<OptionDef>,
    rules: Vec<Rule>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an option.
    ///
    /// All collisions are checked before the option is inserted, so a failed
    /// call leaves the set unchanged.
    pub fn add_option(&mut self, option: OptionDef) -> Result<&mut Self, RegistryError> {
        if self.options.iter().any(|o| o.is_same(&option)) {
            return Err(RegistryError::DuplicateOption(option.handler().to_string()));
        }
        for alias in option.short_aliases() {
            if self.knows_alias(alias, AliasKind::Short) {
                return Err(RegistryError::ShortAliasTaken(alias.clone()));
            }
        }
        for alias in option.long_aliases() {
            if self.knows_alias(alias, AliasKind::Long) {
                return Err(RegistryError::LongAliasTaken(alias.clone()));
            }
        }
        if self.get_option(option.handler()).is_some() {
            return Err(RegistryError::HandlerTaken(option.handler().to_string()));
        }

        self.options.push(option);
        Ok(self)
    }

    /// Register options in order, stopping at the first collision.
    pub fn add_options<I>(&mut self, options: I) -> Result<&mut Self, RegistryError>
    where
        I: IntoIterator<Item = OptionDef>,
    {
        for option in options {
            self.add_option(option)?;
        }
        Ok(self)
    }

    pub fn add_rule(&mut self, rule: impl Into<Rule>) -> &mut Self {
        self.rules.push(rule.into());
        self
    }

    pub fn add_rules<I>(&mut self, rules: I) -> &mut Self
    where
        I: IntoIterator<Item = Rule>,
    {
        self.rules.extend(rules);
        self
    }

    /// Find the option answering to a short or long alias (without dashes).
    pub fn find_option(&self, alias: &str) -> Option<&OptionDef> {
        self.options.iter().find(|o| o.has_alias(alias))
    }

    pub fn get_option(&self, handler: &str) -> Option<&OptionDef> {
        self.options.iter().find(|o| o.handler() == handler)
    }

    /// Whether any registered option declares `alias` of the given kind.
    pub fn knows_alias(&self, alias: &str, kind: AliasKind) -> bool {
        self.options.iter().any(|o| o.has_alias_of(alias, kind))
    }

    pub fn options(&self) -> &[OptionDef] {
        &self.options
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule;

    fn flag(short: &str, long: &str) -> OptionDef {
        OptionDef::builder()
            .short_alias(short)
            .unwrap()
            .long_alias(long)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn finds_by_either_alias_and_handler() {
        let mut set = OptionSet::new();
        set.add_option(flag("v", "verbose")).unwrap();
        set.add_option(flag("q", "quiet")).unwrap();

        assert_eq!(set.find_option("v").unwrap().handler(), "verbose");
        assert_eq!(set.find_option("quiet").unwrap().handler(), "quiet");
        assert!(set.find_option("x").is_none());
        assert!(set.get_option("quiet").is_some());
        assert!(set.get_option("q").is_none());
        assert!(set.knows_alias("q", AliasKind::Short));
        assert!(!set.knows_alias("q", AliasKind::Long));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn rejects_same_option_twice() {
        let mut set = OptionSet::new();
        let opt = flag("v", "verbose");
        set.add_option(opt.clone()).unwrap();
        assert_eq!(
            set.add_option(opt).unwrap_err(),
            RegistryError::DuplicateOption("verbose".to_string())
        );
    }

    #[test]
    fn rejects_alias_collisions() {
        let mut set = OptionSet::new();
        set.add_option(flag("v", "verbose")).unwrap();

        let err = set.add_option(flag("v", "version")).unwrap_err();
        assert_eq!(err, RegistryError::ShortAliasTaken("v".to_string()));

        let other = OptionDef::builder()
            .short_alias("x")
            .unwrap()
            .long_alias("verbose")
            .unwrap()
            .handler("other")
            .unwrap()
            .build()
            .unwrap();
        let err = set.add_option(other).unwrap_err();
        assert_eq!(err, RegistryError::LongAliasTaken("verbose".to_string()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn rejects_handler_collision() {
        let mut set = OptionSet::new();
        set.add_option(flag("v", "verbose")).unwrap();
        let other = OptionDef::builder()
            .short_alias("x")
            .unwrap()
            .handler("verbose")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            set.add_option(other).unwrap_err(),
            RegistryError::HandlerTaken("verbose".to_string())
        );
    }

    #[test]
    fn short_and_long_namespaces_are_separate() {
        let mut set = OptionSet::new();
        set.add_option(flag("a", "ab")).unwrap();
        let other = OptionDef::builder()
            .long_alias("a1")
            .unwrap()
            .short_alias("b")
            .unwrap()
            .build()
            .unwrap();
        set.add_option(other).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn rules_are_appended() {
        let mut set = OptionSet::new();
        set.add_rule("verbose")
            .add_rules([rule::xor("a", "b"), rule::not("c")]);
        assert_eq!(set.rules().len(), 3);
    }
}
