//! Command-line option parsing with typed values and logical rules.
//!
//! Options are declared with an [`OptionBuilder`], collected in an
//! [`OptionSet`] together with [`Rule`]s that relate them, and matched
//! against raw tokens by [`parse`]:
//!
//! ```
//! use optlogic::{OptionDef, OptionSet, extractor, parse, rule};
//!
//! let mut options = OptionSet::new();
//! options
//!     .add_option(OptionDef::builder().long_alias("debug")?.build()?)?
//!     .add_option(OptionDef::builder().long_alias("release")?.build()?)?
//!     .add_option(
//!         OptionDef::builder()
//!             .short_alias("l")?
//!             .long_alias("level")?
//!             .extractor(extractor::integer_in(0, 9)?)?
//!             .build()?,
//!     )?;
//! options
//!     .add_rule(rule::xor("release", "debug"))
//!     .add_rule(rule::implies("level", "debug"));
//!
//! let result = parse(&options, &["--debug", "-l", "3", "input.txt"])?;
//! assert_eq!(result.value::<i32>("level"), Some(&3));
//! assert_eq!(result.plain_args(), ["input.txt"]);
//!
//! assert!(parse(&options, &["--debug", "--release"]).is_err());
//! # Ok::<(), optlogic::Error>(())
//! ```

pub mod error;
pub mod extractor;
pub mod help;
pub mod option;
pub mod option_set;
pub mod parsed;
pub mod parser;
pub mod rule;

pub use error::{Error, Result};
pub use extractor::{Extractor, Value};
pub use option::{OptionBuilder, OptionDef};
pub use option_set::OptionSet;
pub use parsed::{ArgKind, ArgState, ParsedArgument, ParsedResult};
pub use parser::{LONG_PREFIX, PLAIN_ARGS_DELIMITER, SHORT_PREFIX, parse, validate};
pub use rule::Rule;
