use optlogic::error::{Error, ExtractorError, LogicError, ParseError};
use optlogic::extractor::{self, Extractor};
use optlogic::{ArgKind, OptionDef, OptionSet, parse, rule};

fn flag(short: &str, long: &str) -> OptionDef {
    OptionDef::builder()
        .short_alias(short)
        .expect("short alias")
        .long_alias(long)
        .expect("long alias")
        .build()
        .expect("flag option")
}

fn build_options() -> OptionSet {
    let mut options = OptionSet::new();
    options
        .add_option(flag("v", "verbose"))
        .expect("verbose")
        .add_option(
            OptionDef::builder()
                .long_alias("debug")
                .expect("debug alias")
                .build()
                .expect("debug"),
        )
        .expect("debug")
        .add_option(
            OptionDef::builder()
                .long_alias("release")
                .expect("release alias")
                .build()
                .expect("release"),
        )
        .expect("release")
        .add_option(
            OptionDef::builder()
                .short_alias("l")
                .expect("l")
                .long_alias("level")
                .expect("level")
                .extractor(extractor::integer_in(0, 9).expect("bounds"))
                .expect("extractor")
                .build()
                .expect("level"),
        )
        .expect("level");
    options
        .add_rule(rule::xor("release", "debug"))
        .add_rule(rule::implies("level", "debug"));
    options
}

#[test]
fn empty_inputs_parse_cleanly() {
    let empty = OptionSet::new();
    let tokens: [&str; 0] = [];
    let result = parse(&empty, &tokens).expect("empty tokens");
    assert!(result.plain_args().is_empty());
    assert!(result.arguments().is_empty());

    let result = parse(&empty, &["--"]).expect("lone delimiter");
    assert!(result.plain_args().is_empty());
}

#[test]
fn unmatched_options_keep_an_entry() {
    let mut options = OptionSet::new();
    options.add_option(flag("v", "verbose")).expect("verbose");

    let result = parse(&options, &["-v"]).expect("parse -v");
    assert!(result.is_present("verbose"));

    let tokens: [&str; 0] = [];
    let result = parse(&options, &tokens).expect("parse nothing");
    assert!(!result.is_present("verbose"));
    let arg = result.find_argument("verbose").expect("entry for verbose");
    assert!(!arg.is_matched());
    assert_eq!(arg.kind(), ArgKind::Flag);
    assert_eq!(result.value::<bool>("verbose"), Some(&false));
}

#[test]
fn arguments_follow_encounter_then_declaration_order() {
    let result = parse(&build_options(), &["-l", "2", "--debug", "rest"]).expect("parse");
    let handlers: Vec<&str> = result.arguments().iter().map(|a| a.handler()).collect();
    assert_eq!(handlers, ["level", "debug", "verbose", "release"]);
    assert_eq!(result.plain_args(), ["rest"]);
}

#[test]
fn missing_parameter_at_end() {
    let mut options = OptionSet::new();
    options
        .add_option(
            OptionDef::builder()
                .short_alias("x")
                .expect("x")
                .expects_parameter()
                .expect("parameter")
                .build()
                .expect("x option"),
        )
        .expect("register");
    let err = parse(&options, &["-x"]).unwrap_err();
    assert_eq!(err, Error::Parse(ParseError::MissingParameter("-x".to_string())));
}

#[test]
fn out_of_bounds_value_is_rejected() {
    let mut options = OptionSet::new();
    options
        .add_option(
            OptionDef::builder()
                .short_alias("d")
                .expect("d")
                .extractor(extractor::integer_in(40, 44).expect("bounds"))
                .expect("extractor")
                .build()
                .expect("d option"),
        )
        .expect("register");
    let err = parse(&options, &["-d", "46"]).unwrap_err();
    assert!(
        matches!(err, Error::Extractor(ExtractorError::OutOfBounds { .. })),
        "unexpected error: {err}"
    );
    assert_eq!(
        parse(&options, &["-d", "44"]).expect("in bounds").value::<i32>("d"),
        Some(&44)
    );
}

#[test]
fn mandatory_option_must_appear() {
    let mut options = OptionSet::new();
    options
        .add_option(
            OptionDef::builder()
                .short_alias("i")
                .expect("i")
                .long_alias("input")
                .expect("input")
                .required()
                .expect("required")
                .expects_parameter()
                .expect("parameter")
                .build()
                .expect("input option"),
        )
        .expect("register");

    let err = parse(&options, &["file.txt"]).unwrap_err();
    assert_eq!(
        err,
        Error::Parse(ParseError::MissingMandatory("--input".to_string()))
    );
    let result = parse(&options, &["--input", "file.txt"]).expect("input given");
    assert_eq!(result.value::<String>("input").map(String::as_str), Some("file.txt"));
}

#[test]
fn build_mode_rules() {
    let options = build_options();

    let err = parse(&options, &["--debug", "--release"]).unwrap_err();
    assert_eq!(
        err,
        Error::Logic(LogicError::RuleViolated("(release xor debug)".to_string()))
    );

    assert!(parse(&options, &["--debug"]).is_ok());
    assert!(parse(&options, &["--release"]).is_ok());

    let err = parse(&options, &["--release", "--level", "3"]).unwrap_err();
    assert!(matches!(err, Error::Logic(_)));

    let result = parse(&options, &["--debug", "--level", "3"]).expect("debug with level");
    assert_eq!(result.value::<i32>("level"), Some(&3));
}

#[test]
fn parsing_is_idempotent() {
    let options = build_options();
    let tokens = ["-v", "--debug", "-l", "7", "--", "-x", "y"];
    let first = parse(&options, &tokens).expect("first parse");
    let second = parse(&options, &tokens).expect("second parse");
    assert_eq!(first, second);
    assert_eq!(first.plain_args(), ["-x", "y"]);
}

#[test]
fn atomic_rule_compares_values() {
    let mut options = OptionSet::new();
    for name in ["alpha", "beta"] {
        options
            .add_option(
                OptionDef::builder()
                    .long_alias(name)
                    .expect("alias")
                    .extractor(extractor::integer())
                    .expect("extractor")
                    .build()
                    .expect("option"),
            )
            .expect("register");
    }
    options.add_rule(rule::atomic(["alpha", "beta"], |args| {
        match (args.value::<i32>("alpha"), args.value::<i32>("beta")) {
            (Some(alpha), Some(beta)) => alpha > beta,
            _ => true,
        }
    }));

    assert!(parse(&options, &["--alpha", "5", "--beta", "3"]).is_ok());
    assert!(parse(&options, &["--alpha", "5"]).is_ok());
    let err = parse(&options, &["--alpha", "1", "--beta", "3"]).unwrap_err();
    assert_eq!(
        err,
        Error::Logic(LogicError::RuleViolated("atomic(alpha, beta)".to_string()))
    );
}

#[test]
fn nested_lists_of_ranges() {
    let ranges = extractor::list_of(
        ",",
        extractor::list_of("-", extractor::integer()).expect("inner"),
    )
    .expect("outer");
    let mut options = OptionSet::new();
    options
        .add_option(
            OptionDef::builder()
                .short_alias("r")
                .expect("r")
                .long_alias("ranges")
                .expect("ranges")
                .extractor(ranges)
                .expect("extractor")
                .build()
                .expect("ranges option"),
        )
        .expect("register");

    let result = parse(&options, &["-r", "1-44,2-55,3-66"]).expect("ranges");
    assert_eq!(
        result.value::<Vec<Vec<i32>>>("ranges"),
        Some(&vec![vec![1, 44], vec![2, 55], vec![3, 66]])
    );
    assert_eq!(result.raw_value("ranges"), Some("1-44,2-55,3-66"));
}

#[test]
fn nested_lists_of_reals() {
    let e = extractor::list_of(";", extractor::list_of(",", extractor::real()).expect("inner"))
        .expect("outer");
    assert_eq!(
        e.parse("1,2,3.5;7;11,125.125").expect("reals"),
        vec![vec![1.0, 2.0, 3.5], vec![7.0], vec![11.0, 125.125]]
    );
}

#[derive(Debug, Clone, PartialEq)]
struct Person {
    name: String,
    age: u32,
}

#[derive(Debug)]
struct PersonExtractor;

impl Extractor for PersonExtractor {
    type Output = Person;

    fn validate(&self, raw: &str) -> bool {
        self.parse(raw).is_ok()
    }

    fn parse(&self, raw: &str) -> Result<Person, ExtractorError> {
        let (name, age) = raw
            .split_once(',')
            .ok_or_else(|| ExtractorError::custom(format!("expected 'name,age', got '{raw}'")))?;
        let age = age
            .trim()
            .parse::<u32>()
            .map_err(|_| ExtractorError::custom(format!("invalid age in '{raw}'")))?;
        Ok(Person {
            name: name.trim().to_string(),
            age,
        })
    }
}

#[test]
fn custom_extractor_yields_custom_type() {
    let mut options = OptionSet::new();
    options
        .add_option(
            OptionDef::builder()
                .short_alias("p")
                .expect("p")
                .long_alias("person")
                .expect("person")
                .extractor(PersonExtractor)
                .expect("extractor")
                .build()
                .expect("person option"),
        )
        .expect("register");

    let result = parse(&options, &["--person", "Ada,36"]).expect("person");
    assert_eq!(
        result.value::<Person>("person"),
        Some(&Person {
            name: "Ada".to_string(),
            age: 36
        })
    );

    let err = parse(&options, &["-p", "Ada"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "extractor error: expected 'name,age', got 'Ada'"
    );
}

#[test]
fn undefined_and_invalid_tokens() {
    let options = build_options();
    assert_eq!(
        parse(&options, &["--nope"]).unwrap_err(),
        Error::Parse(ParseError::UndefinedOption("--nope".to_string()))
    );
    assert_eq!(
        parse(&options, &["-"]).unwrap_err(),
        Error::Parse(ParseError::InvalidOption("-".to_string()))
    );
}
