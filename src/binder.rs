use tracing::debug;

use crate::error::{BindError, ParseError, ValidationError};
use crate::help::{HelpLayout, render_help};
use crate::options::{FieldValue, Options, ValueKind};
use crate::registry::{FlagRegistry, FlagSpec, HELP_FLAGS};

mod validation;

pub use validation::ValidationPolicy;

/// Successful outcome of [`OptionsBinder::bind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindOutcome {
    Options(Options),
    /// Help was asked for; the caller should print the text and stop.
    HelpRequested(String),
}

/// Outcome of the syntactic pass alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Options(Options),
    HelpRequested,
}

enum Token<'a> {
    Help,
    Flag {
        spec: &'a FlagSpec,
        inline: Option<&'a str>,
    },
}

/// Binds argument vectors against a [`FlagRegistry`].
#[derive(Debug, Clone)]
pub struct OptionsBinder {
    registry: FlagRegistry,
    policy: ValidationPolicy,
    layout: HelpLayout,
}

impl OptionsBinder {
    #[must_use]
    pub fn new(registry: FlagRegistry) -> Self {
        Self {
            registry,
            policy: ValidationPolicy::default(),
            layout: HelpLayout::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_help_layout(mut self, layout: HelpLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &FlagRegistry {
        &self.registry
    }

    /// Parses, applies defaults and validates in one call.
    ///
    /// # Errors
    /// Returns [`BindError::Parse`] for malformed arguments and
    /// [`BindError::Validation`] when a conditionally required flag is
    /// missing under [`ValidationPolicy::Enforce`].
    pub fn bind<S: AsRef<str>>(&self, args: &[S]) -> Result<BindOutcome, BindError> {
        match self.parse(args)? {
            Parsed::HelpRequested => Ok(BindOutcome::HelpRequested(self.render_help())),
            Parsed::Options(options) => {
                let options = self.validate(options)?;
                debug!(
                    "Bound {} explicit flag(s)",
                    options.explicit_fields().count()
                );
                Ok(BindOutcome::Options(options))
            }
        }
    }

    /// Maps tokens onto fields and fills registered defaults. No conditional
    /// rule is checked here.
    ///
    /// # Errors
    /// Returns error on an unexpected token, an unknown flag, a missing value
    /// or a value that does not fit its field.
    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> Result<Parsed, ParseError> {
        let mut options = Options::default();
        let mut idx = 0;
        while let Some(raw) = args.get(idx) {
            idx += 1;
            let (spec, inline) = match self.classify(raw.as_ref())? {
                Token::Help => return Ok(Parsed::HelpRequested),
                Token::Flag { spec, inline } => (spec, inline),
            };

            let value = if let Some(inline) = inline {
                parse_value(spec, inline)?
            } else if spec.field().kind() == ValueKind::Switch {
                FieldValue::Switch(true)
            } else {
                let next: Option<&str> = args.get(idx).map(AsRef::as_ref);
                if let Some(next) = next.filter(|next| next.starts_with("--")) {
                    // Double-dash tokens are never values; name an unknown one.
                    self.classify(next)?;
                }
                let next = next
                    .filter(|next| !self.is_flag(next))
                    .ok_or_else(|| ParseError::MissingValue {
                        flag: spec.long_name().to_string(),
                    })?;
                idx += 1;
                parse_value(spec, next)?
            };

            let field = spec.field();
            if options.is_explicit(field) && field.kind() != ValueKind::List {
                debug!("--{} given more than once; last value wins", spec.long_name());
            }
            if field.is_secret() {
                debug!("Bound --{} = ****", spec.long_name());
            } else {
                debug!("Bound --{} = {value}", spec.long_name());
            }
            let stored = options.set_explicit(field, value);
            debug_assert!(stored, "parsed value kind follows the field kind");
        }

        self.apply_defaults(&mut options);
        Ok(Parsed::Options(options))
    }

    /// Runs the conditional rules against parsed options.
    ///
    /// # Errors
    /// Returns the first missing conditionally required flag when the policy
    /// is [`ValidationPolicy::Enforce`].
    pub fn validate(&self, options: Options) -> Result<Options, ValidationError> {
        validation::apply(options, &self.registry, self.policy)
    }

    #[must_use]
    pub fn render_help(&self) -> String {
        render_help(&self.registry, self.layout)
    }

    fn apply_defaults(&self, options: &mut Options) {
        for entry in self.registry.entries() {
            let Some(default) = entry.default() else {
                continue;
            };
            if options.is_explicit(entry.field()) {
                continue;
            }
            options.set_default(entry.field(), default.clone());
        }
    }

    fn classify<'a>(&'a self, token: &'a str) -> Result<Token<'a>, ParseError> {
        let Some(body) = strip_marker(token) else {
            return Err(ParseError::UnexpectedToken {
                token: token.to_string(),
            });
        };
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        if is_help(name) {
            return Ok(Token::Help);
        }
        match self.registry.lookup(name) {
            Some(spec) => Ok(Token::Flag { spec, inline }),
            None => Err(ParseError::UnknownFlag {
                flag: name.to_string(),
            }),
        }
    }

    /// Whether a token would be read as a flag rather than as a value. Only
    /// single-dash tokens that name no flag may serve as values.
    fn is_flag(&self, token: &str) -> bool {
        if token.starts_with("--") {
            return true;
        }
        strip_marker(token).is_some_and(|body| {
            let name = body.split_once('=').map_or(body, |(name, _)| name);
            is_help(name) || self.registry.lookup(name).is_some()
        })
    }
}

fn strip_marker(token: &str) -> Option<&str> {
    let body = token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'))?;
    (!body.is_empty() && !body.starts_with('-')).then_some(body)
}

fn is_help(name: &str) -> bool {
    HELP_FLAGS
        .iter()
        .any(|help| help.eq_ignore_ascii_case(name))
}

fn parse_value(spec: &FlagSpec, raw: &str) -> Result<FieldValue, ParseError> {
    let invalid = |reason: &str| ParseError::InvalidValue {
        flag: spec.long_name().to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    };
    match spec.field().kind() {
        ValueKind::Switch => match raw.to_ascii_lowercase().as_str() {
            "true" => Ok(FieldValue::Switch(true)),
            "false" => Ok(FieldValue::Switch(false)),
            _ => Err(invalid("expected true or false")),
        },
        ValueKind::Text if raw.trim().is_empty() => Err(invalid("expected a non-empty value")),
        ValueKind::Text => Ok(FieldValue::Text(raw.to_string())),
        ValueKind::Port => raw
            .trim()
            .parse::<u16>()
            .map(FieldValue::Port)
            .map_err(|_| invalid("expected a port number between 0 and 65535")),
        ValueKind::List => {
            let items: Vec<String> = split_list(raw);
            if items.is_empty() {
                return Err(invalid("expected at least one item"));
            }
            Ok(FieldValue::List(items))
        }
    }
}

/// Splits a comma-separated value into trimmed, non-empty items.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
