use serde::Deserialize;
use tracing::warn;

use crate::error::{ConditionClause, GoverningCondition, ValidationError};
use crate::options::{Field, IMPLIED_STORE, IMPLIED_VALIDATION, Options};
use crate::registry::FlagRegistry;

/// How conditional rules affect the bind result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Clear inapplicable flags and fail on missing required ones.
    #[default]
    Enforce,
    /// Log every finding and leave the options untouched.
    Report,
}

/// Governing field must hold one of `values`.
struct Clause {
    governing: Field,
    values: &'static [&'static str],
}

/// `field` is meaningful when every clause holds, and must be present then
/// if `required` is set.
struct Rule {
    field: Field,
    when: &'static [Clause],
    required: bool,
}

const HTTP01: Clause = Clause {
    governing: Field::ValidationMode,
    values: &["http-01"],
};
const DNS01: Clause = Clause {
    governing: Field::ValidationMode,
    values: &["dns-01"],
};
const IIS_SITE_TARGETS: Clause = Clause {
    governing: Field::Target,
    values: &["iissite", "iissites", "iisbinding"],
};
const REMOTE_VALIDATION: Clause = Clause {
    governing: Field::Validation,
    values: &["ftp", "sftp", "webdav"],
};
const DNS_SCRIPT: Clause = Clause {
    governing: Field::Validation,
    values: &["dnsscript"],
};
const CENTRAL_SSL: Clause = Clause {
    governing: Field::Store,
    values: &["centralssl"],
};
const IIS_INSTALLATION: Clause = Clause {
    governing: Field::Installation,
    values: &["iis"],
};
const SCRIPT_INSTALLATION: Clause = Clause {
    governing: Field::Installation,
    values: &["manual"],
};

const RULES: &[Rule] = &[
    Rule {
        field: Field::ImportBaseUri,
        when: &[Clause {
            governing: Field::Import,
            values: &["true"],
        }],
        required: false,
    },
    Rule {
        field: Field::SiteId,
        when: &[IIS_SITE_TARGETS],
        required: true,
    },
    Rule {
        field: Field::CommonName,
        when: &[Clause {
            governing: Field::Target,
            values: &["iissite", "iissites", "manual"],
        }],
        required: false,
    },
    Rule {
        field: Field::ExcludeBindings,
        when: &[Clause {
            governing: Field::Target,
            values: &["iissite", "iissites"],
        }],
        required: false,
    },
    Rule {
        field: Field::Host,
        when: &[Clause {
            governing: Field::Target,
            values: &["manual", "iisbinding"],
        }],
        required: true,
    },
    Rule {
        field: Field::ManualTargetIsIis,
        when: &[Clause {
            governing: Field::Target,
            values: &["manual"],
        }],
        required: false,
    },
    Rule {
        field: Field::WebRoot,
        when: &[
            HTTP01,
            Clause {
                governing: Field::Validation,
                values: &["filesystem"],
            },
        ],
        required: false,
    },
    Rule {
        field: Field::ValidationPort,
        when: &[
            HTTP01,
            Clause {
                governing: Field::Validation,
                values: &["selfhosting"],
            },
        ],
        required: false,
    },
    Rule {
        field: Field::ValidationSiteId,
        when: &[
            HTTP01,
            Clause {
                governing: Field::Validation,
                values: &["filesystem", "iis"],
            },
        ],
        required: false,
    },
    Rule {
        field: Field::Warmup,
        when: &[HTTP01],
        required: false,
    },
    Rule {
        field: Field::UserName,
        when: &[HTTP01, REMOTE_VALIDATION],
        required: false,
    },
    Rule {
        field: Field::Password,
        when: &[HTTP01, REMOTE_VALIDATION],
        required: false,
    },
    Rule {
        field: Field::DnsCreateScript,
        when: &[DNS01, DNS_SCRIPT],
        required: true,
    },
    Rule {
        field: Field::DnsDeleteScript,
        when: &[DNS01, DNS_SCRIPT],
        required: false,
    },
    Rule {
        field: Field::CentralSslStore,
        when: &[CENTRAL_SSL],
        required: true,
    },
    Rule {
        field: Field::PfxPassword,
        when: &[CENTRAL_SSL],
        required: false,
    },
    Rule {
        field: Field::CertificateStore,
        when: &[Clause {
            governing: Field::Store,
            values: &["certificatestore"],
        }],
        required: false,
    },
    Rule {
        field: Field::InstallationSiteId,
        when: &[IIS_INSTALLATION],
        required: false,
    },
    Rule {
        field: Field::FtpSiteId,
        when: &[Clause {
            governing: Field::Installation,
            values: &["iisftp"],
        }],
        required: true,
    },
    Rule {
        field: Field::SslPort,
        when: &[IIS_INSTALLATION],
        required: false,
    },
    Rule {
        field: Field::SslIpAddress,
        when: &[IIS_INSTALLATION],
        required: false,
    },
    Rule {
        field: Field::Script,
        when: &[SCRIPT_INSTALLATION],
        required: true,
    },
    Rule {
        field: Field::ScriptParameters,
        when: &[SCRIPT_INSTALLATION],
        required: false,
    },
    Rule {
        field: Field::CloseOnFinish,
        when: &[Clause {
            governing: Field::Test,
            values: &["true"],
        }],
        required: false,
    },
];

/// Current selections of a governing field, including implied plugins.
fn selections(options: &Options, field: Field) -> Vec<&str> {
    let mut values = options.get(field).selections();
    if values.is_empty() {
        match field {
            Field::Validation => values.push(IMPLIED_VALIDATION),
            Field::Store => values.push(IMPLIED_STORE),
            _ => {}
        }
    }
    values
}

/// Returns the matched condition if every clause of the rule holds.
fn matches(rule: &Rule, options: &Options, registry: &FlagRegistry) -> Option<GoverningCondition> {
    let mut clauses = Vec::with_capacity(rule.when.len());
    for clause in rule.when {
        let value = selections(options, clause.governing)
            .into_iter()
            .find(|selected| {
                clause
                    .values
                    .iter()
                    .any(|candidate| selected.eq_ignore_ascii_case(candidate))
            })?;
        clauses.push(ConditionClause {
            flag: registry.display_name(clause.governing),
            value: value.to_string(),
        });
    }
    Some(GoverningCondition { clauses })
}

/// `None` for unscoped fields. A field that another applicable field falls
/// back to is applicable too.
fn is_applicable(field: Field, options: &Options, registry: &FlagRegistry) -> Option<bool> {
    let mut scoped = false;
    for rule in RULES.iter().filter(|rule| rule.field == field) {
        scoped = true;
        if matches(rule, options, registry).is_some() {
            return Some(true);
        }
    }
    if field
        .fallback_for()
        .iter()
        .any(|dependent| is_applicable(*dependent, options, registry) == Some(true))
    {
        return Some(true);
    }
    scoped.then_some(false)
}

/// Explicitly supplied flags whose governing selection is not active.
pub(crate) fn inapplicable_fields(options: &Options, registry: &FlagRegistry) -> Vec<Field> {
    options
        .explicit_fields()
        .filter(|field| is_applicable(*field, options, registry) == Some(false))
        .collect()
}

/// First required field that is missing under an active selection.
pub(crate) fn first_violation(
    options: &Options,
    registry: &FlagRegistry,
) -> Option<ValidationError> {
    RULES
        .iter()
        .filter(|rule| rule.required && !options.resolves(rule.field))
        .find_map(|rule| {
            matches(rule, options, registry).map(|condition| ValidationError::MissingRequired {
                flag: registry.display_name(rule.field),
                condition,
            })
        })
}

/// Applies the conditional rules to freshly bound options.
///
/// # Errors
/// Under [`ValidationPolicy::Enforce`], returns the first required flag that
/// is missing for the active plugin selection.
pub fn apply(
    mut options: Options,
    registry: &FlagRegistry,
    policy: ValidationPolicy,
) -> Result<Options, ValidationError> {
    for field in inapplicable_fields(&options, registry) {
        let flag = registry.display_name(field);
        match policy {
            ValidationPolicy::Enforce => {
                warn!("Ignoring --{flag}: the plugin it applies to is not selected");
                options.clear(field);
            }
            ValidationPolicy::Report => {
                warn!("--{flag} has no effect with the current plugin selection");
            }
        }
    }

    match (first_violation(&options, registry), policy) {
        (None, _) => Ok(options),
        (Some(err), ValidationPolicy::Enforce) => Err(err),
        (Some(err), ValidationPolicy::Report) => {
            warn!("{err}");
            Ok(options)
        }
    }
}
