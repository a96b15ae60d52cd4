use anyhow::{Context, Result};
use certflags::{FlagRegistry, Options};
use serde_json::Value;

/// JSON pointers of fields that hold secrets.
const SECRET_POINTERS: [&str; 2] = ["/validation/password", "/store/pfx_password"];

pub(crate) fn print_options_text(options: &Options, registry: &FlagRegistry, show_secrets: bool) {
    for line in options_lines(options, registry, show_secrets) {
        println!("{line}");
    }
}

pub(crate) fn print_options_json(options: &Options, show_secrets: bool) -> Result<()> {
    let mut value = serde_json::to_value(options).context("Failed to serialize options")?;
    if !show_secrets {
        mask_json_secrets(&mut value);
    }
    let rendered = serde_json::to_string_pretty(&value).context("Failed to render options")?;
    println!("{rendered}");
    Ok(())
}

/// One `name: value` line per bound field, marking values that came from
/// defaults.
pub(crate) fn options_lines(
    options: &Options,
    registry: &FlagRegistry,
    show_secrets: bool,
) -> Vec<String> {
    registry
        .entries()
        .iter()
        .filter_map(|entry| {
            let field = entry.field();
            let value = options.get(field).to_value()?.to_string();
            let value = if field.is_secret() {
                display_secret(&value, show_secrets)
            } else {
                value
            };
            let origin = if options.is_explicit(field) {
                ""
            } else {
                " (default)"
            };
            Some(format!("{}: {value}{origin}", entry.long_name()))
        })
        .collect()
}

fn mask_json_secrets(value: &mut Value) {
    for pointer in SECRET_POINTERS {
        if let Some(slot) = value.pointer_mut(pointer)
            && let Some(secret) = slot.as_str()
        {
            *slot = Value::String(mask_value(secret));
        }
    }
}

pub(crate) fn display_secret(value: &str, show_secrets: bool) -> String {
    if show_secrets {
        value.to_string()
    } else {
        mask_value(value)
    }
}

pub(crate) fn mask_value(value: &str) -> String {
    let trimmed = value.trim();
    let count = trimmed.chars().count();
    if count <= 4 {
        "****".to_string()
    } else {
        let tail: String = trimmed.chars().skip(count - 4).collect();
        format!("****{tail}")
    }
}

#[cfg(test)]
mod tests {
    use certflags::{BindOutcome, OptionsBinder};

    use super::*;

    fn bind(args: &[&str]) -> (Options, FlagRegistry) {
        let binder = OptionsBinder::new(FlagRegistry::standard().unwrap());
        match binder.bind(args).unwrap() {
            BindOutcome::Options(options) => (options, binder.registry().clone()),
            BindOutcome::HelpRequested(_) => panic!("expected options"),
        }
    }

    #[test]
    fn test_display_secret_masks_when_hidden() {
        assert_eq!(display_secret("supersecret", false), "****cret");
        assert_eq!(display_secret("showme", true), "showme");
    }

    #[test]
    fn test_mask_value_short() {
        assert_eq!(mask_value("abc"), "****");
    }

    #[test]
    fn test_options_lines_mark_defaults_and_mask_secrets() {
        let (options, registry) = bind(&[
            "--store",
            "centralssl",
            "--centralsslstore",
            "\\\\share\\ccs",
            "--pfxpassword",
            "hunter2-pfx",
        ]);
        let lines = options_lines(&options, &registry, false);
        assert!(lines.contains(&"store: centralssl".to_string()));
        assert!(lines.contains(&"pfxpassword: ****-pfx".to_string()));
        assert!(lines.contains(&"validationmode: http-01 (default)".to_string()));
        assert!(lines.contains(&"sslport: 443 (default)".to_string()));
        assert!(!lines.iter().any(|line| line.starts_with("target:")));
    }

    #[test]
    fn test_mask_json_secrets() {
        let (options, _) = bind(&[
            "--validation",
            "ftp",
            "--username",
            "deploy",
            "--password",
            "ftp-password",
        ]);
        let mut value = serde_json::to_value(&options).unwrap();
        mask_json_secrets(&mut value);
        assert_eq!(value["validation"]["password"], "****word");
        assert_eq!(value["validation"]["user_name"], "deploy");
        assert_eq!(value["store"]["pfx_password"], Value::Null);
    }
}
