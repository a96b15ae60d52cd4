use std::collections::HashMap;

use crate::error::RegistryError;
use crate::options::{Field, FieldValue};

mod catalog;

/// Long names that always trigger help and cannot be registered.
pub const HELP_FLAGS: [&str; 2] = ["help", "?"];

/// Functional area a flag is listed under in help output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagGroup {
    Basic,
    MainMenu,
    Target,
    Validation,
    Store,
    Installation,
    Misc,
    AcmeAccount,
}

impl FlagGroup {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            FlagGroup::Basic => "Basic options",
            FlagGroup::MainMenu => "Main menu actions",
            FlagGroup::Target => "Target",
            FlagGroup::Validation => "Validation",
            FlagGroup::Store => "Store",
            FlagGroup::Installation => "Installation",
            FlagGroup::Misc => "Miscellaneous",
            FlagGroup::AcmeAccount => "ACME account registration",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    long_name: String,
    field: Field,
    default: Option<FieldValue>,
    description: String,
    group: FlagGroup,
}

impl FlagSpec {
    #[must_use]
    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    #[must_use]
    pub fn field(&self) -> Field {
        self.field
    }

    #[must_use]
    pub fn default(&self) -> Option<&FieldValue> {
        self.default.as_ref()
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn group(&self) -> FlagGroup {
        self.group
    }
}

/// Ordered declaration of every recognized flag.
///
/// Entries keep their registration order, which is also the order help is
/// rendered in. Lookups ignore ASCII case.
#[derive(Debug, Clone)]
pub struct FlagRegistry {
    entries: Vec<FlagSpec>,
    index: HashMap<String, usize>,
    group: FlagGroup,
}

impl Default for FlagRegistry {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            group: FlagGroup::Basic,
        }
    }
}

impl FlagRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry with the full certificate workflow flag set.
    ///
    /// # Errors
    /// Returns error if the catalog declares a flag twice.
    pub fn standard() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        catalog::register_all(&mut registry)?;
        Ok(registry)
    }

    /// Sets the group that subsequently registered flags belong to.
    pub fn begin_group(&mut self, group: FlagGroup) {
        self.group = group;
    }

    /// Adds one flag.
    ///
    /// # Errors
    /// Returns error if the name is empty, reserved, already taken (ignoring
    /// case), or if `default` does not fit the field.
    pub fn register(
        &mut self,
        long_name: &str,
        field: Field,
        default: Option<FieldValue>,
        description: &str,
    ) -> Result<(), RegistryError> {
        let key = long_name.to_ascii_lowercase();
        if key.is_empty() || key.starts_with('-') || key.contains(['=', ' ']) {
            return Err(RegistryError::InvalidName {
                name: long_name.to_string(),
            });
        }
        if HELP_FLAGS.contains(&key.as_str()) {
            return Err(RegistryError::ReservedName {
                name: long_name.to_string(),
            });
        }
        if self.index.contains_key(&key) {
            return Err(RegistryError::DuplicateFlag {
                name: long_name.to_string(),
            });
        }
        if let Some(value) = &default
            && value.kind() != field.kind()
        {
            return Err(RegistryError::DefaultKindMismatch {
                name: long_name.to_string(),
            });
        }

        self.index.insert(key, self.entries.len());
        self.entries.push(FlagSpec {
            long_name: long_name.to_string(),
            field,
            default,
            description: description.to_string(),
            group: self.group,
        });
        Ok(())
    }

    #[must_use]
    pub fn entries(&self) -> &[FlagSpec] {
        &self.entries
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&FlagSpec> {
        self.index
            .get(&name.to_ascii_lowercase())
            .and_then(|idx| self.entries.get(*idx))
    }

    /// First flag registered for `field`.
    #[must_use]
    pub fn flag_for(&self, field: Field) -> Option<&FlagSpec> {
        self.entries.iter().find(|entry| entry.field == field)
    }

    /// Long name used to refer to `field` in messages.
    #[must_use]
    pub fn display_name(&self, field: Field) -> String {
        self.flag_for(field).map_or_else(
            || format!("{field:?}").to_ascii_lowercase(),
            |entry| entry.long_name.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_preserves_order() {
        let mut registry = FlagRegistry::new();
        registry
            .register("target", Field::Target, None, "Target plugin.")
            .unwrap();
        registry
            .register("siteid", Field::SiteId, None, "Site identifier.")
            .unwrap();
        let names: Vec<_> = registry.entries().iter().map(FlagSpec::long_name).collect();
        assert_eq!(names, vec!["target", "siteid"]);
    }

    #[test]
    fn test_register_rejects_case_insensitive_duplicate() {
        let mut registry = FlagRegistry::new();
        registry
            .register("SiteId", Field::SiteId, None, "Site identifier.")
            .unwrap();
        let err = registry
            .register("siteid", Field::InstallationSiteId, None, "Other.")
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateFlag {
                name: "siteid".to_string()
            }
        );
        assert_eq!(registry.entries().len(), 1);
    }

    #[test]
    fn test_register_rejects_help_names() {
        let mut registry = FlagRegistry::new();
        assert!(matches!(
            registry.register("HELP", Field::Test, None, ""),
            Err(RegistryError::ReservedName { .. })
        ));
        assert!(matches!(
            registry.register("?", Field::Test, None, ""),
            Err(RegistryError::ReservedName { .. })
        ));
    }

    #[test]
    fn test_register_rejects_malformed_names() {
        let mut registry = FlagRegistry::new();
        for name in ["", "--target", "ssl=port", "ssl port"] {
            assert!(matches!(
                registry.register(name, Field::Target, None, ""),
                Err(RegistryError::InvalidName { .. })
            ));
        }
    }

    #[test]
    fn test_register_rejects_mismatched_default() {
        let mut registry = FlagRegistry::new();
        let err = registry
            .register(
                "sslport",
                Field::SslPort,
                Some(FieldValue::Text("443".to_string())),
                "",
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::DefaultKindMismatch { .. }));
    }

    #[test]
    fn test_lookup_ignores_case() {
        let mut registry = FlagRegistry::new();
        registry
            .register("validationMode", Field::ValidationMode, None, "")
            .unwrap();
        assert_eq!(
            registry.lookup("VALIDATIONMODE").map(FlagSpec::field),
            Some(Field::ValidationMode)
        );
        assert!(registry.lookup("validation").is_none());
    }

    #[test]
    fn test_groups_follow_begin_group() {
        let mut registry = FlagRegistry::new();
        registry.register("baseuri", Field::BaseUri, None, "").unwrap();
        registry.begin_group(FlagGroup::Store);
        registry.register("store", Field::Store, None, "").unwrap();
        assert_eq!(registry.entries()[0].group(), FlagGroup::Basic);
        assert_eq!(registry.entries()[1].group(), FlagGroup::Store);
    }

    #[test]
    fn test_display_name_uses_registered_spelling() {
        let registry = FlagRegistry::standard().unwrap();
        assert_eq!(registry.display_name(Field::SiteId), "siteid");
        assert_eq!(FlagRegistry::new().display_name(Field::SiteId), "siteid");
    }
}
