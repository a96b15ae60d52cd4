use std::fmt;

use serde::Serialize;

/// Identifies one slot of [`super::Options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    BaseUri,
    Test,
    Import,
    ImportBaseUri,
    Verbose,
    Renew,
    Force,
    FriendlyName,
    Cancel,
    Target,
    SiteId,
    CommonName,
    ExcludeBindings,
    HideHttps,
    Host,
    ManualTargetIsIis,
    Validation,
    ValidationMode,
    WebRoot,
    ValidationPort,
    ValidationSiteId,
    Warmup,
    UserName,
    Password,
    DnsCreateScript,
    DnsDeleteScript,
    Store,
    KeepExisting,
    CentralSslStore,
    PfxPassword,
    CertificateStore,
    Installation,
    InstallationSiteId,
    FtpSiteId,
    SslPort,
    SslIpAddress,
    Script,
    ScriptParameters,
    CloseOnFinish,
    NoTaskScheduler,
    UseDefaultTaskUser,
    AcceptTos,
    EmailAddress,
}

/// Shape of the value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Set by presence alone.
    Switch,
    Text,
    /// Comma-separated on the command line, stored as an ordered sequence.
    List,
    Port,
}

impl Field {
    #[must_use]
    pub fn kind(self) -> ValueKind {
        match self {
            Field::Test
            | Field::Import
            | Field::Verbose
            | Field::Renew
            | Field::Force
            | Field::Cancel
            | Field::HideHttps
            | Field::ManualTargetIsIis
            | Field::Warmup
            | Field::KeepExisting
            | Field::CloseOnFinish
            | Field::NoTaskScheduler
            | Field::UseDefaultTaskUser
            | Field::AcceptTos => ValueKind::Switch,
            Field::SiteId | Field::ExcludeBindings | Field::Host | Field::Installation => {
                ValueKind::List
            }
            Field::ValidationPort | Field::SslPort => ValueKind::Port,
            _ => ValueKind::Text,
        }
    }

    /// The field consulted when this one is absent.
    #[must_use]
    pub fn fallback(self) -> Option<Field> {
        match self {
            Field::InstallationSiteId | Field::ValidationSiteId => Some(Field::SiteId),
            Field::FtpSiteId => Some(Field::InstallationSiteId),
            _ => None,
        }
    }

    /// Fields that fall back to this one when absent.
    #[must_use]
    pub fn fallback_for(self) -> &'static [Field] {
        match self {
            Field::SiteId => &[Field::InstallationSiteId, Field::ValidationSiteId],
            Field::InstallationSiteId => &[Field::FtpSiteId],
            _ => &[],
        }
    }

    /// Fields whose values are masked in user-facing output.
    #[must_use]
    pub fn is_secret(self) -> bool {
        matches!(self, Field::Password | Field::PfxPassword)
    }
}

/// An owned value ready to be stored into a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Switch(bool),
    Text(String),
    List(Vec<String>),
    Port(u16),
}

impl FieldValue {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Switch(_) => ValueKind::Switch,
            FieldValue::Text(_) => ValueKind::Text,
            FieldValue::List(_) => ValueKind::List,
            FieldValue::Port(_) => ValueKind::Port,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Switch(value) => write!(f, "{value}"),
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::List(items) => f.write_str(&items.join(",")),
            FieldValue::Port(port) => write!(f, "{port}"),
        }
    }
}

/// Borrowed view of a field's current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef<'a> {
    Switch(bool),
    Text(Option<&'a str>),
    List(&'a [String]),
    Port(Option<u16>),
}

impl<'a> FieldRef<'a> {
    /// `false` switches, `None` scalars and empty lists count as absent.
    #[must_use]
    pub fn is_present(&self) -> bool {
        match self {
            FieldRef::Switch(value) => *value,
            FieldRef::Text(value) => value.is_some(),
            FieldRef::List(items) => !items.is_empty(),
            FieldRef::Port(value) => value.is_some(),
        }
    }

    /// Values a rule can compare against. Ports never govern other fields.
    #[must_use]
    pub fn selections(&self) -> Vec<&'a str> {
        match self {
            FieldRef::Switch(true) => vec!["true"],
            FieldRef::Switch(false) | FieldRef::Port(_) => Vec::new(),
            FieldRef::Text(value) => value.iter().copied().collect(),
            FieldRef::List(items) => items.iter().map(String::as_str).collect(),
        }
    }

    #[must_use]
    pub fn to_value(&self) -> Option<FieldValue> {
        if !self.is_present() {
            return None;
        }
        Some(match self {
            FieldRef::Switch(value) => FieldValue::Switch(*value),
            FieldRef::Text(value) => FieldValue::Text(value.unwrap_or_default().to_string()),
            FieldRef::List(items) => FieldValue::List(items.to_vec()),
            FieldRef::Port(value) => FieldValue::Port(value.unwrap_or_default()),
        })
    }
}

/// Mutable handle on a field's storage.
pub(crate) enum Slot<'a> {
    Switch(&'a mut bool),
    Text(&'a mut Option<String>),
    List(&'a mut Vec<String>),
    Port(&'a mut Option<u16>),
}

impl Slot<'_> {
    /// Stores `value`, appending for lists. Returns `false` on a kind mismatch.
    pub(crate) fn store(self, value: FieldValue) -> bool {
        match (self, value) {
            (Slot::Switch(slot), FieldValue::Switch(value)) => *slot = value,
            (Slot::Text(slot), FieldValue::Text(value)) => *slot = Some(value),
            (Slot::List(slot), FieldValue::List(items)) => slot.extend(items),
            (Slot::Port(slot), FieldValue::Port(port)) => *slot = Some(port),
            _ => return false,
        }
        true
    }

    pub(crate) fn clear(self) {
        match self {
            Slot::Switch(slot) => *slot = false,
            Slot::Text(slot) => *slot = None,
            Slot::List(slot) => slot.clear(),
            Slot::Port(slot) => *slot = None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_kinds() {
        assert_eq!(Field::Test.kind(), ValueKind::Switch);
        assert_eq!(Field::SiteId.kind(), ValueKind::List);
        assert_eq!(Field::SslPort.kind(), ValueKind::Port);
        assert_eq!(Field::ValidationMode.kind(), ValueKind::Text);
    }

    #[test]
    fn test_site_id_fallback_chain() {
        assert_eq!(Field::FtpSiteId.fallback(), Some(Field::InstallationSiteId));
        assert_eq!(Field::InstallationSiteId.fallback(), Some(Field::SiteId));
        assert_eq!(Field::ValidationSiteId.fallback(), Some(Field::SiteId));
        assert_eq!(Field::SiteId.fallback(), None);
    }

    #[test]
    fn test_fallback_for_mirrors_fallback() {
        for source in [Field::SiteId, Field::InstallationSiteId, Field::FtpSiteId] {
            for dependent in source.fallback_for() {
                assert_eq!(dependent.fallback(), Some(source));
            }
        }
        assert!(Field::FtpSiteId.fallback_for().is_empty());
    }

    #[test]
    fn test_selections_outlive_the_view() {
        let sites = vec!["1".to_string(), "2".to_string()];
        let selected: Vec<&str> = {
            let view = FieldRef::List(&sites);
            view.selections()
        };
        assert_eq!(selected, vec!["1", "2"]);
    }

    #[test]
    fn test_field_ref_presence_distinguishes_absent() {
        assert!(!FieldRef::Switch(false).is_present());
        assert!(!FieldRef::Text(None).is_present());
        assert!(FieldRef::Text(Some("")).is_present());
        assert!(FieldRef::Port(Some(0)).is_present());
        assert!(!FieldRef::List(&[]).is_present());
    }

    #[test]
    fn test_slot_rejects_kind_mismatch() {
        let mut port = None;
        assert!(!Slot::Port(&mut port).store(FieldValue::Text("443".to_string())));
        assert_eq!(port, None);
    }

    #[test]
    fn test_list_slot_appends() {
        let mut hosts = vec!["a.example".to_string()];
        assert!(Slot::List(&mut hosts).store(FieldValue::List(vec!["b.example".to_string()])));
        assert_eq!(hosts, vec!["a.example", "b.example"]);
    }
}
