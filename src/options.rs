use std::collections::BTreeSet;

use serde::Serialize;

mod field;

pub use field::{Field, FieldRef, FieldValue, ValueKind};
pub(crate) use field::Slot;

/// Validation plugin used downstream when `--validation` is not given.
pub const IMPLIED_VALIDATION: &str = "filesystem";
/// Store plugin used downstream when `--store` is not given.
pub const IMPLIED_STORE: &str = "certificatestore";
pub const DEFAULT_VALIDATION_PORT: u16 = 80;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionOptions {
    pub base_uri: Option<String>,
    pub test: bool,
    pub import: bool,
    pub import_base_uri: Option<String>,
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LifecycleOptions {
    pub renew: bool,
    pub force: bool,
    pub cancel: bool,
    pub friendly_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TargetOptions {
    pub target: Option<String>,
    pub site_id: Vec<String>,
    pub common_name: Option<String>,
    pub exclude_bindings: Vec<String>,
    pub hide_https: bool,
    pub host: Vec<String>,
    pub manual_target_is_iis: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationOptions {
    pub validation: Option<String>,
    pub validation_mode: Option<String>,
    pub web_root: Option<String>,
    pub validation_port: Option<u16>,
    pub validation_site_id: Option<String>,
    pub warmup: bool,
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub dns_create_script: Option<String>,
    pub dns_delete_script: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreOptions {
    pub store: Option<String>,
    pub keep_existing: bool,
    pub central_ssl_store: Option<String>,
    pub pfx_password: Option<String>,
    pub certificate_store: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallationOptions {
    pub installation: Vec<String>,
    pub installation_site_id: Option<String>,
    pub ftp_site_id: Option<String>,
    pub ssl_port: Option<u16>,
    pub ssl_ip_address: Option<String>,
    pub script: Option<String>,
    pub script_parameters: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccountOptions {
    pub accept_tos: bool,
    pub email_address: Option<String>,
    pub close_on_finish: bool,
    pub no_task_scheduler: bool,
    pub use_default_task_user: bool,
}

/// Bound command-line configuration.
///
/// Only the binder can populate an `Options`; callers receive it by value and
/// read it through the group accessors, so it stays as bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Options {
    connection: ConnectionOptions,
    lifecycle: LifecycleOptions,
    target: TargetOptions,
    validation: ValidationOptions,
    store: StoreOptions,
    installation: InstallationOptions,
    account: AccountOptions,
    #[serde(skip)]
    explicit: BTreeSet<Field>,
}

impl Options {
    #[must_use]
    pub fn connection(&self) -> &ConnectionOptions {
        &self.connection
    }

    #[must_use]
    pub fn lifecycle(&self) -> &LifecycleOptions {
        &self.lifecycle
    }

    #[must_use]
    pub fn target(&self) -> &TargetOptions {
        &self.target
    }

    #[must_use]
    pub fn validation(&self) -> &ValidationOptions {
        &self.validation
    }

    #[must_use]
    pub fn store(&self) -> &StoreOptions {
        &self.store
    }

    #[must_use]
    pub fn installation(&self) -> &InstallationOptions {
        &self.installation
    }

    #[must_use]
    pub fn account(&self) -> &AccountOptions {
        &self.account
    }

    /// Whether the field was named on the command line, as opposed to being
    /// absent or filled from a registered default.
    #[must_use]
    pub fn is_explicit(&self, field: Field) -> bool {
        self.explicit.contains(&field)
    }

    /// Fields named on the command line, in declaration order.
    pub fn explicit_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.explicit.iter().copied()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> FieldRef<'_> {
        match field {
            Field::BaseUri => FieldRef::Text(self.connection.base_uri.as_deref()),
            Field::Test => FieldRef::Switch(self.connection.test),
            Field::Import => FieldRef::Switch(self.connection.import),
            Field::ImportBaseUri => FieldRef::Text(self.connection.import_base_uri.as_deref()),
            Field::Verbose => FieldRef::Switch(self.connection.verbose),
            Field::Renew => FieldRef::Switch(self.lifecycle.renew),
            Field::Force => FieldRef::Switch(self.lifecycle.force),
            Field::FriendlyName => FieldRef::Text(self.lifecycle.friendly_name.as_deref()),
            Field::Cancel => FieldRef::Switch(self.lifecycle.cancel),
            Field::Target => FieldRef::Text(self.target.target.as_deref()),
            Field::SiteId => FieldRef::List(&self.target.site_id),
            Field::CommonName => FieldRef::Text(self.target.common_name.as_deref()),
            Field::ExcludeBindings => FieldRef::List(&self.target.exclude_bindings),
            Field::HideHttps => FieldRef::Switch(self.target.hide_https),
            Field::Host => FieldRef::List(&self.target.host),
            Field::ManualTargetIsIis => FieldRef::Switch(self.target.manual_target_is_iis),
            Field::Validation => FieldRef::Text(self.validation.validation.as_deref()),
            Field::ValidationMode => FieldRef::Text(self.validation.validation_mode.as_deref()),
            Field::WebRoot => FieldRef::Text(self.validation.web_root.as_deref()),
            Field::ValidationPort => FieldRef::Port(self.validation.validation_port),
            Field::ValidationSiteId => {
                FieldRef::Text(self.validation.validation_site_id.as_deref())
            }
            Field::Warmup => FieldRef::Switch(self.validation.warmup),
            Field::UserName => FieldRef::Text(self.validation.user_name.as_deref()),
            Field::Password => FieldRef::Text(self.validation.password.as_deref()),
            Field::DnsCreateScript => FieldRef::Text(self.validation.dns_create_script.as_deref()),
            Field::DnsDeleteScript => FieldRef::Text(self.validation.dns_delete_script.as_deref()),
            Field::Store => FieldRef::Text(self.store.store.as_deref()),
            Field::KeepExisting => FieldRef::Switch(self.store.keep_existing),
            Field::CentralSslStore => FieldRef::Text(self.store.central_ssl_store.as_deref()),
            Field::PfxPassword => FieldRef::Text(self.store.pfx_password.as_deref()),
            Field::CertificateStore => FieldRef::Text(self.store.certificate_store.as_deref()),
            Field::Installation => FieldRef::List(&self.installation.installation),
            Field::InstallationSiteId => {
                FieldRef::Text(self.installation.installation_site_id.as_deref())
            }
            Field::FtpSiteId => FieldRef::Text(self.installation.ftp_site_id.as_deref()),
            Field::SslPort => FieldRef::Port(self.installation.ssl_port),
            Field::SslIpAddress => FieldRef::Text(self.installation.ssl_ip_address.as_deref()),
            Field::Script => FieldRef::Text(self.installation.script.as_deref()),
            Field::ScriptParameters => {
                FieldRef::Text(self.installation.script_parameters.as_deref())
            }
            Field::CloseOnFinish => FieldRef::Switch(self.account.close_on_finish),
            Field::NoTaskScheduler => FieldRef::Switch(self.account.no_task_scheduler),
            Field::UseDefaultTaskUser => FieldRef::Switch(self.account.use_default_task_user),
            Field::AcceptTos => FieldRef::Switch(self.account.accept_tos),
            Field::EmailAddress => FieldRef::Text(self.account.email_address.as_deref()),
        }
    }

    /// Whether the field, or any field in its fallback chain, holds a value.
    #[must_use]
    pub fn resolves(&self, field: Field) -> bool {
        let mut current = Some(field);
        while let Some(field) = current {
            if self.get(field).is_present() {
                return true;
            }
            current = field.fallback();
        }
        false
    }

    #[must_use]
    pub fn effective_installation_site_id(&self) -> Option<&str> {
        self.installation
            .installation_site_id
            .as_deref()
            .or_else(|| self.primary_site_id())
    }

    #[must_use]
    pub fn effective_validation_site_id(&self) -> Option<&str> {
        self.validation
            .validation_site_id
            .as_deref()
            .or_else(|| self.primary_site_id())
    }

    #[must_use]
    pub fn effective_ftp_site_id(&self) -> Option<&str> {
        self.installation
            .ftp_site_id
            .as_deref()
            .or_else(|| self.effective_installation_site_id())
    }

    #[must_use]
    pub fn effective_validation_port(&self) -> u16 {
        self.validation
            .validation_port
            .unwrap_or(DEFAULT_VALIDATION_PORT)
    }

    #[must_use]
    pub fn selected_validation(&self) -> &str {
        self.validation
            .validation
            .as_deref()
            .unwrap_or(IMPLIED_VALIDATION)
    }

    #[must_use]
    pub fn selected_store(&self) -> &str {
        self.store.store.as_deref().unwrap_or(IMPLIED_STORE)
    }

    fn primary_site_id(&self) -> Option<&str> {
        self.target.site_id.first().map(String::as_str)
    }

    pub(crate) fn slot_mut(&mut self, field: Field) -> Slot<'_> {
        match field {
            Field::BaseUri => Slot::Text(&mut self.connection.base_uri),
            Field::Test => Slot::Switch(&mut self.connection.test),
            Field::Import => Slot::Switch(&mut self.connection.import),
            Field::ImportBaseUri => Slot::Text(&mut self.connection.import_base_uri),
            Field::Verbose => Slot::Switch(&mut self.connection.verbose),
            Field::Renew => Slot::Switch(&mut self.lifecycle.renew),
            Field::Force => Slot::Switch(&mut self.lifecycle.force),
            Field::FriendlyName => Slot::Text(&mut self.lifecycle.friendly_name),
            Field::Cancel => Slot::Switch(&mut self.lifecycle.cancel),
            Field::Target => Slot::Text(&mut self.target.target),
            Field::SiteId => Slot::List(&mut self.target.site_id),
            Field::CommonName => Slot::Text(&mut self.target.common_name),
            Field::ExcludeBindings => Slot::List(&mut self.target.exclude_bindings),
            Field::HideHttps => Slot::Switch(&mut self.target.hide_https),
            Field::Host => Slot::List(&mut self.target.host),
            Field::ManualTargetIsIis => Slot::Switch(&mut self.target.manual_target_is_iis),
            Field::Validation => Slot::Text(&mut self.validation.validation),
            Field::ValidationMode => Slot::Text(&mut self.validation.validation_mode),
            Field::WebRoot => Slot::Text(&mut self.validation.web_root),
            Field::ValidationPort => Slot::Port(&mut self.validation.validation_port),
            Field::ValidationSiteId => Slot::Text(&mut self.validation.validation_site_id),
            Field::Warmup => Slot::Switch(&mut self.validation.warmup),
            Field::UserName => Slot::Text(&mut self.validation.user_name),
            Field::Password => Slot::Text(&mut self.validation.password),
            Field::DnsCreateScript => Slot::Text(&mut self.validation.dns_create_script),
            Field::DnsDeleteScript => Slot::Text(&mut self.validation.dns_delete_script),
            Field::Store => Slot::Text(&mut self.store.store),
            Field::KeepExisting => Slot::Switch(&mut self.store.keep_existing),
            Field::CentralSslStore => Slot::Text(&mut self.store.central_ssl_store),
            Field::PfxPassword => Slot::Text(&mut self.store.pfx_password),
            Field::CertificateStore => Slot::Text(&mut self.store.certificate_store),
            Field::Installation => Slot::List(&mut self.installation.installation),
            Field::InstallationSiteId => Slot::Text(&mut self.installation.installation_site_id),
            Field::FtpSiteId => Slot::Text(&mut self.installation.ftp_site_id),
            Field::SslPort => Slot::Port(&mut self.installation.ssl_port),
            Field::SslIpAddress => Slot::Text(&mut self.installation.ssl_ip_address),
            Field::Script => Slot::Text(&mut self.installation.script),
            Field::ScriptParameters => Slot::Text(&mut self.installation.script_parameters),
            Field::CloseOnFinish => Slot::Switch(&mut self.account.close_on_finish),
            Field::NoTaskScheduler => Slot::Switch(&mut self.account.no_task_scheduler),
            Field::UseDefaultTaskUser => Slot::Switch(&mut self.account.use_default_task_user),
            Field::AcceptTos => Slot::Switch(&mut self.account.accept_tos),
            Field::EmailAddress => Slot::Text(&mut self.account.email_address),
        }
    }

    /// Stores a value supplied on the command line.
    pub(crate) fn set_explicit(&mut self, field: Field, value: FieldValue) -> bool {
        let stored = self.slot_mut(field).store(value);
        if stored {
            self.explicit.insert(field);
        }
        stored
    }

    /// Stores a registered default without marking the field explicit.
    pub(crate) fn set_default(&mut self, field: Field, value: FieldValue) -> bool {
        self.slot_mut(field).store(value)
    }

    pub(crate) fn clear(&mut self, field: Field) {
        self.slot_mut(field).clear();
        self.explicit.remove(&field);
    }
}
