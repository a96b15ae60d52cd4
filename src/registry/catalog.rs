use super::{FlagGroup, FlagRegistry};
use crate::error::RegistryError;
use crate::options::{Field, FieldValue};

pub(crate) const DEFAULT_VALIDATION_MODE: &str = "http-01";
pub(crate) const DEFAULT_SSL_PORT: u16 = 443;
pub(crate) const DEFAULT_SSL_IP_ADDRESS: &str = "*";

pub(super) fn register_all(registry: &mut FlagRegistry) -> Result<(), RegistryError> {
    register_basic(registry)?;
    register_main_menu(registry)?;
    register_target(registry)?;
    register_validation(registry)?;
    register_store(registry)?;
    register_installation(registry)?;
    register_misc(registry)?;
    register_account(registry)
}

fn register_basic(registry: &mut FlagRegistry) -> Result<(), RegistryError> {
    registry.begin_group(FlagGroup::Basic);
    registry.register(
        "baseuri",
        Field::BaseUri,
        None,
        "The address of the ACME server to use.",
    )?;
    registry.register(
        "test",
        Field::Test,
        None,
        "Enables testing behaviours in the program which may help with troubleshooting.",
    )?;
    registry.register(
        "import",
        Field::Import,
        None,
        "Import scheduled renewals from a previous installation.",
    )?;
    registry.register(
        "importbaseuri",
        Field::ImportBaseUri,
        None,
        "[--import] The address of the ACME server to use to import scheduled renewals from.",
    )?;
    registry.register(
        "verbose",
        Field::Verbose,
        None,
        "Print additional log messages to console for troubleshooting.",
    )
}

fn register_main_menu(registry: &mut FlagRegistry) -> Result<(), RegistryError> {
    registry.begin_group(FlagGroup::MainMenu);
    registry.register(
        "renew",
        Field::Renew,
        None,
        "Check for scheduled renewals.",
    )?;
    registry.register(
        "force",
        Field::Force,
        None,
        "Force renewal on all scheduled certificates when used together with --renew. \
         Otherwise just bypasses the certificate cache on new certificate requests.",
    )?;
    registry.register(
        "friendlyname",
        Field::FriendlyName,
        None,
        "Give the friendly name of certificate, either to be used for creating a new one \
         or to target a command (like --cancel or --renew) at as specific one.",
    )?;
    registry.register(
        "cancel",
        Field::Cancel,
        None,
        "Cancels existing scheduled renewal as specified by the target parameters.",
    )
}

fn register_target(registry: &mut FlagRegistry) -> Result<(), RegistryError> {
    registry.begin_group(FlagGroup::Target);
    registry.register(
        "target",
        Field::Target,
        None,
        "Specify which target plugin to run, bypassing the main menu and triggering \
         unattended mode.",
    )?;
    registry.register(
        "siteid",
        Field::SiteId,
        None,
        "[--target iissite|iissites|iisbinding] Specify identifier of the site that the \
         plugin should create the target from. For the iissites plugin this may be a comma \
         separated list.",
    )?;
    registry.register(
        "commonname",
        Field::CommonName,
        None,
        "[--target iissite|iissites|manual] Specify the common name of the certificate that \
         should be requested for the target.",
    )?;
    registry.register(
        "excludebindings",
        Field::ExcludeBindings,
        None,
        "[--target iissite|iissites] Exclude bindings from being included in the \
         certificate. This may be a comma separated list.",
    )?;
    registry.register(
        "hidehttps",
        Field::HideHttps,
        None,
        "Hide sites that have existing https bindings.",
    )?;
    registry.register(
        "host",
        Field::Host,
        None,
        "[--target manual|iisbinding] A host name to manually get a certificate for. For \
         the manual plugin this may be a comma separated list.",
    )?;
    registry.register(
        "manualtargetisiis",
        Field::ManualTargetIsIis,
        None,
        "[--target manual] Is the target of the manual host an IIS website?",
    )
}

fn register_validation(registry: &mut FlagRegistry) -> Result<(), RegistryError> {
    registry.begin_group(FlagGroup::Validation);
    registry.register(
        "validation",
        Field::Validation,
        None,
        "Specify which validation plugin to run. If none is specified, filesystem \
         validation will be chosen as the default.",
    )?;
    registry.register(
        "validationmode",
        Field::ValidationMode,
        Some(FieldValue::Text(DEFAULT_VALIDATION_MODE.to_string())),
        "Specify which validation mode to use.",
    )?;
    registry.register(
        "webroot",
        Field::WebRoot,
        None,
        "[--validationmode http-01 --validation filesystem] A web root for the manual host \
         name for validation.",
    )?;
    registry.register(
        "validationport",
        Field::ValidationPort,
        None,
        "[--validationmode http-01 --validation selfhosting] Port to use for listening to \
         http-01 validation requests. Defaults to 80.",
    )?;
    registry.register(
        "validationsiteid",
        Field::ValidationSiteId,
        None,
        "[--validationmode http-01 --validation filesystem|iis] Specify site to use for \
         handling validation requests. Defaults to --siteid.",
    )?;
    registry.register(
        "warmup",
        Field::Warmup,
        None,
        "[--validationmode http-01] Warm up websites before attempting HTTP authorization.",
    )?;
    registry.register(
        "username",
        Field::UserName,
        None,
        "[--validationmode http-01 --validation ftp|sftp|webdav] Username for ftp(s)/WebDav \
         server.",
    )?;
    registry.register(
        "password",
        Field::Password,
        None,
        "[--validationmode http-01 --validation ftp|sftp|webdav] Password for ftp(s)/WebDav \
         server.",
    )?;
    registry.register(
        "dnscreatescript",
        Field::DnsCreateScript,
        None,
        "[--validationmode dns-01 --validation dnsscript] Path to script to create TXT \
         record. Parameters passed are the host name, record name and desired content.",
    )?;
    registry.register(
        "dnsdeletescript",
        Field::DnsDeleteScript,
        None,
        "[--validationmode dns-01 --validation dnsscript] Path to script to remove TXT \
         record. Parameters passed are the host name and record name.",
    )
}

fn register_store(registry: &mut FlagRegistry) -> Result<(), RegistryError> {
    registry.begin_group(FlagGroup::Store);
    registry.register(
        "store",
        Field::Store,
        None,
        "Specify which store plugin to use. If none is specified, the certificate store \
         will be used.",
    )?;
    registry.register(
        "keepexisting",
        Field::KeepExisting,
        None,
        "While renewing, do not remove the previous certificate.",
    )?;
    registry.register(
        "centralsslstore",
        Field::CentralSslStore,
        None,
        "[--store centralssl] When using this setting, certificate files are stored to the \
         CCS and IIS bindings are configured to reflect that.",
    )?;
    registry.register(
        "pfxpassword",
        Field::PfxPassword,
        None,
        "[--store centralssl] Password to set for .pfx files exported to the IIS CCS.",
    )?;
    registry.register(
        "certificatestore",
        Field::CertificateStore,
        None,
        "[--store certificatestore] This setting can be used to target a specific \
         Certificate Store for a renewal.",
    )
}

fn register_installation(registry: &mut FlagRegistry) -> Result<(), RegistryError> {
    registry.begin_group(FlagGroup::Installation);
    registry.register(
        "installation",
        Field::Installation,
        None,
        "Specify which installation plugins to use. This may be a comma separated list.",
    )?;
    registry.register(
        "installationsiteid",
        Field::InstallationSiteId,
        None,
        "[--installation iis] Specify site to install new bindings to. Defaults to --siteid.",
    )?;
    registry.register(
        "ftpsiteid",
        Field::FtpSiteId,
        None,
        "[--installation iisftp] Specify site to install certificate to. Defaults to \
         --installationsiteid.",
    )?;
    registry.register(
        "sslport",
        Field::SslPort,
        Some(FieldValue::Port(DEFAULT_SSL_PORT)),
        "[--installation iis] Port to use for creating new HTTPS bindings.",
    )?;
    registry.register(
        "sslipaddress",
        Field::SslIpAddress,
        Some(FieldValue::Text(DEFAULT_SSL_IP_ADDRESS.to_string())),
        "[--installation iis] IP address to use for creating new HTTPS bindings.",
    )?;
    registry.register(
        "script",
        Field::Script,
        None,
        "[--installation manual] Path to script to run after retrieving the certificate.",
    )?;
    registry.register(
        "scriptparameters",
        Field::ScriptParameters,
        None,
        "[--installation manual] Parameters for the script to run after retrieving the \
         certificate.",
    )
}

fn register_misc(registry: &mut FlagRegistry) -> Result<(), RegistryError> {
    registry.begin_group(FlagGroup::Misc);
    registry.register(
        "closeonfinish",
        Field::CloseOnFinish,
        None,
        "[--test] Close the application when complete, which usually doesn't happen in \
         test mode.",
    )?;
    registry.register(
        "notaskscheduler",
        Field::NoTaskScheduler,
        None,
        "Do not create (or offer to update) the scheduled task.",
    )?;
    registry.register(
        "usedefaulttaskuser",
        Field::UseDefaultTaskUser,
        None,
        "Avoid the question about specifying the task scheduler user, as such defaulting \
         to the SYSTEM account.",
    )
}

fn register_account(registry: &mut FlagRegistry) -> Result<(), RegistryError> {
    registry.begin_group(FlagGroup::AcmeAccount);
    registry.register(
        "accepttos",
        Field::AcceptTos,
        None,
        "Accept the ACME terms of service.",
    )?;
    registry.register(
        "emailaddress",
        Field::EmailAddress,
        None,
        "Email address to use by ACME for renewal fail notices.",
    )
}
