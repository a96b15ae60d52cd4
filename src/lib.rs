pub mod binder;
pub mod error;
pub mod help;
pub mod options;
pub mod registry;
pub mod settings;

pub use binder::{BindOutcome, OptionsBinder, ValidationPolicy};
pub use error::{BindError, ParseError, RegistryError, ValidationError};
pub use options::{Field, Options};
pub use registry::FlagRegistry;
