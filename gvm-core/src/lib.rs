pub mod config;
pub mod console;
pub mod env;
pub mod error;
pub mod fetch;
pub mod fs;
pub mod operations;
pub mod platform;
pub mod scanner;
pub mod switch;

pub use config::{EnvBackend, GvmConfig};
pub use env::{EnvironmentStore, Scope};
pub use error::GvmError;
pub use platform::Platform;
pub use scanner::{Installation, VersionMarker};

pub type Result<T> = std::result::Result<T, GvmError>;
