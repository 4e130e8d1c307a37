//! Durable storage for environment variables.
//!
//! The active toolchain root and the executable search path are persisted in
//! two scopes, machine-wide and per-user. Every consumer goes through the
//! [`EnvironmentStore`] trait so the backing storage can be swapped: the
//! Windows registry, JSON files under the gvm data directory, or an in-memory
//! map in tests.

mod file;
mod memory;
#[cfg(windows)]
mod registry;

pub use file::FileStore;
pub use memory::MemoryStore;
#[cfg(windows)]
pub use registry::RegistryStore;

use crate::{EnvBackend, GvmConfig, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scope {
    Machine,
    User,
}

impl Scope {
    /// Order in which scopes are written on every switch.
    pub const ALL: [Scope; 2] = [Scope::Machine, Scope::User];

    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Machine => "machine",
            Scope::User => "user",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait EnvironmentStore {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>>;

    fn set(&self, scope: Scope, key: &str, value: &str) -> Result<()>;
}

pub fn open_store(config: &GvmConfig) -> Box<dyn EnvironmentStore> {
    match config.env_backend {
        #[cfg(windows)]
        EnvBackend::Registry => Box::new(RegistryStore::new()),
        #[cfg(not(windows))]
        EnvBackend::Registry => {
            tracing::warn!("registry backend is only available on Windows, using files");
            Box::new(FileStore::new(config.env_dir()))
        }
        EnvBackend::File => Box::new(FileStore::new(config.env_dir())),
    }
}
