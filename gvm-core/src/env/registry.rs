use super::{EnvironmentStore, Scope};
use crate::{GvmError, Result};
use std::io::ErrorKind;
use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ, KEY_WRITE, RegType};
use winreg::{RegKey, RegValue};

const MACHINE_ENVIRONMENT: &str = r"SYSTEM\CurrentControlSet\Control\Session Manager\Environment";
const USER_ENVIRONMENT: &str = "Environment";

/// Persistent environment variables as Windows keeps them. Writing the
/// machine scope needs an elevated prompt.
#[derive(Debug, Default)]
pub struct RegistryStore;

impl RegistryStore {
    pub fn new() -> Self {
        RegistryStore
    }

    fn open(&self, scope: Scope, flags: u32) -> std::io::Result<RegKey> {
        match scope {
            Scope::Machine => {
                RegKey::predef(HKEY_LOCAL_MACHINE).open_subkey_with_flags(MACHINE_ENVIRONMENT, flags)
            }
            Scope::User => {
                RegKey::predef(HKEY_CURRENT_USER).open_subkey_with_flags(USER_ENVIRONMENT, flags)
            }
        }
    }
}

impl EnvironmentStore for RegistryStore {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>> {
        let read_error = |error: std::io::Error| GvmError::StoreRead {
            scope,
            key: key.to_string(),
            reason: error.to_string(),
        };

        let env = self.open(scope, KEY_READ).map_err(read_error)?;

        match env.get_value::<String, _>(key) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(read_error(error)),
        }
    }

    fn set(&self, scope: Scope, key: &str, value: &str) -> Result<()> {
        let write_error = |error: std::io::Error| GvmError::StoreWrite {
            scope,
            key: key.to_string(),
            reason: error.to_string(),
        };

        let env = self.open(scope, KEY_READ | KEY_WRITE).map_err(write_error)?;
        // Keep REG_EXPAND_SZ so entries like %SystemRoot% still expand.
        let vtype = match env.get_raw_value(key) {
            Ok(existing) if existing.vtype == RegType::REG_EXPAND_SZ => RegType::REG_EXPAND_SZ,
            Ok(_) => RegType::REG_SZ,
            Err(error) if error.kind() == ErrorKind::NotFound => RegType::REG_SZ,
            Err(error) => return Err(write_error(error)),
        };
        env.set_raw_value(key, &encode_value(value, vtype.clone()))
            .map_err(write_error)?;

        tracing::debug!("wrote {} ({:?}) to the {} registry environment", key, vtype, scope);
        Ok(())
    }
}

/// NUL-terminated UTF-16 payload for a string value of `vtype`.
fn encode_value(value: &str, vtype: RegType) -> RegValue {
    let bytes: Vec<u8> = value
        .encode_utf16()
        .chain(std::iter::once(0))
        .flat_map(u16::to_le_bytes)
        .collect();
    RegValue {
        bytes: bytes.into(),
        vtype,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_string_keeps_its_type() {
        let encoded = encode_value(r"%SystemRoot%\system32", RegType::REG_EXPAND_SZ);

        assert_eq!(encoded.vtype, RegType::REG_EXPAND_SZ);
        let units: Vec<u16> = encoded
            .bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        assert_eq!(units.last(), Some(&0));
        assert_eq!(
            String::from_utf16(&units[..units.len() - 1]).unwrap(),
            r"%SystemRoot%\system32"
        );
    }
}
