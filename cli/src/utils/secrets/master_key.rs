//! Master key protecting the wallet section of the configuration.
//!
//! When `APTDECK_CLI_STORE_PASSPHRASE` is set the key is derived from it with
//! Argon2id and a per-user salt. Otherwise a random key is kept in the OS
//! key-ring, created on first use.

use {
    argon2::{Algorithm, Argon2, Params, Version},
    directories::ProjectDirs,
    keyring::Entry,
    rand::{rngs::OsRng, RngCore},
    std::{
        env,
        fs,
        io,
        path::{Path, PathBuf},
    },
    thiserror::Error,
    zeroize::Zeroizing,
};

/// Key-ring service and user holding the random master key.
pub(crate) const SERVICE: &str = "aptdeck-cli-store";
pub(crate) const USER: &str = "master-key";

/// Env var holding the passphrase the key is derived from.
pub(crate) const PASSPHRASE_ENV: &str = "APTDECK_CLI_STORE_PASSPHRASE";

pub(crate) const KEY_LEN: usize = 32;
pub(crate) const SALT_LEN: usize = 16;

// Argon2id with 64 MiB, 4 passes, 1 lane.
const ARGON2_MEMORY_KIB: u32 = 64 * 1024;
const ARGON2_ITERATIONS: u32 = 4;

#[derive(Debug, Error)]
pub(crate) enum MasterKeyError {
    #[error("key-ring error: {0}")]
    Keyring(#[from] keyring::Error),
    #[error("stored master key is not hex: {0}")]
    HexDecode(#[from] hex::FromHexError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("unable to locate a per-user configuration directory")]
    ProjectDirNotFound,
    #[error("argon2 failure: {0}")]
    Argon2(String),
    #[error("a master key already exists, pass --force to replace it and forget the stored wallet")]
    KeyAlreadyExists,
}

/// Where the master key currently comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum KeySource {
    Passphrase,
    /// Key-ring entry, with the first 8 hex characters of the key.
    Keyring(String),
    Missing,
}

/// Obtain the master key, creating a random one in the key-ring when neither
/// a passphrase nor a stored key exist.
pub(crate) fn get_master_key() -> Result<Zeroizing<[u8; KEY_LEN]>, MasterKeyError> {
    // A passphrase always wins so the derived key is never shadowed by a
    // stale key-ring entry.
    if let Ok(passphrase) = env::var(PASSPHRASE_ENV) {
        let salt = get_or_create_salt(&salt_path()?)?;

        return derive_key(passphrase.as_bytes(), &salt);
    }

    match Entry::new(SERVICE, USER) {
        Ok(entry) => {
            if let Ok(stored) = entry.get_password() {
                match decode_key(&stored) {
                    Ok(key) => return Ok(key),
                    Err(e) => {
                        log::warn!("Discarding malformed master key from the key-ring: {e}");

                        let _ = entry.delete_credential();
                    }
                }
            }
        }
        Err(e) => log::warn!("Key-ring not available: {e}"),
    }

    let key = random_key();

    store_key(&key)?;

    Ok(key)
}

/// Generate a fresh random key in the key-ring. Refuses to replace an
/// existing one unless `force` is set.
pub(crate) fn init_master_key(force: bool) -> Result<(), MasterKeyError> {
    let entry = Entry::new(SERVICE, USER)?;

    if entry.get_password().is_ok() && !force {
        return Err(MasterKeyError::KeyAlreadyExists);
    }

    store_key(&random_key())
}

/// Report where [get_master_key] would read the key from, without creating
/// anything.
pub(crate) fn key_source() -> Result<KeySource, MasterKeyError> {
    if env::var(PASSPHRASE_ENV).is_ok() {
        return Ok(KeySource::Passphrase);
    }

    match Entry::new(SERVICE, USER)?.get_password() {
        Ok(stored) => Ok(KeySource::Keyring(stored.chars().take(8).collect())),
        Err(keyring::Error::NoEntry) => Ok(KeySource::Missing),
        Err(e) => Err(e.into()),
    }
}

fn random_key() -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);

    OsRng.fill_bytes(&mut *key);

    key
}

fn store_key(key: &[u8; KEY_LEN]) -> Result<(), MasterKeyError> {
    Entry::new(SERVICE, USER)?.set_password(&hex::encode(key))?;

    Ok(())
}

fn decode_key(stored: &str) -> Result<Zeroizing<[u8; KEY_LEN]>, MasterKeyError> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);

    hex::decode_to_slice(stored.trim(), &mut *key)?;

    Ok(key)
}

fn derive_key(passphrase: &[u8], salt: &[u8; SALT_LEN]) -> Result<Zeroizing<[u8; KEY_LEN]>, MasterKeyError> {
    let params = Params::new(ARGON2_MEMORY_KIB, ARGON2_ITERATIONS, 1, Some(KEY_LEN))
        .map_err(|e| MasterKeyError::Argon2(e.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = Zeroizing::new([0u8; KEY_LEN]);

    argon2
        .hash_password_into(passphrase, salt, &mut *key)
        .map_err(|e| MasterKeyError::Argon2(e.to_string()))?;

    Ok(key)
}

/// `$XDG_CONFIG_HOME/aptdeck-cli/salt.bin`, or the platform config dir.
fn salt_path() -> Result<PathBuf, MasterKeyError> {
    let config_dir = match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg).join("aptdeck-cli"),
        Err(_) => ProjectDirs::from("dev", "aptdeck", "aptdeck-cli")
            .ok_or(MasterKeyError::ProjectDirNotFound)?
            .config_dir()
            .to_path_buf(),
    };

    Ok(config_dir.join("salt.bin"))
}

fn get_or_create_salt(path: &Path) -> Result<[u8; SALT_LEN], MasterKeyError> {
    if path.exists() {
        match <[u8; SALT_LEN]>::try_from(fs::read(path)?.as_slice()) {
            Ok(salt) => return Ok(salt),
            Err(_) => {
                log::warn!("Salt at {} has the wrong length, recreating it", path.display());

                fs::remove_file(path)?;
            }
        }
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut salt = [0u8; SALT_LEN];

    OsRng.fill_bytes(&mut salt);

    write_private(path, &salt)?;

    Ok(salt)
}

/// Write `bytes` readable by the owner only.
fn write_private(path: &Path, bytes: &[u8]) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::{fs::OpenOptions, io::Write, os::unix::fs::OpenOptionsExt};

        OpenOptions::new()
            .write(true)
            .create_new(true)
            .mode(0o600)
            .open(path)?
            .write_all(bytes)
    }

    #[cfg(not(unix))]
    {
        fs::write(path, bytes)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, assert_matches::assert_matches, tempfile::TempDir};

    #[test]
    fn test_salt_is_created_once_and_private() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("aptdeck-cli").join("salt.bin");

        let first = get_or_create_salt(&path).unwrap();
        let second = get_or_create_salt(&path).unwrap();

        assert_eq!(first, second);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;

            assert_eq!(mode, 0o600);
        }
    }

    #[test]
    fn test_truncated_salt_is_replaced() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("salt.bin");

        fs::write(&path, [1u8; 3]).unwrap();

        let salt = get_or_create_salt(&path).unwrap();

        assert_eq!(fs::read(&path).unwrap(), salt.to_vec());
    }

    #[test]
    fn test_derivation_depends_on_passphrase_and_salt() {
        let salt = [7u8; SALT_LEN];

        let alpha = derive_key(b"alpha", &salt).unwrap();

        assert_eq!(*alpha, *derive_key(b"alpha", &salt).unwrap());
        assert_ne!(*alpha, *derive_key(b"bravo", &salt).unwrap());
        assert_ne!(*alpha, *derive_key(b"alpha", &[8u8; SALT_LEN]).unwrap());
    }

    #[test]
    fn test_decode_key() {
        let hex_key = "11".repeat(KEY_LEN);

        assert_eq!(*decode_key(&hex_key).unwrap(), [0x11u8; KEY_LEN]);
        assert_matches!(decode_key("abcd"), Err(MasterKeyError::HexDecode(_)));
        assert_matches!(decode_key("zz"), Err(MasterKeyError::HexDecode(_)));
    }

    #[test]
    #[serial_test::serial(master_key_env)]
    fn test_passphrase_key_is_stable() {
        let tmp = TempDir::new().unwrap();

        env::set_var("XDG_CONFIG_HOME", tmp.path());
        env::set_var(PASSPHRASE_ENV, "correct horse battery staple");

        let first = get_master_key().unwrap();
        let second = get_master_key().unwrap();

        assert_eq!(*first, *second);
        assert!(tmp.path().join("aptdeck-cli").join("salt.bin").exists());
        assert_eq!(key_source().unwrap(), KeySource::Passphrase);

        env::remove_var(PASSPHRASE_ENV);
        env::remove_var("XDG_CONFIG_HOME");
    }
}
