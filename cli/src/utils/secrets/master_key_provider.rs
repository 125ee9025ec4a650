use {
    super::master_key::{self, KEY_LEN},
    aptdeck_sdk::secret_core::{error::SecretStoreError, traits::KeyProvider},
    zeroize::Zeroizing,
};

/// Hands [master_key::get_master_key] to the secret store.
#[derive(Default, Debug, Clone, Copy)]
pub(crate) struct MasterKeyProvider;

impl KeyProvider for MasterKeyProvider {
    type Key = Zeroizing<[u8; KEY_LEN]>;

    fn key(&self) -> Result<Self::Key, SecretStoreError> {
        master_key::get_master_key().map_err(|e| SecretStoreError::Provider(e.to_string()))
    }
}
