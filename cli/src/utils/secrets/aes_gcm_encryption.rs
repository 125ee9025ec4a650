use {
    super::{master_key::KEY_LEN, master_key_provider::MasterKeyProvider},
    aes_gcm::{
        aead::{Aead, Key, KeyInit},
        Aes256Gcm,
        Nonce,
    },
    aptdeck_sdk::secret_core::{
        error::SecretStoreError,
        traits::{EncryptionAlgo, KeyProvider},
    },
    zeroize::Zeroizing,
};

/// AES-256-GCM keyed with the CLI master key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct AesGcmEncryption;

impl AesGcmEncryption {
    fn cipher() -> Result<Aes256Gcm, SecretStoreError> {
        let key: Zeroizing<[u8; KEY_LEN]> = MasterKeyProvider.key()?;

        Ok(Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&*key)))
    }

    fn check_nonce(nonce: &[u8]) -> Result<(), SecretStoreError> {
        if nonce.len() != Self::NONCE_LEN {
            return Err(SecretStoreError::Crypto("Invalid nonce length".into()));
        }

        Ok(())
    }
}

impl EncryptionAlgo for AesGcmEncryption {
    const NONCE_LEN: usize = 12;

    fn encrypt(nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, SecretStoreError> {
        Self::check_nonce(nonce)?;

        Self::cipher()?
            .encrypt(Nonce::from_slice(nonce), plaintext)
            .map_err(|e| SecretStoreError::Crypto(e.to_string().into()))
    }

    fn decrypt(nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, SecretStoreError> {
        Self::check_nonce(nonce)?;

        Self::cipher()?
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|e| SecretStoreError::Crypto(e.to_string().into()))
    }
}
