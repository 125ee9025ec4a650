use {
    super::error::SecretStoreError,
    serde::{de::DeserializeOwned, Serialize},
};

/// Supplies the key an [EncryptionAlgo] encrypts with.
pub trait KeyProvider: Default + Send + Sync + 'static {
    type Key: Send + Sync + 'static;

    fn key(&self) -> Result<Self::Key, SecretStoreError>;
}

/// Turns the secret value into bytes before encryption and back after
/// decryption.
pub trait PlaintextCodec: Default + Send + Sync + 'static {
    fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, SecretStoreError>;

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SecretStoreError>;
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BincodeCodec;

impl PlaintextCodec for BincodeCodec {
    fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, SecretStoreError> {
        bincode::serialize(value).map_err(|e| SecretStoreError::Codec(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SecretStoreError> {
        bincode::deserialize(bytes).map_err(|e| SecretStoreError::Codec(e.to_string()))
    }
}

/// Symmetric cipher used to seal secrets. Implementations fetch their own key,
/// usually through a [KeyProvider].
pub trait EncryptionAlgo: Default + Send + Sync + 'static {
    /// Nonce length in bytes. A fresh random nonce is drawn for every
    /// encryption and stored in front of the ciphertext.
    const NONCE_LEN: usize;

    fn encrypt(nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, SecretStoreError>;

    fn decrypt(nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, SecretStoreError>;
}
