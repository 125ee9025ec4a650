use {
    self::aes_gcm_encryption::AesGcmEncryption,
    aptdeck_sdk::secret_core::{secret::GenericSecret, traits::BincodeCodec},
};

pub(crate) mod aes_gcm_encryption;
pub(crate) mod master_key;
pub(crate) mod master_key_provider;

/// Value stored encrypted with the CLI master key.
pub(crate) type Secret<T> = GenericSecret<T, AesGcmEncryption, BincodeCodec>;
