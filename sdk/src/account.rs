//! Local ed25519 accounts. The authentication key (and therefore the address
//! of a fresh account) is `sha3_256(public_key || 0x00)`, the single-signer
//! ed25519 scheme.

use {
    crate::aptos::AccountAddress,
    ed25519_dalek::{Signer, SigningKey},
    rand::{rngs::OsRng, RngCore},
    serde::{Deserialize, Serialize},
    sha3::{Digest, Sha3_256},
    thiserror::Error,
    zeroize::Zeroizing,
};

/// Prefix of private keys in the AIP-80 format.
pub const AIP80_PREFIX: &str = "ed25519-priv-";

/// Scheme byte appended to the public key when deriving the authentication key.
const ED25519_SCHEME: u8 = 0x00;

const PRIVATE_KEY_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
}

/// Result of signing an arbitrary message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureResult {
    pub signature: String,
    pub public_key: String,
    pub address: AccountAddress,
}

/// An account whose private key is held in memory.
pub struct LocalAccount {
    signing_key: SigningKey,
    address: AccountAddress,
}

impl LocalAccount {
    /// Generate a fresh key from the OS RNG.
    pub fn generate() -> Self {
        let mut seed = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
        OsRng.fill_bytes(&mut *seed);

        Self::from_signing_key(SigningKey::from_bytes(&seed))
    }

    /// Accepts `0x`-prefixed hex, bare hex and the AIP-80
    /// `ed25519-priv-0x...` form.
    pub fn from_private_key_hex(input: &str) -> Result<Self, AccountError> {
        let trimmed = input.trim();
        let hex_part = trimmed.strip_prefix(AIP80_PREFIX).unwrap_or(trimmed);
        let hex_part = hex_part.strip_prefix("0x").unwrap_or(hex_part);

        if hex_part.len() != PRIVATE_KEY_LEN * 2 {
            return Err(AccountError::InvalidPrivateKey(format!(
                "expected {} hex characters, got {}",
                PRIVATE_KEY_LEN * 2,
                hex_part.len()
            )));
        }

        let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);

        hex::decode_to_slice(hex_part, &mut *bytes)
            .map_err(|e| AccountError::InvalidPrivateKey(e.to_string()))?;

        Ok(Self::from_signing_key(SigningKey::from_bytes(&bytes)))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = derive_address(signing_key.verifying_key().as_bytes());

        Self {
            signing_key,
            address,
        }
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    /// `0x`-prefixed public key.
    pub fn public_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.signing_key.verifying_key().as_bytes()))
    }

    /// `0x`-prefixed private key.
    pub fn private_key_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("0x{}", hex::encode(self.signing_key.to_bytes())))
    }

    /// Private key in the AIP-80 format, `ed25519-priv-0x...`.
    pub fn private_key_aip80(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("{AIP80_PREFIX}{}", self.private_key_hex().as_str()))
    }

    /// Raw ed25519 signature over `message`.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }

    /// Sign the UTF-8 bytes of `message`.
    pub fn sign_message(&self, message: &str) -> SignatureResult {
        SignatureResult {
            signature: format!("0x{}", hex::encode(self.sign(message.as_bytes()))),
            public_key: self.public_key_hex(),
            address: self.address,
        }
    }
}

impl std::fmt::Debug for LocalAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalAccount")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Address of a fresh single-key ed25519 account.
pub fn derive_address(public_key: &[u8; 32]) -> AccountAddress {
    let mut hasher = Sha3_256::new();

    hasher.update(public_key);
    hasher.update([ED25519_SCHEME]);

    AccountAddress::new(hasher.finalize().into())
}
