use {
    super::{
        error::SecretStoreError,
        traits::{BincodeCodec, EncryptionAlgo, PlaintextCodec},
    },
    base64::{engine::general_purpose::STANDARD, Engine as _},
    rand::{rngs::OsRng, RngCore},
    serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer},
    std::{
        marker::PhantomData,
        ops::{Deref, DerefMut},
    },
    zeroize::Zeroizing,
};

/// Holds `T` in memory in the clear and only ever serializes it as
/// `base64(nonce || ciphertext)`.
///
/// `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct GenericSecret<T, E: EncryptionAlgo, P: PlaintextCodec = BincodeCodec> {
    value: T,
    _enc: PhantomData<E>,
    _codec: PhantomData<P>,
}

impl<T, E: EncryptionAlgo, P: PlaintextCodec> GenericSecret<T, E, P> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            _enc: PhantomData,
            _codec: PhantomData,
        }
    }

    pub fn expose(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Default, E: EncryptionAlgo, P: PlaintextCodec> Default for GenericSecret<T, E, P> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T, E: EncryptionAlgo, P: PlaintextCodec> std::fmt::Debug for GenericSecret<T, E, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GenericSecret(<redacted>)")
    }
}

impl<T, E: EncryptionAlgo, P: PlaintextCodec> Deref for GenericSecret<T, E, P> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T, E: EncryptionAlgo, P: PlaintextCodec> DerefMut for GenericSecret<T, E, P> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

/// Encrypt `plaintext` under a fresh nonce and encode the envelope.
fn seal<E: EncryptionAlgo>(plaintext: &[u8]) -> Result<String, SecretStoreError> {
    let mut envelope = vec![0u8; E::NONCE_LEN];

    OsRng.fill_bytes(&mut envelope);

    let ciphertext = E::encrypt(&envelope, plaintext)?;

    envelope.extend_from_slice(&ciphertext);

    Ok(STANDARD.encode(envelope))
}

/// Decode the envelope produced by [seal] and decrypt it.
fn open<E: EncryptionAlgo>(encoded: &str) -> Result<Zeroizing<Vec<u8>>, SecretStoreError> {
    let envelope = STANDARD.decode(encoded)?;

    if envelope.len() < E::NONCE_LEN {
        return Err(SecretStoreError::Truncated);
    }

    let (nonce, ciphertext) = envelope.split_at(E::NONCE_LEN);

    Ok(Zeroizing::new(E::decrypt(nonce, ciphertext)?))
}

impl<T, E, P> Serialize for GenericSecret<T, E, P>
where
    T: Serialize,
    E: EncryptionAlgo,
    P: PlaintextCodec,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let plaintext = Zeroizing::new(P::encode(&self.value).map_err(serde::ser::Error::custom)?);
        let sealed = seal::<E>(&plaintext).map_err(serde::ser::Error::custom)?;

        serializer.serialize_str(&sealed)
    }
}

impl<'de, T, E, P> Deserialize<'de> for GenericSecret<T, E, P>
where
    T: DeserializeOwned,
    E: EncryptionAlgo,
    P: PlaintextCodec,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let plaintext = open::<E>(&encoded).map_err(serde::de::Error::custom)?;
        let value = P::decode(&plaintext).map_err(serde::de::Error::custom)?;

        Ok(Self::new(value))
    }
}
