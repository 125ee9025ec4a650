use serde::{de::Deserializer, ser::Serializer, Deserialize, Serialize};

/// The fullnode wraps `u64` values in strings to avoid overflow in JS
/// clients, the indexer sometimes sends plain numbers. Accept both.
pub fn deserialize_aptos_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    match value {
        serde_json::Value::String(s) => s.parse::<u64>().map_err(serde::de::Error::custom),
        serde_json::Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| serde::de::Error::custom(format!("'{n}' is not a valid u64"))),
        other => Err(serde::de::Error::custom(format!(
            "expected u64 as string or number, got {other}"
        ))),
    }
}

/// Inverse of [deserialize_aptos_u64].
pub fn serialize_aptos_u64<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    value.to_string().serialize(serializer)
}

/// Same as [deserialize_aptos_u64] for amounts that can exceed `u64`.
pub fn deserialize_aptos_u128<'de, D>(deserializer: D) -> Result<u128, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    match value {
        serde_json::Value::String(s) => s.parse::<u128>().map_err(serde::de::Error::custom),
        // Large numerics come through as floats when arbitrary precision is
        // off, so go through the textual form.
        serde_json::Value::Number(n) => n
            .to_string()
            .parse::<u128>()
            .map_err(serde::de::Error::custom),
        other => Err(serde::de::Error::custom(format!(
            "expected u128 as string or number, got {other}"
        ))),
    }
}

/// Inverse of [deserialize_aptos_u128].
pub fn serialize_aptos_u128<S>(value: &u128, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    value.to_string().serialize(serializer)
}

/// Ledger timestamps are microseconds since the epoch, as a string.
pub fn deserialize_micros_to_datetime<'de, D>(
    deserializer: D,
) -> Result<chrono::DateTime<chrono::Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let micros = deserialize_aptos_u64(deserializer)?;
    let micros = i64::try_from(micros).map_err(serde::de::Error::custom)?;

    chrono::DateTime::from_timestamp_micros(micros)
        .ok_or(serde::de::Error::custom("datetime out of range"))
}

/// Inverse of [deserialize_micros_to_datetime].
pub fn serialize_datetime_to_micros<S>(
    value: &chrono::DateTime<chrono::Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    value.timestamp_micros().to_string().serialize(serializer)
}
