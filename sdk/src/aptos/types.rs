use {
    lazy_regex::{lazy_regex, Lazy},
    regex::Regex,
    serde::{Deserialize, Serialize},
    std::str::FromStr,
};

// == AccountAddress ==

/// A 32-byte Aptos account address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress([u8; AccountAddress::LENGTH]);

impl AccountAddress {
    pub const LENGTH: usize = 32;

    /// `0x1`, home of the Aptos framework.
    pub const ONE: Self = Self::from_u8(1);

    const fn from_u8(last: u8) -> Self {
        let mut bytes = [0u8; Self::LENGTH];
        bytes[Self::LENGTH - 1] = last;

        Self(bytes)
    }

    pub fn new(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; Self::LENGTH] {
        &self.0
    }

    /// Long form, `0x` followed by 64 hex digits.
    pub fn to_hex_literal(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Special addresses (`0x0`..=`0xf`) are rendered short, everything else
    /// in the long form.
    pub fn to_standard_string(&self) -> String {
        let is_special = self.0[..Self::LENGTH - 1].iter().all(|b| *b == 0)
            && self.0[Self::LENGTH - 1] < 0x10;

        if is_special {
            format!("0x{:x}", self.0[Self::LENGTH - 1])
        } else {
            self.to_hex_literal()
        }
    }
}

static ADDRESS_REGEX: Lazy<Regex> = lazy_regex!(r"^(?:0x)?(?P<hex>[0-9a-fA-F]{1,64})$");

impl FromStr for AccountAddress {
    type Err = anyhow::Error;

    /// Accepts `0x`-prefixed or bare hex with 1 to 64 digits. Short forms are
    /// left-padded with zeros, so `0x1` is the framework address.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(hex) = ADDRESS_REGEX
            .captures(s.trim())
            .map(|captures| captures["hex"].to_string())
        else {
            anyhow::bail!("Invalid account address '{s}'");
        };

        let padded = format!("{hex:0>64}");
        let mut bytes = [0u8; Self::LENGTH];

        hex::decode_to_slice(padded, &mut bytes)?;

        Ok(Self(bytes))
    }
}

impl std::fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex_literal())
    }
}

impl Serialize for AccountAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_hex_literal().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;

        value.parse().map_err(serde::de::Error::custom)
    }
}

// == MoveFunctionId ==

/// Fully qualified entry or view function, `0x1::coin::transfer`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MoveFunctionId {
    address: AccountAddress,
    module: String,
    name: String,
}

impl MoveFunctionId {
    pub fn new(address: AccountAddress, module: &str, name: &str) -> Self {
        Self {
            address,
            module: module.to_string(),
            name: name.to_string(),
        }
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Helper macro that creates a [MoveFunctionId] from a string literal, e.g.
/// `move_fn!("0x1::aptos_account::transfer")`. This DOES NOT perform a
/// compile-time check on the format and panics on invalid input.
#[macro_export]
macro_rules! move_fn {
    ($id:expr) => {{
        ($id as &'static str)
            .parse::<$crate::aptos::MoveFunctionId>()
            .unwrap()
    }};
}

static FUNCTION_REGEX: Lazy<Regex> = lazy_regex!(
    r"(?x)                                  # Enable verbose mode
    ^                                       # Start of string
    (?P<address>0x[0-9a-fA-F]{1,64})        # Module address
    ::                                      # '::' literal
    (?P<module>[A-Za-z_][A-Za-z0-9_]*)      # Module name
    ::                                      # '::' literal
    (?P<name>[A-Za-z_][A-Za-z0-9_]*)        # Function name
    $                                       # End of string
    "
);

impl FromStr for MoveFunctionId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((address, module, name)) = FUNCTION_REGEX.captures(s.trim()).map(|captures| {
            (
                captures["address"].to_string(),
                captures["module"].to_string(),
                captures["name"].to_string(),
            )
        }) else {
            anyhow::bail!("Invalid Move function identifier '{s}'");
        };

        Ok(Self {
            address: address.parse()?,
            module,
            name,
        })
    }
}

impl std::fmt::Display for MoveFunctionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}::{}::{}",
            self.address.to_standard_string(),
            self.module,
            self.name
        )
    }
}

impl Serialize for MoveFunctionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MoveFunctionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;

        value.parse().map_err(serde::de::Error::custom)
    }
}

// == MoveType ==

/// A Move type tag such as `0x1::aptos_coin::AptosCoin`, `u64` or
/// `0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>`. The textual form is
/// kept as given once validated.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MoveType(String);

static STRUCT_TAG_REGEX: Lazy<Regex> = lazy_regex!(
    r"(?x)
    ^
    (?P<address>0x[0-9a-fA-F]{1,64})
    ::
    (?P<module>[A-Za-z_][A-Za-z0-9_]*)
    ::
    (?P<name>[A-Za-z_][A-Za-z0-9_]*)
    (?:<(?P<generics>.+)>)?
    $
    "
);

const PRIMITIVE_TYPES: [&str; 9] = [
    "bool", "u8", "u16", "u32", "u64", "u128", "u256", "address", "signer",
];

impl MoveType {
    /// `0x1::aptos_coin::AptosCoin`
    pub fn aptos_coin() -> Self {
        Self("0x1::aptos_coin::AptosCoin".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is a struct tag (as opposed to a primitive or vector).
    pub fn is_struct(&self) -> bool {
        STRUCT_TAG_REGEX.is_match(&self.0)
    }

    /// Address that declares the struct, if this is a struct tag.
    pub fn struct_address(&self) -> Option<AccountAddress> {
        STRUCT_TAG_REGEX
            .captures(&self.0)
            .and_then(|captures| captures["address"].parse().ok())
    }

    fn validate(s: &str) -> anyhow::Result<()> {
        let s = s.trim();

        if PRIMITIVE_TYPES.contains(&s) {
            return Ok(());
        }

        if let Some(inner) = s.strip_prefix("vector<").and_then(|s| s.strip_suffix('>')) {
            return Self::validate(inner);
        }

        let Some(captures) = STRUCT_TAG_REGEX.captures(s) else {
            anyhow::bail!("Invalid Move type '{s}'");
        };

        if let Some(generics) = captures.name("generics") {
            for param in split_type_params(generics.as_str())? {
                Self::validate(param)?;
            }
        }

        Ok(())
    }
}

/// Split `A, B<C, D>, E` at the commas that are not nested inside `<>`.
fn split_type_params(s: &str) -> anyhow::Result<Vec<&str>> {
    let mut params = vec![];
    let mut depth = 0i32;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                params.push(&s[start..i]);
                start = i + 1;
            }
            _ => (),
        }

        if depth < 0 {
            anyhow::bail!("Unbalanced type parameters in '{s}'");
        }
    }

    if depth != 0 {
        anyhow::bail!("Unbalanced type parameters in '{s}'");
    }

    params.push(&s[start..]);

    Ok(params)
}

impl FromStr for MoveType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::validate(s)?;

        Ok(Self(s.trim().to_string()))
    }
}

impl std::fmt::Display for MoveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for MoveType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MoveType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;

        value.parse().map_err(serde::de::Error::custom)
    }
}

// == MoveValue ==

/// Entry and view function arguments in the JSON encoding the fullnode
/// expects. 64-bit and wider integers travel as strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveValue {
    Bool(bool),
    U8(u8),
    U64(u64),
    U128(u128),
    Address(AccountAddress),
    String(String),
    /// `vector<u8>`, sent as a `0x` prefixed hex string.
    Bytes(Vec<u8>),
    Vector(Vec<MoveValue>),
}

impl Serialize for MoveValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            MoveValue::Bool(value) => value.serialize(serializer),
            MoveValue::U8(value) => value.serialize(serializer),
            MoveValue::U64(value) => value.to_string().serialize(serializer),
            MoveValue::U128(value) => value.to_string().serialize(serializer),
            MoveValue::Address(value) => value.serialize(serializer),
            MoveValue::String(value) => value.serialize(serializer),
            MoveValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)).serialize(serializer),
            MoveValue::Vector(values) => values.serialize(serializer),
        }
    }
}

impl From<bool> for MoveValue {
    fn from(value: bool) -> Self {
        MoveValue::Bool(value)
    }
}

impl From<u64> for MoveValue {
    fn from(value: u64) -> Self {
        MoveValue::U64(value)
    }
}

impl From<u128> for MoveValue {
    fn from(value: u128) -> Self {
        MoveValue::U128(value)
    }
}

impl From<AccountAddress> for MoveValue {
    fn from(value: AccountAddress) -> Self {
        MoveValue::Address(value)
    }
}

impl From<&str> for MoveValue {
    fn from(value: &str) -> Self {
        MoveValue::String(value.to_string())
    }
}

impl From<String> for MoveValue {
    fn from(value: String) -> Self {
        MoveValue::String(value)
    }
}
