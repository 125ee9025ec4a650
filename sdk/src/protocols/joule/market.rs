use {
    crate::protocols::ProtocolError,
    reqwest::Client,
    serde::{Deserialize, Deserializer, Serialize},
};

pub const JOULE_MARKET_URL: &str = "https://price-api.joule.finance/api/market";

/// Market figures of one Joule pool, scaled to human amounts.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolDetails {
    pub asset_name: String,
    pub token_address: String,
    pub ltv: f64,
    pub decimals: f64,
    pub market_size: f64,
    pub total_borrowed: f64,
    pub deposit_apy: f64,
    pub extra_deposit_apy: f64,
    pub borrow_apy: f64,
    pub price: f64,
}

#[derive(Deserialize)]
struct MarketResponse {
    data: Option<Vec<PoolRecord>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PoolRecord {
    asset: PoolAsset,
    #[serde(default, deserialize_with = "lenient_f64")]
    ltv: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    market_size: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    total_borrowed: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    deposit_apy: f64,
    #[serde(default, rename = "extraAPY")]
    extra_apy: Option<ExtraApy>,
    #[serde(default, deserialize_with = "lenient_f64")]
    borrow_apy: f64,
    #[serde(default)]
    price_info: Option<PriceInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PoolAsset {
    #[serde(rename = "type")]
    asset_type: String,
    #[serde(default)]
    asset_name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    decimals: f64,
}

#[derive(Deserialize)]
struct ExtraApy {
    #[serde(default, rename = "depositAPY", deserialize_with = "lenient_f64")]
    deposit_apy: f64,
}

#[derive(Deserialize)]
struct PriceInfo {
    #[serde(default, deserialize_with = "lenient_f64")]
    price: f64,
}

/// The market API mixes numbers and numeric strings.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Number(n)) => Ok(n),
        Some(NumberOrString::String(s)) => s.trim().parse().map_err(serde::de::Error::custom),
        None => Ok(0.0),
    }
}

/// Divisor that turns raw pool amounts into human amounts. The API reports
/// either a decimal count (`8`) or the scale itself (`100000000`).
fn scale(decimals: f64) -> f64 {
    if decimals <= 0.0 {
        1.0
    } else if decimals <= 36.0 {
        10f64.powf(decimals)
    } else {
        decimals
    }
}

pub struct JouleMarketClientBuilder {
    client: Client,
    url: String,
}

impl Default for JouleMarketClientBuilder {
    fn default() -> Self {
        Self {
            client: Client::new(),
            url: JOULE_MARKET_URL.to_string(),
        }
    }
}

impl JouleMarketClientBuilder {
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn build(self) -> JouleMarketClient {
        JouleMarketClient {
            client: self.client,
            url: self.url,
        }
    }
}

/// Reads pool statistics from the Joule price API.
pub struct JouleMarketClient {
    client: Client,
    url: String,
}

impl Default for JouleMarketClient {
    fn default() -> Self {
        JouleMarketClientBuilder::default().build()
    }
}

impl JouleMarketClient {
    pub fn builder() -> JouleMarketClientBuilder {
        JouleMarketClientBuilder::default()
    }

    /// Details of the first pool whose asset type contains `token`.
    pub async fn pool_details(&self, token: &str) -> Result<PoolDetails, ProtocolError> {
        if token.trim().is_empty() {
            return Err(ProtocolError::InvalidInput(
                "Token must be provided".to_string(),
            ));
        }

        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(ProtocolError::MarketStatus(response.status().as_u16()));
        }

        let market = response.json::<MarketResponse>().await?;

        let pool = market
            .data
            .unwrap_or_default()
            .into_iter()
            .find(|pool| pool.asset.asset_type.contains(token))
            .ok_or_else(|| ProtocolError::PoolNotFound(token.to_string()))?;

        let scale = scale(pool.asset.decimals);

        Ok(PoolDetails {
            asset_name: pool.asset.asset_name,
            token_address: token.to_string(),
            ltv: pool.ltv,
            decimals: pool.asset.decimals,
            market_size: pool.market_size / scale,
            total_borrowed: pool.total_borrowed / scale,
            deposit_apy: pool.deposit_apy,
            extra_deposit_apy: pool.extra_apy.map(|e| e.deposit_apy).unwrap_or_default(),
            borrow_apy: pool.borrow_apy,
            price: pool.price_info.map(|p| p.price).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_accepts_count_or_divisor() {
        assert_eq!(scale(8.0), 100_000_000.0);
        assert_eq!(scale(100_000_000.0), 100_000_000.0);
        assert_eq!(scale(0.0), 1.0);
    }

    #[test]
    fn test_pool_record_accepts_strings_and_numbers() {
        let record: PoolRecord = serde_json::from_value(serde_json::json!({
            "asset": { "type": "0x1::aptos_coin::AptosCoin", "assetName": "APT", "decimals": 8 },
            "ltv": "0.7",
            "marketSize": 250000000,
            "totalBorrowed": "100000000",
            "depositApy": 3.2,
            "extraAPY": { "depositAPY": "1.1" },
            "borrowApy": null,
            "priceInfo": { "price": 5.25 }
        }))
        .unwrap();

        assert_eq!(record.ltv, 0.7);
        assert_eq!(record.market_size, 250_000_000.0);
        assert_eq!(record.total_borrowed, 100_000_000.0);
        assert_eq!(record.borrow_apy, 0.0);
        assert_eq!(record.extra_apy.unwrap().deposit_apy, 1.1);
    }
}
