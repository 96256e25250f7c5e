//! Wire types for the subgraph schema.
//!
//! The subgraph encodes BigInt and BigDecimal fields as strings. They are kept
//! as strings here and parsed on conversion into domain entities.

use super::error::SubgraphError;
use lp_metrics_domain::entities::{LiquidityEvent, PoolSnapshot, Token};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
pub struct TokenDto {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub decimals: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolDto {
    pub id: String,
    pub tick: Option<String>,
    pub token0: TokenDto,
    pub token1: TokenDto,
    pub token0_price: String,
    pub token1_price: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionDto {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyLiquidityDto {
    pub id: String,
    pub amount: String,
    pub amount0: String,
    pub amount1: String,
    #[serde(rename = "amountUSD")]
    pub amount_usd: Option<String>,
    pub origin: String,
    pub timestamp: String,
    pub tick_lower: String,
    pub tick_upper: String,
    pub log_index: Option<String>,
    pub transaction: Option<TransactionDto>,
    pub pool: PoolDto,
}

/// Parses a BigDecimal field, accepting plain and scientific notation.
///
/// Numbers outside the decimal range saturate to [`Decimal::MAX`] or
/// [`Decimal::MIN`], and magnitudes too small to represent become zero.
fn parse_decimal(field: &'static str, raw: &str) -> Result<Decimal, SubgraphError> {
    let trimmed = raw.trim();
    if let Ok(value) = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
        return Ok(value);
    }

    let invalid = || SubgraphError::InvalidField {
        field,
        value: raw.to_string(),
    };
    let approx: f64 = trimmed.parse().map_err(|_| invalid())?;
    if !approx.is_finite() {
        return Err(invalid());
    }

    let saturated = if approx.abs() < 1.0 {
        Decimal::ZERO
    } else if approx.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    };
    warn!(field, value = raw, saturated = %saturated, "Value outside decimal range");
    Ok(saturated)
}

fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T, SubgraphError> {
    raw.trim().parse().map_err(|_| SubgraphError::InvalidField {
        field,
        value: raw.to_string(),
    })
}

impl TryFrom<TokenDto> for Token {
    type Error = SubgraphError;

    fn try_from(dto: TokenDto) -> Result<Self, Self::Error> {
        let decimals = parse_number("token.decimals", &dto.decimals)?;
        Ok(Token::new(dto.id, dto.symbol, dto.name, decimals))
    }
}

impl TryFrom<PoolDto> for PoolSnapshot {
    type Error = SubgraphError;

    fn try_from(dto: PoolDto) -> Result<Self, Self::Error> {
        let tick = dto.tick.as_deref().ok_or(SubgraphError::MissingField("pool.tick"))?;
        let tick = parse_number("pool.tick", tick)?;
        let token0_price = parse_decimal("pool.token0Price", &dto.token0_price)?;
        let token1_price = parse_decimal("pool.token1Price", &dto.token1_price)?;

        Ok(
            PoolSnapshot::new(dto.id, dto.token0.try_into()?, dto.token1.try_into()?)
                .with_tick(tick)
                .with_prices(token0_price, token1_price),
        )
    }
}

impl TryFrom<ModifyLiquidityDto> for LiquidityEvent {
    type Error = SubgraphError;

    fn try_from(dto: ModifyLiquidityDto) -> Result<Self, Self::Error> {
        let amount_usd = match dto.amount_usd.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_decimal("amountUSD", raw)?),
        };
        let log_index = dto
            .log_index
            .as_deref()
            .map(|raw| parse_number("logIndex", raw))
            .transpose()?;

        Ok(LiquidityEvent {
            liquidity_delta: parse_number("amount", &dto.amount)?,
            amount0: parse_decimal("amount0", &dto.amount0)?,
            amount1: parse_decimal("amount1", &dto.amount1)?,
            amount_usd,
            timestamp: parse_number("timestamp", &dto.timestamp)?,
            tick_lower: parse_number("tickLower", &dto.tick_lower)?,
            tick_upper: parse_number("tickUpper", &dto.tick_upper)?,
            log_index,
            transaction_hash: dto.transaction.map(|tx| tx.id),
            origin: dto.origin,
            pool: dto.pool.try_into()?,
            id: dto.id,
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::json;

    pub fn event_json(id: &str, amount: &str, amount_usd: Option<&str>) -> serde_json::Value {
        json!({
            "id": id,
            "amount": amount,
            "amount0": "1.5",
            "amount1": "-2500.25",
            "amountUSD": amount_usd,
            "origin": "0x14da5eef615205f7d3ddf80f8a0752f7f7dfe4f6",
            "timestamp": "1735689600",
            "tickLower": "-887220",
            "tickUpper": "887220",
            "logIndex": "12",
            "transaction": { "id": "0xabc" },
            "pool": {
                "id": "0xpool",
                "tick": "-195000",
                "token0": { "id": "0x0", "symbol": "ETH", "name": "Ether", "decimals": "18" },
                "token1": { "id": "0x1", "symbol": "USDC", "name": "USD Coin", "decimals": "6" },
                "token0Price": "3400.12",
                "token1Price": "0.000294107"
            }
        })
    }
}
