//! GraphQL documents.
//!
//! Each document carries only the fragments it spreads.

macro_rules! pool_fragments {
    () => {
        r#"
fragment TokenFields on Token {
  id
  symbol
  name
  decimals
}

fragment PoolFields on Pool {
  id
  tick
  token0 { ...TokenFields }
  token1 { ...TokenFields }
  token0Price
  token1Price
}
"#
    };
}

macro_rules! event_fragments {
    () => {
        concat!(
            r#"
fragment ModifyLiquidityFields on ModifyLiquidity {
  id
  amount
  amount0
  amount1
  amountUSD
  origin
  timestamp
  tickLower
  tickUpper
  logIndex
  transaction { id }
  pool { ...PoolFields }
}
"#,
            pool_fragments!()
        )
    };
}

pub(crate) const USER_POOL_EVENTS: &str = concat!(
    r#"
query UserPoolEvents($origin: Bytes!, $pool: String!, $before: BigInt!, $first: Int!) {
  modifyLiquidities(
    where: { origin: $origin, pool: $pool, timestamp_lte: $before }
    orderBy: timestamp
    orderDirection: desc
    first: $first
  ) {
    ...ModifyLiquidityFields
  }
}
"#,
    event_fragments!()
);

pub(crate) const USER_EVENTS: &str = concat!(
    r#"
query UserEvents($origin: Bytes!, $before: BigInt!, $first: Int!) {
  modifyLiquidities(
    where: { origin: $origin, timestamp_lte: $before }
    orderBy: timestamp
    orderDirection: desc
    first: $first
  ) {
    ...ModifyLiquidityFields
  }
}
"#,
    event_fragments!()
);

pub(crate) const POOL: &str = concat!(
    r#"
query Pool($id: ID!) {
  pool(id: $id) {
    ...PoolFields
  }
}
"#,
    pool_fragments!()
);
