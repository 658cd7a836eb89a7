//! Cryptocurrency tickers: single coin, top N and side-by-side comparison.

use anyhow::{Context, Result, anyhow, bail};
use log::warn;
use serde::Deserialize;
use serde_json::Value;

use crate::{catalog, console::Console, http::Transport, runtime::Runtime};

use super::format::{dollars, percent, rule};
use super::session::Session;

#[derive(Debug, Deserialize)]
pub struct Ticker {
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub rank: Option<u32>,
    pub quotes: Quotes,
}

#[derive(Debug, Deserialize)]
pub struct Quotes {
    #[serde(rename = "USD")]
    pub usd: UsdQuote,
}

#[derive(Debug, Deserialize)]
pub struct UsdQuote {
    pub price: f64,
    pub percent_change_24h: f64,
    pub market_cap: Option<f64>,
    pub volume_24h: Option<f64>,
    pub percent_change_1h: Option<f64>,
    pub percent_change_7d: Option<f64>,
}

/// Checks that a ticker payload carries the USD fields every view needs.
pub fn validate_ticker(data: &Value) -> Result<(), String> {
    if !data.is_object() {
        return Err("Invalid response format".to_string());
    }
    let Some(usd) = data.get("quotes").and_then(|q| q.get("USD")) else {
        return Err("Missing quotes/USD data".to_string());
    };
    for field in ["price", "percent_change_24h"] {
        if usd.get(field).is_none() {
            return Err(format!("Missing field '{}' in USD data", field));
        }
    }
    Ok(())
}

/// Validates and decodes a ticker payload.
pub fn parse_ticker(data: Value) -> Result<Ticker> {
    validate_ticker(&data).map_err(|e| anyhow!("Invalid crypto data: {}", e))?;
    serde_json::from_value(data).context("Invalid crypto data")
}

/// Fetches the raw ticker for a coin name or ticker id.
pub async fn fetch_ticker<T, R, C>(session: &mut Session<T, R, C>, coin: &str) -> Result<Value>
where
    T: Transport,
    R: Runtime,
    C: Console,
{
    let coin = coin.trim();
    if coin.is_empty() {
        bail!("Please enter a coin name.");
    }
    let coin_id = catalog::resolve_coin(coin);
    let url = session.endpoints.ticker(&coin_id);
    session
        .fetch(&url, &[])
        .await
        .with_context(|| format!("Error fetching crypto data for '{}'", coin_id))
}

async fn ticker_or_hint<T, R, C>(session: &mut Session<T, R, C>, coin: &str, hint: &str) -> Result<Ticker>
where
    T: Transport,
    R: Runtime,
    C: Console,
{
    match fetch_ticker(session, coin).await {
        Ok(payload) => parse_ticker(payload),
        Err(e) => {
            session.say(hint)?;
            Err(e)
        }
    }
}

/// Detailed view with market cap, volume and 1h/24h/7d changes.
pub async fn show_crypto<T, R, C>(session: &mut Session<T, R, C>, coin: &str) -> Result<()>
where
    T: Transport,
    R: Runtime,
    C: Console,
{
    let hint = format!("Available: {}", catalog::coin_names());
    let ticker = ticker_or_hint(session, coin, &hint).await?;
    let usd = &ticker.quotes.usd;

    session.say("")?;
    session.say(rule(40))?;
    session.say(format!("  {} ({})", ticker.name, ticker.symbol))?;
    session.say(rule(40))?;
    session.say(format!("  Price: {}", dollars(Some(usd.price), 2)))?;
    session.say(format!("  Market Cap: {}", dollars(usd.market_cap, 0)))?;
    session.say(format!("  24h Volume: {}", dollars(usd.volume_24h, 0)))?;
    session.say("  ")?;
    session.say(format!("  1h Change:  {}", percent(usd.percent_change_1h)))?;
    session.say(format!(
        "  24h Change: {}",
        percent(Some(usd.percent_change_24h))
    ))?;
    session.say(format!("  7d Change:  {}", percent(usd.percent_change_7d)))?;
    session.say(rule(40))
}

/// Short view: price and 24h change.
pub async fn show_price<T, R, C>(session: &mut Session<T, R, C>, coin: &str) -> Result<()>
where
    T: Transport,
    R: Runtime,
    C: Console,
{
    let ticker = ticker_or_hint(
        session,
        coin,
        "Tip: Try 'btc-bitcoin', 'eth-ethereum' or 'doge-dogecoin'",
    )
    .await?;
    let usd = &ticker.quotes.usd;

    session.say("")?;
    session.say(format!("--- {} ({}) ---", ticker.name, ticker.symbol))?;
    session.say(format!("Price: {}", dollars(Some(usd.price), 2)))?;
    session.say(format!(
        "24h Change: {}",
        percent(Some(usd.percent_change_24h))
    ))
}

/// Top `limit` coins by market cap.
pub async fn show_top<T, R, C>(session: &mut Session<T, R, C>, limit: usize) -> Result<()>
where
    T: Transport,
    R: Runtime,
    C: Console,
{
    let url = session.endpoints.tickers();
    let payload = session
        .fetch(&url, &[("limit", limit.to_string())])
        .await
        .context("Error fetching top cryptocurrencies")?;
    let tickers: Vec<Ticker> =
        serde_json::from_value(payload).context("Unexpected tickers response format")?;

    session.say("")?;
    session.say(rule(55))?;
    session.say(format!("  Top {} Cryptocurrencies by Market Cap", limit))?;
    session.say(rule(55))?;
    session.say(format!("  {:<6}{:<15}{:<15}{}", "Rank", "Name", "Price", "24h Change"))?;
    session.say(format!("  {}", "-".repeat(50)))?;
    for ticker in tickers.iter().take(limit) {
        let rank = ticker
            .rank
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        session.say(format!(
            "  {:<6}{:<15}{:>13}  {}",
            rank,
            ticker.name,
            dollars(Some(ticker.quotes.usd.price), 2),
            percent(Some(ticker.quotes.usd.percent_change_24h))
        ))?;
    }
    session.say(rule(55))
}

/// Comparison table. A coin that cannot be fetched shows `N/A`, a malformed one `Error`.
pub async fn compare<T, R, C>(session: &mut Session<T, R, C>, coins: &[String]) -> Result<()>
where
    T: Transport,
    R: Runtime,
    C: Console,
{
    if coins.is_empty() {
        bail!("No valid coins entered.");
    }

    session.say("")?;
    session.say(rule(55))?;
    session.say("   Crypto Price Comparison")?;
    session.say(rule(55))?;
    session.say(format!("{:<15}{:>15}{:>15}", "Coin", "Price USD", "24h Change"))?;
    session.say("-".repeat(55))?;

    for coin in coins {
        let row = match fetch_ticker(session, coin).await {
            Err(e) => {
                warn!("Comparison skipped {}: {:#}", coin, e);
                format!("{:<15}{:>15}{:>15}", coin, "N/A", "N/A")
            }
            Ok(payload) => match parse_ticker(payload) {
                Ok(ticker) => format!(
                    "{:<15}{:>15}{:>15}",
                    ticker.symbol,
                    dollars(Some(ticker.quotes.usd.price), 2),
                    percent(Some(ticker.quotes.usd.percent_change_24h))
                ),
                Err(_) => format!("{:<15}{:>15}{:>15}", coin, "Error", "Error"),
            },
        };
        session.say(row)?;
    }

    session.say(rule(55))
}

/// Splits "bitcoin, ethereum,,solana" into trimmed, non-empty names.
pub fn parse_coin_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
