//! "Save Results to JSON" sub-menu.

use anyhow::{Result, bail};
use std::path::PathBuf;

use crate::{console::Console, http::Transport, runtime::Runtime};

use super::crypto::fetch_ticker;
use super::session::Session;
use super::weather::fetch_weather;

pub const LAST_POST_FILE: &str = "last_post.json";

pub async fn run<T, R, C>(session: &mut Session<T, R, C>) -> Result<()>
where
    T: Transport,
    R: Runtime,
    C: Console,
{
    session.say("")?;
    session.say("Options to save data:")?;
    session.say("1. Crypto Data")?;
    session.say("2. Weather Data")?;
    session.say("3. Last POST Response")?;

    let choice = session.ask("Select (1-3): ")?;
    match choice.as_str() {
        "1" => {
            let coin = session.ask("Enter coin name: ")?;
            save_crypto(session, &coin).await?;
        }
        "2" => {
            let city = session.ask("Enter city name: ")?;
            save_weather(session, &city).await?;
        }
        "3" => {
            save_last_post(session)?;
        }
        other => bail!("Invalid save option '{}'", other),
    }
    Ok(())
}

pub async fn save_crypto<T, R, C>(session: &mut Session<T, R, C>, coin: &str) -> Result<Option<PathBuf>>
where
    T: Transport,
    R: Runtime,
    C: Console,
{
    let data = fetch_ticker(session, coin).await?;
    let filename = format!("{}_data.json", coin.trim().to_lowercase());
    session.save_json(&data, &filename)
}

pub async fn save_weather<T, R, C>(session: &mut Session<T, R, C>, city: &str) -> Result<Option<PathBuf>>
where
    T: Transport,
    R: Runtime,
    C: Console,
{
    let data = fetch_weather(session, city).await?;
    let filename = format!("{}_weather.json", city.trim().to_lowercase());
    session.save_json(&data, &filename)
}

/// Persists the last create response. Never touches the filesystem when there is none.
pub fn save_last_post<T, R, C>(session: &mut Session<T, R, C>) -> Result<Option<PathBuf>>
where
    T: Transport,
    R: Runtime,
    C: Console,
{
    let Some(post) = session.last_post.clone() else {
        session.say("No POST data available to save.")?;
        return Ok(None);
    };
    session.save_json(&post, LAST_POST_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::blog::create_post;
    use crate::runtime::MockRuntime;
    use crate::test_utils::{output_of, session_with};
    use mockito::Matcher;
    use serde_json::{Value, json};
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_save_last_post_without_create_writes_nothing() {
        // No expectations: any filesystem call panics.
        let mut session = session_with(MockRuntime::new(), "", "http://unused.test");

        assert_eq!(save_last_post(&mut session).unwrap(), None);
        assert!(output_of(&session).contains("No POST data available to save."));
    }

    #[tokio::test]
    async fn test_create_then_save_persists_exact_payload() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/posts")
            .with_status(201)
            .with_body(r#"{"title": "t", "body": "b", "id": 101}"#)
            .create_async()
            .await;

        let written: Arc<Mutex<Vec<u8>>> = Arc::default();
        let sink = written.clone();
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| true);
        runtime
            .expect_write()
            .withf(|path, _| path == Path::new("./last_post.json"))
            .times(1)
            .returning(move |_, contents| {
                sink.lock().unwrap().extend_from_slice(contents);
                Ok(())
            });

        let mut session = session_with(runtime, "", &server.url());
        create_post(&mut session, "t", "b").await.unwrap();
        let saved = save_last_post(&mut session).unwrap();

        assert_eq!(saved, Some(PathBuf::from("./last_post.json")));
        let on_disk: Value = serde_json::from_slice(&written.lock().unwrap()).unwrap();
        assert_eq!(on_disk, json!({"title": "t", "body": "b", "id": 101}));
    }

    #[tokio::test]
    async fn test_submenu_saves_crypto_under_coin_name() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/v1/tickers/btc-bitcoin")
            .with_status(200)
            .with_body(r#"{"id": "btc-bitcoin"}"#)
            .create_async()
            .await;

        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| true);
        runtime
            .expect_write()
            .withf(|path, _| path == Path::new("./bitcoin_data.json"))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut session = session_with(runtime, "1\nBitcoin\n", &server.url());
        run(&mut session).await.unwrap();

        let output = output_of(&session);
        assert!(output.contains("Options to save data:\n1. Crypto Data\n"));
        assert!(output.contains("Data successfully saved to './bitcoin_data.json'"));
    }

    #[tokio::test]
    async fn test_submenu_saves_weather_under_city_name() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/v1/forecast")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"current_weather": {"temperature": 20.0}}"#)
            .create_async()
            .await;

        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| true);
        runtime
            .expect_write()
            .withf(|path, _| path == Path::new("./tokyo_weather.json"))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut session = session_with(runtime, "2\nTokyo\n", &server.url());
        run(&mut session).await.unwrap();
    }

    #[tokio::test]
    async fn test_submenu_rejects_unknown_option() {
        let mut session = session_with(MockRuntime::new(), "4\n", "http://unused.test");
        let err = run(&mut session).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid save option '4'");
    }
}
