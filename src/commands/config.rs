use anyhow::{Result, bail};
use log::debug;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

use crate::{
    console::Console,
    http::{DEFAULT_TIMEOUT_SECS, HttpTransport, RequestExecutor, RetryPolicy, Transport},
    runtime::Runtime,
};

use super::session::Session;

/// Environment variable holding the OpenWeatherMap API key.
pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_BLOG_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_CRYPTO_URL: &str = "https://api.coinpaprika.com/v1";
pub const DEFAULT_OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Base URLs of the remote APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub blog: String,
    pub weather: String,
    pub crypto: String,
    pub openweather: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            blog: DEFAULT_BLOG_URL.to_string(),
            weather: DEFAULT_WEATHER_URL.to_string(),
            crypto: DEFAULT_CRYPTO_URL.to_string(),
            openweather: DEFAULT_OPENWEATHER_URL.to_string(),
        }
    }
}

impl Endpoints {
    pub fn user(&self, id: u32) -> String {
        format!("{}/users/{}", trim_base(&self.blog), id)
    }

    pub fn posts(&self) -> String {
        format!("{}/posts", trim_base(&self.blog))
    }

    pub fn todos(&self) -> String {
        format!("{}/todos", trim_base(&self.blog))
    }

    pub fn ticker(&self, coin_id: &str) -> String {
        format!("{}/tickers/{}", trim_base(&self.crypto), coin_id)
    }

    pub fn tickers(&self) -> String {
        format!("{}/tickers", trim_base(&self.crypto))
    }
}

fn trim_base(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// Validated command-line settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub output_dir: PathBuf,
    pub endpoints: Endpoints,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
            output_dir: PathBuf::from("."),
            endpoints: Endpoints::default(),
        }
    }
}

impl Settings {
    pub fn new(
        timeout_secs: f64,
        max_attempts: usize,
        backoff_secs: f64,
        output_dir: PathBuf,
        endpoints: Endpoints,
    ) -> Result<Self> {
        let timeout = match Duration::try_from_secs_f64(timeout_secs) {
            Ok(timeout) if !timeout.is_zero() => timeout,
            _ => bail!("Timeout must be a positive number of seconds (got {})", timeout_secs),
        };
        let retry = RetryPolicy::from_secs_f64(max_attempts, backoff_secs)?;
        Ok(Self {
            timeout,
            retry,
            output_dir,
            endpoints,
        })
    }
}

pub struct Config<R: Runtime, T: Transport> {
    pub runtime: R,
    pub executor: RequestExecutor<T>,
    pub endpoints: Endpoints,
    pub output_dir: PathBuf,
    pub api_key: Option<String>,
}

impl<R: Runtime> Config<R, HttpTransport> {
    pub fn new(runtime: R, settings: Settings) -> Result<Self> {
        let client = Client::builder().user_agent("apidash-cli").build()?;
        let transport = HttpTransport::new(client);
        Ok(Self::with_transport(runtime, transport, settings))
    }
}

impl<R: Runtime, T: Transport> Config<R, T> {
    /// Reads the API key once and assembles the executor around `transport`.
    pub fn with_transport(runtime: R, transport: T, settings: Settings) -> Self {
        let api_key = match runtime.env_var(API_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => {
                debug!("Using {} for OpenWeatherMap requests", API_KEY_VAR);
                Some(key.trim().to_string())
            }
            _ => {
                debug!("{} is not set", API_KEY_VAR);
                None
            }
        };

        Self {
            runtime,
            executor: RequestExecutor::new(transport, settings.retry, settings.timeout),
            endpoints: settings.endpoints,
            output_dir: settings.output_dir,
            api_key,
        }
    }

    pub fn into_session<C: Console>(self, console: C) -> Session<T, R, C> {
        Session {
            executor: self.executor,
            runtime: self.runtime,
            console,
            endpoints: self.endpoints,
            output_dir: self.output_dir,
            api_key: self.api_key,
            last_post: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;
    use mockito::Server;

    fn runtime_with_key(key: Option<&'static str>) -> MockRuntime {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq(API_KEY_VAR))
            .times(1)
            .returning(move |_| key.map(str::to_string).ok_or(std::env::VarError::NotPresent));
        runtime
    }

    #[test]
    fn test_config_reads_api_key() {
        let config = Config::new(runtime_with_key(Some("abc123")), Settings::default()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_config_without_api_key() {
        let config = Config::new(runtime_with_key(None), Settings::default()).unwrap();
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_config_blank_api_key_is_absent() {
        let config = Config::new(runtime_with_key(Some("   ")), Settings::default()).unwrap();
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_settings_validation() {
        let ok = Settings::new(5.0, 2, 0.5, PathBuf::from("out"), Endpoints::default()).unwrap();
        assert_eq!(ok.timeout, Duration::from_secs(5));
        assert_eq!(ok.retry.max_attempts(), 2);
        assert_eq!(ok.retry.backoff(), Duration::from_millis(500));

        assert!(Settings::new(0.0, 3, 2.0, PathBuf::from("."), Endpoints::default()).is_err());
        assert!(Settings::new(10.0, 0, 2.0, PathBuf::from("."), Endpoints::default()).is_err());
        assert!(Settings::new(10.0, 3, -2.0, PathBuf::from("."), Endpoints::default()).is_err());
        assert!(Settings::new(1e20, 3, 2.0, PathBuf::from("."), Endpoints::default()).is_err());
        assert!(Settings::new(1e-12, 3, 2.0, PathBuf::from("."), Endpoints::default()).is_err());
        assert!(Settings::new(f64::NAN, 3, 2.0, PathBuf::from("."), Endpoints::default()).is_err());
        assert!(Settings::new(10.0, 3, 1e20, PathBuf::from("."), Endpoints::default()).is_err());
    }

    #[test]
    fn test_endpoint_urls() {
        let endpoints = Endpoints {
            blog: "http://blog.test/".to_string(),
            crypto: "http://crypto.test".to_string(),
            ..Endpoints::default()
        };
        assert_eq!(endpoints.user(3), "http://blog.test/users/3");
        assert_eq!(endpoints.posts(), "http://blog.test/posts");
        assert_eq!(endpoints.todos(), "http://blog.test/todos");
        assert_eq!(endpoints.ticker("btc-bitcoin"), "http://crypto.test/tickers/btc-bitcoin");
        assert_eq!(endpoints.tickers(), "http://crypto.test/tickers");
    }

    #[tokio::test]
    async fn test_config_client_sends_user_agent() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("user-agent", "apidash-cli")
            .with_body("{}")
            .create_async()
            .await;

        let config = Config::new(runtime_with_key(None), Settings::default()).unwrap();
        let outcome = config.executor.get(&server.url(), &[]).await;

        mock.assert_async().await;
        assert!(outcome.is_success());
    }
}
