use anyhow::Result;
use apidash::commands::{
    self,
    config::{
        DEFAULT_BLOG_URL, DEFAULT_CRYPTO_URL, DEFAULT_OPENWEATHER_URL, DEFAULT_WEATHER_URL,
        Endpoints, Settings,
    },
};
use clap::Parser;
use std::path::PathBuf;

/// apidash - interactive dashboard for public JSON APIs
///
/// Weather, cryptocurrency prices and a fake blog API behind a numbered menu.
/// Network failures are retried; HTTP errors and bad input are not.
///
/// If the OPENWEATHER_API_KEY environment variable is set, the OpenWeatherMap
/// weather action is enabled.
///
/// Examples:
///   apidash                          # Interactive dashboard
///   apidash query                    # User, post, todo and price lookups
///   apidash probe https://api.coinpaprika.com/v1/tickers/btc-bitcoin
#[derive(Parser, Debug)]
#[command(author, version = env!("APIDASH_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    options: GlobalArgs,
}

#[derive(clap::Subcommand, Debug, PartialEq)]
enum Commands {
    /// Interactive dashboard (default)
    Dashboard,

    /// Interactive query menu
    Query,

    /// Fetch each URL once through the retrying executor and print a preview
    Probe(ProbeArgs),
}

#[derive(clap::Args, Debug, PartialEq)]
pub struct ProbeArgs {
    /// URLs to fetch
    #[arg(value_name = "URL", required = true)]
    pub urls: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct GlobalArgs {
    /// Per-attempt request timeout in seconds
    #[arg(long, env = "APIDASH_TIMEOUT", value_name = "SECS", default_value_t = 10.0, global = true)]
    pub timeout: f64,

    /// Attempts per request, including the first one (1 disables retries)
    #[arg(
        long = "max-attempts",
        env = "APIDASH_MAX_ATTEMPTS",
        value_name = "N",
        default_value_t = 3,
        global = true
    )]
    pub max_attempts: usize,

    /// Delay between attempts in seconds
    #[arg(long, env = "APIDASH_BACKOFF", value_name = "SECS", default_value_t = 2.0, global = true)]
    pub backoff: f64,

    /// Directory saved JSON files are written to
    #[arg(
        long = "output-dir",
        short = 'o',
        env = "APIDASH_OUTPUT_DIR",
        value_name = "PATH",
        default_value = ".",
        global = true
    )]
    pub output_dir: PathBuf,

    /// Blog API base URL
    #[arg(long = "blog-url", value_name = "URL", default_value = DEFAULT_BLOG_URL, global = true)]
    pub blog_url: String,

    /// Open-Meteo forecast URL
    #[arg(long = "weather-url", value_name = "URL", default_value = DEFAULT_WEATHER_URL, global = true)]
    pub weather_url: String,

    /// CoinPaprika API base URL
    #[arg(long = "crypto-url", value_name = "URL", default_value = DEFAULT_CRYPTO_URL, global = true)]
    pub crypto_url: String,

    /// OpenWeatherMap current weather URL
    #[arg(
        long = "openweather-url",
        value_name = "URL",
        default_value = DEFAULT_OPENWEATHER_URL,
        global = true
    )]
    pub openweather_url: String,
}

impl GlobalArgs {
    fn settings(self) -> Result<Settings> {
        let endpoints = Endpoints {
            blog: self.blog_url,
            weather: self.weather_url,
            crypto: self.crypto_url,
            openweather: self.openweather_url,
        };
        Settings::new(self.timeout, self.max_attempts, self.backoff, self.output_dir, endpoints)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let settings = cli.options.settings()?;
    let runtime = apidash::runtime::RealRuntime;

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => {
            commands::dashboard(runtime, settings).await?;
        }
        Commands::Query => {
            commands::query(runtime, settings).await?;
        }
        Commands::Probe(args) => {
            commands::probe(runtime, settings, &args.urls).await?;
        }
    }
    Ok(())
}
