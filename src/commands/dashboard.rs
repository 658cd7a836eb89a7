//! The default interactive dashboard: weather, crypto and blog actions.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Local;
use log::info;

use crate::{
    catalog,
    console::Console,
    dispatcher::{Dispatcher, MenuAction, MenuItem, RunSummary},
    http::Transport,
    runtime::Runtime,
};

use super::config::API_KEY_VAR;
use super::format::rule;
use super::session::Session;
use super::{blog, crypto, save, weather};

const QUICK_CITY: &str = "delhi";
const QUICK_COIN: &str = "btc-bitcoin";
const TOP_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    Weather,
    CryptoPrice,
    TopCryptos,
    QuickDashboard,
    Compare,
    CreatePost,
    Save,
    OpenWeather,
}

#[async_trait(?Send)]
impl<T, R, C> MenuAction<Session<T, R, C>> for DashboardAction
where
    T: Transport + 'static,
    R: Runtime + 'static,
    C: Console + 'static,
{
    async fn run(&self, session: &mut Session<T, R, C>) -> Result<()> {
        match self {
            DashboardAction::Weather => {
                session.say(format!("Available cities: {}", catalog::city_names()))?;
                let city = session.ask("Enter city name: ")?;
                weather::show_weather(session, &city).await
            }
            DashboardAction::CryptoPrice => {
                session.say(format!("Available: {}", catalog::coin_names()))?;
                let coin = session.ask("Enter coin name: ")?;
                crypto::show_crypto(session, &coin).await
            }
            DashboardAction::TopCryptos => crypto::show_top(session, TOP_LIMIT).await,
            DashboardAction::QuickDashboard => {
                session.say("")?;
                session.say("Quick Dashboard: Delhi weather and Bitcoin price")?;
                weather::show_weather(session, QUICK_CITY).await?;
                crypto::show_crypto(session, QUICK_COIN).await
            }
            DashboardAction::Compare => {
                let input = session.ask("Enter coins separated by commas (e.g. bitcoin,ethereum,solana): ")?;
                crypto::compare(session, &crypto::parse_coin_list(&input)).await
            }
            DashboardAction::CreatePost => {
                let title = session.ask("Enter post title: ")?;
                let body = session.ask("Enter post body: ")?;
                blog::create_post(session, &title, &body).await
            }
            DashboardAction::Save => save::run(session).await,
            DashboardAction::OpenWeather => {
                let city = session.ask("Enter city name: ")?;
                weather::show_openweather(session, &city).await
            }
        }
    }
}

/// Menu entries in display order. Without an API key the OpenWeatherMap entry is
/// still listed, marked as disabled.
pub fn menu<T, R, C>(api_key_present: bool) -> Result<Dispatcher<Session<T, R, C>>>
where
    T: Transport + 'static,
    R: Runtime + 'static,
    C: Console + 'static,
{
    let openweather_label = if api_key_present {
        "OpenWeatherMap Weather".to_string()
    } else {
        "OpenWeatherMap Weather (disabled)".to_string()
    };

    let items = vec![
        MenuItem::action("1", "Check Weather", DashboardAction::Weather),
        MenuItem::action("2", "Check Crypto Price", DashboardAction::CryptoPrice),
        MenuItem::action("3", "View Top 5 Cryptos", DashboardAction::TopCryptos),
        MenuItem::action("4", "Quick Dashboard (Delhi + Bitcoin)", DashboardAction::QuickDashboard),
        MenuItem::action("5", "Compare Multiple Cryptos", DashboardAction::Compare),
        MenuItem::action("6", "Create a New Post", DashboardAction::CreatePost),
        MenuItem::action("7", "Save Results to JSON", DashboardAction::Save),
        MenuItem::action("8", openweather_label, DashboardAction::OpenWeather),
        MenuItem::exit("9", "Exit"),
    ];

    Ok(Dispatcher::new(items, "\nSelect (1-9): ")?
        .with_heading("Main Menu:")
        .with_farewell("Goodbye! Happy coding!"))
}

pub async fn run<T, R, C>(session: &mut Session<T, R, C>) -> Result<RunSummary>
where
    T: Transport + 'static,
    R: Runtime + 'static,
    C: Console + 'static,
{
    let api_key_present = session.api_key.is_some();

    session.say(rule(50))?;
    session.say("  API Dashboard")?;
    session.say(format!("  {}", Local::now().format("%Y-%m-%d %H:%M:%S")))?;
    session.say(rule(50))?;
    if !api_key_present {
        session.say(format!(
            "Note: {} is not set; OpenWeatherMap weather is unavailable.",
            API_KEY_VAR
        ))?;
    }

    let summary = menu(api_key_present)?.run(session).await?;
    info!("Dashboard finished: {:?}", summary);
    Ok(summary)
}
