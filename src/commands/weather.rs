//! Weather lookups: Open-Meteo by city table, OpenWeatherMap by city name.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;

use crate::{catalog, console::Console, http::Transport, runtime::Runtime};

use super::config::API_KEY_VAR;
use super::format::{rule, title_case};
use super::session::Session;

#[derive(Debug, Deserialize)]
struct Forecast {
    current_weather: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
    winddirection: f64,
    #[serde(default)]
    weathercode: i64,
}

#[derive(Debug, Default, Deserialize)]
struct OpenWeatherReport {
    #[serde(default)]
    main: OpenWeatherMain,
    #[serde(default)]
    wind: OpenWeatherWind,
    #[serde(default)]
    weather: Vec<OpenWeatherCondition>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenWeatherMain {
    temp: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenWeatherWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    description: String,
}

fn or_na(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
}

/// Fetches the raw Open-Meteo forecast for a city from the city table.
pub async fn fetch_weather<T, R, C>(session: &mut Session<T, R, C>, city_name: &str) -> Result<Value>
where
    T: Transport,
    R: Runtime,
    C: Console,
{
    let Some(city) = catalog::find_city(city_name) else {
        session.say(format!("Available cities: {}", catalog::city_names()))?;
        bail!("City '{}' not found", city_name.trim());
    };

    let query = [
        ("latitude", city.latitude.to_string()),
        ("longitude", city.longitude.to_string()),
        ("current_weather", "true".to_string()),
        ("hourly", "temperature_2m,relative_humidity_2m".to_string()),
        ("timezone", "auto".to_string()),
    ];
    let url = session.endpoints.weather.clone();
    session
        .fetch(&url, &query)
        .await
        .with_context(|| format!("Error fetching weather for {}", title_case(city.name)))
}

pub async fn show_weather<T, R, C>(session: &mut Session<T, R, C>, city_name: &str) -> Result<()>
where
    T: Transport,
    R: Runtime,
    C: Console,
{
    let payload = fetch_weather(session, city_name).await?;
    let forecast: Forecast =
        serde_json::from_value(payload).context("Unexpected weather response format")?;
    let current = forecast.current_weather;

    session.say("")?;
    session.say(rule(40))?;
    session.say(format!("  Weather in {}", title_case(city_name)))?;
    session.say(rule(40))?;
    session.say(format!("  Temperature: {}°C", current.temperature))?;
    session.say(format!("  Wind Speed: {} km/h", current.windspeed))?;
    session.say(format!("  Wind Direction: {}°", current.winddirection))?;
    session.say(format!(
        "  Condition: {}",
        catalog::weather_condition(current.weathercode)
    ))?;
    session.say(rule(40))
}

/// Fetches the raw OpenWeatherMap report. Needs the API key.
pub async fn fetch_openweather<T, R, C>(session: &mut Session<T, R, C>, city_name: &str) -> Result<Value>
where
    T: Transport,
    R: Runtime,
    C: Console,
{
    let Some(api_key) = session.api_key.clone() else {
        bail!("No API key provided. Set {} environment variable.", API_KEY_VAR);
    };
    let city = city_name.trim();
    if city.is_empty() {
        bail!("Please enter a city name.");
    }

    let query = [
        ("q", city.to_string()),
        ("appid", api_key),
        ("units", "metric".to_string()),
    ];
    let url = session.endpoints.openweather.clone();
    session
        .fetch(&url, &query)
        .await
        .context("Error fetching OpenWeatherMap data")
}

pub async fn show_openweather<T, R, C>(session: &mut Session<T, R, C>, city_name: &str) -> Result<()>
where
    T: Transport,
    R: Runtime,
    C: Console,
{
    let payload = fetch_openweather(session, city_name).await?;
    let report: OpenWeatherReport =
        serde_json::from_value(payload).context("Unexpected OpenWeatherMap response format")?;
    let condition = report
        .weather
        .first()
        .map(|w| title_case(&w.description))
        .unwrap_or_else(|| "Unknown".to_string());

    session.say("")?;
    session.say(rule(40))?;
    session.say(format!(
        "  OpenWeatherMap Weather in {}",
        title_case(city_name)
    ))?;
    session.say(rule(40))?;
    session.say(format!("  Temperature: {}°C", or_na(report.main.temp)))?;
    session.say(format!("  Humidity: {}%", or_na(report.main.humidity)))?;
    session.say(format!("  Wind Speed: {} m/s", or_na(report.wind.speed)))?;
    session.say(format!("  Condition: {}", condition))?;
    session.say(rule(40))
}
