//! Fixed lookup tables: city coordinates, coin aliases and weather codes.

/// Cities with known coordinates as `(name, latitude, longitude)`.
pub const CITIES: &[(&str, f64, f64)] = &[
    ("delhi", 28.6139, 77.2090),
    ("mumbai", 19.0760, 72.8777),
    ("bangalore", 12.9716, 77.5946),
    ("chennai", 13.0827, 80.2707),
    ("kolkata", 22.5726, 88.3639),
    ("hyderabad", 17.3850, 78.4867),
    ("new york", 40.7128, -74.0060),
    ("london", 51.5074, -0.1278),
    ("tokyo", 35.6762, 139.6503),
    ("sydney", -33.8688, 151.2093),
    ("paris", 48.8566, 2.3522),
    ("berlin", 52.5200, 13.4050),
    ("dubai", 25.276987, 55.296249),
    ("singapore", 1.3521, 103.8198),
    ("toronto", 43.6532, -79.3832),
    ("san francisco", 37.7749, -122.4194),
    ("moscow", 55.7558, 37.6173),
    ("beijing", 39.9042, 116.4074),
    ("rio de janeiro", -22.9068, -43.1729),
    ("cape town", -33.9249, 18.4241),
];

/// Common coin names mapped to ticker ids.
pub const COIN_ALIASES: &[(&str, &str)] = &[
    ("bitcoin", "btc-bitcoin"),
    ("ethereum", "eth-ethereum"),
    ("dogecoin", "doge-dogecoin"),
    ("cardano", "ada-cardano"),
    ("solana", "sol-solana"),
    ("ripple", "xrp-xrp"),
];

const WEATHER_CODES: &[(i64, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Foggy"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (71, "Slight snow"),
    (73, "Moderate snow"),
    (75, "Heavy snow"),
    (95, "Thunderstorm"),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Case-insensitive city lookup; surrounding whitespace is ignored.
pub fn find_city(name: &str) -> Option<City> {
    let wanted = name.trim().to_lowercase();
    CITIES
        .iter()
        .find(|(city, _, _)| *city == wanted)
        .map(|&(name, latitude, longitude)| City {
            name,
            latitude,
            longitude,
        })
}

pub fn city_names() -> String {
    CITIES
        .iter()
        .map(|(name, _, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Maps a coin name to its ticker id. Unknown names are used as ticker ids verbatim.
pub fn resolve_coin(name: &str) -> String {
    let wanted = name.trim().to_lowercase();
    COIN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == wanted)
        .map(|(_, id)| id.to_string())
        .unwrap_or(wanted)
}

pub fn coin_names() -> String {
    COIN_ALIASES
        .iter()
        .map(|(alias, _)| *alias)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn weather_condition(code: i64) -> &'static str {
    WEATHER_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, text)| *text)
        .unwrap_or("Unknown")
}
