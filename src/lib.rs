pub mod catalog;
pub mod commands;
pub mod console;
pub mod dispatcher;
pub mod http;
pub mod runtime;

/// Test helpers for sessions wired to in-memory consoles and local mock servers.
#[cfg(test)]
pub mod test_utils {
    use crate::commands::config::Endpoints;
    use crate::commands::session::Session;
    use crate::console::LineConsole;
    use crate::http::{HttpTransport, RequestExecutor, RetryPolicy};
    use crate::runtime::MockRuntime;
    use std::io::Cursor;
    use std::net::TcpListener;
    use std::path::PathBuf;
    use std::time::Duration;

    pub type TestConsole = LineConsole<Cursor<Vec<u8>>, Vec<u8>>;

    /// URL of a local port nothing listens on; connecting to it fails fast.
    pub fn unreachable_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    /// Session whose endpoints all live under `base_url`, reading answers from `input`.
    /// - blog: `{base_url}`
    /// - weather: `{base_url}/v1/forecast`
    /// - crypto: `{base_url}/v1`
    /// - openweather: `{base_url}/data/2.5/weather`
    ///
    /// Single attempt, no API key, output directory `.`.
    pub fn session_with(
        runtime: MockRuntime,
        input: &str,
        base_url: &str,
    ) -> Session<HttpTransport, MockRuntime, TestConsole> {
        let endpoints = Endpoints {
            blog: base_url.to_string(),
            weather: format!("{}/v1/forecast", base_url),
            crypto: format!("{}/v1", base_url),
            openweather: format!("{}/data/2.5/weather", base_url),
        };
        Session {
            executor: RequestExecutor::new(
                HttpTransport::new(reqwest::Client::new()),
                RetryPolicy::once(),
                Duration::from_secs(5),
            ),
            runtime,
            console: LineConsole::new(Cursor::new(input.as_bytes().to_vec()), Vec::new()),
            endpoints,
            output_dir: PathBuf::from("."),
            api_key: None,
            last_post: None,
        }
    }

    /// Everything written to the session console so far.
    pub fn output_of(session: &Session<HttpTransport, MockRuntime, TestConsole>) -> String {
        String::from_utf8(session.console.output().clone()).unwrap()
    }
}
