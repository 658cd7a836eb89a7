//! State shared by the menu actions of one interactive run.

use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::Value;
use std::path::PathBuf;

use crate::{
    console::Console,
    dispatcher::Interactive,
    http::{RequestExecutor, Transport},
    runtime::Runtime,
};

use super::config::Endpoints;
use super::format::safe_file_name;

pub struct Session<T: Transport, R: Runtime, C: Console> {
    pub executor: RequestExecutor<T>,
    pub runtime: R,
    pub console: C,
    pub endpoints: Endpoints,
    pub output_dir: PathBuf,
    pub api_key: Option<String>,
    /// Response of the last successful create; absent until one succeeds.
    pub last_post: Option<Value>,
}

impl<T: Transport, R: Runtime, C: Console> Interactive for Session<T, R, C> {
    fn console(&mut self) -> &mut dyn Console {
        &mut self.console
    }
}

impl<T: Transport, R: Runtime, C: Console> Session<T, R, C> {
    pub fn say(&mut self, line: impl AsRef<str>) -> Result<()> {
        self.console.write_line(line.as_ref())
    }

    /// Prompts for one answer; end of input reads as an empty answer.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        Ok(self.console.prompt(prompt)?.unwrap_or_default())
    }

    /// GET through the executor, turning a failed outcome into an error.
    pub async fn fetch(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        let query: Vec<(String, String)> = query
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect();
        let payload = self.executor.get(url, &query).await.into_result()?;
        Ok(payload)
    }

    /// Writes `data` as pretty JSON into the output directory.
    ///
    /// Write failures are reported on the console and do not fail the action.
    #[tracing::instrument(skip(self, data))]
    pub fn save_json(&mut self, data: &Value, filename: &str) -> Result<Option<PathBuf>> {
        if is_empty(data) {
            self.say("No data to save.")?;
            return Ok(None);
        }

        let path = self.output_dir.join(safe_file_name(filename));
        debug!("Saving JSON to {:?}", path);

        match self.write_json(data, &path) {
            Ok(()) => {
                info!("Saved {:?}", path);
                self.say(format!("Data successfully saved to '{}'", path.display()))?;
                Ok(Some(path))
            }
            Err(e) => {
                self.say(format!("Failed to save data: {:#}", e))?;
                Ok(None)
            }
        }
    }

    fn write_json(&self, data: &Value, path: &std::path::Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(data).context("Failed to serialize data")?;
        if !self.runtime.exists(&self.output_dir) {
            self.runtime.create_dir_all(&self.output_dir)?;
        }
        self.runtime.write(path, contents.as_bytes())
    }
}

fn is_empty(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
