//! Interactive menu loop over an ordered list of `(key, label, action)` entries.

use anyhow::{Result, bail};
use async_trait::async_trait;
use log::{debug, warn};

use crate::console::Console;

/// State the dispatcher session runs in and hands to every action.
pub trait Interactive {
    fn console(&mut self) -> &mut dyn Console;
}

/// An operation selectable from a menu.
#[async_trait(?Send)]
pub trait MenuAction<S> {
    async fn run(&self, session: &mut S) -> Result<()>;
}

pub enum Entry<S> {
    Action(Box<dyn MenuAction<S>>),
    Exit,
}

pub struct MenuItem<S> {
    key: String,
    label: String,
    entry: Entry<S>,
}

impl<S> MenuItem<S> {
    pub fn action(
        key: impl Into<String>,
        label: impl Into<String>,
        action: impl MenuAction<S> + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            entry: Entry::Action(Box::new(action)),
        }
    }

    pub fn exit(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            entry: Entry::Exit,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Prompting,
    Dispatching,
    Exited,
}

impl DispatchState {
    pub fn can_transition_to(self, next: DispatchState) -> bool {
        matches!(
            (self, next),
            (DispatchState::Prompting, DispatchState::Dispatching)
                | (DispatchState::Dispatching, DispatchState::Prompting)
                | (DispatchState::Prompting, DispatchState::Exited)
        )
    }
}

/// Counters for one [`Dispatcher::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Prompts shown, including the one answered with the exit key.
    pub iterations: usize,
    /// Actions invoked.
    pub dispatched: usize,
    /// Actions that returned an error.
    pub failed: usize,
    /// Answers that matched no key.
    pub invalid: usize,
}

pub struct Dispatcher<S> {
    items: Vec<MenuItem<S>>,
    prompt: String,
    heading: String,
    farewell: Option<String>,
}

impl<S: Interactive> Dispatcher<S> {
    /// Builds a menu. Keys must be unique and at least one entry must exit.
    pub fn new(items: Vec<MenuItem<S>>, prompt: impl Into<String>) -> Result<Self> {
        for (i, item) in items.iter().enumerate() {
            if item.key.trim().is_empty() {
                bail!("Menu entry '{}' has an empty key", item.label);
            }
            if items[..i].iter().any(|other| other.key == item.key) {
                bail!("Duplicate menu key '{}'", item.key);
            }
        }
        if !items.iter().any(|item| matches!(item.entry, Entry::Exit)) {
            bail!("Menu has no exit entry");
        }

        Ok(Self {
            items,
            prompt: prompt.into(),
            heading: "Options:".to_string(),
            farewell: None,
        })
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = heading.into();
        self
    }

    /// Line printed when the exit entry is chosen.
    pub fn with_farewell(mut self, farewell: impl Into<String>) -> Self {
        self.farewell = Some(farewell.into());
        self
    }

    pub fn items(&self) -> &[MenuItem<S>] {
        &self.items
    }

    /// Runs the loop until the exit entry is chosen or input ends.
    ///
    /// Action errors are printed as a single line and the loop continues.
    /// Console errors are returned.
    pub async fn run(&self, session: &mut S) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let mut state = DispatchState::Prompting;

        while state != DispatchState::Exited {
            summary.iterations += 1;
            self.show_menu(session.console())?;

            let Some(choice) = session.console().prompt(&self.prompt)? else {
                debug!("Input closed, leaving menu");
                state = transition(state, DispatchState::Exited);
                continue;
            };

            let Some(item) = self.items.iter().find(|item| item.key == choice) else {
                summary.invalid += 1;
                session
                    .console()
                    .write_line(&format!("Invalid choice '{}'. Please try again.", choice))?;
                continue;
            };

            match &item.entry {
                Entry::Exit => {
                    if let Some(farewell) = &self.farewell {
                        session.console().write_line(farewell)?;
                    }
                    state = transition(state, DispatchState::Exited);
                }
                Entry::Action(action) => {
                    state = transition(state, DispatchState::Dispatching);
                    debug!("Dispatching '{}' ({})", item.key, item.label);
                    summary.dispatched += 1;

                    if let Err(e) = action.run(session).await {
                        warn!("Action '{}' failed: {:#}", item.label, e);
                        summary.failed += 1;
                        session.console().write_line(&one_line(&e))?;
                    }
                    state = transition(state, DispatchState::Prompting);
                }
            }
        }

        Ok(summary)
    }

    fn show_menu(&self, console: &mut dyn Console) -> Result<()> {
        console.write_line("")?;
        console.write_line(&self.heading)?;
        for item in &self.items {
            console.write_line(&format!("  {}. {}", item.key, item.label))?;
        }
        Ok(())
    }
}

fn transition(from: DispatchState, to: DispatchState) -> DispatchState {
    debug_assert!(from.can_transition_to(to), "{:?} -> {:?}", from, to);
    debug!("Dispatcher: {:?} -> {:?}", from, to);
    to
}

fn one_line(error: &anyhow::Error) -> String {
    let text = format!("Error: {:#}", error);
    text.lines().collect::<Vec<_>>().join(" ")
}
