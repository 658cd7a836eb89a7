//! Read-only query menu over the blog, crypto and weather APIs.

use anyhow::Result;
use async_trait::async_trait;
use log::info;

use crate::{
    console::Console,
    dispatcher::{Dispatcher, MenuAction, MenuItem, RunSummary},
    http::Transport,
    runtime::Runtime,
};

use super::session::Session;
use super::{blog, crypto, weather};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryAction {
    UserInfo,
    PostsByUser,
    CryptoPrice,
    Todos,
    Weather,
}

#[async_trait(?Send)]
impl<T, R, C> MenuAction<Session<T, R, C>> for QueryAction
where
    T: Transport + 'static,
    R: Runtime + 'static,
    C: Console + 'static,
{
    async fn run(&self, session: &mut Session<T, R, C>) -> Result<()> {
        match self {
            QueryAction::UserInfo => {
                let id = blog::parse_user_id(&session.ask("Enter user ID (1-10): ")?)?;
                blog::show_user(session, id).await
            }
            QueryAction::PostsByUser => {
                let id = blog::parse_user_id(&session.ask("Enter user ID (1-10): ")?)?;
                blog::show_posts_by_user(session, id).await
            }
            QueryAction::CryptoPrice => {
                let coin = session.ask("Enter coin ID (e.g. btc-bitcoin): ")?;
                crypto::show_price(session, &coin).await
            }
            QueryAction::Todos => {
                let completed = blog::parse_completed(&session.ask("Show completed todos? (true/false): ")?)?;
                blog::show_todos(session, completed).await
            }
            QueryAction::Weather => {
                let city = session.ask("Enter city name: ")?;
                weather::show_weather(session, &city).await
            }
        }
    }
}

pub fn menu<T, R, C>() -> Result<Dispatcher<Session<T, R, C>>>
where
    T: Transport + 'static,
    R: Runtime + 'static,
    C: Console + 'static,
{
    let items = vec![
        MenuItem::action("1", "Look up user info", QueryAction::UserInfo),
        MenuItem::action("2", "Search posts by user", QueryAction::PostsByUser),
        MenuItem::action("3", "Check crypto price", QueryAction::CryptoPrice),
        MenuItem::action("4", "Search todos", QueryAction::Todos),
        MenuItem::action("5", "Check weather", QueryAction::Weather),
        MenuItem::exit("6", "Exit"),
    ];

    Ok(Dispatcher::new(items, "\nEnter your choice (1-6): ")?
        .with_heading("--- API Query Menu ---")
        .with_farewell("Goodbye!"))
}

pub async fn run<T, R, C>(session: &mut Session<T, R, C>) -> Result<RunSummary>
where
    T: Transport + 'static,
    R: Runtime + 'static,
    C: Console + 'static,
{
    let summary = menu()?.run(session).await?;
    info!("Query menu finished: {:?}", summary);
    Ok(summary)
}
