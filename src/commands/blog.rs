//! Fake blog API: users, posts and todos.

use anyhow::{Context, Result, bail};
use log::info;
use serde::Deserialize;
use serde_json::json;

use crate::{
    console::Console,
    http::{ErrorKind, RequestFailure, Transport},
    runtime::Runtime,
};

use super::format::field;
use super::session::Session;

const MAX_USER_ID: u32 = 10;

#[derive(Debug, Deserialize)]
struct User {
    name: String,
    email: String,
    phone: String,
    website: String,
}

#[derive(Debug, Deserialize)]
struct Titled {
    title: String,
}

/// Accepts only whole numbers from 1 to 10.
pub fn parse_user_id(input: &str) -> Result<u32> {
    let input = input.trim();
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        bail!("User ID must be a number between 1 and {}", MAX_USER_ID);
    }
    match input.parse::<u32>() {
        Ok(id) if (1..=MAX_USER_ID).contains(&id) => Ok(id),
        _ => bail!("User ID must be a number between 1 and {}", MAX_USER_ID),
    }
}

pub async fn show_user<T, R, C>(session: &mut Session<T, R, C>, user_id: u32) -> Result<()>
where
    T: Transport,
    R: Runtime,
    C: Console,
{
    let url = session.endpoints.user(user_id);
    let payload = match session.fetch(&url, &[]).await {
        Ok(payload) => payload,
        Err(e) if is_not_found(&e) => bail!("User with ID {} not found!", user_id),
        Err(e) => return Err(e.context(format!("Error fetching user {}", user_id))),
    };
    let user: User = serde_json::from_value(payload).context("Unexpected user response format")?;

    session.say("")?;
    session.say(format!("--- User #{} Info ---", user_id))?;
    session.say(format!("Name: {}", user.name))?;
    session.say(format!("Email: {}", user.email))?;
    session.say(format!("Phone: {}", user.phone))?;
    session.say(format!("Website: {}", user.website))
}

pub async fn show_posts_by_user<T, R, C>(session: &mut Session<T, R, C>, user_id: u32) -> Result<()>
where
    T: Transport,
    R: Runtime,
    C: Console,
{
    let url = session.endpoints.posts();
    let payload = session
        .fetch(&url, &[("userId", user_id.to_string())])
        .await
        .context("Error fetching posts")?;
    let posts: Vec<Titled> =
        serde_json::from_value(payload).context("Unexpected posts response format")?;

    if posts.is_empty() {
        return session.say("No posts found for this user.");
    }

    session.say("")?;
    session.say(format!("--- Posts by User #{} ---", user_id))?;
    for (i, post) in posts.iter().enumerate() {
        session.say(format!("{}. {}", i + 1, post.title))?;
    }
    Ok(())
}

/// Accepts `true` or `false` (any case).
pub fn parse_completed(input: &str) -> Result<bool> {
    match input.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("Invalid status! Enter true or false."),
    }
}

pub async fn show_todos<T, R, C>(session: &mut Session<T, R, C>, completed: bool) -> Result<()>
where
    T: Transport,
    R: Runtime,
    C: Console,
{
    let url = session.endpoints.todos();
    let payload = session
        .fetch(&url, &[("completed", completed.to_string())])
        .await
        .context("Could not fetch todos")?;
    let todos: Vec<Titled> =
        serde_json::from_value(payload).context("Unexpected todos response format")?;

    session.say("")?;
    session.say(format!("Total todos found: {}", todos.len()))?;
    for todo in todos.iter().take(5) {
        session.say(format!("- {}", todo.title))?;
    }
    Ok(())
}

/// Creates a post with a single POST and remembers the response for a later save.
pub async fn create_post<T, R, C>(session: &mut Session<T, R, C>, title: &str, body: &str) -> Result<()>
where
    T: Transport,
    R: Runtime,
    C: Console,
{
    let (title, body) = (title.trim(), body.trim());
    if title.is_empty() || body.is_empty() {
        bail!("Title and body cannot be empty.");
    }

    let url = session.endpoints.posts();
    let created = session
        .executor
        .create(&url, &json!({ "title": title, "body": body }))
        .await
        .into_result()
        .context("Failed to create post")?;
    info!("Created post {}", field(&created, "id"));

    session.say("")?;
    session.say("Post successfully created!")?;
    session.say(format!("Post ID: {}", field(&created, "id")))?;
    session.say(format!("Title: {}", field(&created, "title")))?;
    session.say(format!("Body: {}", field(&created, "body")))?;

    session.last_post = Some(created);
    Ok(())
}

fn is_not_found(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<RequestFailure>()
        .is_some_and(|f| f.kind == ErrorKind::HttpStatus(404))
}
