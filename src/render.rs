//! Template environment and page rendering
//!
//! Views are tera templates loaded once at startup. Every page render
//! receives the session user and any pending flash messages on top of its
//! own context, so templates can show the chrome without per-handler
//! plumbing.

use std::collections::HashMap;

use axum::response::Html;
use tera::{Context, Tera, Value};
use tower_sessions::Session;

use crate::{
    constants::SESSION_USER_KEY,
    error::AppResult,
    middleware::flash,
    models::SessionUser,
    state::AppState,
};

/// Load the template environment and register the display filters
pub fn build_templates(glob: &str) -> tera::Result<Tera> {
    let mut tera = Tera::new(glob)?;
    tera.register_filter("display_name", display_name_filter);
    tera.register_filter("initials", initials_filter);
    Ok(tera)
}

/// Render a named view with the session user and flash messages injected
pub async fn render_page(
    state: &AppState,
    session: &Session,
    template: &str,
    mut context: Context,
) -> AppResult<Html<String>> {
    let user = session
        .get::<SessionUser>(SESSION_USER_KEY)
        .await
        .unwrap_or_default();
    context.insert("user", &user);

    let (success, error) = flash::take(session).await;
    context.insert("success", &success);
    context.insert("error", &error);

    let html = state.templates().render(template, &context)?;
    Ok(Html(html))
}

/// Best human-facing label for a user object: nickname, name, username, email
fn display_name_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => ["nickname", "name", "username", "email"]
            .iter()
            .find_map(|key| {
                map.get(*key)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

fn display_name_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(display_name_of(value)))
}

fn initials_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let base = display_name_of(value);
    let initials: String = base
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    Ok(Value::String(initials.chars().take(2).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_name_prefers_nickname() {
        let user = json!({
            "nickname": "Ally",
            "name": "Alice Liddell",
            "username": "alice",
            "email": "alice@example.com"
        });
        assert_eq!(display_name_of(&user), "Ally");
    }

    #[test]
    fn test_display_name_falls_through_empty_fields() {
        let user = json!({
            "nickname": null,
            "name": "",
            "username": "alice",
            "email": "alice@example.com"
        });
        assert_eq!(display_name_of(&user), "alice");
    }

    #[test]
    fn test_initials_take_two_words() {
        let args = HashMap::new();
        let value = Value::String("alice liddell".to_string());
        let result = initials_filter(&value, &args).unwrap();
        assert_eq!(result, Value::String("AL".to_string()));

        let value = Value::String("solo".to_string());
        let result = initials_filter(&value, &args).unwrap();
        assert_eq!(result, Value::String("S".to_string()));

        let value = Value::String("".to_string());
        let result = initials_filter(&value, &args).unwrap();
        assert_eq!(result, Value::String(String::new()));
    }
}
