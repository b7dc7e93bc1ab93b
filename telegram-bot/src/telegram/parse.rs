//! Turns `/command@bot args` text into a [`CommandEvent`].

use dbot_core::{CommandEvent, OptionValue};

/// Parses a command message. Returns `None` for plain text and for commands addressed to a
/// different bot.
pub fn parse_command(
    text: &str,
    user_id: &str,
    username: Option<&str>,
    bot_username: Option<&str>,
) -> Option<CommandEvent> {
    let text = text.trim();
    let body = text.strip_prefix('/')?;
    let (head, rest) = match body.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (body, ""),
    };

    let (name, addressee) = match head.split_once('@') {
        Some((name, addressee)) => (name, Some(addressee)),
        None => (head, None),
    };
    if let (Some(addressee), Some(me)) = (addressee, bot_username) {
        if !addressee.eq_ignore_ascii_case(me) {
            return None;
        }
    }
    if name.is_empty() {
        return None;
    }

    let name = name.to_ascii_lowercase();
    let mut event = CommandEvent::new(name.as_str(), user_id);
    if let Some(username) = username {
        event = event.with_username(username);
    }

    let mut args = rest.split_whitespace();
    match name.as_str() {
        "imagine" | "ask" => {
            if !rest.is_empty() {
                event = event.with_option("prompt", OptionValue::String(rest.to_string()));
            }
        }
        "checkcredits" => {
            if let Some(user) = args.next() {
                event = event.with_option("user", user_option(user));
            }
        }
        "addcredits" => {
            if let Some(user) = args.next() {
                event = event.with_option("user", user_option(user));
            }
            if let Some(credits) = args.next() {
                let value = match credits.parse::<i64>() {
                    Ok(n) => OptionValue::Integer(n),
                    Err(_) => OptionValue::String(credits.to_string()),
                };
                event = event.with_option("credits", value);
            }
        }
        _ => {}
    }
    Some(event)
}

/// A numeric id is a user reference; anything else (e.g. `@name`) is passed through as text.
fn user_option(raw: &str) -> OptionValue {
    if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
        OptionValue::User(raw.to_string())
    } else {
        OptionValue::String(raw.to_string())
    }
}
