//! Typed command set parsed from a [`CommandEvent`].

use dbot_core::{CommandEvent, HandlerError, OptionValue};

/// Name, argument synopsis and description of one command, for registration and usage text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub args: &'static str,
    pub description: &'static str,
    pub admin_only: bool,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "imagine",
        args: "<prompt>",
        description: "Generate an image from a prompt",
        admin_only: false,
    },
    CommandSpec {
        name: "selfie",
        args: "",
        description: "Ask for a selfie",
        admin_only: false,
    },
    CommandSpec {
        name: "ask",
        args: "<prompt>",
        description: "Ask a short question",
        admin_only: false,
    },
    CommandSpec {
        name: "checkcredits",
        args: "[user]",
        description: "Show your credit balance",
        admin_only: false,
    },
    CommandSpec {
        name: "addcredits",
        args: "<user> <credits>",
        description: "Add credits to a user (admin only)",
        admin_only: true,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Imagine { prompt: String },
    Selfie,
    Ask { prompt: String },
    CheckCredits { user: Option<String> },
    AddCredits { user: String, credits: i64 },
}

fn required_prompt(event: &CommandEvent) -> Result<String, HandlerError> {
    match event.get_string("prompt").map(str::trim) {
        Some(prompt) if !prompt.is_empty() => Ok(prompt.to_string()),
        _ => Err(HandlerError::MissingOption("prompt".to_string())),
    }
}

/// User option given either as a platform user or as a raw id string.
fn user_option(event: &CommandEvent) -> Option<String> {
    event
        .get_user("user")
        .or_else(|| event.get_string("user"))
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn credits_option(event: &CommandEvent) -> Result<i64, HandlerError> {
    match event.option("credits") {
        Some(OptionValue::Integer(n)) => Ok(*n),
        Some(OptionValue::String(raw)) => {
            raw.trim()
                .parse::<i64>()
                .map_err(|_| HandlerError::InvalidOption {
                    name: "credits".to_string(),
                    value: raw.clone(),
                })
        }
        Some(OptionValue::User(raw)) => Err(HandlerError::InvalidOption {
            name: "credits".to_string(),
            value: raw.clone(),
        }),
        None => Err(HandlerError::MissingOption("credits".to_string())),
    }
}

impl Command {
    pub fn from_event(event: &CommandEvent) -> Result<Self, HandlerError> {
        match event.command_name.as_str() {
            "imagine" => Ok(Command::Imagine {
                prompt: required_prompt(event)?,
            }),
            "selfie" => Ok(Command::Selfie),
            "ask" => Ok(Command::Ask {
                prompt: required_prompt(event)?,
            }),
            "checkcredits" => Ok(Command::CheckCredits {
                user: user_option(event),
            }),
            "addcredits" => {
                let user =
                    user_option(event).ok_or_else(|| HandlerError::MissingOption("user".to_string()))?;
                let credits = credits_option(event)?;
                Ok(Command::AddCredits { user, credits })
            }
            other => Err(HandlerError::UnknownCommand(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Imagine { .. } => "imagine",
            Command::Selfie => "selfie",
            Command::Ask { .. } => "ask",
            Command::CheckCredits { .. } => "checkcredits",
            Command::AddCredits { .. } => "addcredits",
        }
    }

    pub fn spec(&self) -> &'static CommandSpec {
        let index = match self {
            Command::Imagine { .. } => 0,
            Command::Selfie => 1,
            Command::Ask { .. } => 2,
            Command::CheckCredits { .. } => 3,
            Command::AddCredits { .. } => 4,
        };
        &COMMANDS[index]
    }
}

/// Looks up a command by its raw name, before any option is parsed.
pub fn find_spec(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// Multi-line usage notice listing every command.
pub fn usage_text() -> String {
    let mut text = String::from("Usage:");
    for spec in COMMANDS {
        text.push_str("\n/");
        text.push_str(spec.name);
        if !spec.args.is_empty() {
            text.push(' ');
            text.push_str(spec.args);
        }
        text.push_str(" - ");
        text.push_str(spec.description);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prompt_commands() {
        let event = CommandEvent::new("imagine", "1")
            .with_option("prompt", OptionValue::String("  a red fox ".to_string()));
        assert_eq!(
            Command::from_event(&event),
            Ok(Command::Imagine {
                prompt: "a red fox".to_string()
            })
        );

        let missing = CommandEvent::new("ask", "1");
        assert_eq!(
            Command::from_event(&missing),
            Err(HandlerError::MissingOption("prompt".to_string()))
        );

        let blank = CommandEvent::new("imagine", "1")
            .with_option("prompt", OptionValue::String("   ".to_string()));
        assert!(Command::from_event(&blank).is_err());
    }

    #[test]
    fn test_parse_addcredits() {
        let event = CommandEvent::new("addcredits", "1")
            .with_option("user", OptionValue::User("42".to_string()))
            .with_option("credits", OptionValue::Integer(50));
        assert_eq!(
            Command::from_event(&event),
            Ok(Command::AddCredits {
                user: "42".to_string(),
                credits: 50
            })
        );

        let textual = CommandEvent::new("addcredits", "1")
            .with_option("user", OptionValue::String("42".to_string()))
            .with_option("credits", OptionValue::String("-3".to_string()));
        assert_eq!(
            Command::from_event(&textual),
            Ok(Command::AddCredits {
                user: "42".to_string(),
                credits: -3
            })
        );

        let not_a_number = CommandEvent::new("addcredits", "1")
            .with_option("user", OptionValue::User("42".to_string()))
            .with_option("credits", OptionValue::String("ten".to_string()));
        assert!(matches!(
            Command::from_event(&not_a_number),
            Err(HandlerError::InvalidOption { .. })
        ));

        let no_user = CommandEvent::new("addcredits", "1")
            .with_option("credits", OptionValue::Integer(5));
        assert_eq!(
            Command::from_event(&no_user),
            Err(HandlerError::MissingOption("user".to_string()))
        );
    }

    #[test]
    fn test_unknown_command() {
        let event = CommandEvent::new("dance", "1");
        assert_eq!(
            Command::from_event(&event),
            Err(HandlerError::UnknownCommand("dance".to_string()))
        );
    }

    #[test]
    fn test_every_command_has_a_spec() {
        let commands = [
            Command::Imagine {
                prompt: "x".to_string(),
            },
            Command::Selfie,
            Command::Ask {
                prompt: "x".to_string(),
            },
            Command::CheckCredits { user: None },
            Command::AddCredits {
                user: "1".to_string(),
                credits: 1,
            },
        ];
        for command in commands {
            assert_eq!(command.spec().name, command.name());
        }
        assert!(find_spec("addcredits").is_some_and(|spec| spec.admin_only));
        assert!(find_spec("checkcredits").is_some_and(|spec| !spec.admin_only));
        assert_eq!(find_spec("dance"), None);
        let usage = usage_text();
        assert!(usage.contains("/imagine <prompt>"));
        assert!(usage.contains("/selfie - Ask for a selfie"));
    }
}
