//! Slash-command parsing for the shell.

use demoai_core::navigation::NavigationAction;
use demoai_core::settings::{SettingKey, SettingValue};

/// Every command with its usage line, in help order.
pub const COMMANDS: &[(&str, &str)] = &[
    ("/start", "Open the sign-up form"),
    ("/signin", "Open the sign-in form"),
    ("/demo", "Explore the dashboard with sample sessions"),
    ("/cancel", "Leave the auth form"),
    ("/mode", "Switch between sign-in and sign-up"),
    ("/login", "/login <email> <password>"),
    ("/signup", "/signup <email> <password> <confirm>"),
    ("/new", "/new [title]  Start recording a demo session"),
    ("/stop", "/stop <id-prefix>  Stop a recording"),
    ("/fail", "/fail <id-prefix> <reason>  Mark a recording as failed"),
    ("/sessions", "/sessions [query]  List or search sessions"),
    ("/stats", "Session counts and averages"),
    ("/get", "/get <category> <key>"),
    ("/set", "/set <category> <key> <value>"),
    ("/settings", "Show all settings"),
    ("/save", "Save settings"),
    ("/reset", "Restore default settings"),
    ("/logout", "Sign out and return to the landing page"),
    ("/status", "Show where you are"),
    ("/help", "Show this list"),
    ("/quit", "Exit"),
];

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Navigate(NavigationAction),
    ToggleAuthMode,
    Login {
        email: String,
        password: String,
    },
    SignUp {
        email: String,
        password: String,
        confirm: String,
    },
    NewSession(Option<String>),
    StopSession(String),
    FailSession {
        id_prefix: String,
        reason: String,
    },
    Sessions(Option<String>),
    Stats,
    Get {
        category: String,
        key: String,
    },
    Set {
        category: String,
        key: String,
        value: SettingValue,
    },
    Settings,
    Save,
    ResetSettings,
    Status,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parses one input line.
    ///
    /// # Errors
    ///
    /// A message for the user: unknown command or wrong arguments.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let args: Vec<&str> = rest.split_whitespace().collect();
        let optional_text = || (!rest.is_empty()).then(|| rest.to_string());

        let command = match name {
            "/start" | "/getstarted" => Self::Navigate(NavigationAction::GetStarted),
            "/signin" => Self::Navigate(NavigationAction::SignIn),
            "/demo" => Self::Navigate(NavigationAction::TryDemo),
            "/cancel" => Self::Navigate(NavigationAction::CancelToLanding),
            "/logout" => Self::Navigate(NavigationAction::Logout),
            "/mode" => Self::ToggleAuthMode,
            "/login" => match args.as_slice() {
                [email, password] => Self::Login {
                    email: email.to_string(),
                    password: password.to_string(),
                },
                _ => return Err(usage("/login")),
            },
            "/signup" => match args.as_slice() {
                [email, password, confirm] => Self::SignUp {
                    email: email.to_string(),
                    password: password.to_string(),
                    confirm: confirm.to_string(),
                },
                _ => return Err(usage("/signup")),
            },
            "/new" => Self::NewSession(optional_text()),
            "/stop" => match args.as_slice() {
                [id] => Self::StopSession(id.to_string()),
                _ => return Err(usage("/stop")),
            },
            "/fail" => match rest.split_once(char::is_whitespace) {
                Some((id, reason)) if !reason.trim().is_empty() => Self::FailSession {
                    id_prefix: id.to_string(),
                    reason: reason.trim().to_string(),
                },
                _ => return Err(usage("/fail")),
            },
            "/sessions" => Self::Sessions(optional_text()),
            "/stats" => Self::Stats,
            "/get" => match args.as_slice() {
                [category, key] => Self::Get {
                    category: category.to_string(),
                    key: key.to_string(),
                },
                _ => return Err(usage("/get")),
            },
            "/set" => match split_word(rest).and_then(|(category, rest)| {
                split_word(rest).map(|(key, value)| (category, key, value.trim()))
            }) {
                Some((category, key, value)) if !value.is_empty() => Self::Set {
                    category: category.to_string(),
                    key: key.to_string(),
                    value: parse_value(category, key, value),
                },
                _ => return Err(usage("/set")),
            },
            "/settings" => Self::Settings,
            "/save" => Self::Save,
            "/reset" => Self::ResetSettings,
            "/status" => Self::Status,
            "/help" => Self::Help,
            "/quit" | "/exit" | "quit" | "exit" => Self::Quit,
            other => return Err(format!("Unknown command: {other} (try /help)")),
        };
        Ok(command)
    }
}

/// Splits off the first whitespace-delimited word.
fn split_word(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    Some(s.split_once(char::is_whitespace).unwrap_or((s, "")))
}

/// Text fields keep the input verbatim; other values are read as literals.
fn parse_value(category: &str, key: &str, value: &str) -> SettingValue {
    match SettingKey::parse(category, key) {
        Ok(key) if key.is_text() => SettingValue::Text(value.to_string()),
        _ => value.parse().unwrap_or_else(|never| match never {}),
    }
}

fn usage(name: &str) -> String {
    let line = COMMANDS
        .iter()
        .find(|(cmd, _)| *cmd == name)
        .map(|(_, usage)| *usage)
        .unwrap_or(name);
    format!("Usage: {line}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_commands() {
        assert_eq!(
            ShellCommand::parse("/demo").unwrap(),
            ShellCommand::Navigate(NavigationAction::TryDemo)
        );
        assert_eq!(
            ShellCommand::parse("  /start ").unwrap(),
            ShellCommand::Navigate(NavigationAction::GetStarted)
        );
        assert_eq!(ShellCommand::parse("quit").unwrap(), ShellCommand::Quit);
    }

    #[test]
    fn test_credentials() {
        assert_eq!(
            ShellCommand::parse("/login a@b.com password1").unwrap(),
            ShellCommand::Login {
                email: "a@b.com".to_string(),
                password: "password1".to_string()
            }
        );
        assert!(ShellCommand::parse("/signup a@b.com password1").is_err());
    }

    #[test]
    fn test_session_commands_keep_free_text() {
        assert_eq!(
            ShellCommand::parse("/new Pricing page tour").unwrap(),
            ShellCommand::NewSession(Some("Pricing page tour".to_string()))
        );
        assert_eq!(
            ShellCommand::parse("/new").unwrap(),
            ShellCommand::NewSession(None)
        );
        assert_eq!(
            ShellCommand::parse("/fail 3fa2 mic   unplugged").unwrap(),
            ShellCommand::FailSession {
                id_prefix: "3fa2".to_string(),
                reason: "mic   unplugged".to_string()
            }
        );
        assert!(ShellCommand::parse("/fail 3fa2").is_err());
    }

    #[test]
    fn test_set_parses_literal_values() {
        assert_eq!(
            ShellCommand::parse("/set voice sensitivity 15").unwrap(),
            ShellCommand::Set {
                category: "voice".to_string(),
                key: "sensitivity".to_string(),
                value: SettingValue::Integer(15)
            }
        );
        assert_eq!(
            ShellCommand::parse("/set integrations webhook https://x.io/a b").unwrap(),
            ShellCommand::Set {
                category: "integrations".to_string(),
                key: "webhook".to_string(),
                value: SettingValue::Text("https://x.io/a b".to_string())
            }
        );
        assert!(ShellCommand::parse("/set voice").is_err());
        assert!(ShellCommand::parse("/set voice sensitivity   ").is_err());
    }

    #[test]
    fn test_set_keeps_text_fields_as_text() {
        assert_eq!(
            ShellCommand::parse("/set integrations webhook 123").unwrap(),
            ShellCommand::Set {
                category: "integrations".to_string(),
                key: "webhook".to_string(),
                value: SettingValue::Text("123".to_string())
            }
        );
        assert_eq!(
            ShellCommand::parse("/set  preferences   theme  true").unwrap(),
            ShellCommand::Set {
                category: "preferences".to_string(),
                key: "theme".to_string(),
                value: SettingValue::Text("true".to_string())
            }
        );
        assert_eq!(
            ShellCommand::parse("/set voice  speed 1.5").unwrap(),
            ShellCommand::Set {
                category: "voice".to_string(),
                key: "speed".to_string(),
                value: SettingValue::Number(1.5)
            }
        );
    }

    #[test]
    fn test_unknown_command() {
        let err = ShellCommand::parse("/dance").unwrap_err();
        assert!(err.contains("/dance"));
        assert_eq!(
            ShellCommand::parse("/stop").unwrap_err(),
            "Usage: /stop <id-prefix>  Stop a recording"
        );
    }
}
