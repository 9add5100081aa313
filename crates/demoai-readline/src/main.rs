use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::{ColoredString, Colorize};
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::mpsc::UnboundedReceiver;

use demoai_application::{AppNavigator, AuthFlow, SettingsService, SimulatedAuthBackend, SubmitOutcome};
use demoai_core::auth::{AuthAttempt, AuthMode};
use demoai_core::capability::SpeechCapability;
use demoai_core::clock::{Clock, SystemClock};
use demoai_core::config::RootConfig;
use demoai_core::error::AuthError;
use demoai_core::navigation::AppState;
use demoai_core::notification::{Notification, NotificationLevel};
use demoai_core::session::{DemoSession, SessionId, SessionStatus, format_duration};
use demoai_core::settings::{SettingCategory, SettingKey};
use demoai_infrastructure::{
    ChannelNotificationSink, ConfigService, DemoPaths, EnvSpeechCapability, TomlSettingsRepository,
};

mod command;
mod logging;

use command::{COMMANDS, ShellCommand};

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|(cmd, _)| cmd.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Wires the engine to the terminal.
struct Shell {
    navigator: Arc<AppNavigator>,
    settings: SettingsService,
    config_service: ConfigService,
    speech: EnvSpeechCapability,
    notifications: UnboundedReceiver<Notification>,
}

impl Shell {
    fn prompt(&self) -> String {
        let snapshot = self.navigator.snapshot();
        match snapshot.state {
            AppState::Landing => "landing> ".to_string(),
            AppState::Auth => format!("auth({})> ", self.navigator.auth_mode()),
            AppState::Dashboard if snapshot.demo_mode => "dashboard[demo]> ".to_string(),
            AppState::Dashboard => match snapshot.identity {
                Some(identity) => format!("dashboard[{identity}]> "),
                None => "dashboard> ".to_string(),
            },
        }
    }

    /// Runs one command. Returns `false` when the shell should exit.
    async fn execute(&mut self, command: ShellCommand) -> bool {
        match command {
            ShellCommand::Navigate(action) => {
                let before = self.navigator.state();
                let after = self.navigator.dispatch(action);
                if before == after {
                    println!("{}", format!("Nothing to do for {action} on the {before} screen.").bright_black());
                } else if after == AppState::Auth {
                    let mode = self.navigator.auth_mode();
                    println!("{}", format!("{} form. Use /{} or /mode to switch.", mode.action_label(), login_command(mode)).bright_black());
                }
            }
            ShellCommand::ToggleAuthMode => {
                if self.navigator.state() == AppState::Auth {
                    let mode = self.navigator.toggle_auth_mode();
                    println!("{}", format!("Switched to the {} form.", mode.action_label()).bright_black());
                } else {
                    println!("{}", "Open the auth form first (/signin or /start).".yellow());
                }
            }
            ShellCommand::Login { email, password } => {
                self.submit(AuthAttempt::login(email, password)).await;
            }
            ShellCommand::SignUp {
                email,
                password,
                confirm,
            } => {
                self.submit(AuthAttempt::sign_up(email, password, confirm)).await;
            }
            ShellCommand::NewSession(title) => {
                match self.navigator.start_session(title.as_deref()) {
                    Some(Ok(session)) => print_session(&session),
                    Some(Err(e)) => println!("{}", e.to_string().red()),
                    None => print_dashboard_only(),
                }
            }
            ShellCommand::StopSession(prefix) => {
                if let Some(id) = self.resolve_session(&prefix) {
                    match self.navigator.stop_session(&id) {
                        Some(Ok(session)) => print_session(&session),
                        Some(Err(e)) => println!("{}", e.to_string().red()),
                        None => print_dashboard_only(),
                    }
                }
            }
            ShellCommand::FailSession { id_prefix, reason } => {
                if let Some(id) = self.resolve_session(&id_prefix) {
                    match self.navigator.fail_session(&id, &reason) {
                        Some(Ok(session)) => print_session(&session),
                        Some(Err(e)) => println!("{}", e.to_string().red()),
                        None => print_dashboard_only(),
                    }
                }
            }
            ShellCommand::Sessions(query) => {
                let listed = self.navigator.with_sessions(|sessions| {
                    let matches: Vec<DemoSession> = sessions
                        .search(query.as_deref().unwrap_or(""))
                        .cloned()
                        .collect();
                    matches
                });
                match listed {
                    Some(matches) if matches.is_empty() => {
                        println!("{}", "No sessions found.".bright_black())
                    }
                    Some(matches) => matches.iter().for_each(print_session),
                    None => print_dashboard_only(),
                }
            }
            ShellCommand::Stats => match self.navigator.with_sessions(|s| s.summary()) {
                Some(summary) => {
                    let stats = summary.stats;
                    println!(
                        "Total {}  Active {}  Completed {}  Failed {}",
                        stats.total.to_string().bold(),
                        stats.active.to_string().blue(),
                        stats.completed.to_string().green(),
                        stats.failed.to_string().red()
                    );
                    let average = summary
                        .average_duration_seconds
                        .map(format_duration)
                        .unwrap_or_else(|| "-".to_string());
                    let rate = summary
                        .completion_rate_percent
                        .map(|p| format!("{p}%"))
                        .unwrap_or_else(|| "-".to_string());
                    println!("Avg. Duration {average}  Completion Rate {rate}");
                }
                None => print_dashboard_only(),
            },
            ShellCommand::Get { category, key } => match self.settings.get_by_name(&category, &key) {
                Ok(value) => println!("{category}.{key} = {value}"),
                Err(e) => println!("{}", e.to_string().red()),
            },
            ShellCommand::Set {
                category,
                key,
                value,
            } => match self.settings.set_by_name(&category, &key, value.clone()) {
                Ok(stored) if stored != value => {
                    println!("{category}.{key} = {stored} {}", "(adjusted to fit the allowed range)".bright_black())
                }
                Ok(stored) => println!("{category}.{key} = {stored}"),
                Err(e) => println!("{}", e.to_string().red()),
            },
            ShellCommand::Settings => self.print_settings(),
            ShellCommand::Save => {
                // Failures reach the user through the notification sink
                let _ = self.settings.save().await;
            }
            ShellCommand::ResetSettings => {
                self.settings.reset();
                println!("{}", "Settings restored to defaults (not saved yet).".bright_black());
            }
            ShellCommand::Status => self.print_status(),
            ShellCommand::Help => print_help(),
            ShellCommand::Quit => return false,
        }
        true
    }

    async fn submit(&mut self, attempt: AuthAttempt) {
        if self.navigator.state() == AppState::Auth {
            println!("{}", attempt.mode.pending_label().bright_black());
        }
        match self.navigator.submit_credentials(&attempt).await {
            Ok(SubmitOutcome::Authenticated(_)) => {}
            Ok(SubmitOutcome::Discarded) => {
                println!("{}", "Open the auth form first (/signin or /start).".yellow())
            }
            Err(AuthError::AlreadyInFlight) => {
                println!("{}", AuthError::AlreadyInFlight.to_string().yellow())
            }
            // Reported through the notification sink
            Err(_) => {}
        }
    }

    fn resolve_session(&self, prefix: &str) -> Option<SessionId> {
        match self
            .navigator
            .with_sessions(|s| s.find_by_prefix(prefix).map(|session| session.id()))
        {
            Some(Some(id)) => Some(id),
            Some(None) => {
                println!("{}", format!("No single session matches '{prefix}'.").red());
                None
            }
            None => {
                print_dashboard_only();
                None
            }
        }
    }

    fn print_settings(&self) {
        let values: Vec<(SettingKey, String)> = SettingKey::all()
            .map(|key| (key, self.settings.get(key).to_string()))
            .collect();
        for category in [
            SettingCategory::Voice,
            SettingCategory::Integrations,
            SettingCategory::Preferences,
        ] {
            println!("{}", format!("[{category}]").bright_magenta());
            for (key, value) in values.iter().filter(|(k, _)| k.category() == category) {
                println!("  {:<14} {}", key.name(), value);
            }
        }
    }

    fn print_status(&self) {
        let snapshot = self.navigator.snapshot();
        println!("Screen      {}", snapshot.state.to_string().bold());
        match (&snapshot.identity, snapshot.demo_mode) {
            (Some(identity), _) => println!("Signed in   {identity}"),
            (None, true) => println!("Signed in   {}", "demo mode".yellow()),
            (None, false) => println!("Signed in   -"),
        }
        println!("Auth        {}", self.navigator.auth_state());
        let voice = if self.speech.is_voice_input_available() {
            "available".green()
        } else {
            "not supported in this runtime".yellow()
        };
        println!("Voice input {voice}");
        let config = self.config_service.get_config();
        println!(
            "Sign-in latency {} ms",
            config.auth.latency_ms.to_string().bright_black()
        );
    }

    fn drain_notifications(&mut self) {
        while let Ok(notification) = self.notifications.try_recv() {
            let title = match notification.level {
                NotificationLevel::Success => notification.title.green().bold(),
                NotificationLevel::Info => notification.title.cyan().bold(),
                NotificationLevel::Error => notification.title.red().bold(),
            };
            if notification.description.is_empty() {
                println!("{title}");
            } else {
                println!("{title} {}", notification.description);
            }
        }
    }
}

fn login_command(mode: AuthMode) -> &'static str {
    match mode {
        AuthMode::Login => "login <email> <password>",
        AuthMode::SignUp => "signup <email> <password> <confirm>",
    }
}

fn status_label(status: SessionStatus) -> ColoredString {
    match status {
        SessionStatus::Active => "recording".blue(),
        SessionStatus::Completed => "completed".green(),
        SessionStatus::Failed => "failed".red(),
    }
}

fn print_session(session: &DemoSession) {
    let id = session.id().to_string();
    println!(
        "  {}  {:<32} {:<10} {:>6}  {}  transcript: {}",
        id[..8].bright_black(),
        session.title(),
        status_label(session.status()),
        session.duration_label(),
        session.created_at().format("%Y-%m-%d %H:%M"),
        session.transcript_status()
    );
    if let Some(reason) = session.failure_reason() {
        println!("            {}", reason.bright_black());
    }
}

fn print_dashboard_only() {
    println!("{}", "Sessions are only available on the dashboard (/demo or sign in).".yellow());
}

fn print_help() {
    for (command, usage) in COMMANDS {
        println!("  {:<10} {}", command.bright_cyan(), usage.bright_black());
    }
}

fn load_config(config_service: &ConfigService) -> RootConfig {
    match config_service.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format!("Using default configuration: {e}").yellow());
            RootConfig::default()
        }
    }
}

/// The main entry point for the DemoAI shell.
///
/// Loads configuration, starts file logging, builds the engine and runs a
/// rustyline REPL over it. Notifications are printed after each command.
#[tokio::main]
async fn main() -> Result<()> {
    // ===== Configuration & Logging =====
    let paths = DemoPaths::resolve()?;
    let config_service = ConfigService::new(&paths);
    let config = load_config(&config_service);
    let _log_guard = logging::init(&paths, &config.logging.level)?;
    tracing::info!("[Shell] Starting with base directory {}", paths.base_dir().display());

    // ===== Engine =====
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let (sink, notifications) = ChannelNotificationSink::channel();
    let sink = Arc::new(sink);
    let auth_flow = Arc::new(AuthFlow::new(Arc::new(SimulatedAuthBackend::from_config(
        &config.auth,
    ))));
    let navigator = Arc::new(
        AppNavigator::new(auth_flow, clock.clone(), sink.clone())
            .with_demo_fixtures(config.dashboard.seed_demo_fixtures),
    );
    let settings = SettingsService::load(
        Arc::new(TomlSettingsRepository::new(paths.settings_file())),
        sink,
    )
    .await
    .with_clock(clock);

    let mut shell = Shell {
        navigator,
        settings,
        config_service,
        speech: EnvSpeechCapability::from_config(&config.speech),
        notifications,
    };

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== DemoAI ===".bright_magenta().bold());
    println!("{}", "Product demos, powered by AI. Type /help for commands.".bright_black());
    println!();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(&shell.prompt());

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let keep_running = match ShellCommand::parse(trimmed) {
                    Ok(command) => shell.execute(command).await,
                    Err(message) => {
                        println!("{}", message.yellow());
                        true
                    }
                };
                shell.drain_notifications();

                if !keep_running {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    tracing::info!("[Shell] Exiting");
    Ok(())
}
