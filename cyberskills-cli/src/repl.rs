//! Interactive chat loop

use anyhow::Result;
use console::style;
use cyberskills_agent::{ChatController, ConfirmPrompt, Topic};
use cyberskills_client::ChatBackend;
use cyberskills_core::preferences::ThemePreference;
use cyberskills_core::storage::KeyValueStore;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::terminal::TerminalDisplay;

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Send(String),
    Topic(Topic),
    Topics,
    Save,
    History,
    Load(u64),
    Reset,
    New,
    Theme,
    Help,
    Quit,
    Invalid(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return ReplCommand::Send(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name.to_lowercase().as_str() {
            "topic" if arg.is_empty() => ReplCommand::Topics,
            "topic" => match arg.parse() {
                Ok(topic) => ReplCommand::Topic(topic),
                Err(e) => ReplCommand::Invalid(e),
            },
            "topics" => ReplCommand::Topics,
            "save" => ReplCommand::Save,
            "history" => ReplCommand::History,
            "load" => match arg.parse() {
                Ok(id) => ReplCommand::Load(id),
                Err(_) => ReplCommand::Invalid(format!("invalid session id: {}", arg)),
            },
            "reset" => ReplCommand::Reset,
            "new" => ReplCommand::New,
            "theme" => ReplCommand::Theme,
            "help" | "?" => ReplCommand::Help,
            "quit" | "exit" | "q" => ReplCommand::Quit,
            other => ReplCommand::Invalid(format!("unknown command: /{}", other)),
        }
    }
}

pub fn print_topics() {
    println!("{}", style("Topics:").bold());
    for (i, topic) in Topic::ALL.iter().enumerate() {
        println!("  {}. {} ({})", i + 1, topic, style(topic.slug()).dim());
    }
}

fn print_help() {
    println!("{}", style("Commands:").bold());
    for (cmd, what) in [
        ("/topic <name|n>", "start a learning topic"),
        ("/topics", "list topics"),
        ("/save", "save this conversation"),
        ("/history", "list saved conversations"),
        ("/load <id>", "load a saved conversation"),
        ("/reset", "reset the conversation"),
        ("/new", "start a new chat"),
        ("/theme", "toggle light/dark theme"),
        ("/quit", "leave"),
    ] {
        println!("  {:<18} {}", style(cmd).cyan(), what);
    }
}

/// Read lines from stdin and drive the controller until `/quit` or EOF
pub async fn run<B, C, S>(
    controller: &ChatController<B, Arc<TerminalDisplay>, C, S>,
    display: &TerminalDisplay,
    store: &dyn KeyValueStore,
    theme_pref: &ThemePreference,
) -> Result<()>
where
    B: ChatBackend,
    C: ConfirmPrompt,
    S: KeyValueStore,
{
    println!("{}", style("Cyberskills Assistant").bold().cyan());
    println!("Ask a cybersecurity question, or type /help.\n");
    print_topics();
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = ReplCommand::parse(&line);
        debug!("REPL command: {:?}", command);

        match command {
            ReplCommand::Send(text) => {
                controller.send_message(&text).await;
            }
            ReplCommand::Topic(topic) => {
                controller.send_topic(topic).await;
            }
            ReplCommand::Topics => print_topics(),
            ReplCommand::Save => {
                if let Some(id) = controller.save_session() {
                    println!("{} {}", style("Saved as").green(), id);
                }
            }
            ReplCommand::History => crate::print_history(&controller.history_index()),
            ReplCommand::Load(id) => {
                if !controller.load_session(id) {
                    println!("{} {}", style("No saved conversation with id").yellow(), id);
                }
            }
            ReplCommand::Reset => {
                controller.reset_conversation().await;
            }
            ReplCommand::New => {
                controller.new_chat().await;
            }
            ReplCommand::Theme => {
                let theme = theme_pref.toggle(store)?;
                display.set_theme(theme);
                println!("Theme: {}", theme);
            }
            ReplCommand::Help => print_help(),
            ReplCommand::Quit => break,
            ReplCommand::Invalid(reason) => println!("{}", style(reason).yellow()),
        }
    }

    info!("Chat session ended");
    Ok(())
}
