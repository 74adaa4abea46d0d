//! Terminal implementations of the controller's display and prompt

use async_trait::async_trait;
use console::{style, StyledObject};
use cyberskills_agent::{AutoConfirm, ConfirmPrompt, DisplaySink};
use cyberskills_core::preferences::Theme;
use cyberskills_core::session::Role;
use dialoguer::Confirm;
use parking_lot::Mutex;
use tracing::warn;

/// Prints the conversation to stdout, styled for the saved theme
pub struct TerminalDisplay {
    theme: Mutex<Theme>,
}

impl TerminalDisplay {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme: Mutex::new(theme),
        }
    }

    pub fn set_theme(&self, theme: Theme) {
        *self.theme.lock() = theme;
    }

    fn label(&self, role: Role) -> StyledObject<&'static str> {
        let text = match role {
            Role::User => "You",
            Role::Bot => "Assistant",
        };
        match (*self.theme.lock(), role) {
            (Theme::Dark, Role::User) => style(text).cyan().bold(),
            (Theme::Dark, Role::Bot) => style(text).green().bold(),
            (Theme::Light, Role::User) => style(text).blue().bold(),
            (Theme::Light, Role::Bot) => style(text).magenta().bold(),
        }
    }
}

impl DisplaySink for TerminalDisplay {
    fn append(&self, role: Role, text: &str) {
        println!("{}: {}", self.label(role), text);
    }

    fn clear(&self) {
        println!("{}", style("─".repeat(40)).dim());
    }
}

/// Yes/no prompt on the terminal
pub struct DialoguerConfirm;

#[async_trait]
impl ConfirmPrompt for DialoguerConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        let prompt = prompt.to_string();
        let answer = tokio::task::spawn_blocking(move || {
            Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()
        })
        .await;

        match answer {
            Ok(Ok(confirmed)) => confirmed,
            Ok(Err(e)) => {
                warn!("Confirmation prompt failed: {}", e);
                false
            }
            Err(e) => {
                warn!("Confirmation prompt task failed: {}", e);
                false
            }
        }
    }
}

/// Either an interactive prompt or a fixed `--yes` answer
pub enum Confirmer {
    Interactive(DialoguerConfirm),
    Auto(AutoConfirm),
}

impl Confirmer {
    pub fn new(assume_yes: bool) -> Self {
        if assume_yes {
            Confirmer::Auto(AutoConfirm(true))
        } else {
            Confirmer::Interactive(DialoguerConfirm)
        }
    }
}

#[async_trait]
impl ConfirmPrompt for Confirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        match self {
            Confirmer::Interactive(inner) => inner.confirm(prompt).await,
            Confirmer::Auto(inner) => inner.confirm(prompt).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_assume_yes_skips_prompt() {
        assert!(Confirmer::new(true).confirm("Start a new chat?").await);
    }

    #[test]
    fn test_theme_switch() {
        let display = TerminalDisplay::new(Theme::Light);
        display.set_theme(Theme::Dark);
        assert_eq!(*display.theme.lock(), Theme::Dark);
    }
}
