//! Terminal prompts using dialoguer.
//!
//! dialoguer does blocking terminal I/O, so each prompt runs on a blocking
//! thread and the runtime stays free.

use crate::prompt::Prompter;
use anyhow::Result;
use async_trait::async_trait;
use dialoguer::{theme::ColorfulTheme, MultiSelect, Select};

/// Interactive prompter on stderr. Esc or `q` cancels.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn select_one(&self, message: &str, options: &[String]) -> Result<Option<usize>> {
        let message = message.to_string();
        let options = options.to_vec();

        tokio::task::spawn_blocking(move || -> Result<_> {
            let choice = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(message)
                .items(&options)
                .default(0)
                .interact_opt()?;
            Ok(choice)
        })
        .await?
    }

    async fn select_many(&self, message: &str, options: &[String]) -> Result<Vec<usize>> {
        let message = message.to_string();
        let options = options.to_vec();

        tokio::task::spawn_blocking(move || -> Result<_> {
            let chosen = MultiSelect::with_theme(&ColorfulTheme::default())
                .with_prompt(message)
                .items(&options)
                .interact_opt()?;
            Ok(chosen.unwrap_or_default())
        })
        .await?
    }
}
