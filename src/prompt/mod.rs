pub mod terminal;

use anyhow::Result;
use async_trait::async_trait;

pub use terminal::TerminalPrompter;

/// Trait for the interactive choices the `reject` command asks for.
/// The terminal implementation uses dialoguer; tests script the answers.
#[async_trait]
pub trait Prompter {
    /// Pick one of `options`. `None` means the user cancelled.
    async fn select_one(&self, message: &str, options: &[String]) -> Result<Option<usize>>;

    /// Pick any number of `options`, returned as indices. Cancelling is
    /// the same as picking nothing.
    async fn select_many(&self, message: &str, options: &[String]) -> Result<Vec<usize>>;
}
