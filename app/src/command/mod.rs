//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input type, so
//! dispatch is resolved at compile time.

use memgate_config::Config;
use memgate_core::QueryGate;

mod check;
mod expand;
mod info;
mod init;
mod risk;
mod version;

pub use check::{CheckInput, CheckStrategy};
pub use expand::ExpandStrategy;
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use risk::RiskStrategy;
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// # Example
/// ```ignore
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         // Command logic here
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// A compiled gate plus the query text it should judge.
#[derive(Debug, Clone)]
pub struct QueryInput {
    pub gate: QueryGate,
    /// Words from the command line joined by single spaces.
    pub query: String,
}

impl QueryInput {
    pub fn new(config: &Config, words: &[String]) -> anyhow::Result<Self> {
        Ok(Self {
            gate: config.build_gate()?,
            query: words.join(" "),
        })
    }
}
