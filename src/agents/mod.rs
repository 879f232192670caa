/// Symptom analysis agent.
pub mod health;

use crate::types::{AgentContext, Result};
use async_trait::async_trait;

pub use health::HealthAgent;

/// Base trait for all agents
#[async_trait]
pub trait Agent: Send + Sync {
    /// Execute the agent with given input and context
    async fn execute(&self, input: &str, context: &AgentContext) -> Result<String>;

    /// Short identifier used in logs
    fn name(&self) -> &'static str;
}
