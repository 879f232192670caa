use crate::{
    agents::Agent,
    doctors::DoctorDirectory,
    llm::LLMClient,
    memory::format_history_for_prompt,
    prompts::HealthPrompt,
    types::{AgentContext, Result},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Analyses symptoms against the session history and suggests next steps.
pub struct HealthAgent {
    llm: Box<dyn LLMClient>,
    referrals: Arc<DoctorDirectory>,
}

impl HealthAgent {
    pub fn new(llm: Box<dyn LLMClient>, referrals: Arc<DoctorDirectory>) -> Self {
        Self { llm, referrals }
    }

    /// The exact prompt sent to the model for this input and context.
    pub fn build_prompt(&self, input: &str, context: &AgentContext) -> String {
        let chat_history = format_history_for_prompt(&context.conversation_history);

        HealthPrompt {
            chat_history: &chat_history,
            symptoms: input,
            referrals: &self.referrals,
        }
        .render()
    }
}

#[async_trait]
impl Agent for HealthAgent {
    async fn execute(&self, input: &str, context: &AgentContext) -> Result<String> {
        let prompt = self.build_prompt(input, context);

        debug!(
            agent = self.name(),
            session_id = %context.session_id,
            history = context.conversation_history.len(),
            model = self.llm.model_name(),
            "Invoking completion"
        );

        self.llm.generate(&prompt).await
    }

    fn name(&self) -> &'static str {
        "health"
    }
}
