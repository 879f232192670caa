//! Consultation prompt template.
//!
//! The template is a plain function over a struct of named fields, so a
//! prompt cannot be rendered with a placeholder left unfilled.

use crate::doctors::DoctorDirectory;

/// Everything the consultation prompt needs.
#[derive(Debug, Clone, Copy)]
pub struct HealthPrompt<'a> {
    /// Transcript of earlier exchanges in this session.
    pub chat_history: &'a str,
    /// The caller's symptom description, verbatim.
    pub symptoms: &'a str,
    /// Doctors the model may refer the caller to.
    pub referrals: &'a DoctorDirectory,
}

impl HealthPrompt<'_> {
    pub fn render(&self) -> String {
        let referral = match self.referrals.referral_clause() {
            Some(clause) => format!(
                "If the symptoms are too strong then ask them to consult a doctor like {} and so on.",
                clause
            ),
            None => "If the symptoms are too strong then ask them to consult a doctor.".to_string(),
        };

        format!(
            "Using the context from memory {chat_history}, analyze the following symptoms:\n\
             \n\
             Symptoms: {symptoms}\n\
             \n\
             Provide an analysis of the symptoms and describe if they indicate any serious \
             health issues that require consulting a doctor. Also, suggest any possible home \
             remedies if applicable.\n\
             {referral}\n",
            chat_history = self.chat_history,
            symptoms = self.symptoms,
            referral = referral,
        )
    }
}
