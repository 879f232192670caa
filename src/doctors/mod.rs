//! Doctor referral data.
//!
//! Two independent contact sets exist and both are configurable:
//!
//! - the **directory**, a structured mapping from symptom category to a doctor;
//! - the **prompt referrals**, the contacts quoted to the model in the prompt text.
//!
//! Their defaults disagree (different spellings and phone numbers). Neither is
//! derived from the other; [`ReferralSource`] selects which one feeds the prompt.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named doctor and a phone number to reach them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorContact {
    pub name: String,
    /// Kept as text: leading zeros are significant.
    pub phone: String,
}

impl DoctorContact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

/// Which contact set is rendered into the consultation prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferralSource {
    /// The contacts historically hard-coded into the prompt text.
    #[default]
    Prompt,
    /// The structured category directory.
    Directory,
}

/// Mapping from a symptom category label to a doctor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoctorDirectory {
    entries: BTreeMap<String, DoctorContact>,
}

impl DoctorDirectory {
    pub fn new(entries: BTreeMap<String, DoctorContact>) -> Self {
        Self { entries }
    }

    pub fn get(&self, category: &str) -> Option<&DoctorContact> {
        self.entries.get(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &DoctorContact)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the contacts as a referral list for the prompt, e.g.
    /// `Robin Kahn (contact - 8646530986) for eye problem`.
    ///
    /// Returns `None` when there is nobody to refer to.
    pub fn referral_clause(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }

        Some(
            self.iter()
                .map(|(category, doctor)| {
                    format!("{} (contact - {}) for {}", doctor.name, doctor.phone, category)
                })
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

impl FromIterator<(String, DoctorContact)> for DoctorDirectory {
    fn from_iter<I: IntoIterator<Item = (String, DoctorContact)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// The structured category directory shipped by default.
pub fn default_directory() -> DoctorDirectory {
    [
        ("Eye", DoctorContact::new("Robin Kahn", "8762037849")),
        (
            "Cold and Headache",
            DoctorContact::new("Sam keatings", "986394809"),
        ),
    ]
    .into_iter()
    .map(|(category, doctor)| (category.to_string(), doctor))
    .collect()
}

/// The contacts quoted in the prompt text by default.
pub fn default_prompt_referrals() -> DoctorDirectory {
    [
        ("eye problem", DoctorContact::new("Robin Kahn", "8646530986")),
        ("cold", DoctorContact::new("Sam Keatings", "0098643209")),
    ]
    .into_iter()
    .map(|(category, doctor)| (category.to_string(), doctor))
    .collect()
}
