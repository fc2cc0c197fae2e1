//! Test-drive lead form.

use std::collections::BTreeMap;

use crate::events::LeadPrefill;
use crate::formatting::{format_thousands, format_usd};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub vehicle: String,
    pub message: String,
}

impl LeadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill vehicle and message from a card's "test drive" request.
    pub fn apply_prefill(&mut self, prefill: &LeadPrefill) {
        self.vehicle = prefill.title.clone();
        self.message = prefill_message(prefill);
    }

    /// Key/value body for the lead endpoint. Blank fields are omitted.
    pub fn payload(&self) -> BTreeMap<&'static str, String> {
        [
            ("name", &self.name),
            ("phone", &self.phone),
            ("email", &self.email),
            ("vehicle", &self.vehicle),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| (key, value.trim().to_string()))
        .collect()
    }
}

pub fn prefill_message(prefill: &LeadPrefill) -> String {
    let mut message = format!(
        "Hi, I'm interested in a test drive. Vehicle: {}",
        prefill.title
    );
    if let Some(price) = prefill.price.filter(|p| p.is_finite()) {
        message.push_str(&format!(" · Price: {}", format_usd(price)));
    }
    if let Some(miles) = prefill.miles.filter(|m| m.is_finite() && *m >= 0.0) {
        message.push_str(&format!(" · Miles: {} mi", format_thousands(miles.round() as u64)));
    }
    message
}
