//! Instruction template sent to the generation provider.

use crate::catalog;

/// Fixed instruction text wrapped around a student's concern.
///
/// The service list is rendered once at construction; `render` only splices
/// in the concern.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    clinic_name: String,
    services_block: String,
}

impl PromptTemplate {
    pub fn new(clinic_name: impl Into<String>, services: &[&str]) -> Self {
        Self {
            clinic_name: clinic_name.into(),
            services_block: catalog::bulleted(services),
        }
    }

    /// Compose the full prompt. The concern is embedded verbatim; template
    /// lines carry no leading indentation.
    pub fn render(&self, concern: &str) -> String {
        let clinic = &self.clinic_name;
        format!(
            "Based on the user's health concern, determine if {clinic} can help and provide brief guidance for making an appointment.

Available Services at {clinic}:
{services}

User's Health Concern: {concern}

IMPORTANT RULES:
1. First, state if {clinic} can address their concern
2. If yes, tell them which specific service to select when making an appointment
3. Be brief, friendly, and practical (2-3 sentences max)
4. Example format: \"Yes, {clinic} can help with your headache. When making an appointment, select 'Headaches' as your reason for visit.\"
5. If their concern doesn't match any service, say \"{clinic} may not offer a specific service for this concern. Consider scheduling a general appointment or contacting them directly for guidance.\"
",
            services = self.services_block,
        )
    }
}
