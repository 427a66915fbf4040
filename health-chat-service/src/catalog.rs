//! Services offered by the health center, as listed on its appointment form.
//!
//! Entries are kept verbatim (spelling included) so the model can quote the
//! exact option a student has to pick.

pub const CLINIC_SERVICES: &[&str] = &[
    "Self Order Test Only - STI (No Symptoms)",
    "Tuberculosis (TB) - Self Order",
    "Acne Condition",
    "Allergies/Sinus Problem",
    "Anxiety/Stress (Not with counseling)",
    "Asthma (NO trouble breathing now)",
    "Birth Control Problems",
    "Birth Control Starting or Changing",
    "Breast problem(s)",
    "Cold/Cough",
    "Depression (Not with counseling)",
    "Discuss a Private Matter",
    "Earache or Ear Problem",
    "Eye problem",
    "Fatigue",
    "Fever",
    "Finger or Toenail Problem",
    "Headaches",
    "Mesntrual Problem",
    "Mental Health Concern (NOT Counseling) Initial",
    "Mouth/Oral Problem (NOT sore throat)",
    "Pain (Ongoing) (Back, Arm, Leg, Hand, Etc.)",
    "Rash/Skin Concern/Problem",
    "Rash/Skin, Infection",
    "Rash/Skin, Poision Oak",
    "Rectal/Anal Problem",
    "Sexual Health Concern (Penis/Testicles)",
    "Sexual Health Concern (Uterus/Vagina)",
    "Sleeping Problems",
    "Sore Throat",
    "Stomach or Digestive Problem",
    "Urinary Symptoms (pain, burning, frequency)",
    "Vaginal Symptoms (Itching/Irritation)",
    "Well Woman Exam w/Pap (age 21+) chages may apply",
];

/// One `- <service>` line per entry, in catalog order.
pub fn bulleted(services: &[&str]) -> String {
    services
        .iter()
        .map(|service| format!("- {}", service))
        .collect::<Vec<_>>()
        .join("\n")
}
