//! Prompt templates for the generative narrative path.
//!
//! The templates embed graph facts and the avoid-map verbatim and forbid
//! the model from inventing interactions that are not in them. That is an
//! instruction, not an enforced invariant: the engine trusts but does not
//! verify the backend's output.

use crate::models::{ContraindicationMap, HerbFact};

pub const SYSTEM_PROMPT: &str = "You are an Ayurvedic wellness assistant. \
You must be cautious and include a disclaimer that you are not a doctor.";

/// Fixed-structure recommendation prompt.
pub fn recommendation_prompt(
    age: u32,
    gender: &str,
    symptoms: &[String],
    lifestyle: &[String],
    facts: &[HerbFact],
    avoid: &ContraindicationMap,
) -> String {
    format!(
        "Given:\n\
         - user demographics: age={age}, gender={gender}\n\
         - symptoms: {symptoms}\n\
         - lifestyle: {lifestyle}\n\
         - graph facts (herbs that may help and why): {facts}\n\
         - interactions/avoid lists: {avoid}\n\
         \n\
         Compose:\n\
         1) 3–5 gentle herb suggestions with short 'why' and simple 'how to use' \
         (tea, decoction, dosage ranges).\n\
         2) 3 general lifestyle tips aligned with Ayurveda (sleep, hydration, movement, stress).\n\
         3) One-paragraph caution & disclaimer.\n\
         \n\
         Return concise bullet points. \
         Do NOT invent interactions that are not in facts/avoid lists.",
        symptoms = join_or_none(symptoms),
        lifestyle = join_or_none(lifestyle),
        facts = serde_json::to_string(facts).unwrap_or_default(),
        avoid = serde_json::to_string(avoid).unwrap_or_default(),
    )
}

/// Triage prompt for diagnosis narration.
pub fn diagnosis_prompt(symptoms: &[String], lifestyle: &[String], conditions: &[String]) -> String {
    format!(
        "You are an Ayurvedic triage helper. Symptoms: {symptoms}. Lifestyle: {lifestyle}. \
         Likely conditions (from graph): {conditions}. \
         Pick 1–3 most probable and explain briefly. \
         Add a caution: this is not medical advice.",
        symptoms = join_or_none(symptoms),
        lifestyle = join_or_none(lifestyle),
        conditions = join_or_none(conditions),
    )
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
