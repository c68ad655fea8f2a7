//! Prompt construction for the advisory calls.
//!
//! Prompts embed the child's profile (age in completed years, gender,
//! serialized medical history and milestones) plus whatever context the
//! caller supplied, and ask the model for a JSON reply matching the
//! structured content types in `shared`.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use shared::{CarePlan, Child, HealthRecord, Reminder};

/// Age in completed years as of `today`.
pub fn age_in_years(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

fn json_block<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

pub fn personalized_tip(child: &Child, context: &str, today: NaiveDate) -> String {
    format!(
        "As an AI pediatric health assistant, provide personalized advice for a child \
         based on the following information:\n\n\
         Child Information:\n\
         - Name: {name}\n\
         - Age: {age} years old\n\
         - Gender: {gender}\n\
         - Medical History: {history}\n\
         - Development Milestones: {milestones}\n\n\
         Context: {context}\n\n\
         Please provide:\n\
         1. A personalized health tip (2-3 sentences)\n\
         2. A developmental milestone to watch for\n\
         3. A safety recommendation\n\
         4. A nutrition suggestion\n\n\
         Format your response as JSON with these keys: tip, milestone, safety, nutrition",
        name = child.name,
        age = age_in_years(child.date_of_birth, today),
        gender = child.gender,
        history = json_block(&child.medical_history),
        milestones = json_block(&child.development_milestones),
        context = context,
    )
}

pub fn care_plan(child: &Child, specific_needs: &str, today: NaiveDate) -> String {
    format!(
        "Create a comprehensive care plan for a child with the following information:\n\n\
         Child Information:\n\
         - Name: {name}\n\
         - Age: {age} years old\n\
         - Medical History: {history}\n\
         - Current Development: {milestones}\n\n\
         Specific Needs: {needs}\n\n\
         Please create a care plan that includes:\n\
         1. Daily routine recommendations\n\
         2. Health monitoring tasks\n\
         3. Developmental activities\n\
         4. Safety measures\n\
         5. Nutrition guidelines\n\n\
         Format as JSON with these sections: dailyRoutine, healthMonitoring, activities, \
         safety, nutrition",
        name = child.name,
        age = age_in_years(child.date_of_birth, today),
        history = json_block(&child.medical_history),
        milestones = json_block(&child.development_milestones),
        needs = specific_needs,
    )
}

pub fn health_insight(child: &Child, records: &[HealthRecord], today: NaiveDate) -> String {
    format!(
        "Analyze the following health data for a child and provide insights:\n\n\
         Child: {name}, Age: {age} years\n\
         Health Records: {records}\n\n\
         Provide insights on:\n\
         1. Health trends\n\
         2. Areas of concern\n\
         3. Recommendations\n\
         4. Upcoming milestones to watch\n\n\
         Format as JSON with: trends, concerns, recommendations, milestones",
        name = child.name,
        age = age_in_years(child.date_of_birth, today),
        records = json_block(&records),
    )
}

pub fn chat(child: Option<&Child>, message: &str, context: Option<&str>, today: NaiveDate) -> String {
    let child_block = match child {
        Some(child) => format!(
            "Child Information:\n\
             - Name: {name}\n\
             - Age: {age} years old\n\
             - Gender: {gender}\n\
             - Medical History: {history}\n",
            name = child.name,
            age = age_in_years(child.date_of_birth, today),
            gender = child.gender,
            history = json_block(&child.medical_history),
        ),
        None => String::new(),
    };

    format!(
        "You are an AI pediatric health assistant. A parent is asking for help with \
         their child.\n\n\
         {child_block}\n\
         Parent's question: {message}\n\n\
         Context: {context}\n\n\
         Please provide helpful, accurate, and supportive advice. Remember to:\n\
         1. Be encouraging and supportive\n\
         2. Provide practical advice\n\
         3. Suggest consulting healthcare professionals when appropriate\n\
         4. Keep responses concise but informative",
        child_block = child_block,
        message = message,
        context = context.unwrap_or("General parenting question"),
    )
}

pub fn daily_summary(
    child: &Child,
    recent_records: &[HealthRecord],
    active_reminders: &[Reminder],
    care_plans: &[CarePlan],
    today: NaiveDate,
) -> String {
    format!(
        "Generate a daily summary for a parent about their child's health and care \
         needs.\n\n\
         Child: {name}, Age: {age} years\n\n\
         Recent Health Records: {records}\n\
         Active Reminders: {reminders}\n\
         Care Plans: {plans}\n\n\
         Provide:\n\
         1. Today's priorities\n\
         2. Health reminders\n\
         3. Developmental focus areas\n\
         4. General encouragement\n\n\
         Keep it concise and actionable.",
        name = child.name,
        age = age_in_years(child.date_of_birth, today),
        records = json_block(&recent_records),
        reminders = json_block(&active_reminders),
        plans = json_block(&care_plans),
    )
}
