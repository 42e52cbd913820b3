// ABOUTME: Builds the leading instruction message from optional pet and sensor context
// ABOUTME: Pure and deterministic for a given clock; absent fields degrade to placeholders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Instruction prompt composition
//!
//! The instruction is a single line of plain text. Client-supplied strings
//! are stripped of control characters so the result never needs escaping
//! beyond ordinary JSON string rules.

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use crate::constants::prompt_defaults::{
    DAYS_PER_YEAR, NO_HEART_RATE, NO_SENSOR_DATA, UNKNOWN_ACTIVITY, UNKNOWN_AGE, UNKNOWN_BREED,
    UNKNOWN_NAME,
};
use crate::models::{PetContext, SensorSnapshot};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Compose the instruction using the current time for the age computation
#[must_use]
pub fn build_instruction(pet: Option<&PetContext>, sensor: Option<&SensorSnapshot>) -> String {
    build_instruction_at(pet, sensor, Utc::now())
}

/// Compose the instruction relative to an explicit `now`
#[must_use]
pub fn build_instruction_at(
    pet: Option<&PetContext>,
    sensor: Option<&SensorSnapshot>,
    now: DateTime<Utc>,
) -> String {
    let name = pet
        .and_then(|p| clean_field(p.name.as_deref()))
        .unwrap_or(Cow::Borrowed(UNKNOWN_NAME));
    let breed = pet
        .and_then(|p| clean_field(p.breed.as_deref()))
        .unwrap_or(Cow::Borrowed(UNKNOWN_BREED));
    let age = render_age(pet.and_then(PetContext::birthdate_utc), now);
    let sensor = render_sensor(sensor);

    format!(
        "You are PawPal, a caring and knowledgeable pet care assistant built into a smart pet collar app. \
         You are talking with the owner of {name} ({breed}, {age}). \
         Live collar data: {sensor} \
         Use this context to give friendly, practical advice about {name}'s health, behaviour and wellbeing. \
         If danger mode is active, put the pet's immediate safety first. \
         Recommend contacting a veterinarian for anything that could be a medical emergency. \
         Keep answers concise and warm."
    )
}

/// Whole years elapsed between `birthdate` and `now`, using 365.25-day years
///
/// Returns `None` for a birthdate in the future.
#[must_use]
pub fn age_in_years(birthdate: DateTime<Utc>, now: DateTime<Utc>) -> Option<i64> {
    let elapsed = now.signed_duration_since(birthdate).num_seconds();
    if elapsed < 0 {
        return None;
    }
    let years = elapsed as f64 / (DAYS_PER_YEAR * SECONDS_PER_DAY);
    Some(years.floor() as i64)
}

fn render_age(birthdate: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match birthdate.and_then(|b| age_in_years(b, now)) {
        Some(1) => "1 year old".to_owned(),
        Some(years) => format!("{years} years old"),
        None => UNKNOWN_AGE.to_owned(),
    }
}

fn render_sensor(sensor: Option<&SensorSnapshot>) -> String {
    let Some(sensor) = sensor else {
        return NO_SENSOR_DATA.to_owned();
    };

    let activity = clean_field(sensor.activity_status.as_deref())
        .unwrap_or(Cow::Borrowed(UNKNOWN_ACTIVITY));
    let heart_rate = sensor
        .heart_rate
        .filter(|bpm| bpm.is_finite())
        .map_or_else(|| NO_HEART_RATE.to_owned(), |bpm| format!("{bpm} bpm"));
    let danger = if sensor.is_danger_active() {
        "ACTIVE"
    } else {
        "safe"
    };

    format!("activity status: {activity}; heart rate: {heart_rate}; danger mode: {danger}.")
}

/// Trim a client string and replace control characters; blank becomes `None`
fn clean_field(raw: Option<&str>) -> Option<Cow<'_, str>> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.chars().any(char::is_control) {
        let cleaned: String = trimmed
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        let cleaned = cleaned.trim().to_owned();
        return (!cleaned.is_empty()).then_some(Cow::Owned(cleaned));
    }
    Some(Cow::Borrowed(trimmed))
}
