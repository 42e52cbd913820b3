// ABOUTME: Tests for instruction prompt composition from pet and sensor context
// ABOUTME: Covers placeholders, age computation, danger mode rendering and input sanitizing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use pet_chat_relay::llm::prompt::age_in_years;
use pet_chat_relay::llm::{build_instruction, build_instruction_at};
use pet_chat_relay::models::{PetContext, SensorSnapshot};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

fn pet(name: &str, breed: &str, birthdate: &str) -> PetContext {
    PetContext {
        name: Some(name.to_owned()),
        breed: Some(breed.to_owned()),
        birthdate: Some(birthdate.to_owned()),
    }
}

fn sensor(activity: &str, heart_rate: Option<f64>, danger: Option<bool>) -> SensorSnapshot {
    SensorSnapshot {
        activity_status: Some(activity.to_owned()),
        heart_rate,
        danger_mode: danger,
    }
}

// ============================================================================
// Placeholders
// ============================================================================

#[test]
fn test_no_context_uses_placeholders() {
    let prompt = build_instruction_at(None, None, fixed_now());

    assert!(prompt.contains("your pet"));
    assert!(prompt.contains("pet of unknown breed"));
    assert!(prompt.contains("unknown age"));
    assert!(prompt.contains("No sensor data available."));
    assert!(!prompt.is_empty());
}

#[test]
fn test_blank_fields_treated_as_absent() {
    let blank = PetContext {
        name: Some("   ".to_owned()),
        breed: Some(String::new()),
        birthdate: Some(" ".to_owned()),
    };
    let prompt = build_instruction_at(Some(&blank), None, fixed_now());

    assert!(prompt.contains("owner of your pet (pet of unknown breed, unknown age)"));
}

#[test]
fn test_empty_sensor_snapshot_renders_unknowns() {
    let prompt = build_instruction_at(None, Some(&SensorSnapshot::default()), fixed_now());

    assert!(prompt.contains("activity status: unknown"));
    assert!(prompt.contains("heart rate: no data"));
    assert!(prompt.contains("danger mode: safe"));
    assert!(!prompt.contains("No sensor data available."));
}

// ============================================================================
// Full context
// ============================================================================

#[test]
fn test_full_context_is_rendered() {
    let pet = pet("Biscuit", "Beagle", "2021-06-15T00:00:00Z");
    let sensor = sensor("running", Some(72.5), Some(false));

    let prompt = build_instruction_at(Some(&pet), Some(&sensor), fixed_now());

    assert!(prompt.contains("owner of Biscuit (Beagle, 4 years old)"));
    assert!(prompt.contains("activity status: running"));
    assert!(prompt.contains("heart rate: 72.5 bpm"));
    assert!(prompt.contains("danger mode: safe"));
    assert!(prompt.contains("Biscuit's health"));
}

#[test]
fn test_danger_mode_active() {
    let sensor = sensor("resting", None, Some(true));
    let prompt = build_instruction_at(None, Some(&sensor), fixed_now());

    assert!(prompt.contains("danger mode: ACTIVE"));
    assert!(prompt.contains("heart rate: no data"));
}

#[test]
fn test_whole_number_heart_rate() {
    let sensor = sensor("walking", Some(90.0), None);
    let prompt = build_instruction_at(None, Some(&sensor), fixed_now());

    assert!(prompt.contains("heart rate: 90 bpm"));
    assert!(prompt.contains("danger mode: safe"));
}

#[test]
fn test_instruction_is_one_line_of_joined_sentences() {
    let pet = pet("Biscuit", "Beagle", "2021-06-15");
    let prompt = build_instruction_at(Some(&pet), None, fixed_now());

    assert!(!prompt.contains('\n'));
    assert!(!prompt.contains("  "));
    assert!(prompt.starts_with("You are PawPal,"));
    assert!(prompt.contains("collar app. You are talking with the owner of Biscuit"));
    assert!(prompt.contains("Live collar data: No sensor data available. Use this context"));
    assert!(prompt.ends_with("Keep answers concise and warm."));
}

#[test]
fn test_same_inputs_same_output() {
    let pet = pet("Luna", "Husky", "2020-01-01");
    let sensor = sensor("sleeping", Some(55.0), Some(false));

    let first = build_instruction_at(Some(&pet), Some(&sensor), fixed_now());
    let second = build_instruction_at(Some(&pet), Some(&sensor), fixed_now());

    assert_eq!(first, second);
}

#[test]
fn test_control_characters_are_removed() {
    let pet = pet("Max\n\tthe\u{0007}dog", "Lab\r\n", "");
    let sensor = sensor("play\ning", None, None);

    let prompt = build_instruction_at(Some(&pet), Some(&sensor), fixed_now());

    assert!(!prompt.chars().any(char::is_control));
    assert!(prompt.contains("(Lab, unknown age)"));
}

#[test]
fn test_build_instruction_uses_current_clock() {
    let prompt = build_instruction(Some(&pet("Rex", "Boxer", "not a date")), None);

    assert!(prompt.contains("owner of Rex (Boxer, unknown age)"));
}

// ============================================================================
// Age computation
// ============================================================================

#[test]
fn test_age_two_years_at_boundary() {
    let now = fixed_now();
    let birthdate = now - Duration::minutes(730 * 24 * 60 + 12 * 60);

    assert_eq!(age_in_years(birthdate, now), Some(2));
}

#[test]
fn test_age_just_under_two_years() {
    let now = fixed_now();
    let birthdate = now - Duration::days(730);

    assert_eq!(age_in_years(birthdate, now), Some(1));

    let pet = PetContext {
        birthdate: Some(birthdate.to_rfc3339()),
        ..PetContext::default()
    };
    let prompt = build_instruction_at(Some(&pet), None, now);
    assert!(prompt.contains("1 year old"));
}

#[test]
fn test_newborn_is_zero_years() {
    let now = fixed_now();

    assert_eq!(age_in_years(now, now), Some(0));

    let pet = PetContext {
        birthdate: Some(now.to_rfc3339()),
        ..PetContext::default()
    };
    let prompt = build_instruction_at(Some(&pet), None, now);
    assert!(prompt.contains("0 years old"));
}

#[test]
fn test_date_only_birthdate() {
    let pet = pet("Milo", "Corgi", "2019-06-14");
    let prompt = build_instruction_at(Some(&pet), None, fixed_now());

    assert!(prompt.contains("(Corgi, 6 years old)"));
}

#[test]
fn test_future_birthdate_is_unknown_age() {
    let now = fixed_now();

    assert_eq!(age_in_years(now + Duration::days(1), now), None);

    let pet = pet("Pip", "Terrier", "2030-01-01");
    let prompt = build_instruction_at(Some(&pet), None, now);
    assert!(prompt.contains("unknown age"));
}

#[test]
fn test_invalid_birthdate_is_unknown_age() {
    for raw in ["yesterday", "2021-13-40", "15/06/2020"] {
        let pet = pet("Nala", "Poodle", raw);
        let prompt = build_instruction_at(Some(&pet), None, fixed_now());
        assert!(prompt.contains("unknown age"), "birthdate {raw:?}");
    }
}
