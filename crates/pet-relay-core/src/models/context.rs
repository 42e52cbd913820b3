// ABOUTME: Pet profile and live sensor snapshot supplied alongside a chat request
// ABOUTME: Every field is optional; absent values degrade to placeholders in the prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Pet profile used to personalize the instruction prompt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetContext {
    /// Pet name
    #[serde(default)]
    pub name: Option<String>,
    /// Pet breed
    #[serde(default)]
    pub breed: Option<String>,
    /// Birthdate as an ISO date (`2021-04-30`) or RFC 3339 timestamp
    #[serde(default)]
    pub birthdate: Option<String>,
}

impl PetContext {
    /// Parse the birthdate, accepting either a plain date (midnight UTC) or a full timestamp
    ///
    /// Returns `None` when the field is absent, blank or unparseable.
    #[must_use]
    pub fn birthdate_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.birthdate.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(timestamp.with_timezone(&Utc));
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| midnight.and_utc())
    }
}

/// Latest reading from the pet's wearable sensor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSnapshot {
    /// Free-form activity label (e.g. "resting", "running")
    #[serde(default)]
    pub activity_status: Option<String>,
    /// Heart rate in beats per minute
    #[serde(default)]
    pub heart_rate: Option<f64>,
    /// Whether the collar is currently signalling danger
    #[serde(default)]
    pub danger_mode: Option<bool>,
}

impl SensorSnapshot {
    /// Danger flag with absent treated as safe
    #[must_use]
    pub fn is_danger_active(&self) -> bool {
        self.danger_mode.unwrap_or(false)
    }
}
