// ABOUTME: Re-export of the unified error types from the core crate
// ABOUTME: Keeps crate::errors paths stable for handlers and the backend client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use pet_relay_core::errors::{AppError, AppResult, ErrorCode, ErrorEnvelope};
