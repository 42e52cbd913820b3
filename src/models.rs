// ABOUTME: Re-export of the request-scoped data model from the core crate
// ABOUTME: Chat messages, pet/sensor context and normalized provider turns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use pet_relay_core::models::*;
