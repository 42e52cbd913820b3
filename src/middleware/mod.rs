// ABOUTME: HTTP middleware for the relay
// ABOUTME: Cross-origin request filtering by caller origin
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS layer built from the origin allow-list
pub mod cors;

pub use cors::setup_cors;
