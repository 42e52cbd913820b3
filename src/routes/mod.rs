// ABOUTME: Route module organization for the relay HTTP endpoints
// ABOUTME: Each domain module owns its route definitions and thin handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the pet chat relay
//!
//! Handlers stay thin: they decode the request, call into [`crate::llm`], and
//! convert every failure into the `{error, details?}` envelope.

/// Content generation route (`POST /api/generate-content`)
pub mod generate;

/// Health check route (`GET /api/health`)
pub mod health;

pub use generate::GenerateRoutes;
pub use health::HealthRoutes;
