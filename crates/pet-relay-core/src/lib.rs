// ABOUTME: Core crate for the pet chat relay shared by the server and its tests
// ABOUTME: Holds the request-scoped data model and the unified error type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pet Relay Core
//!
//! Types that every layer of the relay agrees on:
//!
//! - [`models`]: client chat messages, pet and sensor context, and the
//!   normalized provider turn format
//! - [`errors`]: [`errors::ErrorCode`], [`errors::AppError`] and the JSON error
//!   envelope returned on every failure
//!
//! Enable the `http-response` feature to get an axum `IntoResponse`
//! implementation for [`errors::AppError`].

/// Unified error type and error envelope
pub mod errors;

/// Request-scoped data model
pub mod models;
