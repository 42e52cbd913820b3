// ABOUTME: Content generation route: chat history plus pet/sensor context in, model reply out
// ABOUTME: Composes the instruction, normalizes the history and dispatches to the backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Generation routes
//!
//! `POST /api/generate-content` is the relay's only business endpoint. The
//! body is decoded into the strict data model at the boundary; any decoding
//! failure is answered with the same 400 envelope as a validation failure.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::llm::{build_instruction, dispatch, normalize, DispatchMode};
use crate::models::{ChatMessage, PetContext, SensorSnapshot};
use crate::resources::ServerResources;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to generate a reply
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation so far, oldest first
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,
    /// Pet profile
    #[serde(default)]
    pub pet_data: Option<PetContext>,
    /// Latest collar reading
    #[serde(default)]
    pub sensor_data: Option<SensorSnapshot>,
}

/// Generated reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentResponse {
    /// Model reply text
    pub content: String,
}

// ============================================================================
// Generate Routes
// ============================================================================

/// Generation routes handler
pub struct GenerateRoutes;

impl GenerateRoutes {
    /// Create the generation route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/generate-content", post(Self::generate_content))
            .with_state(resources)
    }

    /// Handle `POST /api/generate-content`
    async fn generate_content(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<GenerateContentRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let started = Instant::now();
        let result = Self::process(&resources, payload).await;

        match &result {
            Ok(_) => info!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Generated content"
            ),
            Err(e) if e.code.is_client_error() => warn!(
                error = %e,
                details = e.details.as_deref().unwrap_or_default(),
                "Rejected generate-content request"
            ),
            Err(e) => error!(
                error = %e,
                details = e.details.as_deref().unwrap_or_default(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Content generation failed"
            ),
        }

        result.map(|content| {
            (StatusCode::OK, Json(GenerateContentResponse { content })).into_response()
        })
    }

    async fn process(
        resources: &ServerResources,
        payload: Result<Json<GenerateContentRequest>, JsonRejection>,
    ) -> Result<String, AppError> {
        let Json(request) = payload.map_err(Self::rejection_to_error)?;

        let instruction =
            build_instruction(request.pet_data.as_ref(), request.sensor_data.as_ref());
        let sequence = normalize(&instruction, request.messages.as_deref())?;

        info!(
            turns = sequence.len(),
            mode = ?DispatchMode::for_len(sequence.len()),
            has_pet_data = request.pet_data.is_some(),
            has_sensor_data = request.sensor_data.is_some(),
            "Dispatching conversation"
        );

        dispatch(resources.backend.as_ref(), &sequence).await
    }

    /// Map a JSON extractor rejection into the 400 envelope
    fn rejection_to_error(rejection: JsonRejection) -> AppError {
        AppError::invalid_format("invalid request body").with_details(rejection.body_text())
    }
}
