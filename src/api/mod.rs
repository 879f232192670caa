//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer, built on the Axum web framework.
//!
//! # API Endpoints
//!
//! - `POST /consult` - Analyse symptoms, returns `{"health_advice": "..."}`
//! - `GET /health` - Health check with provider and memory info
//! - `GET /openapi.json` - OpenAPI document
//!
//! Errors are returned as `{"detail": "..."}`.
//!
//! # Sessions
//!
//! With `memory.scope = "session"` the consultation history is keyed by the
//! `x-session-id` header (configurable). Omit it on the first call and reuse
//! the value returned in the response header.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
