//! # CosmicOptic
//!
//! Exoplanet detection demo service and client library.
//!
//! This crate provides the backend and front-end plumbing for a light-curve
//! analysis demo: a REST API that classifies pre-loaded or uploaded stellar
//! signals (currently a synthetic generator standing in for a future ML
//! model), a pure chart-geometry core that turns analysis results into
//! drawable plot descriptions, and an HTTP client plus session state
//! machine for driving the API from a UI.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: wire types (DTOs) shared by the server and the client
//! - [`models`]: analysis result types and the built-in sample catalog
//! - [`chart`]: pure renderers mapping time series to [`chart::PlotSpec`]s
//! - [`services`]: light-curve synthesis, SHAP-style explanation, and the
//!   prediction service
//! - [`client`]: reqwest-based API client and the analysis session
//!   orchestrator
//! - [`http`]: axum-based HTTP server and request handlers
//!
//! ## Determinism
//!
//! Every prediction is reproducible: synthetic noise is seeded from the
//! sample id, confidence comes from a stable hash, and the chart renderers
//! are pure functions, so identical inputs always yield identical output.

pub mod api;

pub mod chart;

pub mod client;

pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
