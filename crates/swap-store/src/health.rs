// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Backend reachability reported to readiness probes

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reachability of a persistence backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum HealthStatus {
    /// Backend answers and accepts writes
    Up,
    /// Backend answers but is impaired
    Degraded { reason: String },
    /// Backend cannot be reached
    Down { reason: String },
}

/// Outcome of a single backend probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// The health status
    pub status: HealthStatus,
    /// How long the probe took
    pub response_time: Duration,
    /// When the probe was performed
    pub timestamp: DateTime<Utc>,
    /// Optional additional details
    pub details: Option<String>,
}

impl HealthStatus {
    /// Whether the backend can serve requests
    pub fn is_available(&self) -> bool {
        matches!(self, HealthStatus::Up | HealthStatus::Degraded { .. })
    }

    /// Whether the backend is unreachable
    pub fn is_down(&self) -> bool {
        matches!(self, HealthStatus::Down { .. })
    }

    /// Connection label used in readiness bodies
    pub fn connection_label(&self) -> &'static str {
        if self.is_available() {
            "connected"
        } else {
            "disconnected"
        }
    }

    /// Get a human-readable description of the status
    pub fn description(&self) -> &str {
        match self {
            HealthStatus::Up => "Backend is connected",
            HealthStatus::Degraded { reason } | HealthStatus::Down { reason } => reason,
        }
    }
}

impl HealthCheckResult {
    /// A probe that reached the backend
    pub fn healthy(response_time: Duration) -> Self {
        Self {
            status: HealthStatus::Up,
            response_time,
            timestamp: Utc::now(),
            details: None,
        }
    }

    /// A probe that could not reach the backend
    pub fn unhealthy(response_time: Duration, reason: String) -> Self {
        Self {
            status: HealthStatus::Down { reason },
            response_time,
            timestamp: Utc::now(),
            details: None,
        }
    }

    /// Add additional details to the probe result
    #[must_use]
    pub fn with_details(mut self, details: String) -> Self {
        self.details = Some(details);
        self
    }
}
