//! Error type for construction-time failures.
//!
//! Ticks never fail. Everything here is rejected before it can reach the
//! simulation: bad tuning, degenerate path endpoints and stale handles.
use std::path::PathBuf;

use glam::Vec3;
use thiserror::Error;

use crate::entity::{ActorId, ActorKind, CollectibleId};

/// Failures reported by configuration and orchestrator-facing operations.
#[derive(Debug, Error)]
pub enum MotionError {
    /// A configuration value breaks a documented constraint.
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Human readable description of the violated constraint.
        reason: String,
    },
    /// A path was requested whose endpoints coincide in the plane.
    #[error("path from {start} to {end} has no planar length")]
    DegeneratePath {
        /// Requested start point.
        start: Vec3,
        /// Requested end point.
        end: Vec3,
    },
    /// The handle does not name a live actor.
    #[error("no live actor with id {0}")]
    UnknownActor(ActorId),
    /// The actor exists but cannot perform the requested operation.
    #[error("{actor} is a {kind:?} actor and cannot {operation}")]
    WrongKind {
        /// The addressed actor.
        actor: ActorId,
        /// Its actual role.
        kind: ActorKind,
        /// What was attempted.
        operation: &'static str,
    },
    /// The handle does not name a live collectible.
    #[error("no live collectible with id {0}")]
    UnknownCollectible(CollectibleId),
    /// A configuration file could not be read.
    #[error("failed to read configuration {path:?}")]
    ConfigIo {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A configuration document is not valid JSON for the expected schema.
    #[error("failed to parse configuration")]
    ConfigParse(#[from] serde_json::Error),
}

impl MotionError {
    /// Convenience constructor for [`MotionError::InvalidConfig`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
