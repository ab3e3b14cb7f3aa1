//! Eco-action documents, the action-type table, and votes.

use crate::geo::GeoPoint;
use crate::id::{ActionId, UserId};
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of recognised eco-action kinds.
///
/// Each kind maps to a fixed CO₂-per-unit figure and a fixed point value.
/// The table is part of the client, not the store: `co2_impact` and
/// `eco_points` are derived from it once at creation and persisted, so later
/// edits to the table never affect existing actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Cleanup,
    Tree,
    Recycle,
    Bike,
    Water,
    Energy,
    Education,
    Other,
}

impl ActionType {
    /// All action types, in display order.
    pub const ALL: [ActionType; 8] = [
        Self::Cleanup,
        Self::Tree,
        Self::Recycle,
        Self::Bike,
        Self::Water,
        Self::Energy,
        Self::Education,
        Self::Other,
    ];

    /// Kilograms of CO₂ saved per unit of this action.
    pub fn co2_per_unit(&self) -> f64 {
        match self {
            Self::Cleanup => 2.0,
            Self::Tree => 20.0,
            Self::Recycle => 1.5,
            Self::Bike => 0.15,
            Self::Water => 0.5,
            Self::Energy => 3.0,
            Self::Education => 0.0,
            Self::Other => 1.0,
        }
    }

    /// Points awarded when an action of this type is verified.
    pub fn points(&self) -> u32 {
        match self {
            Self::Cleanup => 30,
            Self::Tree => 50,
            Self::Recycle => 20,
            Self::Bike => 10,
            Self::Water => 15,
            Self::Energy => 25,
            Self::Education => 40,
            Self::Other => 20,
        }
    }

    /// Human-readable label for list and map views.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cleanup => "Trash cleanup",
            Self::Tree => "Tree planting",
            Self::Recycle => "Recycling",
            Self::Bike => "Cycling",
            Self::Water => "Water saving",
            Self::Energy => "Energy saving",
            Self::Education => "Eco education",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle state of an action.
///
/// Starts `Pending`; transitions exactly once to `Verified` or `Rejected` by
/// settlement, and is frozen thereafter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Pending,
    Verified,
    Rejected,
}

impl ActionStatus {
    /// Whether this status is terminal (no further votes or transitions).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// A photographic attachment proving an action's state (before/after).
///
/// The client treats the payload as opaque — a storage reference or an inline
/// data URL, whatever the presentation layer produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence(String);

impl Evidence {
    pub fn new(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One peer-verification vote. Append-only once cast.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub voter_id: UserId,
    pub approve: bool,
    pub cast_at: Timestamp,
}

/// A submitted eco-action document (`ecoActions` collection).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EcoAction {
    pub id: ActionId,
    /// Submitting user. Immutable after creation.
    pub author_id: UserId,
    /// Denormalised author display data for list rendering.
    pub author_name: String,
    pub author_photo: Option<String>,
    pub title: String,
    pub description: String,
    pub action_type: ActionType,
    /// Positive multiplier supplied at creation.
    pub quantity: u32,
    /// `co2_per_unit * quantity`, fixed at creation.
    pub co2_impact: f64,
    /// The type's fixed point value, fixed at creation.
    pub eco_points: u32,
    pub status: ActionStatus,
    pub evidence_before: Evidence,
    /// Present once the author marks the action complete; precondition for
    /// entering the verification queue.
    pub evidence_after: Option<Evidence>,
    pub completion_comment: Option<String>,
    pub location: Option<GeoPoint>,
    /// Ordered, append-only vote list.
    pub votes: Vec<Vote>,
    /// Denormalised counter, kept in lockstep with `votes` by the store.
    pub vote_count: u32,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

impl EcoAction {
    /// Whether `voter` has already cast a vote on this action.
    pub fn has_voted(&self, voter: &UserId) -> bool {
        self.votes.iter().any(|v| &v.voter_id == voter)
    }

    /// Number of approving votes cast so far.
    pub fn approvals(&self) -> usize {
        self.votes.iter().filter(|v| v.approve).count()
    }

    /// Whether the author has attached completion evidence.
    pub fn is_completed(&self) -> bool {
        self.evidence_after.is_some()
    }

    /// The `vote_count == votes.len()` invariant, checked by tests and the
    /// in-memory backend's integrity assertions.
    pub fn vote_count_consistent(&self) -> bool {
        self.vote_count as usize == self.votes.len()
    }
}
