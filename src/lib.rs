//! Relay Pair - Member pairing service for the Relay membership network
//!
//! This library provides the pairing engine used to suggest recurring 1:1
//! meetings between members: context aggregation over meeting history,
//! weighted rule-based pair scoring, and greedy conflict-free selection.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{build_context, select_pairs, score_pairs, CycleContext, CycleResult, EngineSettings, PairKey, PairingEngine};
pub use models::{Member, MemberStatus, MeetingRecord, MeetingState, ResponseRecord, Rule, RuleScore, ScoredPair};
