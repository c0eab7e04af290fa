// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    MeetingRecord, MeetingState, Member, MemberStatus, ResponseOutcome, ResponseRecord, Rule,
    RuleScore, ScoredPair,
};
pub use requests::RunCycleRequest;
pub use responses::{ErrorResponse, HealthResponse, RulesResponse, RunCycleResponse};
