// Core pairing pipeline exports
pub mod context;
pub mod engine;
pub mod pair;
pub mod rules;
pub mod scorer;
pub mod selector;

pub use context::{build_context, CycleContext};
pub use engine::{CycleResult, EngineSettings, PairingEngine, DEFAULT_CADENCE_LOOKBACK_DAYS};
pub use pair::PairKey;
pub use rules::{evaluate, NEUTRAL_SCORE};
pub use scorer::score_pairs;
pub use selector::select_pairs;
