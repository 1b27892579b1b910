pub mod calculations;
pub mod dimensions;
pub mod engine;
pub mod enrichment;
pub mod jitter;
pub mod profile;
pub mod reference;

pub use dimensions::{Dimension, ScoringContext};
pub use engine::{score_crops, SuitabilityEngine};
pub use profile::{ScoringProfile, TierThresholds, Variant, Weights};
pub use reference::ReferenceTables;
