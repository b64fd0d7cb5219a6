//! Projection and boom probability engine
//!
//! Combines recent form, opponent defense strength, home-field context, and
//! usage share into a weighted composite score, then derives a projected
//! point total and a breakout ("boom") probability from it. The projection
//! is an explicit, tunable heuristic for ranking players, not a calibrated
//! statistical model.

mod defense;
mod projector;
mod weights;

pub use defense::DefenseRatingIndex;
pub use projector::{Projection, Projector};
pub use weights::ProjectionWeights;
