pub mod ids;
pub mod reunion;

// Re-exports for convenience
pub use ids::Id;
pub use reunion::{Reunion, ReunionState};
