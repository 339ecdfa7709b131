pub mod hold_at;
pub mod optimal;
pub mod random;
pub mod registry;

pub use hold_at::HoldAtBot;
pub use optimal::OptimalBot;
pub use random::RandomBot;
