pub mod bot;
pub mod policy;

pub use bot::{BidPlanner, BotParams, PlayPlanner, TrumpStrength};
pub use policy::{HeuristicPolicy, Policy, PolicyContext};
