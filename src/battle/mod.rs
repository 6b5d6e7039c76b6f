pub mod action;
pub mod ai;
pub mod calculators;
pub mod effects;
pub mod engine;
pub mod events;
pub mod flee;
pub mod outcome;
pub mod runner;
pub mod selectors;
pub mod state;
pub mod stats;
pub mod turn_order;

#[cfg(test)]
mod tests;
