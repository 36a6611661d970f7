//! # parallax-adaptive
//!
//! Decides *when* comparison work happens: a per-user adaptive threshold
//! tuned by recorded comparison outcomes, and an activity scheduler that
//! counts learner-graph updates and triggers the comparator when the
//! threshold is reached.

pub mod scheduler;
pub mod threshold;

pub use scheduler::ActivityScheduler;
pub use threshold::ThresholdController;
