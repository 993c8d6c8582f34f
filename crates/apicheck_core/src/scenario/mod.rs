//! Scenario DSL and runner.
//!
//! A [`Scenario`] is an ordered list of dependent HTTP steps with assertions.
//! Steps run strictly in order; ids produced by creates are bound to aliases
//! and consumed by later steps; the first failing step aborts the scenario.

mod assertions;
mod dsl;
mod runner;
mod steps;

pub use assertions::{Assertion, ScenarioContext};
pub use dsl::{Scenario, ScenarioResult};
pub use runner::ScenarioRunner;
pub use steps::{AuthMode, Expect, PostRef, ScenarioStep};
