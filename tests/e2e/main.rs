//! End-to-end tests: the apicheck scenario DSL against an in-process fake API.

mod scenarios;
