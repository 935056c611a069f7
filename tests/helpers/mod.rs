//! Shared test helpers: declaration graph fixtures and review line assertions.

#![allow(dead_code)]

pub mod graph_fixtures;
pub mod line_assertions;
