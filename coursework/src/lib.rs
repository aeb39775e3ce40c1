//! Introductory exercise programs and their metadata tooling.
//!
//! Each exercise is a small stdin → stdout program ([`exercise::Exercise`])
//! that carries a metadata block declaring its test cases
//! ([`metadata::ExerciseMeta`]). The library also holds the in-process
//! verifier ([`verify`]) that checks every exercise against its own cases.

pub mod cli;
pub mod config;
pub mod exercise;
pub mod exercises;
pub mod exit_codes;
pub mod input;
pub mod logging;
pub mod metadata;
pub mod outcome;
pub mod render;
pub mod report;
pub mod shared;
pub mod verify;
