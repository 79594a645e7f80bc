//! Core types shared by every timetable-admin crate.
//!
//! This crate provides the `Result` alias used for layered error context and
//! the opaque identifier types handed out by the backend API.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ChoiceFormId, DepartmentId, UserId};
