//! HTTP handlers

pub mod admin;
pub mod attendance;
pub mod health;
pub mod members;
pub mod payments;
