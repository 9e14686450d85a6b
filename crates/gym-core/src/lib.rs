//! # Gym Core
//! 
//! Domain entities, the attendance gate, membership ledger services and
//! repository traits for the gym membership service.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;
pub mod time;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, ErrorKind};
pub use time::{Clock, SystemClock};
