//! # Gym Security
//! 
//! Security utilities: admin session tokens and password hashing.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, IssuedToken, JwtError, JwtService};
pub use password::{PasswordError, PasswordService};
