//! # Gym Infrastructure
//! 
//! PostgreSQL implementations of the gym-core repository ports.

pub mod database;

pub use database::{
    create_pool, run_migrations, PgAdminRepository, PgAttendanceRepository, PgMemberRepository,
    PgPaymentRepository,
};
