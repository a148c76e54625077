//! # blog-db
//!
//! Storage layer implementing the repository traits from `blog-core`.
//!
//! ## Overview
//!
//! - Connection pool management and embedded migrations (PostgreSQL via SQLx)
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - PostgreSQL repository implementations
//! - [`InMemoryStore`], a `DashMap`-backed implementation of every trait with
//!   the same uniqueness rules, used by tests and database-less runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blog_db::{create_pool, run_migrations, DatabaseConfig, PgLikeRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from_url("postgres://localhost/blog")).await?;
//!     run_migrations(&pool).await?;
//!     let likes = PgLikeRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::InMemoryStore;
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgCommentRepository, PgLikeRepository, PgPostRepository, PgUserRepository,
};
