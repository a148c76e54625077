//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in blog-core.
//! Each repository handles database operations for a specific domain entity.

mod comment;
mod error;
mod like;
mod post;
mod user;

pub use comment::PgCommentRepository;
pub use like::PgLikeRepository;
pub use post::PgPostRepository;
pub use user::PgUserRepository;
