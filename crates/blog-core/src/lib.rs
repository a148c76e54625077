//! # blog-core
//!
//! Domain layer containing entities, identifiers, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Comment, Like, Post, PostPatch, User};
pub use error::DomainError;
pub use traits::{CommentRepository, LikeRepository, PostRepository, RepoResult, UserRepository};
pub use value_objects::{CommentId, IdParseError, LikeId, PostId, UserId};
