//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod like;
mod post;
mod user;

pub use comment::CommentModel;
pub use like::LikeModel;
pub use post::PostModel;
pub use user::UserModel;
