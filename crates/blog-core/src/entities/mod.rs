//! Domain entities - core business objects

mod comment;
mod like;
mod post;
mod user;

pub use comment::Comment;
pub use like::Like;
pub use post::{Post, PostPatch};
pub use user::{normalize_email, User};
