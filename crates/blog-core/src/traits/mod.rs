//! Repository traits (ports)

mod repositories;

pub use repositories::{
    CommentRepository, LikeRepository, PostRepository, RepoResult, UserRepository,
};
