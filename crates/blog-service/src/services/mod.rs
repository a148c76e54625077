//! Business logic services
//!
//! This module contains the service layer: validation and orchestration of
//! domain operations over the repository traits.

pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod like;
pub mod lock;
pub mod post;

pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use like::{LedgerError, LikeLedger, ToggleOutcome};
pub use lock::KeyedLock;
pub use post::{parse_post_id, PostService};
