//! # blog-service
//!
//! Application layer containing the like ledger, the comment counter,
//! post/comment/account services and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    parse_post_id, AuthService, CommentService, KeyedLock, LedgerError, LikeLedger, PostService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, ToggleOutcome,
};
