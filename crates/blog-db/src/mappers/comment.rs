//! Comment model -> entity mapper

use blog_core::entities::Comment;
use blog_core::value_objects::{CommentId, PostId, UserId};

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: CommentId::from_uuid(model.id),
            post_id: PostId::from_uuid(model.post_id),
            author_id: UserId::from_uuid(model.author_id),
            text: model.text,
            created_at: model.created_at,
        }
    }
}
