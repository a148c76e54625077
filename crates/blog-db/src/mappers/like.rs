//! Like model -> entity mapper

use blog_core::entities::Like;
use blog_core::value_objects::{LikeId, PostId, UserId};

use crate::models::LikeModel;

impl From<LikeModel> for Like {
    fn from(model: LikeModel) -> Self {
        Like {
            id: LikeId::from_uuid(model.id),
            post_id: PostId::from_uuid(model.post_id),
            user_id: UserId::from_uuid(model.user_id),
            created_at: model.created_at,
        }
    }
}
