//! User model -> entity mapper

use blog_core::entities::User;
use blog_core::value_objects::UserId;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::from_uuid(model.id),
            email: model.email,
            created_at: model.created_at,
        }
    }
}
