use skincart_core::{Role, UserId};

use crate::dto::{ProfileUpdate, RoleUpdate, UserProfile};
use crate::error::ClientError;
use crate::http::{ApiClient, segment};

impl ApiClient {
    pub async fn current_user(&self) -> Result<UserProfile, ClientError> {
        self.get_json("/users/me").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ClientError> {
        self.put_json("/users/me", update).await
    }

    /// Manager only.
    pub async fn list_users(&self) -> Result<Vec<UserProfile>, ClientError> {
        self.get_json("/users").await
    }

    pub async fn get_user(&self, id: &UserId) -> Result<UserProfile, ClientError> {
        self.get_json(&format!("/users/{}", segment(id.as_str()))).await
    }

    /// Manager only.
    pub async fn change_role(&self, id: &UserId, role: Role) -> Result<UserProfile, ClientError> {
        tracing::info!(user = %id, %role, "changing user role");
        self.put_json(&format!("/users/{}/role", segment(id.as_str())), &RoleUpdate { role })
            .await
    }

    /// Manager only.
    pub async fn delete_user(&self, id: &UserId) -> Result<(), ClientError> {
        tracing::info!(user = %id, "deleting user");
        self.delete(&format!("/users/{}", segment(id.as_str()))).await
    }
}
