use reqwest::Method;

use crate::domain::types::UserId;
use crate::domain::user::{NewUser, UpdateUser, User, UserRole};
use crate::models::product::ActivePayload;
use crate::models::user::{User as WireUser, UserPayload};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    HttpRepository, ListParams, ListQuery, Page, QueryPairs, UserReader, UserWriter,
    list_query_builders, sort_field,
};

sort_field!(UserSort {
    Name => "name",
    Role => "role",
    CreatedAt => "created_at",
});

#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub params: ListParams<UserSort>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

impl UserListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    list_query_builders!(UserSort);

    pub fn role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

impl ListQuery for UserListQuery {
    fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        self.params.push_pairs(&mut pairs);
        if let Some(role) = &self.role {
            pairs.push(("role", role.as_str().to_string()));
        }
        if let Some(is_active) = self.is_active {
            pairs.push(("is_active", is_active.to_string()));
        }
        pairs
    }
}

impl UserReader for HttpRepository {
    async fn get_user(&self, id: UserId) -> RepositoryResult<Option<User>> {
        self.fetch_one::<WireUser, _>(&format!("users/{id}"), QueryPairs::new())
            .await
    }

    async fn list_users(&self, query: UserListQuery) -> RepositoryResult<Page<User>> {
        self.fetch_page::<WireUser, _>("users", query.query_pairs())
            .await
    }
}

impl UserWriter for HttpRepository {
    async fn create_user(&self, new: &NewUser) -> RepositoryResult<User> {
        self.send::<_, WireUser, _>(Method::POST, "users", &UserPayload::from(new))
            .await
    }

    async fn update_user(&self, id: UserId, updates: &UpdateUser) -> RepositoryResult<User> {
        self.send::<_, WireUser, _>(
            Method::PUT,
            &format!("users/{id}"),
            &UserPayload::from(updates),
        )
        .await
    }

    async fn set_user_active(&self, id: UserId, is_active: bool) -> RepositoryResult<User> {
        self.send::<_, WireUser, _>(
            Method::PATCH,
            &format!("users/{id}"),
            &ActivePayload { is_active },
        )
        .await
    }

    async fn delete_user(&self, id: UserId) -> RepositoryResult<()> {
        self.remove(&format!("users/{id}")).await
    }
}
