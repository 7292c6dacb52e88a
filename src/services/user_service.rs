//! User service - profile management and account deactivation.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Actor, UpdateProfile, User, UserSkill};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::with_transaction;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// The actor's own profile
    async fn get_profile(&self, actor: &Actor) -> AppResult<User>;

    /// Update profile fields
    async fn update_profile(&self, actor: &Actor, data: UpdateProfile) -> AppResult<User>;

    /// The actor's skill set
    async fn get_skills(&self, actor: &Actor) -> AppResult<Vec<UserSkill>>;

    /// Replace the actor's whole skill set atomically
    async fn replace_skills(&self, actor: &Actor, skills: Vec<UserSkill>) -> AppResult<()>;

    /// Deactivate the account: clears the active flag and tombstones the
    /// email so the address can be reused
    async fn deactivate_account(&self, actor: &Actor) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_profile(&self, actor: &Actor) -> AppResult<User> {
        self.uow.users().find_by_id(actor.id).await?.ok_or_not_found("User")
    }

    async fn update_profile(&self, actor: &Actor, data: UpdateProfile) -> AppResult<User> {
        self.uow.users().update_profile(actor.id, data.name).await
    }

    async fn get_skills(&self, actor: &Actor) -> AppResult<Vec<UserSkill>> {
        self.uow.users().list_skills(actor.id).await
    }

    async fn replace_skills(&self, actor: &Actor, skills: Vec<UserSkill>) -> AppResult<()> {
        let mut seen = std::collections::HashSet::new();
        for skill in &skills {
            if !seen.insert(skill.skill_id) {
                return Err(AppError::validation("duplicate skill in skill list"));
            }
        }

        let ids: Vec<Uuid> = skills.iter().map(|s| s.skill_id).collect();
        let found = self.uow.skills().find_existing_ids(ids.clone()).await?;
        if found.len() != ids.len() {
            return Err(AppError::not_found("Skill"));
        }

        let user_id = actor.id;
        with_transaction!(self.uow, |ctx| {
            ctx.users().replace_skills(user_id, &skills).await
        })
    }

    async fn deactivate_account(&self, actor: &Actor) -> AppResult<()> {
        self.uow
            .users()
            .deactivate(actor.id, User::tombstone_email())
            .await
    }
}
