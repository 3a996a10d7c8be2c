//! Shared application context: session user, credits and generated covers.
//!
//! Forms receive the context explicitly through `FormServices` and only
//! touch it through the `AppContext` contract.

use std::future::Future;
use std::pin::Pin;
use std::sync::{PoisonError, RwLock};

use crate::api::{ApiError, GenClient, UserInfoResponse};
use crate::models::{Cover, User};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Update applied to the cover list.
pub enum CoverUpdate {
    Replace(Vec<Cover>),
    Apply(Box<dyn FnOnce(Vec<Cover>) -> Vec<Cover> + Send>),
}

impl CoverUpdate {
    pub fn apply(f: impl FnOnce(Vec<Cover>) -> Vec<Cover> + Send + 'static) -> Self {
        CoverUpdate::Apply(Box::new(f))
    }

    /// Put `cover` in front of the existing list.
    pub fn prepend(cover: Cover) -> Self {
        Self::apply(move |covers| {
            let mut next = Vec::with_capacity(covers.len() + 1);
            next.push(cover);
            next.extend(covers);
            next
        })
    }

    pub fn resolve(self, previous: Vec<Cover>) -> Vec<Cover> {
        match self {
            CoverUpdate::Replace(covers) => covers,
            CoverUpdate::Apply(f) => f(previous),
        }
    }
}

impl std::fmt::Debug for CoverUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoverUpdate::Replace(covers) => f.debug_tuple("Replace").field(covers).finish(),
            CoverUpdate::Apply(_) => f.write_str("Apply(..)"),
        }
    }
}

/// Read/write contract of the shared application state.
pub trait AppContext: Send + Sync {
    /// Current session user, if signed in.
    fn user(&self) -> Option<User>;

    fn covers(&self) -> Vec<Cover>;

    fn set_covers(&self, update: CoverUpdate);

    /// Refresh the user and credit snapshot.
    fn fetch_user_info(&self) -> BoxFuture<'_, ()>;
}

/// Session-lifetime store backed by the generation backend.
#[derive(Debug)]
pub struct SessionContext {
    client: GenClient,
    user: RwLock<Option<User>>,
    covers: RwLock<Vec<Cover>>,
}

impl SessionContext {
    pub fn new(client: GenClient) -> Self {
        Self {
            client,
            user: RwLock::new(None),
            covers: RwLock::new(Vec::new()),
        }
    }

    pub fn with_user(client: GenClient, user: User) -> Self {
        let ctx = Self::new(client);
        ctx.set_user(Some(user));
        ctx
    }

    pub fn set_user(&self, user: Option<User>) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = user;
    }

    /// Load the session user from the backend.
    ///
    /// A 401 (or an empty snapshot) signs the session out. Transport failures
    /// and rejected snapshots leave the current user in place.
    pub async fn load_user(&self) -> Result<(), ApiError> {
        match self.client.fetch_user_info().await? {
            UserInfoResponse::Found(user) => {
                log::debug!("Refreshed user {}", user.uuid);
                self.set_user(Some(user));
                Ok(())
            }
            UserInfoResponse::Unauthorized => {
                log::info!("Session is not signed in");
                self.set_user(None);
                Ok(())
            }
            UserInfoResponse::Rejected { code, message } => {
                Err(ApiError::Rejected { code, message })
            }
        }
    }

    async fn refresh(&self) {
        if let Err(e) = self.load_user().await {
            log::error!("User info refresh failed: {}", e);
        }
    }
}

impl AppContext for SessionContext {
    fn user(&self) -> Option<User> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn covers(&self) -> Vec<Cover> {
        self.covers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_covers(&self, update: CoverUpdate) {
        let mut covers = self.covers.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::take(&mut *covers);
        *covers = update.resolve(previous);
    }

    fn fetch_user_info(&self) -> BoxFuture<'_, ()> {
        Box::pin(self.refresh())
    }
}
