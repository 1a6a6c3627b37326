//! Site persistence, isolated behind [`SiteStore`] so the probe engine
//! stays stateless and the backing format can be swapped out.

mod json;

pub use json::JsonStore;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::Site;

/// Per-user site collections. A site belongs to exactly one collection,
/// keyed by an opaque user identifier supplied by the caller.
#[async_trait]
pub trait SiteStore: Send + Sync {
    /// All sites registered by `user`, in registration order.
    async fn list(&self, user: &str) -> Result<Vec<Site>>;

    /// Register a site and return it with its freshly assigned id.
    async fn add(&self, user: &str, url: String, name: String) -> Result<Site>;

    /// Delete a site; returns whether anything was removed.
    async fn remove(&self, user: &str, id: Uuid) -> Result<bool>;
}
