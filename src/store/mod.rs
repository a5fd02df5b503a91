//! Site content store.
//!
//! `SiteStore` is the single owner of the site settings, destinations, blog
//! posts, services and the admin session flag. It loads every persisted slice
//! once on creation and writes a slice back as soon as a mutator touches it.
//!
//! # Lifecycle
//!
//! ```text
//! ┌──────────────┐  load()   ┌──────────────┐  mutator   ┌──────────────────┐
//! │   Storage    │ ────────► │  SiteStore   │ ─────────► │ write that slice │
//! │ (4 raw keys) │           │ (in memory)  │            │   to Storage     │
//! └──────────────┘           └──────┬───────┘            └──────────────────┘
//!                                   │ state()
//!                                   ▼
//!                            SiteState snapshot
//! ```
//!
//! A slice that is missing, empty or not decodable falls back to its
//! built-in default. Nothing is written during load.

pub mod defaults;
mod error;
pub mod storage;
mod types;

pub use error::{StorageError, StoreError};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use types::{
    BlogPost, Destination, FooterContact, Keyed, Service, SettingsPatch, SiteSettings, SiteState,
};

use crate::debug;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use storage::{ADMIN_KEY, BLOGS_KEY, DESTINATIONS_KEY, KEYS, SETTINGS_KEY};

const DESTINATIONS: &str = "destinations";
const BLOG_POSTS: &str = "blog posts";

/// Authoritative holder of all site content.
#[derive(Debug)]
pub struct SiteStore<S: Storage> {
    storage: S,
    settings: SiteSettings,
    destinations: Vec<Destination>,
    blog_posts: Vec<BlogPost>,
    services: Vec<Service>,
    is_admin: bool,
}

impl<S: Storage> SiteStore<S> {
    /// Initialize from storage, falling back to defaults slice by slice.
    pub fn load(storage: S) -> Self {
        let settings = read_slice(&storage, SETTINGS_KEY).unwrap_or_else(defaults::settings);
        let destinations =
            read_slice(&storage, DESTINATIONS_KEY).unwrap_or_else(defaults::destinations);
        let blog_posts = read_slice(&storage, BLOGS_KEY).unwrap_or_else(defaults::blog_posts);
        let is_admin = matches!(storage.get_item(ADMIN_KEY), Ok(Some(flag)) if flag == "true");

        Self {
            storage,
            settings,
            destinations,
            blog_posts,
            services: defaults::services(),
            is_admin,
        }
    }

    // ------------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------------

    /// Owned snapshot of the aggregate state.
    pub fn state(&self) -> SiteState {
        SiteState {
            settings: self.settings.clone(),
            destinations: self.destinations.clone(),
            blog_posts: self.blog_posts.clone(),
            services: self.services.clone(),
            is_admin: self.is_admin,
        }
    }

    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn blog_posts(&self) -> &[BlogPost] {
        &self.blog_posts
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// First destination with `id`.
    pub fn destination(&self, id: &str) -> Result<&Destination, StoreError> {
        position(DESTINATIONS, &self.destinations, id).map(|index| &self.destinations[index])
    }

    /// First blog post with `id`.
    pub fn blog_post(&self, id: &str) -> Result<&BlogPost, StoreError> {
        position(BLOG_POSTS, &self.blog_posts, id).map(|index| &self.blog_posts[index])
    }

    pub const fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    /// Merge `patch` into the settings and persist `site_settings`.
    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<(), StoreError> {
        self.settings.merge(patch);
        write_slice(&mut self.storage, SETTINGS_KEY, &self.settings)
    }

    // ------------------------------------------------------------------------
    // Destinations
    // ------------------------------------------------------------------------

    /// Replace the whole collection and persist `site_destinations`.
    ///
    /// Rejects an id that `next` repeats more often than the current
    /// collection does, leaving state untouched. Twins that were loaded from
    /// storage therefore never block unrelated changes.
    pub fn set_destinations(&mut self, next: Vec<Destination>) -> Result<(), StoreError> {
        ensure_no_new_duplicates(DESTINATIONS, &self.destinations, &next)?;
        self.destinations = next;
        write_slice(&mut self.storage, DESTINATIONS_KEY, &self.destinations)
    }

    /// Replace the collection with `f(current)`.
    pub fn update_destinations<F>(&mut self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&[Destination]) -> Vec<Destination>,
    {
        let next = f(&self.destinations);
        self.set_destinations(next)
    }

    /// Append a destination at the end of the display order.
    pub fn add_destination(&mut self, destination: Destination) -> Result<(), StoreError> {
        let next = appended(&self.destinations, destination);
        self.set_destinations(next)
    }

    /// Edit the destination with `id` in place.
    pub fn edit_destination<F>(&mut self, id: &str, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Destination),
    {
        let next = edited(DESTINATIONS, &self.destinations, id, f)?;
        self.set_destinations(next)
    }

    pub fn remove_destination(&mut self, id: &str) -> Result<(), StoreError> {
        let next = without(DESTINATIONS, &self.destinations, id)?;
        self.set_destinations(next)
    }

    // ------------------------------------------------------------------------
    // Blog posts
    // ------------------------------------------------------------------------

    /// Replace the whole collection and persist `site_blogs`.
    ///
    /// Same duplicate rule as [`Self::set_destinations`].
    pub fn set_blog_posts(&mut self, next: Vec<BlogPost>) -> Result<(), StoreError> {
        ensure_no_new_duplicates(BLOG_POSTS, &self.blog_posts, &next)?;
        self.blog_posts = next;
        write_slice(&mut self.storage, BLOGS_KEY, &self.blog_posts)
    }

    /// Replace the collection with `f(current)`.
    pub fn update_blog_posts<F>(&mut self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&[BlogPost]) -> Vec<BlogPost>,
    {
        let next = f(&self.blog_posts);
        self.set_blog_posts(next)
    }

    pub fn add_blog_post(&mut self, post: BlogPost) -> Result<(), StoreError> {
        let next = appended(&self.blog_posts, post);
        self.set_blog_posts(next)
    }

    pub fn edit_blog_post<F>(&mut self, id: &str, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut BlogPost),
    {
        let next = edited(BLOG_POSTS, &self.blog_posts, id, f)?;
        self.set_blog_posts(next)
    }

    pub fn remove_blog_post(&mut self, id: &str) -> Result<(), StoreError> {
        let next = without(BLOG_POSTS, &self.blog_posts, id)?;
        self.set_blog_posts(next)
    }

    // ------------------------------------------------------------------------
    // Admin session
    // ------------------------------------------------------------------------

    /// Open the admin session. No credential check happens here.
    pub fn login(&mut self) -> Result<(), StoreError> {
        self.set_admin(true)
    }

    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.set_admin(false)
    }

    fn set_admin(&mut self, is_admin: bool) -> Result<(), StoreError> {
        self.is_admin = is_admin;
        let flag = if is_admin { "true" } else { "false" };
        self.storage
            .set_item(ADMIN_KEY, flag)
            .map_err(|source| StoreError::Persist {
                key: ADMIN_KEY,
                source,
            })?;
        debug!("storage"; "wrote `{}` = {}", ADMIN_KEY, flag);
        Ok(())
    }

    /// Forget everything persisted and return to the built-in content.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.settings = defaults::settings();
        self.destinations = defaults::destinations();
        self.blog_posts = defaults::blog_posts();
        self.is_admin = false;

        for key in KEYS {
            self.storage
                .remove_item(key)
                .map_err(|source| StoreError::Persist { key, source })?;
        }
        Ok(())
    }
}

// ============================================================================
// Persistence helpers
// ============================================================================

/// Decode a persisted slice. `None` means "use the default".
fn read_slice<T: DeserializeOwned>(storage: &impl Storage, key: &str) -> Option<T> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) if !raw.trim().is_empty() => raw,
        Ok(_) => {
            debug!("storage"; "`{}` not set, using defaults", key);
            return None;
        }
        Err(err) => {
            debug!("storage"; "`{}` unreadable ({}), using defaults", key, err);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!("storage"; "`{}` is corrupt ({}), using defaults", key, err);
            None
        }
    }
}

fn write_slice<T: Serialize + ?Sized>(
    storage: &mut impl Storage,
    key: &'static str,
    value: &T,
) -> Result<(), StoreError> {
    let encoded =
        serde_json::to_string(value).map_err(|source| StoreError::Encode { key, source })?;
    storage
        .set_item(key, &encoded)
        .map_err(|source| StoreError::Persist { key, source })?;
    debug!("storage"; "wrote `{}` ({} bytes)", key, encoded.len());
    Ok(())
}

// ============================================================================
// Collection helpers
// ============================================================================

fn id_counts<T: Keyed>(items: &[T]) -> HashMap<&str, usize> {
    let mut counts = HashMap::with_capacity(items.len());
    for item in items {
        *counts.entry(item.id()).or_insert(0) += 1;
    }
    counts
}

/// An id may appear in `next` at most once, or as often as it already
/// appears in `prev`.
fn ensure_no_new_duplicates<T: Keyed>(
    collection: &'static str,
    prev: &[T],
    next: &[T],
) -> Result<(), StoreError> {
    let allowed = id_counts(prev);
    for (id, count) in id_counts(next) {
        if count > allowed.get(id).copied().unwrap_or(0).max(1) {
            return Err(StoreError::DuplicateId {
                collection,
                id: id.to_owned(),
            });
        }
    }
    Ok(())
}

fn appended<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut next = Vec::with_capacity(items.len() + 1);
    next.extend_from_slice(items);
    next.push(item);
    next
}

fn edited<T, F>(collection: &'static str, items: &[T], id: &str, f: F) -> Result<Vec<T>, StoreError>
where
    T: Keyed + Clone,
    F: FnOnce(&mut T),
{
    let index = position(collection, items, id)?;
    let mut next = items.to_vec();
    f(&mut next[index]);
    Ok(next)
}

fn without<T: Keyed + Clone>(
    collection: &'static str,
    items: &[T],
    id: &str,
) -> Result<Vec<T>, StoreError> {
    position(collection, items, id)?;
    Ok(items.iter().filter(|item| item.id() != id).cloned().collect())
}

fn position<T: Keyed>(collection: &'static str, items: &[T], id: &str) -> Result<usize, StoreError> {
    items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| StoreError::UnknownId {
            collection,
            id: id.to_owned(),
        })
}
