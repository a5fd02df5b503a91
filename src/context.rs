//! Explicit provider/context passing for store consumers.
//!
//! A `SiteProvider` owns one `SiteStore` for as long as it lives. Consumers
//! never reach the store through a global: they receive a `Context` from the
//! code that renders them and ask it for a `SiteHandle`.
//!
//! ```ignore
//! let provider = SiteProvider::new(SiteStore::load(storage));
//! render_navbar(provider.context())?;
//!
//! fn render_navbar(cx: Context<'_, impl Storage>) -> Result<(), ContextError> {
//!     let site = cx.use_site()?;
//!     println!("{}", site.state().settings.site_name);
//!     Ok(())
//! }
//! ```
//!
//! A context created outside any provider (`Context::detached()`) fails fast
//! with `ContextError::MissingProvider` instead of handing out empty data.

use crate::{
    router::{Resolution, Route, guard},
    store::{
        BlogPost, Destination, SettingsPatch, SiteState, SiteStore, Storage, StoreError,
    },
};
use std::cell::{Ref, RefCell};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("use_site must be called within a SiteProvider")]
    MissingProvider,
}

/// Owns the store for a defined lifetime and lends it to contexts.
#[derive(Debug)]
pub struct SiteProvider<S: Storage> {
    store: RefCell<SiteStore<S>>,
}

impl<S: Storage> SiteProvider<S> {
    pub fn new(store: SiteStore<S>) -> Self {
        Self {
            store: RefCell::new(store),
        }
    }

    /// Context for the subtree wrapped by this provider.
    pub fn context(&self) -> Context<'_, S> {
        Context {
            provider: Some(self),
        }
    }

    /// End the provider's lifetime and take the store back.
    pub fn into_store(self) -> SiteStore<S> {
        self.store.into_inner()
    }
}

/// Handed down explicitly to every consumer.
pub struct Context<'a, S: Storage> {
    provider: Option<&'a SiteProvider<S>>,
}

impl<S: Storage> Clone for Context<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Storage> Copy for Context<'_, S> {}

impl<'a, S: Storage> Context<'a, S> {
    /// A context with no provider above it.
    pub const fn detached() -> Self {
        Self { provider: None }
    }

    pub const fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Obtain the site handle, or fail when used outside a provider.
    pub fn use_site(&self) -> Result<SiteHandle<'a, S>, ContextError> {
        self.provider
            .map(|provider| SiteHandle { provider })
            .ok_or(ContextError::MissingProvider)
    }
}

/// State access and mutators available inside a provider.
///
/// Closures passed to `update_*` and `edit_*` work on copies taken before the
/// store is borrowed for writing, so they may read the handle.
pub struct SiteHandle<'a, S: Storage> {
    provider: &'a SiteProvider<S>,
}

impl<S: Storage> SiteHandle<'_, S> {
    fn store(&self) -> Ref<'_, SiteStore<S>> {
        self.provider.store.borrow()
    }

    fn with_store<T>(&self, f: impl FnOnce(&mut SiteStore<S>) -> T) -> T {
        f(&mut self.provider.store.borrow_mut())
    }

    /// Snapshot for the current render.
    pub fn state(&self) -> SiteState {
        self.store().state()
    }

    pub fn is_admin(&self) -> bool {
        self.store().is_admin()
    }

    pub fn update_settings(&self, patch: SettingsPatch) -> Result<(), StoreError> {
        self.with_store(|store| store.update_settings(patch))
    }

    pub fn set_destinations(&self, next: Vec<Destination>) -> Result<(), StoreError> {
        self.with_store(|store| store.set_destinations(next))
    }

    pub fn update_destinations<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&[Destination]) -> Vec<Destination>,
    {
        let prev = self.store().destinations().to_vec();
        let next = f(&prev);
        self.set_destinations(next)
    }

    pub fn add_destination(&self, destination: Destination) -> Result<(), StoreError> {
        self.with_store(|store| store.add_destination(destination))
    }

    pub fn edit_destination<F>(&self, id: &str, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Destination),
    {
        let mut edited = self.store().destination(id)?.clone();
        f(&mut edited);
        self.with_store(|store| store.edit_destination(id, |current| *current = edited))
    }

    pub fn remove_destination(&self, id: &str) -> Result<(), StoreError> {
        self.with_store(|store| store.remove_destination(id))
    }

    pub fn set_blog_posts(&self, next: Vec<BlogPost>) -> Result<(), StoreError> {
        self.with_store(|store| store.set_blog_posts(next))
    }

    pub fn update_blog_posts<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&[BlogPost]) -> Vec<BlogPost>,
    {
        let prev = self.store().blog_posts().to_vec();
        let next = f(&prev);
        self.set_blog_posts(next)
    }

    pub fn add_blog_post(&self, post: BlogPost) -> Result<(), StoreError> {
        self.with_store(|store| store.add_blog_post(post))
    }

    pub fn edit_blog_post<F>(&self, id: &str, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut BlogPost),
    {
        let mut edited = self.store().blog_post(id)?.clone();
        f(&mut edited);
        self.with_store(|store| store.edit_blog_post(id, |current| *current = edited))
    }

    pub fn remove_blog_post(&self, id: &str) -> Result<(), StoreError> {
        self.with_store(|store| store.remove_blog_post(id))
    }

    pub fn login(&self) -> Result<(), StoreError> {
        self.with_store(SiteStore::login)
    }

    pub fn logout(&self) -> Result<(), StoreError> {
        self.with_store(SiteStore::logout)
    }

    pub fn reset(&self) -> Result<(), StoreError> {
        self.with_store(SiteStore::reset)
    }

    /// Parse `path` and apply the admin guard. `None` for unknown paths.
    pub fn resolve(&self, path: &str) -> Option<Resolution> {
        Route::parse(path).map(|route| guard(route, self.is_admin()))
    }
}
