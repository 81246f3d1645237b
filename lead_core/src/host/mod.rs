//! Narrow interfaces over the page environment the form runs in
//!
//! The core never touches a real browser. Page address, referrer, local
//! storage and navigation are reached through these traits so that any
//! host (a browser binding, the CLI, tests) can supply them.

pub mod navigator;
pub mod page;
pub mod storage;

pub use navigator::{LoggingNavigator, RecordingNavigator};
pub use page::StaticPage;
pub use storage::{FileStorage, MemoryStorage};

use crate::error::Result;

pub trait PageContext: Send + Sync {
    /// Absolute address of the current page, query string included.
    fn href(&self) -> String;

    /// Address of the referring page, empty when there is none.
    fn referrer(&self) -> String;
}

/// Synchronous key/value storage with local-storage semantics.
pub trait DraftStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &str) -> Result<()>;
}

impl<T: PageContext + ?Sized> PageContext for std::sync::Arc<T> {
    fn href(&self) -> String {
        (**self).href()
    }

    fn referrer(&self) -> String {
        (**self).referrer()
    }
}

impl<T: DraftStorage + ?Sized> DraftStorage for std::sync::Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}
