use super::PageContext;
use parking_lot::RwLock;

/// A page whose address and referrer are fixed by the host, but can be
/// moved, e.g. when a test simulates a navigation with a new query string.
#[derive(Debug, Default)]
pub struct StaticPage {
    href: RwLock<String>,
    referrer: RwLock<String>,
}

impl StaticPage {
    pub fn new(href: impl Into<String>, referrer: impl Into<String>) -> Self {
        Self {
            href: RwLock::new(href.into()),
            referrer: RwLock::new(referrer.into()),
        }
    }

    pub fn set_href(&self, href: impl Into<String>) {
        *self.href.write() = href.into();
    }

    pub fn set_referrer(&self, referrer: impl Into<String>) {
        *self.referrer.write() = referrer.into();
    }
}

impl PageContext for StaticPage {
    fn href(&self) -> String {
        self.href.read().clone()
    }

    fn referrer(&self) -> String {
        self.referrer.read().clone()
    }
}
