//! Single live mount per page
//!
//! The page may be mounted by the load-time bootstrap and again by an explicit
//! `initialize` call. [`MountSlot`] keeps only the newest mount: installing a
//! new one unmounts whatever was there, so two panels or two resize listeners
//! never coexist.

use std::cell::RefCell;
use tracing::info;

/// Something that can take itself off the page.
pub trait Unmount {
    fn unmount(self);
}

pub struct MountSlot<T> {
    current: RefCell<Option<T>>,
}

impl<T: Unmount> Default for MountSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Unmount> MountSlot<T> {
    pub const fn new() -> Self {
        Self {
            current: RefCell::new(None),
        }
    }

    /// Make `next` the live mount. Returns `true` if an earlier mount was
    /// unmounted to make room.
    pub fn install(&self, next: T) -> bool {
        let previous = self.current.replace(Some(next));
        match previous {
            Some(previous) => {
                previous.unmount();
                info!("Replaced the previously mounted overlay");
                true
            }
            None => false,
        }
    }

    /// Unmount the live mount, if any.
    pub fn clear(&self) -> bool {
        let previous = self.current.borrow_mut().take();
        previous.map(Unmount::unmount).is_some()
    }

    pub fn is_mounted(&self) -> bool {
        self.current.borrow().is_some()
    }
}
