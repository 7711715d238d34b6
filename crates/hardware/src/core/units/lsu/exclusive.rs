//! Exclusive access monitor.
//!
//! `LDXR` tags the address it loads from. `STXR` succeeds only while the tag
//! still names its address, and any ordinary store that touches the tagged
//! doubleword clears the tag.

use tracing::trace;

use crate::common::constants::DOUBLEWORD;

/// A single-entry exclusive monitor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExclusiveMonitor {
    tag: Option<u64>,
}

impl ExclusiveMonitor {
    /// Creates a monitor with no tagged address.
    pub const fn new() -> Self {
        Self { tag: None }
    }

    /// The tagged address, if any.
    pub const fn tag(&self) -> Option<u64> {
        self.tag
    }

    /// Tags `addr` for a later store-exclusive.
    pub fn set(&mut self, addr: u64) {
        trace!(addr = format_args!("{addr:#x}"), "exclusive tag set");
        self.tag = Some(addr);
    }

    /// Removes the tag.
    pub const fn clear(&mut self) {
        self.tag = None;
    }

    /// Whether a store-exclusive to `addr` may proceed.
    pub fn matches(&self, addr: u64) -> bool {
        self.tag == Some(addr)
    }

    /// Clears the tag if `[addr, addr + size)` overlaps the tagged doubleword.
    ///
    /// # Arguments
    ///
    /// * `addr` - First byte written by a store.
    /// * `size` - Number of bytes written.
    ///
    /// # Returns
    ///
    /// `true` if a tag was cleared.
    pub fn clear_if_overlaps(&mut self, addr: u64, size: u64) -> bool {
        let Some(tag) = self.tag else {
            return false;
        };
        let overlaps = addr < tag.saturating_add(DOUBLEWORD) && tag < addr.saturating_add(size);
        if overlaps {
            trace!(tag = format_args!("{tag:#x}"), "exclusive tag cleared");
            self.tag = None;
        }
        overlaps
    }
}
