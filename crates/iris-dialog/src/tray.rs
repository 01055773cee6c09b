//! Tray of minimized dialogs.
//!
//! The tray is a badge showing how many dialogs are minimized plus an
//! expandable list to restore or discard them. This type only tracks state;
//! the session renders it through the host after every change.
//!
//! # Invariants
//!
//! - Entries are unique and kept in minimize order (oldest first).
//! - The indicator is visible iff there is at least one entry.
//! - The list is never open while the tray is empty.

use iris_backend::DialogId;

/// Which control of a tray entry was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrayTarget {
    /// The entry itself: restore the dialog.
    Entry,
    /// The entry's discard control: close the dialog without restoring it.
    Discard,
}

/// What a tray mutation changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrayChange {
    /// The entry list changed.
    pub changed: bool,
    /// Count went 0 -> 1.
    pub indicator_shown: bool,
    /// Count went to 0.
    pub indicator_hidden: bool,
    /// The list was open and got closed as a side effect.
    pub list_closed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Tray {
    entries: Vec<DialogId>,
    list_open: bool,
}

impl Tray {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a minimized dialog. Adding an id already present changes nothing.
    pub fn add(&mut self, id: DialogId) -> TrayChange {
        if self.contains(id) {
            return TrayChange::default();
        }
        self.entries.push(id);
        TrayChange {
            changed: true,
            indicator_shown: self.entries.len() == 1,
            ..TrayChange::default()
        }
    }

    /// Remove a dialog. Emptying the tray hides the indicator and closes the list.
    pub fn remove(&mut self, id: DialogId) -> TrayChange {
        let Some(idx) = self.entries.iter().position(|&e| e == id) else {
            return TrayChange::default();
        };
        self.entries.remove(idx);

        let emptied = self.entries.is_empty();
        let list_closed = emptied && self.list_open;
        if list_closed {
            self.list_open = false;
        }
        TrayChange {
            changed: true,
            indicator_shown: false,
            indicator_hidden: emptied,
            list_closed,
        }
    }

    /// Flip list visibility. Returns the new state; an empty tray stays closed.
    pub fn toggle_list(&mut self) -> bool {
        self.list_open = !self.list_open && !self.entries.is_empty();
        self.list_open
    }

    /// Close the list. Returns `true` if it was open.
    pub fn close_list(&mut self) -> bool {
        std::mem::replace(&mut self.list_open, false)
    }

    /// Drop every entry and close the list.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.list_open = false;
    }

    // --- State Queries ---

    #[inline]
    #[must_use]
    pub fn is_list_open(&self) -> bool {
        self.list_open
    }

    #[inline]
    #[must_use]
    pub fn is_indicator_visible(&self) -> bool {
        !self.entries.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: DialogId) -> bool {
        self.entries.contains(&id)
    }

    /// Minimized dialogs, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[DialogId] {
        &self.entries
    }
}
