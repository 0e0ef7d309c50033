//! Page-index state machine over a fixed list of display events.

use crate::components::ctftime::DisplayEvent;
use std::sync::Arc;

/// Number of pages needed for `item_count` items
pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    item_count.div_ceil(page_size.max(1))
}

/// Navigation requested by a button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Previous,
    Next,
}

/// Current page of a non-empty event list.
///
/// `index` always satisfies `index < total_pages`.
#[derive(Debug, Clone)]
pub struct Paginator {
    events: Arc<[DisplayEvent]>,
    page_size: usize,
    index: usize,
}

impl Paginator {
    /// Start at the first page. Returns `None` for an empty list.
    pub fn new(events: Arc<[DisplayEvent]>, page_size: usize) -> Option<Self> {
        if events.is_empty() {
            return None;
        }

        Some(Self {
            events,
            page_size: page_size.max(1),
            index: 0,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.events.len(), self.page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.total_pages()
    }

    /// Move forward one page. Returns `false` and changes nothing on the last page.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Move back one page. Returns `false` and changes nothing on the first page.
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Apply a navigation action, reporting whether the page changed
    pub fn apply(&mut self, action: NavAction) -> bool {
        match action {
            NavAction::Previous => self.previous(),
            NavAction::Next => self.next(),
        }
    }

    /// Events on the current page
    pub fn current_slice(&self) -> &[DisplayEvent] {
        let start = self.index * self.page_size;
        let end = (start + self.page_size).min(self.events.len());
        &self.events[start..end]
    }
}
