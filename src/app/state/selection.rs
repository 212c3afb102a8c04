//! Which item a screen has opened in its detail overlay.

use crate::api::catalog::{CatalogItem, Category, DetailRecord, FetchError, ItemId, ResultPage};

/// Lazily fetched detail of the open item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailSlot {
    /// Nothing requested, the overlay shows no detail fields
    #[default]
    Empty,
    Loading,
    Ready(DetailRecord),
    /// Shown as a one-line note
    Failed(FetchError),
}

/// Handed out by [`SelectionState::open`]; a detail result is only accepted
/// with the ticket of the selection that is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailTicket {
    pub id: ItemId,
    pub category: Category,
    generation: u64,
}

/// What the overlay renders. Absent fields render blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub category: Category,
    pub item: Option<CatalogItem>,
    pub detail: DetailSlot,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    open: Option<(ItemId, Category)>,
    detail: DetailSlot,
    generation: u64,
}

impl SelectionState {
    pub fn new() -> Self {
        Default::default()
    }

    /// Opens `id` of `category`, replacing any open selection.
    pub fn open(&mut self, id: ItemId, category: Category) -> DetailTicket {
        self.generation += 1;
        self.open = Some((id, category));
        self.detail = DetailSlot::Empty;
        DetailTicket {
            id,
            category,
            generation: self.generation,
        }
    }

    /// Same as [`SelectionState::open`] for an id given as text, such as a
    /// route parameter. Ids that are not numbers open nothing.
    pub fn open_raw(&mut self, raw: &str, category: Category) -> Option<DetailTicket> {
        ItemId::normalize(raw).map(|id| self.open(id, category))
    }

    /// Closes the overlay. A fetch still in flight is left running and its
    /// result dropped on arrival.
    pub fn close(&mut self) {
        self.open = None;
        self.detail = DetailSlot::Empty;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current(&self) -> Option<(ItemId, Category)> {
        self.open
    }

    pub fn detail(&self) -> &DetailSlot {
        &self.detail
    }

    fn is_current(&self, ticket: &DetailTicket) -> bool {
        ticket.generation == self.generation && self.open == Some((ticket.id, ticket.category))
    }

    /// Marks the detail of the open item as being fetched.
    pub fn mark_loading(&mut self, ticket: &DetailTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.detail = DetailSlot::Loading;
        true
    }

    /// Stores a detail result if `ticket` still names the open selection.
    ///
    /// Returns whether the result was applied. A late result never reopens
    /// a closed overlay nor lands on another item.
    pub fn resolve_detail(
        &mut self,
        ticket: &DetailTicket,
        result: Result<DetailRecord, FetchError>,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.detail = match result {
            Ok(detail) => DetailSlot::Ready(detail),
            Err(err) => DetailSlot::Failed(err),
        };
        true
    }

    /// Finds the open item in the page of its category.
    pub fn lookup<'a, F>(&self, page_of: F) -> Option<&'a CatalogItem>
    where
        F: FnOnce(Category) -> Option<&'a ResultPage>,
    {
        let (id, category) = self.open?;
        page_of(category)?.find(id)
    }

    /// The overlay to render, `None` while closed.
    ///
    /// An id missing from its list still gives an overlay, with no item.
    pub fn overlay<'a, F>(&self, page_of: F) -> Option<Overlay>
    where
        F: FnOnce(Category) -> Option<&'a ResultPage>,
    {
        let (_, category) = self.open?;
        Some(Overlay {
            category,
            item: self.lookup(page_of).cloned(),
            detail: self.detail.clone(),
        })
    }
}
