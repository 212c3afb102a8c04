//! Screen state owned by the UI actor.
//!
//! Nothing in here is shared or asynchronous: the UI actor is the single
//! owner and mutates it in response to input and fetch results.

pub mod carousel;
pub mod route;
pub mod screen;
pub mod selection;

pub use carousel::{PaginationState, Paginator};
pub use route::{Route, RouteError};
pub use screen::{LoadRequest, LoadState, ScreenKind, ScreenSpec, ScreenState, Slider};
pub use selection::{DetailSlot, DetailTicket, Overlay, SelectionState};
