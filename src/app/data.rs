use crate::ArcStr;
use crate::api::catalog::{Category, ItemId, MediaKind};
use crate::app::state::Route;

/// Commands that can be executed by the App actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the interactive browser at a route
    Browse { route: Route },
    /// Print one page of a category
    List {
        category: Category,
        keyword: Option<ArcStr>,
        page: Option<u32>,
    },
    /// Print the movie and TV results for a keyword
    Search { keyword: ArcStr },
    /// Print the detail record of an item
    Detail { kind: MediaKind, id: ItemId },
    /// Print what the browser would show at a route
    Open { route: Route },
}

/// Mock data for testing the App actor
#[derive(Debug, Default)]
pub struct MockData {
    /// Commands that have been executed
    pub executed_commands: Vec<Command>,
    /// Routes the interactive mode was started at
    pub browsed_routes: Vec<Route>,
}
