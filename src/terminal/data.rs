/// Key input, as forwarded by the terminal to the UI actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    /// Tab
    NextScreen,
    /// Shift+Tab
    PrevScreen,
    Backspace,
    Char(char),
    /// Ctrl+C, quits whatever the mode
    Interrupt,
    Resize,
}

/// Everything the terminal needs to draw one frame.
///
/// Built by the UI actor from its state; the terminal never looks at
/// catalog records directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    pub tabs: Vec<&'static str>,
    pub active_tab: usize,
    /// Current route, shown in the header
    pub route: String,
    pub banner: Option<BannerView>,
    pub banner_focused: bool,
    pub sliders: Vec<SliderView>,
    pub overlay: Option<OverlayView>,
    /// Keyword being typed, `Some` while in search input mode
    pub search_input: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerView {
    pub title: String,
    pub overview: String,
    /// Empty when there is no image
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliderContent {
    Loading,
    Failed(String),
    Boxes(Vec<BoxView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderView {
    pub heading: String,
    pub content: SliderContent,
    pub page_index: usize,
    pub page_count: usize,
    /// Number of boxes a page holds
    pub window_size: usize,
    /// Index of the focused box, when this slider has focus
    pub focused: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxView {
    pub title: String,
    pub image: String,
}

/// The detail popup. Blank strings render as empty lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayView {
    pub title: String,
    pub overview: String,
    pub image: String,
    pub tagline: String,
    pub genres: String,
    pub runtime: String,
    pub release_date: String,
    /// One-line status of the detail fetch (loading, failed)
    pub note: Option<String>,
}
