//! Browser collaborators: session history and scroll position.

/// Session history the controller reads the current location from.
pub trait History {
    /// Current location (path, query and fragment).
    fn location(&self) -> &str;

    /// Add a new entry and make it current.
    fn push(&mut self, location: &str);

    /// Overwrite the current entry.
    fn replace(&mut self, location: &str);
}

/// In-memory history stack with back/forward traversal.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    /// History holding one entry.
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    /// Step back one entry. Returns `false` at the start of history.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Step forward one entry. Returns `false` at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; history holds at least one entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn location(&self) -> &str {
        &self.entries[self.index]
    }

    fn push(&mut self, location: &str) {
        // Pushing drops any forward entries, as browsers do
        self.entries.truncate(self.index + 1);
        self.entries.push(location.to_string());
        self.index = self.entries.len() - 1;
    }

    fn replace(&mut self, location: &str) {
        self.entries[self.index] = location.to_string();
    }
}

/// Scroll position of the page hosting the mount point.
pub trait Viewport {
    /// Scroll to the top of the page.
    fn scroll_to_top(&mut self);
}

/// Viewport that records scroll resets.
#[derive(Debug, Clone, Default)]
pub struct MemoryViewport {
    scroll_top: u32,
    resets: u64,
}

impl MemoryViewport {
    /// Viewport scrolled to the top.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the user scrolling.
    pub fn scroll_to(&mut self, offset: u32) {
        self.scroll_top = offset;
    }

    /// Current vertical offset.
    #[must_use]
    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    /// How many times the controller reset the scroll position.
    #[must_use]
    pub fn resets(&self) -> u64 {
        self.resets
    }
}

impl Viewport for MemoryViewport {
    fn scroll_to_top(&mut self) {
        self.scroll_top = 0;
        self.resets += 1;
    }
}
