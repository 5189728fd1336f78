#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Narrow viewport: document panel is an overlay sheet.
    Compact,
    /// Document panel and chat side by side.
    Wide,
}

impl LayoutMode {
    pub fn for_width(width: u32, breakpoint: u32) -> Self {
        if width < breakpoint {
            LayoutMode::Compact
        } else {
            LayoutMode::Wide
        }
    }
}

#[derive(Debug, Clone)]
pub struct Viewport {
    breakpoint: u32,
    mode: LayoutMode,
}

impl Viewport {
    pub fn new(breakpoint: u32, width: u32) -> Self {
        Self {
            breakpoint,
            mode: LayoutMode::for_width(width, breakpoint),
        }
    }

    /// Record a new width. Returns `true` only when the layout mode flipped.
    pub fn resize(&mut self, width: u32) -> bool {
        let mode = LayoutMode::for_width(width, self.breakpoint);
        if mode == self.mode {
            return false;
        }
        self.mode = mode;
        true
    }

    pub fn is_compact(&self) -> bool {
        self.mode == LayoutMode::Compact
    }
}
