//! Floating panel geometry: open/closed, size within fixed bounds, drag offset.

pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const MIN_WIDTH: u32 = 300;
pub const MAX_WIDTH: u32 = 500;
pub const MIN_HEIGHT: u32 = 400;
pub const MAX_HEIGHT: u32 = 650;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    open: bool,
    width: u32,
    height: u32,
    offset: (i32, i32),
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            open: false,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            offset: (0, 0),
        }
    }
}

impl Panel {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn offset(&self) -> (i32, i32) {
        self.offset
    }

    /// Sets the size, clamped to the panel bounds. Returns the size applied.
    pub fn resize(&mut self, width: u32, height: u32) -> (u32, u32) {
        self.width = width.clamp(MIN_WIDTH, MAX_WIDTH);
        self.height = height.clamp(MIN_HEIGHT, MAX_HEIGHT);
        self.size()
    }

    pub fn drag_by(&mut self, dx: i32, dy: i32) -> (i32, i32) {
        self.offset = (
            self.offset.0.saturating_add(dx),
            self.offset.1.saturating_add(dy),
        );
        self.offset
    }
}
