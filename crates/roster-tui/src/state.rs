//! Application state for the table browser.
//!
//! One `AppState` per table session. The loader owns the accumulated records
//! and page cursor for the lifetime of the session; the visible window is
//! transient and lives only in the memoizing cache.

use roster_core::config::Config;
use roster_core::loader::LoaderState;

use crate::window::{VisibleWindow, WindowCache, WindowInputs};

/// Scroll position of the table body.
#[derive(Debug, Default)]
pub struct ScrollState {
    /// Offset from the top of the content, in row-height units.
    pub offset: usize,
    /// Height of the table body, set from the latest frame.
    pub viewport: usize,
}

/// The header search input.
///
/// It accepts and edits text but drives no behavior; there is no filtering
/// engine behind it.
#[derive(Debug, Default)]
pub struct SearchState {
    pub text: String,
    pub focused: bool,
}

/// Table UI tuning, settled from config at startup.
#[derive(Debug, Clone, Copy)]
pub struct UiOptions {
    pub overscan: usize,
    pub row_height: usize,
}

/// TUI application state.
pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Incremental page loader (records, cursor, phase).
    pub loader: LoaderState,
    /// Scroll position and viewport size.
    pub scroll: ScrollState,
    /// Unwired search input.
    pub search: SearchState,
    /// UI tuning knobs.
    pub ui: UiOptions,
    /// Memoized visible window.
    pub window_cache: WindowCache,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            loader: LoaderState::new(config.client.page_limit),
            scroll: ScrollState::default(),
            search: SearchState::default(),
            ui: UiOptions {
                overscan: config.ui.overscan,
                row_height: config.ui.row_height.max(1),
            },
            window_cache: WindowCache::new(),
            spinner_frame: 0,
        }
    }

    /// Current window inputs. Callers clamp the scroll offset before
    /// recomputing (see the reducer's sync paths).
    pub fn window_inputs(&self) -> WindowInputs {
        WindowInputs {
            item_count: self.loader.item_count(),
            scroll_offset: self.scroll.offset,
            viewport_height: self.scroll.viewport,
            row_height: self.ui.row_height,
            overscan: self.ui.overscan,
        }
    }

    /// The most recently computed window.
    pub fn window(&self) -> VisibleWindow {
        self.window_cache.current()
    }

    /// Total content height in row-height units.
    pub fn content_height(&self) -> usize {
        self.loader.item_count() * self.ui.row_height
    }

    /// Largest valid scroll offset for the current viewport.
    pub fn max_scroll_offset(&self) -> usize {
        self.content_height().saturating_sub(self.scroll.viewport)
    }
}
