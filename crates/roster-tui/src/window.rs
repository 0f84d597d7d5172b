//! Visible-window computation for the virtualized table.
//!
//! `compute_window` is a pure function over (item count, scroll offset,
//! viewport height, row height, overscan). The only state anywhere near it is
//! `WindowCache`, which memoizes the last computed window for equal inputs;
//! nothing else is cached.
//!
//! Offsets and paddings share one unit: row-height steps of the scroll axis
//! (with `row_height = 1` that unit is a terminal row, the pixel analog at
//! row granularity). Paddings size the off-screen spacer regions so the
//! scrollbar keeps the proportions of the full list while only the windowed
//! rows are rendered.

/// Inputs to the window computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowInputs {
    /// Loaded records plus the trailing placeholder slot, if any.
    pub item_count: usize,
    /// Scroll offset from the top of the content.
    pub scroll_offset: usize,
    /// Height of the scrollable viewport.
    pub viewport_height: usize,
    /// Height of one row.
    pub row_height: usize,
    /// Extra rows included beyond each edge of the viewport.
    pub overscan: usize,
}

/// The contiguous index range to render, with spacer sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleWindow {
    /// First index to render.
    pub start: usize,
    /// One past the last index to render (half-open).
    pub end: usize,
    /// Height of the spacer standing in for rows above `start`.
    pub leading: usize,
    /// Height of the spacer standing in for rows below `end`.
    pub trailing: usize,
}

impl VisibleWindow {
    /// Highest index in the window, if the window is non-empty.
    pub fn last_index(&self) -> Option<usize> {
        (self.end > self.start).then(|| self.end - 1)
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Computes the index range intersecting the viewport plus overscan margin.
pub fn compute_window(inputs: WindowInputs) -> VisibleWindow {
    let WindowInputs {
        item_count,
        scroll_offset,
        viewport_height,
        row_height,
        overscan,
    } = inputs;

    if item_count == 0 || row_height == 0 || viewport_height == 0 {
        return VisibleWindow::default();
    }

    let total_height = item_count * row_height;
    let bottom = (scroll_offset + viewport_height).min(total_height);
    if scroll_offset >= total_height {
        // Scrolled past the end entirely; nothing intersects.
        return VisibleWindow {
            start: item_count,
            end: item_count,
            leading: total_height,
            trailing: 0,
        };
    }

    let first_visible = scroll_offset / row_height;
    // Index of the row containing the last visible unit.
    let last_visible = (bottom - 1) / row_height;

    let start = first_visible.saturating_sub(overscan);
    let end = (last_visible + overscan + 1).min(item_count);

    VisibleWindow {
        start,
        end,
        leading: start * row_height,
        trailing: total_height - end * row_height,
    }
}

/// Memoizes the last (inputs, window) pair.
///
/// `sync` also reports whether the inputs changed, which is what the
/// continuation logic keys on: a recompute with identical inputs is not a new
/// observation.
#[derive(Debug, Default)]
pub struct WindowCache {
    last: Option<(WindowInputs, VisibleWindow)>,
}

impl WindowCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the window for `inputs`, recomputing only on change.
    /// The boolean is true when the inputs differ from the previous call.
    pub fn sync(&mut self, inputs: WindowInputs) -> (VisibleWindow, bool) {
        if let Some((cached_inputs, cached)) = self.last
            && cached_inputs == inputs
        {
            return (cached, false);
        }
        let window = compute_window(inputs);
        self.last = Some((inputs, window));
        (window, true)
    }

    /// The most recently computed window, if any.
    pub fn current(&self) -> VisibleWindow {
        self.last.map(|(_, w)| w).unwrap_or_default()
    }
}
