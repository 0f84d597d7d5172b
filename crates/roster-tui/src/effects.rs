//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only; the reducer itself never
//! performs I/O or spawns tasks.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Ask the loader for the next page and dispatch the fetch if it grants
    /// one. Redundant emissions are fine: the loader's phase guard collapses
    /// them into no-ops.
    LoadNextPage,
}
