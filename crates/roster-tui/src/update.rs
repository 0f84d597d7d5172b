//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(state, event)`
//! and executes the returned effects.
//!
//! The scroll-triggered continuation also lives here: after every window
//! recompute the reducer observes the highest visible index and emits
//! `LoadNextPage` when it reaches the end of the loaded list. The emission is
//! dedup-free: the loader's phase guard turns redundant
//! requests into no-ops.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::render;
use crate::state::AppState;
use crate::window::VisibleWindow;

/// Rows scrolled per mouse wheel notch.
const MOUSE_SCROLL_STEP: isize = 3;

/// The main reducer function.
pub fn update(state: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            state.spinner_frame = state.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Frame { width: _, height } => {
            state.scroll.viewport = render::body_height(height);
            sync_window(state)
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(state, term_event),
        UiEvent::PageLoaded(result) => {
            match result {
                Ok(page) => state.loader.apply_success(page),
                Err(err) => state.loader.apply_failure(err.to_string()),
            }
            sync_window(state)
        }
    }
}

/// Recomputes the visible window and, when the inputs actually changed,
/// re-evaluates the continuation trigger.
///
/// Keying on change matters: a failed fetch leaves the window inputs
/// untouched, so an unchanged frame does not hammer the server with retries.
/// The retry happens on the next downward scroll (see `scroll_by`).
fn sync_window(state: &mut AppState) -> Vec<UiEffect> {
    state.scroll.offset = state.scroll.offset.min(state.max_scroll_offset());
    let (window, changed) = state.window_cache.sync(state.window_inputs());
    if changed {
        continuation_effects(state, window)
    } else {
        vec![]
    }
}

/// The continuation rule of the coordination loop.
///
/// Fires when the highest visible index has reached the end of the loaded
/// list, more pages exist, no fetch is in flight, and the initial load has
/// resolved (the gate that stops a spurious second fetch before page 1 lands).
fn continuation_effects(state: &AppState, window: VisibleWindow) -> Vec<UiEffect> {
    let Some(last_index) = window.last_index() else {
        return vec![];
    };

    if last_index + 1 >= state.loader.len()
        && state.loader.has_more()
        && !state.loader.is_loading()
        && state.loader.initial_load_complete()
    {
        vec![UiEffect::LoadNextPage]
    } else {
        vec![]
    }
}

fn handle_terminal_event(state: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => scroll_by(state, MOUSE_SCROLL_STEP),
            MouseEventKind::ScrollUp => scroll_by(state, -MOUSE_SCROLL_STEP),
            _ => vec![],
        },
        // Resize settles on the next Frame event.
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // Ctrl+C always quits, focused search or not.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    if state.search.focused {
        return handle_search_key(state, key);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('/') => {
            state.search.focused = true;
            vec![]
        }
        KeyCode::Up | KeyCode::Char('k') => scroll_by(state, -1),
        KeyCode::Down | KeyCode::Char('j') => scroll_by(state, 1),
        KeyCode::PageUp => {
            let page = state.scroll.viewport as isize;
            scroll_by(state, -page)
        }
        KeyCode::PageDown => {
            let page = state.scroll.viewport as isize;
            scroll_by(state, page)
        }
        KeyCode::Home | KeyCode::Char('g') => scroll_to(state, 0),
        KeyCode::End | KeyCode::Char('G') => {
            let bottom = state.max_scroll_offset();
            scroll_to(state, bottom)
        }
        _ => vec![],
    }
}

/// Edits the search text. The input drives no behavior beyond its own
/// display; there is no filtering engine behind it.
fn handle_search_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => state.search.focused = false,
        KeyCode::Backspace => {
            state.search.text.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.search.text.push(c);
        }
        _ => {}
    }
    vec![]
}

fn scroll_by(state: &mut AppState, delta: isize) -> Vec<UiEffect> {
    let target = state.scroll.offset.saturating_add_signed(delta);
    let clamped = target.min(state.max_scroll_offset());
    state.scroll.offset = clamped;

    let (window, changed) = state.window_cache.sync(state.window_inputs());
    // A downward scroll re-observes the window even when already clamped at
    // the bottom; that is the retry path after a failed fetch.
    if changed || delta > 0 {
        continuation_effects(state, window)
    } else {
        vec![]
    }
}

fn scroll_to(state: &mut AppState, offset: usize) -> Vec<UiEffect> {
    let previous = state.scroll.offset;
    state.scroll.offset = offset.min(state.max_scroll_offset());

    let (window, changed) = state.window_cache.sync(state.window_inputs());
    if changed || state.scroll.offset > previous {
        continuation_effects(state, window)
    } else {
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::config::Config;
    use roster_types::{User, UsersPage};

    fn page(current: u32, total_pages: u32, count: usize) -> UsersPage {
        let start = u64::from(current - 1) * count as u64;
        UsersPage {
            current_page: current,
            total_pages,
            total_users: u64::from(total_pages) * count as u64,
            users: (0..count).map(|i| User::synthetic(start + i as u64)).collect(),
        }
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    /// A mounted state: viewport settled, first page resolved.
    fn mounted(viewport_terminal_rows: u16) -> AppState {
        let mut state = AppState::new(&Config::default());
        state.loader.begin_fetch().unwrap();
        update(
            &mut state,
            UiEvent::Frame {
                width: 120,
                height: viewport_terminal_rows,
            },
        );
        state
    }

    /// The continuation gate holds before the first page has resolved.
    #[test]
    fn test_no_continuation_before_initial_load() {
        let mut state = AppState::new(&Config::default());
        let effects = update(&mut state, UiEvent::Frame { width: 120, height: 44 });
        assert!(effects.is_empty());
    }

    /// A short first page that does not fill the viewport triggers the next
    /// fetch immediately once it lands.
    #[test]
    fn test_short_page_triggers_follow_up_fetch() {
        let mut state = mounted(44);
        let effects = update(&mut state, UiEvent::PageLoaded(Ok(page(1, 3, 20))));
        assert_eq!(effects, vec![UiEffect::LoadNextPage]);
    }

    /// A first page taller than the viewport does not trigger a fetch until
    /// the user scrolls near the end.
    #[test]
    fn test_tall_page_waits_for_scroll() {
        let mut state = mounted(24);
        let effects = update(&mut state, UiEvent::PageLoaded(Ok(page(1, 3, 50))));
        assert!(effects.is_empty());

        // Scroll to the bottom: the placeholder row becomes visible.
        let effects = update(&mut state, key(KeyCode::End));
        assert_eq!(effects, vec![UiEffect::LoadNextPage]);
    }

    /// Redundant triggers while a fetch is in flight stay harmless: the
    /// reducer may emit the effect, but the loader refuses a second fetch.
    #[test]
    fn test_redundant_triggers_collapse_at_the_loader() {
        let mut state = mounted(24);
        update(&mut state, UiEvent::PageLoaded(Ok(page(1, 3, 50))));
        update(&mut state, key(KeyCode::End));

        // Runtime would dispatch now.
        assert!(state.loader.begin_fetch().is_some());

        // Further scrolls while loading grant no second request.
        for _ in 0..5 {
            update(&mut state, key(KeyCode::Down));
            assert!(state.loader.begin_fetch().is_none());
        }
    }

    /// After exhaustion no scroll position produces another fetch.
    #[test]
    fn test_no_fetch_after_exhaustion() {
        let mut state = mounted(24);
        update(&mut state, UiEvent::PageLoaded(Ok(page(1, 1, 50))));
        assert!(!state.loader.has_more());

        for event in [key(KeyCode::End), key(KeyCode::Down), key(KeyCode::PageDown)] {
            let effects = update(&mut state, event);
            assert!(effects.is_empty());
        }
    }

    /// A failed fetch leaves a stable state; the next downward scroll retries
    /// even though the window inputs did not change.
    #[test]
    fn test_failure_then_scroll_retries() {
        let mut state = mounted(24);
        update(&mut state, UiEvent::PageLoaded(Ok(page(1, 3, 50))));
        update(&mut state, key(KeyCode::End));
        state.loader.begin_fetch().unwrap();

        let err = roster_core::client::FetchError::new(
            roster_core::client::FetchErrorKind::Timeout,
            "request timed out",
        );
        let effects = update(&mut state, UiEvent::PageLoaded(Err(err)));
        assert!(effects.is_empty());
        assert_eq!(state.loader.last_error(), Some("request timed out"));
        assert_eq!(state.loader.len(), 50);

        // Already clamped at the bottom, but scrolling down re-observes.
        let effects = update(&mut state, key(KeyCode::Down));
        assert_eq!(effects, vec![UiEffect::LoadNextPage]);
        assert!(state.loader.begin_fetch().is_some());
    }

    /// Idle frames with unchanged inputs never re-trigger (no retry storm).
    #[test]
    fn test_unchanged_frames_do_not_retrigger() {
        let mut state = mounted(24);
        update(&mut state, UiEvent::PageLoaded(Ok(page(1, 3, 50))));
        update(&mut state, key(KeyCode::End));
        state.loader.begin_fetch().unwrap();
        update(
            &mut state,
            UiEvent::PageLoaded(Err(roster_core::client::FetchError::new(
                roster_core::client::FetchErrorKind::Network,
                "boom",
            ))),
        );

        for _ in 0..3 {
            let effects = update(&mut state, UiEvent::Frame { width: 120, height: 24 });
            assert!(effects.is_empty());
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut state = mounted(24);
        assert_eq!(update(&mut state, key(KeyCode::Char('q'))), vec![UiEffect::Quit]);

        let ctrl_c = UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert_eq!(update(&mut state, ctrl_c), vec![UiEffect::Quit]);
    }

    /// The search input edits its own text and nothing else.
    #[test]
    fn test_search_input_is_unwired() {
        let mut state = mounted(24);
        update(&mut state, UiEvent::PageLoaded(Ok(page(1, 3, 50))));
        let len_before = state.loader.len();
        let offset_before = state.scroll.offset;

        update(&mut state, key(KeyCode::Char('/')));
        assert!(state.search.focused);
        for c in "ada".chars() {
            update(&mut state, key(KeyCode::Char(c)));
        }
        assert_eq!(state.search.text, "ada");

        // While focused, navigation characters are text, not scrolling.
        update(&mut state, key(KeyCode::Char('j')));
        assert_eq!(state.search.text, "adaj");
        assert_eq!(state.scroll.offset, offset_before);
        assert_eq!(state.loader.len(), len_before);

        update(&mut state, key(KeyCode::Backspace));
        assert_eq!(state.search.text, "ada");
        update(&mut state, key(KeyCode::Esc));
        assert!(!state.search.focused);
    }

    /// Scroll offset clamps to the content and never goes negative.
    #[test]
    fn test_scroll_clamping() {
        let mut state = mounted(24);
        update(&mut state, UiEvent::PageLoaded(Ok(page(1, 1, 30))));

        update(&mut state, key(KeyCode::Up));
        assert_eq!(state.scroll.offset, 0);

        update(&mut state, key(KeyCode::End));
        assert_eq!(state.scroll.offset, state.max_scroll_offset());

        update(&mut state, key(KeyCode::PageDown));
        assert_eq!(state.scroll.offset, state.max_scroll_offset());
    }
}
