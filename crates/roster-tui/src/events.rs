//! UI event types.
//!
//! Everything that can change state arrives here: terminal input, the frame
//! pre-pass, the animation tick, and fetch results delivered through the
//! runtime's inbox channel.

use roster_core::client::FetchError;
use roster_types::UsersPage;

/// Events processed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Animation tick; also the render cadence.
    Tick,

    /// Emitted at the start of every loop pass with the current terminal
    /// size, so layout-dependent state settles before other events.
    Frame { width: u16, height: u16 },

    /// Raw terminal input (keys, mouse, resize).
    Terminal(crossterm::event::Event),

    /// A page fetch resolved. Sent by the spawned fetch task via the inbox.
    PageLoaded(Result<UsersPage, FetchError>),
}
