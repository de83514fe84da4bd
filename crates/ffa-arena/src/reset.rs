//! Arena reset countdown.

use ffa_tick::{Flow, TaskHandle, seconds};
use tracing::info;

use crate::host::Host;
use crate::session::Session;

/// Start the second-by-second countdown that ends in an arena rebuild.
///
/// A countdown that is already running is kept and its handle returned.
pub fn start_countdown<H: Host + 'static>(session: &mut Session<H>) -> TaskHandle {
    if let Some(handle) = session.countdown {
        return handle;
    }

    let mut remaining = session.arena.config().reset.countdown_secs;
    info!("Arena reset in {remaining}s");

    let handle = session
        .tasks
        .run_interval("ArenaResetCountdown", seconds(1), move |session: &mut Session<H>| {
            if remaining == 0 {
                let Session { host, arena, .. } = session;
                arena.rebuild_arena(host);
                session.countdown = None;
                return Flow::Stop;
            }

            session.arena.announce_countdown(&mut session.host, remaining);
            remaining -= 1;
            Flow::Continue
        });
    session.countdown = Some(handle);
    handle
}
