//! Ties the controller to the scheduler and the event bus.

use ffa_event::{Event, EventBus, EventQueue, EventResult};
use ffa_tick::{Scheduler, TaskHandle};
use tracing::info;

use crate::config::ArenaConfig;
use crate::controller::ArenaController;
use crate::host::Host;
use crate::reset;
use crate::session::Session;
use crate::systems;

/// Work done by one [`ArenaServer::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickStats {
    pub events: usize,
    pub tasks: usize,
}

/// One arena session on top of a host.
///
/// The embedding server calls [`tick`](Self::tick) once per game tick,
/// [`post`](Self::post)s after-events as they happen and asks
/// [`before`](Self::before) whether cancellable actions may proceed.
pub struct ArenaServer<H: Host + 'static> {
    session: Session<H>,
    scheduler: Scheduler<Session<H>>,
    bus: EventBus<Session<H>>,
    queue: EventQueue,
}

impl<H: Host + 'static> ArenaServer<H> {
    /// Start a session. `seed` drives the arena spawn search.
    pub fn new(host: H, config: ArenaConfig, seed: u64) -> Self {
        let mut session = Session::new(host, ArenaController::new(config), seed);
        let mut bus = EventBus::new();
        systems::register(&mut session, &mut bus);
        info!("Arena session started");

        Self {
            session,
            scheduler: Scheduler::new(),
            bus,
            queue: EventQueue::new(),
        }
    }

    /// Queue an after-event for the next tick.
    pub fn post<E: Event>(&mut self, event: E) {
        self.queue.push(event);
    }

    /// Ask the before-observers whether the action may go ahead.
    pub fn before<E: Event>(&mut self, event: &E) -> EventResult {
        self.bus.dispatch_before(&mut self.session, event)
    }

    /// Deliver queued events in arrival order, then run due tasks.
    pub fn tick(&mut self) -> TickStats {
        let events = self.bus.flush(&mut self.session, &mut self.queue);
        let tasks = self.scheduler.tick(&mut self.session);
        TickStats { events, tasks }
    }

    /// Start the reset countdown now instead of waiting for the next period.
    pub fn start_reset_countdown(&mut self) -> TaskHandle {
        reset::start_countdown(&mut self.session)
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.session.host
    }

    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.session.host
    }

    #[must_use]
    pub const fn arena(&self) -> &ArenaController {
        &self.session.arena
    }

    /// Ticks completed so far.
    #[must_use]
    pub const fn current_tick(&self) -> u64 {
        self.scheduler.current_tick()
    }

    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Names of scheduled tasks in run order.
    pub fn task_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.scheduler.task_names()
    }

    /// Tear the session down, returning the host.
    pub fn into_host(self) -> H {
        info!("Arena session ended");
        self.session.host
    }
}

impl<H: Host + 'static> core::fmt::Debug for ArenaServer<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArenaServer")
            .field("session", &self.session)
            .field("scheduler", &self.scheduler)
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}
