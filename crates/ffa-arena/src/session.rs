use ffa_tick::{Spawner, TaskContext, TaskHandle};
use rand::SeedableRng as _;
use rand::rngs::StdRng;

use crate::controller::ArenaController;
use crate::host::Host;

/// Everything scheduled tasks and event observers run against.
pub struct Session<H> {
    pub host: H,
    pub arena: ArenaController,
    pub tasks: Spawner<Self>,
    /// Spawn search randomness.
    pub rng: StdRng,
    /// Running reset countdown, if any.
    pub countdown: Option<TaskHandle>,
}

impl<H: Host> Session<H> {
    pub fn new(host: H, arena: ArenaController, seed: u64) -> Self {
        Self {
            host,
            arena,
            tasks: Spawner::new(),
            rng: StdRng::seed_from_u64(seed),
            countdown: None,
        }
    }
}

impl<H: Host + 'static> TaskContext for Session<H> {
    fn spawner(&mut self) -> &mut Spawner<Self> {
        &mut self.tasks
    }
}

impl<H> core::fmt::Debug for Session<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("arena", &self.arena)
            .field("tasks", &self.tasks)
            .field("countdown", &self.countdown)
            .finish_non_exhaustive()
    }
}
