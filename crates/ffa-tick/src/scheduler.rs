//! Delayed and repeating tasks driven by an explicit tick call.

use tracing::{debug, trace};

/// Identifies a registered task so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

impl TaskHandle {
    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Returned by repeating tasks to keep running or stop themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

type TaskFn<C> = Box<dyn FnMut(&mut C) -> Flow>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Once,
    Every(u64),
}

struct Task<C> {
    handle: TaskHandle,
    name: &'static str,
    repeat: Repeat,
    /// Delay relative to the tick the task is absorbed on.
    delay: u64,
    next_run: u64,
    done: bool,
    run: TaskFn<C>,
}

/// Collects task registrations and cancellations until the scheduler
/// absorbs them.
///
/// Lives inside the scheduler's context so tasks and event handlers can
/// register follow-up work while the scheduler is mid-tick.
pub struct Spawner<C> {
    next_handle: u64,
    pending: Vec<Task<C>>,
    cancelled: Vec<TaskHandle>,
}

impl<C> Spawner<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            pending: Vec::new(),
            cancelled: Vec::new(),
        }
    }

    fn register(&mut self, name: &'static str, repeat: Repeat, delay: u64, run: TaskFn<C>) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(Task {
            handle,
            name,
            repeat,
            delay,
            next_run: 0,
            done: false,
            run,
        });
        handle
    }

    /// Run `f` once, `delay` ticks from the tick it is absorbed on.
    pub fn run_after<F>(&mut self, name: &'static str, delay: u64, f: F) -> TaskHandle
    where
        F: FnOnce(&mut C) + 'static,
    {
        let mut f = Some(f);
        self.register(
            name,
            Repeat::Once,
            delay,
            Box::new(move |ctx| {
                if let Some(f) = f.take() {
                    f(ctx);
                }
                Flow::Stop
            }),
        )
    }

    /// Run `f` every `period` ticks, first after one full period, until it
    /// returns [`Flow::Stop`] or is cleared.
    pub fn run_interval<F>(&mut self, name: &'static str, period: u64, f: F) -> TaskHandle
    where
        F: FnMut(&mut C) -> Flow + 'static,
    {
        let period = period.max(1);
        self.register(name, Repeat::Every(period), period, Box::new(f))
    }

    /// Cancel a task. Unknown or finished handles are ignored.
    pub fn clear_run(&mut self, handle: TaskHandle) {
        self.cancelled.push(handle);
    }

    /// Whether nothing is waiting to be absorbed.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.cancelled.is_empty()
    }
}

impl<C> Default for Spawner<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> core::fmt::Debug for Spawner<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Spawner")
            .field("next_handle", &self.next_handle)
            .field("pending", &self.pending.len())
            .field("cancelled", &self.cancelled.len())
            .finish()
    }
}

/// Context type a [`Scheduler`] runs tasks against.
pub trait TaskContext: Sized + 'static {
    fn spawner(&mut self) -> &mut Spawner<Self>;
}

/// Runs registered tasks once per [`Scheduler::tick`].
pub struct Scheduler<C> {
    current_tick: u64,
    tasks: Vec<Task<C>>,
}

impl<C: TaskContext> Scheduler<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_tick: 0,
            tasks: Vec::new(),
        }
    }

    /// Number of completed ticks.
    #[must_use]
    pub const fn current_tick(&self) -> u64 {
        self.current_tick
    }

    /// Number of live tasks, not counting ones still in the spawner.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.iter().filter(|task| !task.done).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a task with this handle is still scheduled.
    #[must_use]
    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|task| task.handle == handle && !task.done)
    }

    /// Names of live tasks in registration order.
    pub fn task_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tasks
            .iter()
            .filter(|task| !task.done)
            .map(|task| task.name)
    }

    fn absorb(&mut self, ctx: &mut C) {
        let spawner = ctx.spawner();
        if spawner.is_idle() {
            return;
        }

        let now = self.current_tick;
        for mut task in spawner.pending.drain(..) {
            task.next_run = now + task.delay;
            self.tasks.push(task);
        }

        for handle in spawner.cancelled.drain(..) {
            if let Some(task) = self
                .tasks
                .iter_mut()
                .find(|task| task.handle == handle && !task.done)
            {
                debug!("Cancelled task {} ({:?})", task.name, handle);
                task.done = true;
            }
        }
    }

    /// Run every due task once, in registration order. Returns how many ran.
    pub fn tick(&mut self, ctx: &mut C) -> usize {
        self.absorb(ctx);

        let now = self.current_tick;
        let mut ran = 0;

        // Tasks registered during this loop land past `len` and wait a tick.
        let len = self.tasks.len();
        for index in 0..len {
            let task = &mut self.tasks[index];
            if task.done || task.next_run > now {
                continue;
            }

            trace!("Running task {} at tick {}", task.name, now);
            let flow = (task.run)(ctx);
            ran += 1;

            let task = &mut self.tasks[index];
            match (task.repeat, flow) {
                (Repeat::Once, _) | (Repeat::Every(_), Flow::Stop) => task.done = true,
                (Repeat::Every(period), Flow::Continue) => task.next_run = now + period,
            }

            self.absorb(ctx);
        }

        self.tasks.retain(|task| !task.done);
        self.current_tick += 1;
        ran
    }
}

impl<C: TaskContext> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> core::fmt::Debug for Scheduler<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scheduler")
            .field("current_tick", &self.current_tick)
            .field("tasks", &self.tasks.len())
            .finish()
    }
}
