//! Deferred tasks keyed to an accumulated engine clock.
//!
//! Each engine owns one `Scheduler`. The clock only moves when the engine is
//! updated, so pausing the session also freezes pending transitions. Every
//! task is stamped with the generation current at scheduling time;
//! `invalidate()` bumps the generation and tasks from older generations are
//! dropped when they come due.

#[derive(Debug, Clone)]
struct Pending<T> {
    due_ms: f64,
    generation: u64,
    /// Insertion order, keeps equal deadlines FIFO.
    seq: u64,
    task: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: f64,
    generation: u64,
    next_seq: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now_ms: 0.0,
            generation: 0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }
}

impl<T: std::fmt::Debug> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated clock in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Run `task` once `delay_ms` more milliseconds have been advanced.
    pub fn schedule(&mut self, delay_ms: f64, task: T) {
        self.pending.push(Pending {
            due_ms: self.now_ms + delay_ms.max(0.0),
            generation: self.generation,
            seq: self.next_seq,
            task,
        });
        self.next_seq += 1;
    }

    /// Advance the clock by `dt_ms` and return the live tasks that came due,
    /// earliest first.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<T> {
        self.now_ms += dt_ms.max(0.0);
        let now = self.now_ms;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due_ms <= now);
        self.pending = waiting;

        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        let generation = self.generation;
        due.into_iter()
            .filter_map(|p| {
                if p.generation == generation {
                    Some(p.task)
                } else {
                    log::trace!("dropping stale task {:?} (gen {} < {})", p.task, p.generation, generation);
                    None
                }
            })
            .collect()
    }

    /// Make every task scheduled so far a no-op.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Number of tasks not yet due, stale ones included.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Whether a live task is still waiting.
    pub fn has_live_tasks(&self) -> bool {
        self.pending.iter().any(|p| p.generation == self.generation)
    }
}
