use crate::task::Task;
use crate::task_validation::format_time;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Receives every task whose addition was refused because of a time overlap.
pub trait ConflictObserver {
    fn update(&self, task: &Task);
}

impl<F> ConflictObserver for F
where
    F: Fn(&Task),
{
    fn update(&self, task: &Task) {
        self(task)
    }
}

/// Queues a `Conflict detected with task: ...` notice per rejected task.
///
/// Clones share one queue: register a clone with the manager and keep the
/// other to write the notices out once the caller has reported its error.
#[derive(Debug, Clone, Default)]
pub struct ConsoleConflictObserver {
    pending: Rc<RefCell<Vec<String>>>,
}

impl ConsoleConflictObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.borrow().is_empty()
    }

    /// Writes and clears the queued notices, oldest first.
    pub fn write_pending<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let notices: Vec<String> = self.pending.borrow_mut().drain(..).collect();
        for notice in notices {
            writeln!(out, "{notice}")?;
        }
        Ok(())
    }
}

impl ConflictObserver for ConsoleConflictObserver {
    fn update(&self, task: &Task) {
        self.pending
            .borrow_mut()
            .push(format!("Conflict detected with task: {}", task.description()));
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingConflictObserver;

impl ConflictObserver for LoggingConflictObserver {
    fn update(&self, task: &Task) {
        tracing::warn!(
            description = task.description(),
            start = %format_time(task.start_time()),
            end = %format_time(task.end_time()),
            "conflict detected"
        );
    }
}
