use crate::observer::ConflictObserver;
use crate::task::Task;
use crate::task_validation::TaskError;
use std::io::{self, Write};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Task '{0}' not found.")]
    TaskNotFound(String),
    #[error("Task conflicts with existing task.")]
    Conflict {
        task: Box<Task>,
        conflicts_with: String,
    },
    #[error("Task '{0}' already exists.")]
    DuplicateDescription(String),
    #[error(transparent)]
    InvalidTime(#[from] TaskError),
}

/// Owns the day's tasks, kept sorted by start time.
#[derive(Default)]
pub struct ScheduleManager {
    tasks: Vec<Task>,
    observers: Vec<Box<dyn ConflictObserver>>,
}

impl ScheduleManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_observer(&mut self, observer: impl ConflictObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drops every task. Observers stay registered.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn find_task(&self, description: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.description() == description)
    }

    fn position_of(&self, description: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.description() == description)
    }

    fn others(&self, idx: usize) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != idx)
            .map(|(_, t)| t)
    }

    /// First existing task whose interval overlaps `task`.
    pub fn find_conflict(&self, task: &Task) -> Option<&Task> {
        self.tasks.iter().find(|existing| task.overlaps(existing))
    }

    pub fn is_conflicting(&self, task: &Task) -> bool {
        self.find_conflict(task).is_some()
    }

    fn notify_observers(&self, task: &Task) {
        for observer in &self.observers {
            observer.update(task);
        }
    }

    fn sort_by_start(&mut self) {
        self.tasks.sort_by_key(Task::start_time);
    }

    /// Inserts `task` unless it overlaps an existing one. An overlap notifies
    /// every observer, even when the description is also taken.
    pub fn add_task(&mut self, task: Task) -> Result<(), ScheduleError> {
        if let Some(existing) = self.find_conflict(&task) {
            let conflicts_with = existing.description().to_string();
            warn!(
                description = task.description(),
                conflicts_with = conflicts_with.as_str(),
                "task conflicts with existing task"
            );
            self.notify_observers(&task);
            return Err(ScheduleError::Conflict {
                task: Box::new(task),
                conflicts_with,
            });
        }

        if self.find_task(task.description()).is_some() {
            warn!(description = task.description(), "duplicate task rejected");
            return Err(ScheduleError::DuplicateDescription(
                task.description().to_string(),
            ));
        }

        info!(description = task.description(), "task added");
        self.tasks.push(task);
        self.sort_by_start();
        Ok(())
    }

    pub fn remove_task(&mut self, description: &str) -> Result<Task, ScheduleError> {
        let idx = self
            .position_of(description)
            .ok_or_else(|| ScheduleError::TaskNotFound(description.to_string()))?;
        let removed = self.tasks.remove(idx);
        info!(description, "task removed");
        Ok(removed)
    }

    /// Rewrites the task stored under `old_description`.
    ///
    /// Validation happens on a copy; the stored task only changes once the
    /// new times parse and the new interval is clear of every other task.
    pub fn edit_task(
        &mut self,
        old_description: &str,
        new_description: &str,
        new_start: &str,
        new_end: &str,
        new_priority: &str,
    ) -> Result<(), ScheduleError> {
        let idx = self
            .position_of(old_description)
            .ok_or_else(|| ScheduleError::TaskNotFound(old_description.to_string()))?;

        let mut edited = self.tasks[idx].clone();
        edited.edit_details(new_description, new_start, new_end, new_priority)?;

        if self.others(idx).any(|t| t.description() == new_description) {
            return Err(ScheduleError::DuplicateDescription(
                new_description.to_string(),
            ));
        }

        if let Some(existing) = self.others(idx).find(|t| edited.overlaps(t)) {
            let conflicts_with = existing.description().to_string();
            warn!(
                description = old_description,
                conflicts_with = conflicts_with.as_str(),
                "edit rejected: new interval conflicts"
            );
            return Err(ScheduleError::Conflict {
                task: Box::new(edited),
                conflicts_with,
            });
        }

        debug!(
            from = old_description,
            to = new_description,
            start = new_start,
            end = new_end,
            "task edited"
        );
        self.tasks[idx] = edited;
        self.sort_by_start();
        Ok(())
    }

    pub fn mark_task_completed(&mut self, description: &str) -> Result<(), ScheduleError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.description() == description)
            .ok_or_else(|| ScheduleError::TaskNotFound(description.to_string()))?;
        task.mark_completed();
        debug!(description, "task marked completed");
        Ok(())
    }

    pub fn tasks_with_priority(&self, priority: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.has_priority(priority)).collect()
    }

    pub fn view_tasks_by_priority<W: Write>(&self, priority: &str, out: &mut W) -> io::Result<()> {
        let matching = self.tasks_with_priority(priority);
        if matching.is_empty() {
            return writeln!(out, "No tasks with priority: {priority}");
        }
        for task in matching {
            writeln!(out, "{task}")?;
        }
        Ok(())
    }

    pub fn view_tasks<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.tasks.is_empty() {
            return writeln!(out, "No tasks scheduled for the day.");
        }
        for task in &self.tasks {
            writeln!(out, "{task}")?;
        }
        Ok(())
    }
}
