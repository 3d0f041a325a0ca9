use crate::task_validation::{self, TaskError};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single time-boxed entry in the day's schedule.
///
/// The description doubles as the lookup key inside a
/// [`ScheduleManager`](crate::ScheduleManager).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    description: String,
    #[serde(with = "hhmm")]
    start: NaiveTime,
    #[serde(with = "hhmm")]
    end: NaiveTime,
    priority: String,
    #[serde(default)]
    completed: bool,
}

impl Task {
    pub fn new(
        description: impl Into<String>,
        start: &str,
        end: &str,
        priority: impl Into<String>,
    ) -> Result<Self, TaskError> {
        let start = task_validation::parse_time(start)?;
        let end = task_validation::parse_time(end)?;
        Ok(Self {
            description: description.into(),
            start,
            end,
            priority: priority.into(),
            completed: false,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end
    }

    pub fn priority(&self) -> &str {
        &self.priority
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Case-insensitive priority comparison.
    pub fn has_priority(&self, priority: &str) -> bool {
        self.priority.to_lowercase() == priority.to_lowercase()
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
    }

    /// Replaces every editable field. Both times are parsed before anything
    /// is assigned, so a bad time string leaves the task untouched.
    pub fn edit_details(
        &mut self,
        description: impl Into<String>,
        start: &str,
        end: &str,
        priority: impl Into<String>,
    ) -> Result<(), TaskError> {
        let start = task_validation::parse_time(start)?;
        let end = task_validation::parse_time(end)?;
        self.description = description.into();
        self.start = start;
        self.end = end;
        self.priority = priority.into();
        Ok(())
    }

    /// Two tasks overlap unless one ends strictly before the other starts.
    /// A task ending at 08:00 therefore overlaps one starting at 08:00.
    pub fn overlaps(&self, other: &Task) -> bool {
        !(self.end < other.start || self.start > other.end)
    }

    pub fn status_label(&self) -> &'static str {
        if self.completed { "Completed" } else { "Pending" }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}: {} [{}] [{}]",
            task_validation::format_time(self.start),
            task_validation::format_time(self.end),
            self.description,
            self.priority,
            self.status_label()
        )
    }
}

/// Creates tasks on behalf of callers so construction goes through one place.
pub struct TaskFactory;

impl TaskFactory {
    pub fn create_task(
        description: impl Into<String>,
        start: &str,
        end: &str,
        priority: impl Into<String>,
    ) -> Result<Task, TaskError> {
        Task::new(description, start, end, priority)
    }
}

mod hhmm {
    use crate::task_validation;
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&task_validation::format_time(*time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        task_validation::parse_time(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn new_task_is_pending() {
        let task = Task::new("Morning Exercise", "07:00", "08:00", "High").unwrap();
        assert_eq!(task.description(), "Morning Exercise");
        assert_eq!(task.start_time(), t(7, 0));
        assert_eq!(task.end_time(), t(8, 0));
        assert_eq!(task.priority(), "High");
        assert!(!task.is_completed());
    }

    #[test]
    fn renders_pending_and_completed() {
        let mut task = Task::new("Team Meeting", "09:00", "10:00", "Medium").unwrap();
        assert_eq!(task.to_string(), "09:00 - 10:00: Team Meeting [Medium] [Pending]");
        task.mark_completed();
        task.mark_completed();
        assert_eq!(
            task.to_string(),
            "09:00 - 10:00: Team Meeting [Medium] [Completed]"
        );
    }

    #[test]
    fn bad_end_time_fails_construction() {
        let err = Task::new("Broken", "09:00", "9am", "Low").unwrap_err();
        assert_eq!(
            err,
            TaskError::InvalidTimeFormat {
                value: "9am".to_string()
            }
        );
    }

    #[test]
    fn failed_edit_leaves_task_unchanged() {
        let mut task = Task::new("Morning Exercise", "07:00", "08:00", "High").unwrap();
        let before = task.clone();
        assert!(task.edit_details("Morning Walk", "07:00", "8:00", "Low").is_err());
        assert_eq!(task, before);
    }

    #[test]
    fn edit_replaces_all_fields() {
        let mut task = Task::new("Morning Exercise", "07:00", "08:00", "High").unwrap();
        task.edit_details("Morning Walk", "06:30", "07:15", "Low").unwrap();
        assert_eq!(task.to_string(), "06:30 - 07:15: Morning Walk [Low] [Pending]");
    }

    #[test]
    fn overlap_treats_touching_boundaries_as_conflicts() {
        let first = Task::new("A", "07:00", "08:00", "High").unwrap();
        let touching = Task::new("B", "08:00", "09:00", "High").unwrap();
        let after = Task::new("C", "08:01", "09:00", "High").unwrap();
        let before = Task::new("D", "06:00", "06:59", "High").unwrap();
        assert!(touching.overlaps(&first));
        assert!(!after.overlaps(&first));
        assert!(!before.overlaps(&first));
    }

    #[test]
    fn priority_match_ignores_case() {
        let task = Task::new("A", "07:00", "08:00", "High").unwrap();
        assert!(task.has_priority("high"));
        assert!(task.has_priority("HIGH"));
        assert!(!task.has_priority("Low"));
    }

    #[test]
    fn serializes_times_as_hhmm() {
        let task = Task::new("A", "07:05", "08:00", "High").unwrap();
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["start"], "07:05");
        assert_eq!(json["end"], "08:00");
        assert_eq!(json["completed"], false);

        let parsed: Task = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, task);
    }
}
