use crate::task::Task;
use crate::task_validation;
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Serialize)]
struct TaskCsvRecord<'a> {
    start: String,
    end: String,
    description: &'a str,
    priority: &'a str,
    status: &'static str,
}

impl<'a> From<&'a Task> for TaskCsvRecord<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            start: task_validation::format_time(task.start_time()),
            end: task_validation::format_time(task.end_time()),
            description: task.description(),
            priority: task.priority(),
            status: task.status_label(),
        }
    }
}

/// Writes the tasks as a pretty-printed JSON array followed by a newline.
pub fn write_tasks_json<W: Write>(tasks: &[Task], mut writer: W) -> ExportResult<()> {
    serde_json::to_writer_pretty(&mut writer, tasks)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_tasks_csv<W: Write>(tasks: &[Task], writer: W) -> ExportResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if tasks.is_empty() {
        csv_writer.write_record(["start", "end", "description", "priority", "status"])?;
    }
    for task in tasks {
        csv_writer.serialize(TaskCsvRecord::from(task))?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_csv_still_has_header() {
        let mut out = Vec::new();
        write_tasks_csv(&[], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "start,end,description,priority,status\n"
        );
    }

    #[test]
    fn empty_json_is_an_empty_array() {
        let mut out = Vec::new();
        write_tasks_json(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
