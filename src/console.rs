use crate::export::{self, ExportError};
use crate::logging::Logger;
use crate::observer::{ConsoleConflictObserver, LoggingConflictObserver};
use crate::schedule::{ScheduleError, ScheduleManager};
use crate::settings::Settings;
use crate::task::TaskFactory;
use std::io::{self, Write};

const HELP: &str = "Commands:
  help                                         Show this help
  show [text|json|csv]                         Show the schedule (default text)
  add <start> <end> <priority> <description>   Add a task (times as HH:MM)
  remove <description>                         Remove a task
  edit <start> <end> <priority> <old> => <new> Replace a task's details
  done <description>                           Mark a task as completed
  priority <label>                             Show tasks with a priority
  demo                                         Replay the sample day on a fresh schedule
  quit|exit                                    Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Line-oriented front end over a [`ScheduleManager`]. Every command writes
/// its status line to `out`; conflict notices queued by the console observer
/// follow the line that reported the rejection.
pub struct Console<W: Write> {
    manager: ScheduleManager,
    out: W,
    logger: Logger,
    notices: Option<ConsoleConflictObserver>,
}

impl<W: Write> Console<W> {
    pub fn new(out: W, settings: &Settings) -> Self {
        let notices = settings.echo_conflicts.then(ConsoleConflictObserver::new);
        Self {
            manager: Self::fresh_manager(notices.as_ref()),
            out,
            logger: Logger::new(),
            notices,
        }
    }

    fn fresh_manager(notices: Option<&ConsoleConflictObserver>) -> ScheduleManager {
        let mut manager = ScheduleManager::new();
        if let Some(notices) = notices {
            manager.add_observer(notices.clone());
        }
        manager.add_observer(LoggingConflictObserver);
        manager
    }

    fn write_notices(&mut self) -> io::Result<()> {
        match &self.notices {
            Some(notices) => notices.write_pending(&mut self.out),
            None => Ok(()),
        }
    }

    pub fn manager(&self) -> &ScheduleManager {
        &self.manager
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn print_help(&mut self) -> io::Result<()> {
        writeln!(self.out, "{HELP}")
    }

    pub fn execute(&mut self, line: &str) -> io::Result<Flow> {
        let input = line.trim();
        if input.is_empty() {
            return Ok(Flow::Continue);
        }
        let (cmd, rest) = split_command(input);

        match cmd {
            "help" => self.print_help()?,
            "quit" | "exit" => return Ok(Flow::Quit),
            "show" => self.show(rest)?,
            "add" => match split_fields::<3>(rest) {
                Some(([start, end, priority], description)) if !description.is_empty() => {
                    self.add(description, start, end, priority)?
                }
                _ => writeln!(self.out, "Usage: add <start> <end> <priority> <description>")?,
            },
            "remove" => {
                if rest.is_empty() {
                    writeln!(self.out, "Usage: remove <description>")?;
                } else {
                    self.remove(rest)?;
                }
            }
            "edit" => match parse_edit(rest) {
                Some(edit) => self.edit(edit.old, edit.new, edit.start, edit.end, edit.priority)?,
                None => writeln!(
                    self.out,
                    "Usage: edit <start> <end> <priority> <old description> => <new description>"
                )?,
            },
            "done" => {
                if rest.is_empty() {
                    writeln!(self.out, "Usage: done <description>")?;
                } else {
                    self.mark_completed(rest)?;
                }
            }
            "priority" => {
                if rest.is_empty() {
                    writeln!(self.out, "Usage: priority <label>")?;
                } else {
                    self.manager.view_tasks_by_priority(rest, &mut self.out)?;
                }
            }
            "demo" => self.run_demo()?,
            _ => writeln!(self.out, "Unknown command. Type 'help'.")?,
        }
        Ok(Flow::Continue)
    }

    pub fn add(&mut self, description: &str, start: &str, end: &str, priority: &str) -> io::Result<()> {
        let task = match TaskFactory::create_task(description, start, end, priority) {
            Ok(task) => task,
            Err(err) => {
                self.logger.log(&format!("Error: {err}"));
                return writeln!(self.out, "Error: {err}");
            }
        };
        match self.manager.add_task(task) {
            Ok(()) => writeln!(self.out, "Task added successfully: {description}."),
            Err(err) => {
                writeln!(self.out, "Error: {err}")?;
                self.write_notices()
            }
        }
    }

    pub fn remove(&mut self, description: &str) -> io::Result<()> {
        match self.manager.remove_task(description) {
            Ok(_) => writeln!(self.out, "Task '{description}' removed successfully."),
            Err(err) => writeln!(self.out, "Error: {err}"),
        }
    }

    pub fn edit(
        &mut self,
        old_description: &str,
        new_description: &str,
        start: &str,
        end: &str,
        priority: &str,
    ) -> io::Result<()> {
        match self
            .manager
            .edit_task(old_description, new_description, start, end, priority)
        {
            Ok(()) => writeln!(self.out, "Task edited successfully."),
            Err(err @ ScheduleError::InvalidTime(_)) => {
                self.logger.log(&format!("Error: {err}"));
                writeln!(self.out, "Error: {err}")
            }
            Err(err) => writeln!(self.out, "Error: {err}"),
        }
    }

    pub fn mark_completed(&mut self, description: &str) -> io::Result<()> {
        match self.manager.mark_task_completed(description) {
            Ok(()) => writeln!(self.out, "Task '{description}' marked as completed."),
            Err(err) => writeln!(self.out, "Error: {err}"),
        }
    }

    pub fn show(&mut self, format: &str) -> io::Result<()> {
        let result = match format {
            "" | "text" => return self.manager.view_tasks(&mut self.out),
            "json" => export::write_tasks_json(self.manager.tasks(), &mut self.out),
            "csv" => export::write_tasks_csv(self.manager.tasks(), &mut self.out),
            other => {
                return writeln!(self.out, "Unknown format '{other}'. Use text, json or csv.");
            }
        };
        match result {
            Ok(()) => Ok(()),
            Err(ExportError::Io(err)) => Err(err),
            Err(err) => writeln!(self.out, "Error exporting schedule: {err}"),
        }
    }

    /// Replays the sample day: two adds, a rejected overlapping add, an
    /// edit, a completion, listings and a removal.
    pub fn run_demo(&mut self) -> io::Result<()> {
        self.manager = Self::fresh_manager(self.notices.as_ref());

        self.add("Morning Exercise", "07:00", "08:00", "High")?;
        self.add("Team Meeting", "09:00", "10:00", "Medium")?;
        self.add("Training Session", "09:30", "10:30", "High")?;
        self.edit("Morning Exercise", "Morning Walk", "07:00", "08:00", "Low")?;
        self.mark_completed("Team Meeting")?;
        self.manager.view_tasks(&mut self.out)?;
        self.manager.view_tasks_by_priority("High", &mut self.out)?;
        self.remove("Morning Walk")?;
        self.manager.view_tasks(&mut self.out)
    }
}

struct EditArgs<'a> {
    start: &'a str,
    end: &'a str,
    priority: &'a str,
    old: &'a str,
    new: &'a str,
}

fn parse_edit(rest: &str) -> Option<EditArgs<'_>> {
    let ([start, end, priority], tail) = split_fields::<3>(rest)?;
    let (old, new) = tail.split_once("=>")?;
    let (old, new) = (old.trim(), new.trim());
    if old.is_empty() || new.is_empty() {
        return None;
    }
    Some(EditArgs {
        start,
        end,
        priority,
        old,
        new,
    })
}

fn split_command(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (input, ""),
    }
}

/// Takes `N` whitespace-separated tokens and returns them with the trimmed
/// remainder of the line, which keeps inner spacing of descriptions intact.
fn split_fields<const N: usize>(input: &str) -> Option<([&str; N], &str)> {
    let mut fields = [""; N];
    let mut rest = input.trim_start();
    for field in fields.iter_mut() {
        if rest.is_empty() {
            return None;
        }
        let (token, tail) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        *field = token;
        rest = tail.trim_start();
    }
    Some((fields, rest.trim_end()))
}
