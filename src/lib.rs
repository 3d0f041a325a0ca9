pub mod console;
pub mod export;
pub mod logging;
pub mod observer;
pub mod schedule;
pub mod settings;
pub mod task;
pub mod task_validation;

pub use console::{Console, Flow};
pub use export::{ExportError, write_tasks_csv, write_tasks_json};
pub use logging::Logger;
pub use observer::{ConflictObserver, ConsoleConflictObserver, LoggingConflictObserver};
pub use schedule::{ScheduleError, ScheduleManager};
pub use settings::{Settings, SettingsError};
pub use task::{Task, TaskFactory};
pub use task_validation::TaskError;
