//! Daily study plan: task selection, micro-steps and list operations.

mod demo;
mod micro_steps;
mod selection;
mod task;

pub use demo::demo_plan;
pub use micro_steps::generate_micro_steps;
pub use selection::{task_for_chapter, DailyPlanner};
pub use task::{move_task, partition, remove_task, MoveDirection, Task, TaskStatus};
