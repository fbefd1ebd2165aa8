//! Daily plan commands.
//!
//! Task ids can be abbreviated to any unique prefix.

use clap::{Subcommand, ValueEnum};
use neurostudy_core::plan::{
    demo_plan, move_task, partition, remove_task, task_for_chapter, DailyPlanner, MoveDirection,
    Task,
};
use neurostudy_core::storage::Database;
use neurostudy_core::Config;

use super::{find_chapter, load_catalog, mode_state, print_json, resolve_task_id, today, CmdResult};

const SHORT_ID_LEN: usize = 8;

#[derive(Subcommand)]
pub enum PlanAction {
    /// Show today's plan, generating it on first use
    Today {
        /// Discard today's plan and pick new chapters
        #[arg(long)]
        regenerate: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the fixed demo plan
    Demo {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List today's tasks, pending first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Move a task up or down
    Move {
        id: String,
        #[arg(value_enum)]
        direction: Direction,
    },
    /// Remove a task from today's plan
    Remove { id: String },
    /// Advance a task to its next micro-step
    Step { id: String },
    /// Add a chapter to the end of today's plan
    Add {
        /// Chapter id from the catalogue (e.g. "math-8-1")
        chapter_id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Direction {
    Up,
    Down,
}

impl From<Direction> for MoveDirection {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Up => MoveDirection::Up,
            Direction::Down => MoveDirection::Down,
        }
    }
}

pub fn run(action: PlanAction) -> CmdResult {
    let db = Database::open()?;

    match action {
        PlanAction::Today { regenerate, json } => {
            let tasks = todays_plan(&db, regenerate)?;
            if json {
                return print_json(&tasks);
            }
            print_plan(&tasks);
        }
        PlanAction::Demo { json } => {
            let state = mode_state(&db);
            let tasks = demo_plan(today(), state.profile());
            if json {
                return print_json(&tasks);
            }
            print_plan(&tasks);
        }
        PlanAction::List { json } => {
            let tasks = db.tasks_for(today())?;
            if json {
                return print_json(&tasks);
            }
            if tasks.is_empty() {
                println!("no tasks for today (run `neurostudy plan today`)");
            } else {
                print_plan(&tasks);
            }
        }
        PlanAction::Move { id, direction } => {
            let mut tasks = db.tasks_for(today())?;
            let id = resolve_task_id(&tasks, &id)?;
            if move_task(&mut tasks, &id, direction.into())? {
                db.replace_tasks(today(), &tasks)?;
                print_plan(&tasks);
            } else {
                println!("task is already at the {}", match direction {
                    Direction::Up => "top",
                    Direction::Down => "bottom",
                });
            }
        }
        PlanAction::Remove { id } => {
            let mut tasks = db.tasks_for(today())?;
            let id = resolve_task_id(&tasks, &id)?;
            let removed = remove_task(&mut tasks, &id)?;
            db.replace_tasks(today(), &tasks)?;
            println!("removed: {}", removed.title);
        }
        PlanAction::Step { id } => {
            let tasks = db.tasks_for(today())?;
            let id = resolve_task_id(&tasks, &id)?;
            let mut task = db
                .task(&id)?
                .ok_or_else(|| format!("task {id} disappeared"))?;
            if task.advance_step() {
                db.save_task(&task)?;
            } else {
                println!("(already on the last step)");
            }
            println!(
                "step {}/{}: {}",
                task.current_step + 1,
                task.micro_steps.len(),
                task.current_micro_step().unwrap_or("-")
            );
        }
        PlanAction::Add { chapter_id } => {
            let config = Config::load()?;
            let catalog = load_catalog(&config)?;
            let chapter = find_chapter(&catalog, &chapter_id)?;
            let state = mode_state(&db);

            let count = db.tasks_for(today())?.len();
            let mut task = task_for_chapter(today(), chapter, state.profile());
            task.order_index = count as u32;
            db.save_task(&task)?;
            println!("added: {} ({})", task.title, short_id(&task.id));
        }
    }
    Ok(())
}

/// Today's stored plan, or a freshly generated one.
fn todays_plan(db: &Database, regenerate: bool) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
    let date = today();
    let existing = db.tasks_for(date)?;
    if !existing.is_empty() && !regenerate {
        return Ok(existing);
    }

    let config = Config::load()?;
    let catalog = load_catalog(&config)?;
    let study = &config.study;
    let chapters = catalog.chapters_for(study.board, study.grade, &study.subjects);

    let state = mode_state(db);
    let tasks = DailyPlanner::new(study.planner_seed).plan(date, &study.subjects, &chapters, state.profile());
    db.replace_tasks(date, &tasks)?;
    Ok(tasks)
}

fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

fn print_plan(tasks: &[Task]) {
    let (pending, done) = partition(tasks);
    for task in pending {
        println!(
            "[ ] {}  {:<32} {:<16} {} min  ({})",
            short_id(&task.id),
            task.title,
            task.subject,
            task.estimated_minutes,
            task.current_micro_step().unwrap_or("-")
        );
    }
    if !done.is_empty() {
        println!("Completed:");
        for task in done {
            println!("[x] {}  {}", short_id(&task.id), task.title);
        }
    }
}
