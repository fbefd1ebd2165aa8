//! # NeuroStudy Core Library
//!
//! Core logic for NeuroStudy, a study companion that adapts to the learner's
//! support needs. Every operation is available through the `neurostudy` CLI;
//! the CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Modes**: support modes, daily energy and the preference record
//! - **Profile**: the pure derivation from (preferences, energy) to an
//!   [`ExperienceProfile`], the style tags it implies, and [`ModeState`],
//!   which keeps the profile in step with its inputs
//! - **Plan**: daily task selection and micro-step breakdown
//! - **Session**: a wall-clock focus timer, focus sessions and progress
//! - **Tutor / Notes**: prompt construction and clients for the AI gateway
//! - **Storage**: SQLite persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`derive_profile`]: the single source of truth for UI adaptation
//! - [`FocusTimer`]: countdown state machine driven by `tick()`
//! - [`ChatSession`]: tutor conversation with streaming replies
//! - [`Database`]: tasks, sessions, progress and key-value persistence
//! - [`Config`]: application configuration management

pub mod curriculum;
pub mod error;
pub(crate) mod http;
pub mod modes;
pub mod notes;
pub mod plan;
pub mod profile;
pub mod session;
pub mod storage;
pub mod tutor;

pub use curriculum::{Board, Catalog, Chapter, PracticeQuestion};
pub use error::{ConfigError, CoreError, DatabaseError, GatewayError, UploadError, ValidationError};
pub use modes::{EnergyLevel, SupportMode, TimerPreset, UserPreferences};
pub use notes::{DetailLevel, NotesClient, NotesResult};
pub use plan::{DailyPlanner, Task, TaskStatus};
pub use profile::{derive_profile, ExperienceProfile, ModeState, StyleReconciler, StyleSet, StyleTag};
pub use session::{EndReason, FocusSession, FocusTimer, TimerState, UserProgress};
pub use storage::{Config, Database, KeyValueStore};
pub use tutor::{ChapterContext, ChatMessage, ChatSession, TutorClient};
