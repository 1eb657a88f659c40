//! Session engine for the WordTrek lesson player.
//!
//! The mobile-style front-end is out of scope here; this crate owns
//! everything behind it:
//! - the lesson progress state machine (`store`)
//! - durable progress snapshots (`persistence`)
//! - command funnel wiring store and storage together (`engine`)
//! - startup sequencing and the resume hint (`hydration`)

pub mod engine;
pub mod hydration;
pub mod persistence;
pub mod store;

pub use engine::{LessonSource, LoadError, SessionEngine};
pub use hydration::{hydrate, HydrationReport, RESUME_HINT_TTL};
pub use persistence::{JsonFileStore, MemoryStore, Snapshot, SnapshotStore, StoreError};
pub use store::{LessonProgress, LessonStore, STARTING_HEARTS};
