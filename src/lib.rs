//! Interactive vector drawing tools with snapshot undo/redo.
//!
//! The crate is organised around a single [`scene::Scene`] that every other
//! part observes or edits:
//! - [`history`] records coalesced whole-scene snapshots for undo and redo
//! - [`input`] hosts the editor, the pen tool and drag-to-create
//! - [`config`] loads user settings shared by the binary and embedders

pub mod config;
pub mod draw;
pub mod history;
pub mod input;
pub mod replay;
pub mod scene;
pub mod util;

pub use config::Config;
pub use input::Editor;
