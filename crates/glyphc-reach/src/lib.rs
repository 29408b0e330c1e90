//! Reachability & VTI allocator (C6, §4.6).
//!
//! Tracks which functions are *used* (called from an emitted body, enqueued
//! for export, or named as an entry point), lazily assigns virtual-table
//! indices so that every override of the same virtual method shares a
//! slot, and produces the two artifacts §6 names: a FIFO compilation queue
//! of reachable bodies, and a linking table of exported functions.

pub mod queue;
pub use queue::CompilationQueue;

pub mod linking;
pub use linking::LinkingTable;

pub mod reachability;
pub use reachability::{assign_vti, mark_used};
