#![forbid(unsafe_code)]

//! Tree model and shared state primitives for the sylva explorer (headless).
//!
//! Design goals:
//! - one owner for all mutable per-node UI state (collapsed/highlight flags)
//! - stable integer identities assigned once, in pre-order
//! - deterministic, testable traversal primitives

pub mod config;
pub mod data;
pub mod error;
pub mod geom;
pub mod tree;
pub mod utils;
pub mod xref;

pub use config::ExplorerConfig;
pub use data::{Dataset, NodeData};
pub use error::{Error, Result};
pub use tree::{Node, NodeId, Tree};
pub use xref::CrossRefIndex;
