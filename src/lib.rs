//! Insert-strategy benchmark and DB-API walkthrough for CrateDB over HTTP.

pub mod config;
pub mod display;
pub mod error;
pub mod frame;
pub mod logging;
pub mod mode;
pub mod strategy;
pub mod walkthrough;
pub mod workload;

pub use config::{Overrides, WalkthroughConfig, WorkloadConfig};
pub use error::WorkloadError;
pub use frame::TimeFrame;
pub use mode::{IfExists, InsertMode};
pub use strategy::{write_frame, InsertReport, InsertStrategy};
pub use workload::DatabaseWorkload;
