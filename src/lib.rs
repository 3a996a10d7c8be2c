//! cover-studio library crate.
//!
//! Headless client for the cover generation site: tabbed generation forms,
//! client-side validation, and the multipart submission to `/api/gen-cover`.

pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod forms;
pub mod media;
pub mod models;
pub mod navigation;
pub mod notify;
pub mod preview;
pub mod selection;
pub mod tabs;
