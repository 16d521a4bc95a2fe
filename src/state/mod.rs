//! State management module
//!
//! This module holds everything that does not touch the UI:
//! - The catalog data model and lenient decoding (data.rs)
//! - Loading the data file from disk or HTTP (loader.rs)
//! - Selection criteria and the filter/sort pipeline (selection.rs, pipeline.rs)
//! - Derived view models (views.rs)
//! - Lightbox and modal state machines (lightbox.rs)
//! - The controller that owns all of it (controller.rs)

pub mod collate;
pub mod controller;
pub mod data;
pub mod lightbox;
pub mod loader;
pub mod pipeline;
pub mod selection;
pub mod views;
