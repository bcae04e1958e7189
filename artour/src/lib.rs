//! ARTour - Augmented-reality city tour core
//!
//! This library provides the core logic for an AR city tour assistant:
//! it tracks the user's position and heading, retrieves nearby points of
//! interest from a business directory, partitions the surrounding 360°
//! into twelve 30° sectors, selects one representative POI per sector,
//! and keeps the rendered marker entities bound to their POI records as
//! the user moves.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides the owning engine:
//!
//! ```ignore
//! use std::sync::Arc;
//! use artour::directory::{HttpDirectoryClient, ReqwestClient};
//! use artour::service::{TourEngine, TourEngineConfig};
//! use artour::tracker::SensorEvent;
//!
//! let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel();
//! let engine = Arc::new(TourEngine::new(client, renderer, TourEngineConfig::default()));
//! let handle = engine.clone().start(event_rx);
//!
//! // Sensor callbacks enqueue events and return immediately
//! event_tx.send(SensorEvent::LocationChanged(location))?;
//! ```
//!
//! Rendering, sensors and the directory network client are external
//! collaborators reached through the [`scene::SceneRenderer`] and
//! [`directory::DirectoryClient`] traits.

pub mod config;
pub mod directory;
pub mod geo;
pub mod logging;
pub mod poi;
pub mod scene;
pub mod service;
pub mod slotter;
pub mod tracker;

/// Version of the ARTour library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
