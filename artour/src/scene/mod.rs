//! Scene binding module
//!
//! Maintains the two-way mapping between rendered marker entities and
//! the POI records they display, and mediates all add/remove/select
//! operations against the rendering collaborator.
//!
//! The core never renders geometry itself: [`SceneRenderer`] is the
//! narrow interface a scene-graph engine implements, and
//! [`SceneBinding`] owns the reconciliation of slot assignments against
//! what is currently on screen.

mod binding;
mod renderer;

pub use binding::{ReconcileSummary, SceneBinding};
pub use renderer::{EntityId, SceneRenderer};
