//! Workflow canvas engine for the Cashboard editor.
//!
//! The crate owns the interactive state of one workflow canvas: the node and
//! connection document, the camera for pan/zoom, tool modes, selection, the
//! clipboard, and the gesture state machine that turns raw pointer and key
//! events into document mutations. It performs no I/O and never draws; the
//! host feeds events in and applies the returned [`engine::Action`]s to
//! whatever presentation it owns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EngineCore`]: event handlers, tools, bulk operations |
//! | [`controller`] | [`controller::CanvasController`] command seam for non-pointer clients |
//! | [`doc`] | Node/connection types and the in-memory document store |
//! | [`workflow`] | Workflow record: document plus editor state and metadata |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Input event types, editor state, and the gesture state machine |
//! | [`hit`] | Hit-testing and grid-snapped render positions |
//! | [`palette`] | Node styles, palette groups, placeholder nodes |
//! | [`catalog`] | Business entity categories and the entity directory seam |
//! | [`consts`] | Shared numeric constants (zoom limits, grid size, node size, etc.) |

pub mod camera;
pub mod catalog;
pub mod consts;
pub mod controller;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod palette;
pub mod workflow;
