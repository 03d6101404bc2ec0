//! # monalign
//!
//! Interactive alignment of a multi-monitor layout.
//!
//! Every monitor gets a full-screen overlay with diagonal lines, a vertical
//! center line and horizontal lines drawn on a grid shared by the whole
//! virtual screen. Nudging a secondary monitor with the arrow keys shifts its
//! lines until they continue straight across the bezels; applying commits the
//! new positions to the OS and asks for confirmation, rolling back when the
//! user declines or does not answer in time.
//!
//! ## Features
//!
//! - Display enumeration and layout changes on Linux (XRandR), Windows and macOS
//! - A toolkit-independent session controller driven by [`InputEvent`]s
//! - Retained per-monitor scenes a front end only has to paint
//! - An egui front end behind the `gui` feature
//!
//! ## Quick Start
//!
//! ```no_run
//! use monalign::{AlignController, DialogAnswer, InputEvent, Key, Settings, SystemBackend, VScreen};
//! use std::time::Duration;
//!
//! let vscreen = VScreen::load(SystemBackend)?;
//! let mut controller = AlignController::new(vscreen, Settings::default());
//! controller.start();
//!
//! for pair in controller.pairs() {
//!     println!("{} at {:?}", pair.model.device_name(), pair.model.position());
//! }
//! controller.handle_event("HDMI-1", InputEvent::KeyPress(Key::ArrowRight));
//!
//! let mut keep = |_timeout: Duration| DialogAnswer::Yes;
//! controller.button_apply(&mut keep)?;
//! # Ok::<(), monalign::Error>(())
//! ```

pub mod backend;
pub mod config;
pub mod controller;
pub mod dialog;
pub mod display;
pub mod error;
pub mod event;
#[cfg(feature = "gui")]
pub mod gui;
pub mod items;
pub mod keycode;
pub mod layout;
pub mod model;
pub mod observer;
pub mod scene;
pub mod view_model;
pub mod vscreen;
pub mod widget;

mod platform;

// Re-exports
pub use backend::{Backend, StaticBackend, SystemBackend};
pub use config::Settings;
pub use controller::{AlignController, AlignPair, ApplyOutcome};
pub use dialog::{DialogAnswer, RollbackDialog};
pub use display::{DisplayInfo, Placement, Rect, displays, primary_display};
pub use error::{Error, Result};
pub use event::{InputEvent, Propagation, ScrollDirection};
pub use keycode::Key;
pub use model::{AlignModel, Position};
pub use view_model::{AlignViewModel, ViewOption, ViewOptions};
pub use vscreen::{Monitor, VScreen};
pub use widget::AlignWidget;
