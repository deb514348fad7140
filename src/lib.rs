// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Scroll-driven decorative 3D scene rendered with wgpu.
//!
//! A wireframe torus spins in front of a random starfield and a textured,
//! normal-mapped moon. Scrolling the host page moves the camera through the
//! scene and nudges the moon.
//!
//! # Key entry points
//!
//! - [`SceneEngine`] - scene state, input routing and the frame loop
//! - [`scene::Scene`] - ordered collection of meshes and lights
//! - [`renderer::SceneRenderer`] - draws a [`scene::SceneContext`] to a
//!   window or canvas surface
//! - [`options::Options`] - every tunable constant, loadable from TOML
//!
//! # Architecture
//!
//! The engine is GPU-free: hosts feed it [`input::InputEvent`]s and call
//! [`SceneEngine::frame`] with any [`animation::FrameRenderer`] and
//! [`animation::FrameScheduler`]. The winit [`Viewer`] schedules frames with
//! `request_redraw`; the browser build uses `requestAnimationFrame`.

pub mod animation;
pub mod assets;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub mod web;

pub use engine::SceneEngine;
pub use error::MoonscapeError;
pub use input::{InputEvent, WheelDelta};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
