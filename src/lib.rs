//! # PCM Wall
//!
//! Transient heat conduction through building walls that carry a phase change
//! material (PCM) layer, built as [Twine](https://github.com/isentropic-dev/twine)
//! models.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code starts in a model's internal `core` module and only moves to
//! [`support`] once it is useful across models. Model-specific utility code
//! remains private.

pub mod models;
pub mod support;
