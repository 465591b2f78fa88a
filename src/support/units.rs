//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for physical configuration inputs (lengths,
//! material properties, durations). This module provides what [`uom`] does
//! not cover for the wall models.
//!
//! ## Exact Celsius values
//!
//! The explicit solver stores node temperatures as plain `f64` degrees
//! Celsius, and boundary nodes must hold the configured value exactly.
//! [`Celsius`] keeps a configured temperature as given and converts to
//! [`uom`] temperatures on request:
//!
//! ```
//! use pcm_wall::support::units::Celsius;
//! use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};
//!
//! let indoor = Celsius::new(20.1);
//! assert_eq!(indoor.value(), 20.1);
//!
//! let kelvin = ThermodynamicTemperature::from(indoor);
//! assert!((kelvin.get::<degree_celsius>() - 20.1).abs() < 1e-12);
//! ```

mod celsius;

pub use celsius::Celsius;
