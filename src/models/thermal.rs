//! Thermal systems models.
//!
//! This module contains models for building envelope conduction, including
//! walls with latent heat storage.

pub mod wall;
