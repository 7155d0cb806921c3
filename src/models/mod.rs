//! Data models for citycast
//!
//! - City: the fixed set of cities we report on
//! - Weather: per-city readings and their holiday-enriched form

pub mod city;
pub mod weather;

pub use city::{CITIES, City};
pub use weather::{EnrichedReading, WeatherReading};
