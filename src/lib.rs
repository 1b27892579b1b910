//! Multi-criteria crop suitability scoring.
//!
//! Scores a catalog of crops against measured soil and climate conditions
//! along six weighted dimensions (pH, temperature, rainfall, soil type,
//! planting season, rotation) and returns them ranked best first.
//!
//! ```
//! use cropfit::models::{Crop, EnvironmentalInputs, Month, SoilType};
//!
//! let crops = vec![Crop::new("sweet pepper")
//!     .with_ph(6.0, 7.0)
//!     .with_temperature(18.0, 27.0)
//!     .with_rainfall(400.0, 700.0)];
//! let inputs = EnvironmentalInputs::new(6.5, 22.0, 550.0)
//!     .with_soil(SoilType::Loam)
//!     .with_season(Month::March);
//!
//! let ranked = cropfit::score_crops(&crops, &inputs).unwrap();
//! assert_eq!(ranked[0].crop.name, "sweet pepper");
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod logic;
pub mod models;

pub use error::{CropFitError, Result};
pub use logic::{score_crops, SuitabilityEngine};
