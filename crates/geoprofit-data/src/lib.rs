//! Well data for the region-selection pipeline.
//!
//! This crate owns everything about the input tables: the record types, CSV
//! loading with validation, the reproducible train/validation split and a
//! synthetic region generator used for demos and tests.
//!
//! # Key Types
//!
//! - [`WellRecord`] - One candidate well: id, three geological features and its reserves
//! - [`RegionDataset`] - Validated, immutable table of wells for one region
//! - [`RegionId`] - Identifies a region by its position in the input list
//! - [`DataValidationError`] - Nulls, duplicate ids, non-finite values, too few rows
//!
//! # Input Format
//!
//! One CSV file per region with a header row:
//!
//! ```text
//! id,f0,f1,f2,product
//! txEyH,0.705745,-0.497823,1.221170,105.280062
//! 2acmU,1.334711,-0.340164,4.365080,73.037750
//! ```
//!
//! `product` is the well's reserves in thousands of barrels. Empty cells are
//! nulls and are rejected, as are duplicate ids.
//!
//! # Example
//!
//! ```
//! use geoprofit_data::{RegionId, loader};
//!
//! let csv = "id,f0,f1,f2,product\na,0.1,0.2,0.3,10.0\nb,0.4,0.5,0.6,20.0\n";
//! let dataset = loader::read_region_csv(RegionId(0), csv.as_bytes()).unwrap();
//! assert_eq!(dataset.len(), 2);
//! assert_eq!(dataset.wells()[1].product, 20.0);
//! ```

pub use self::well::*;

pub mod loader;
pub mod split;
pub mod synthetic;
mod well;
