use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};

/// Number of geological features per well (`f0`, `f1`, `f2`).
pub const FEATURE_COUNT: usize = 3;

/// Column names of the features, in order.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = ["f0", "f1", "f2"];

/// Column name of the regression target.
pub const PRODUCT_COLUMN: &str = "product";

/// Identifies a candidate region by its position in the input list.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RegionId(pub usize);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region {}", self.0)
    }
}

/// A single candidate well.
#[derive(Debug, Clone, PartialEq)]
pub struct WellRecord {
    pub id: String,
    /// Geological features `f0`, `f1`, `f2`.
    pub features: [f64; FEATURE_COUNT],
    /// Reserves in thousands of barrels.
    pub product: f64,
}

impl WellRecord {
    fn first_non_finite_column(&self) -> Option<&'static str> {
        self.features
            .iter()
            .zip(FEATURE_COLUMNS)
            .find_map(|(v, column)| (!v.is_finite()).then_some(column))
            .or_else(|| (!self.product.is_finite()).then_some(PRODUCT_COLUMN))
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum DataValidationError {
    #[display("null value in column '{column}' at data row {row}")]
    NullValue { row: usize, column: &'static str },
    #[display("duplicate well id '{id}'")]
    DuplicateId { id: String },
    #[display("non-finite value in column '{column}' for well '{id}'")]
    NonFiniteValue { id: String, column: &'static str },
    #[display("table contains no wells")]
    EmptyTable,
    #[display(
        "{rows} rows split into {train_rows} training / {validation_rows} validation rows; \
         need at least {required_train_rows} training rows and 1 validation row"
    )]
    InsufficientRows {
        rows: usize,
        train_rows: usize,
        validation_rows: usize,
        required_train_rows: usize,
    },
    #[display("features are linearly dependent; the regression cannot be fitted")]
    DegenerateFeatures,
}

/// Validated table of wells for one region.
///
/// Construction guarantees the table is non-empty, ids are non-empty and
/// unique, and every feature and target value is finite. The wells are never
/// modified afterwards.
#[derive(Debug, Clone)]
pub struct RegionDataset {
    region: RegionId,
    wells: Vec<WellRecord>,
}

impl RegionDataset {
    pub fn new(region: RegionId, wells: Vec<WellRecord>) -> Result<Self, DataValidationError> {
        if wells.is_empty() {
            return Err(DataValidationError::EmptyTable);
        }
        let mut seen = HashSet::with_capacity(wells.len());
        for (row, well) in wells.iter().enumerate() {
            if well.id.is_empty() {
                return Err(DataValidationError::NullValue {
                    row: row + 1,
                    column: "id",
                });
            }
            if !seen.insert(well.id.as_str()) {
                return Err(DataValidationError::DuplicateId {
                    id: well.id.clone(),
                });
            }
            if let Some(column) = well.first_non_finite_column() {
                return Err(DataValidationError::NonFiniteValue {
                    id: well.id.clone(),
                    column,
                });
            }
        }
        Ok(Self { region, wells })
    }

    #[must_use]
    pub fn region(&self) -> RegionId {
        self.region
    }

    #[must_use]
    pub fn wells(&self) -> &[WellRecord] {
        &self.wells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.wells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    /// Feature rows of the wells at `indices`, in that order.
    #[must_use]
    pub fn feature_rows(&self, indices: &[usize]) -> Vec<[f64; FEATURE_COUNT]> {
        indices.iter().map(|&i| self.wells[i].features).collect()
    }

    /// Reserves of the wells at `indices`, in that order.
    #[must_use]
    pub fn products(&self, indices: &[usize]) -> Vec<f64> {
        indices.iter().map(|&i| self.wells[i].product).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well(id: &str, product: f64) -> WellRecord {
        WellRecord {
            id: id.to_owned(),
            features: [0.0, 1.0, 2.0],
            product,
        }
    }

    #[test]
    fn test_valid_dataset() {
        let dataset = RegionDataset::new(RegionId(2), vec![well("a", 1.0), well("b", 2.0)])
            .unwrap();
        assert_eq!(dataset.region(), RegionId(2));
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.products(&[1, 0]), vec![2.0, 1.0]);
        assert_eq!(dataset.feature_rows(&[0]), vec![[0.0, 1.0, 2.0]]);
    }

    #[test]
    fn test_rejects_empty_table() {
        assert_eq!(
            RegionDataset::new(RegionId(0), vec![]).unwrap_err(),
            DataValidationError::EmptyTable
        );
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let err = RegionDataset::new(
            RegionId(0),
            vec![well("a", 1.0), well("b", 2.0), well("a", 3.0)],
        )
        .unwrap_err();
        assert_eq!(err, DataValidationError::DuplicateId { id: "a".to_owned() });
    }

    #[test]
    fn test_rejects_empty_id() {
        let err = RegionDataset::new(RegionId(0), vec![well("a", 1.0), well("", 2.0)])
            .unwrap_err();
        assert_eq!(
            err,
            DataValidationError::NullValue {
                row: 2,
                column: "id"
            }
        );
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let mut bad = well("x", 1.0);
        bad.features[1] = f64::NAN;
        let err = RegionDataset::new(RegionId(0), vec![bad]).unwrap_err();
        assert_eq!(
            err,
            DataValidationError::NonFiniteValue {
                id: "x".to_owned(),
                column: "f1"
            }
        );

        let err = RegionDataset::new(RegionId(0), vec![well("y", f64::INFINITY)]).unwrap_err();
        assert_eq!(
            err,
            DataValidationError::NonFiniteValue {
                id: "y".to_owned(),
                column: "product"
            }
        );
    }

    #[test]
    fn test_region_id_display_and_serialization() {
        assert_eq!(RegionId(1).to_string(), "region 1");
        assert_eq!(serde_json::to_string(&RegionId(1)).unwrap(), "1");
    }
}
