//! CSV loading for region tables.
//!
//! Rows are deserialized through `serde` with every column optional, so an
//! empty cell is reported as a null with its row and column rather than as an
//! opaque parse failure. Nulls, duplicate ids and non-finite values all reject
//! the whole table.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{DataValidationError, FEATURE_COLUMNS, RegionDataset, RegionId, WellRecord};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to open {}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("malformed CSV in {}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[display("invalid data in {}", path.display())]
    Validation {
        path: PathBuf,
        source: DataValidationError,
    },
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ReadError {
    #[display("malformed CSV")]
    Csv(csv::Error),
    #[display("invalid data")]
    Validation(DataValidationError),
}

/// One CSV row as read from disk, before null checks.
#[derive(Debug, Deserialize)]
struct RawWellRow {
    id: Option<String>,
    f0: Option<f64>,
    f1: Option<f64>,
    f2: Option<f64>,
    product: Option<f64>,
}

impl RawWellRow {
    fn into_record(self, row: usize) -> Result<WellRecord, DataValidationError> {
        let null = |column| DataValidationError::NullValue { row, column };
        let id = self.id.ok_or_else(|| null("id"))?;
        let [c0, c1, c2] = FEATURE_COLUMNS;
        let features = [
            self.f0.ok_or_else(|| null(c0))?,
            self.f1.ok_or_else(|| null(c1))?,
            self.f2.ok_or_else(|| null(c2))?,
        ];
        let product = self.product.ok_or_else(|| null("product"))?;
        Ok(WellRecord {
            id,
            features,
            product,
        })
    }
}

/// One CSV row as written by [`write_region_csv`].
#[derive(Debug, Serialize)]
struct WellRow<'a> {
    id: &'a str,
    f0: f64,
    f1: f64,
    f2: f64,
    product: f64,
}

/// Reads and validates a region table from any reader.
///
/// Surrounding whitespace in cells is ignored, as are extra columns.
pub fn read_region_csv<R>(region: RegionId, reader: R) -> Result<RegionDataset, ReadError>
where
    R: io::Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut wells = vec![];
    for (index, row) in csv_reader.deserialize::<RawWellRow>().enumerate() {
        wells.push(row?.into_record(index + 1)?);
    }
    let dataset = RegionDataset::new(region, wells)?;
    tracing::debug!(%region, wells = dataset.len(), "region table parsed");
    Ok(dataset)
}

/// Opens `path` and reads the region table from it.
pub fn load_region_csv<P>(region: RegionId, path: P) -> Result<RegionDataset, LoadError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    read_region_csv(region, io::BufReader::new(file)).map_err(|err| match err {
        ReadError::Csv(source) => LoadError::Csv {
            path: path.to_owned(),
            source,
        },
        ReadError::Validation(source) => LoadError::Validation {
            path: path.to_owned(),
            source,
        },
    })
}

/// Writes wells in the same format [`read_region_csv`] accepts.
pub fn write_region_csv<W>(writer: W, wells: &[WellRecord]) -> Result<(), csv::Error>
where
    W: io::Write,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for well in wells {
        let [f0, f1, f2] = well.features;
        csv_writer.serialize(WellRow {
            id: &well.id,
            f0,
            f1,
            f2,
            product: well.product,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(csv: &str) -> Result<RegionDataset, ReadError> {
        read_region_csv(RegionId(0), csv.as_bytes())
    }

    #[test]
    fn test_reads_valid_table() {
        let dataset = read(
            "id,f0,f1,f2,product\n\
             txEyH, 0.705745,-0.497823,1.22117,105.280062\n\
             2acmU,1.334711,-0.340164,4.36508,73.03775\n",
        )
        .unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.wells()[0].id, "txEyH");
        assert_eq!(dataset.wells()[0].features, [0.705745, -0.497823, 1.22117]);
        assert_eq!(dataset.wells()[1].product, 73.03775);
    }

    #[test]
    fn test_ignores_extra_columns_and_order() {
        let dataset = read("product,comment,f2,f1,f0,id\n5.0,x,3.0,2.0,1.0,w1\n").unwrap();
        assert_eq!(dataset.wells()[0].features, [1.0, 2.0, 3.0]);
        assert_eq!(dataset.wells()[0].product, 5.0);
    }

    #[test]
    fn test_rejects_null_cell() {
        let err = read("id,f0,f1,f2,product\na,1,2,3,4\nb,1,,3,4\n").unwrap_err();
        assert!(matches!(
            err,
            ReadError::Validation(DataValidationError::NullValue {
                row: 2,
                column: "f1"
            })
        ));
    }

    #[test]
    fn test_rejects_null_id() {
        let err = read("id,f0,f1,f2,product\n,1,2,3,4\n").unwrap_err();
        assert!(matches!(
            err,
            ReadError::Validation(DataValidationError::NullValue {
                row: 1,
                column: "id"
            })
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = read("id,f0,f1,f2,product\na,1,2,3,4\na,5,6,7,8\n").unwrap_err();
        assert!(matches!(
            err,
            ReadError::Validation(DataValidationError::DuplicateId { ref id }) if id == "a"
        ));
    }

    #[test]
    fn test_rejects_nan_literal() {
        let err = read("id,f0,f1,f2,product\na,1,2,3,NaN\n").unwrap_err();
        assert!(matches!(
            err,
            ReadError::Validation(DataValidationError::NonFiniteValue {
                column: "product",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_header_only_table() {
        let err = read("id,f0,f1,f2,product\n").unwrap_err();
        assert!(matches!(
            err,
            ReadError::Validation(DataValidationError::EmptyTable)
        ));
    }

    #[test]
    fn test_unparsable_number_is_csv_error() {
        let err = read("id,f0,f1,f2,product\na,1,2,three,4\n").unwrap_err();
        assert!(matches!(err, ReadError::Csv(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_region_csv(RegionId(0), "/nonexistent/geo_data_0.csv").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("geo_data_0.csv"));
    }

    #[test]
    fn test_error_chain_reports_each_cause_once() {
        use std::error::Error as _;

        let path =
            std::env::temp_dir().join(format!("geoprofit-duplicate-{}.csv", std::process::id()));
        std::fs::write(&path, "id,f0,f1,f2,product\na,1,2,3,4\na,1,2,3,5\n").unwrap();
        let err = load_region_csv(RegionId(0), &path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(err.to_string(), format!("invalid data in {}", path.display()));
        let cause = err.source().unwrap();
        assert_eq!(cause.to_string(), "duplicate well id 'a'");
        assert!(cause.source().is_none());

        let err = read("id,f0,f1,f2,product\na,1,2,3,4\na,1,2,3,5\n").unwrap_err();
        assert_eq!(err.to_string(), "invalid data");
        assert_eq!(err.source().unwrap().to_string(), "duplicate well id 'a'");
    }

    #[test]
    fn test_written_table_reads_back() {
        let wells = vec![
            WellRecord {
                id: "a".to_owned(),
                features: [0.5, -1.25, 3.0],
                product: 42.0,
            },
            WellRecord {
                id: "b".to_owned(),
                features: [1.0, 2.0, 3.0],
                product: 0.0,
            },
        ];
        let mut buf = vec![];
        write_region_csv(&mut buf, &wells).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("id,f0,f1,f2,product\n"));
        let dataset = read(&text).unwrap();
        assert_eq!(dataset.wells(), wells.as_slice());
    }
}
