//! CSV dataset of house sales
//!
//! Loads the feature and target columns and produces seeded train/test splits.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::{HouseError, HouseRecord, Result, FEATURE_NAMES, TARGET_NAME};

/// In-memory dataset of house records
#[derive(Debug, Clone, Default)]
pub struct HouseDataset {
    records: Vec<HouseRecord>,
}

/// Train and test partitions of a dataset
#[derive(Debug, Clone)]
pub struct DatasetSplit {
    pub train: HouseDataset,
    pub test: HouseDataset,
}

impl HouseDataset {
    /// Load a dataset from a CSV file with a header row
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            HouseError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to open dataset {}: {}", path.display(), e),
            ))
        })?;
        let dataset = Self::from_reader(file)?;
        log::info!("Loaded {} records from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Parse CSV from any reader. Columns other than the features and target are ignored.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        check_columns(&headers)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let record: HouseRecord =
                row.deserialize(Some(&headers))
                    .map_err(|e| HouseError::MalformedRecord {
                        line,
                        message: e.to_string(),
                    })?;
            if let Some(field) = record.non_finite_field() {
                return Err(HouseError::MalformedRecord {
                    line,
                    message: format!("{} is not a finite number", field),
                });
            }
            records.push(record);
        }

        Ok(HouseDataset { records })
    }

    pub fn from_records(records: Vec<HouseRecord>) -> Self {
        HouseDataset { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[HouseRecord] {
        &self.records
    }

    /// Feature rows in model order
    pub fn features(&self) -> Vec<[f64; 3]> {
        self.records.iter().map(HouseRecord::features).collect()
    }

    /// Target column
    pub fn targets(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.price).collect()
    }

    /// Split into train and test partitions.
    ///
    /// Row indices are shuffled with a seeded RNG; the first
    /// `ceil(len * test_fraction)` shuffled rows form the test set. Both
    /// partitions keep the original row order.
    pub fn train_test_split(&self, test_fraction: f64, seed: u64) -> Result<DatasetSplit> {
        if !(0.0..1.0).contains(&test_fraction) {
            return Err(HouseError::Config(format!(
                "test_fraction must be in [0, 1), got {}",
                test_fraction
            )));
        }

        let n = self.len();
        let n_test = ((n as f64) * test_fraction).ceil() as usize;

        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let mut test_indices = indices[..n_test].to_vec();
        let mut train_indices = indices[n_test..].to_vec();
        test_indices.sort_unstable();
        train_indices.sort_unstable();

        let pick = |idx: &[usize]| HouseDataset {
            records: idx.iter().map(|&i| self.records[i]).collect(),
        };

        log::info!(
            "Split {} records: train={}, test={} (seed {})",
            n,
            train_indices.len(),
            test_indices.len(),
            seed
        );

        Ok(DatasetSplit {
            train: pick(&train_indices),
            test: pick(&test_indices),
        })
    }
}

fn check_columns(headers: &StringRecord) -> Result<()> {
    for column in FEATURE_NAMES.iter().chain(std::iter::once(&TARGET_NAME)) {
        if !headers.iter().any(|h| h == *column) {
            return Err(HouseError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn make_record(bedrooms: f64, bathrooms: f64, sqft_living: f64, price: f64) -> HouseRecord {
        HouseRecord {
            bedrooms,
            bathrooms,
            sqft_living,
            price,
        }
    }

    fn make_dataset(n: usize) -> HouseDataset {
        let records = (0..n)
            .map(|i| make_record(i as f64, 1.0, 1000.0 + i as f64, 100_000.0 + i as f64))
            .collect();
        HouseDataset::from_records(records)
    }

    #[test]
    fn test_parse_csv_with_extra_columns() {
        let csv = "id,price,bedrooms,bathrooms,sqft_living,zipcode\n\
                   1,221900,3,1,1180,98178\n\
                   2,538000,3,2.25,2570,98125\n";
        let dataset = HouseDataset::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[1], make_record(3.0, 2.25, 2570.0, 538000.0));
        assert_eq!(dataset.targets(), vec![221900.0, 538000.0]);
        assert_eq!(dataset.features()[0], [3.0, 1.0, 1180.0]);
    }

    #[test]
    fn test_missing_target_column() {
        let csv = "bedrooms,bathrooms,sqft_living\n3,1,1180\n";
        let err = HouseDataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, HouseError::MissingColumn(ref c) if c == "price"));
    }

    #[test]
    fn test_non_numeric_value_reports_line() {
        let csv = "bedrooms,bathrooms,sqft_living,price\n\
                   3,1,1180,221900\n\
                   three,1,1180,221900\n";
        let err = HouseDataset::from_reader(csv.as_bytes()).unwrap_err();
        match err {
            HouseError::MalformedRecord { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_and_nan_values_rejected() {
        let csv = "bedrooms,bathrooms,sqft_living,price\n3,,1180,221900\n";
        assert!(matches!(
            HouseDataset::from_reader(csv.as_bytes()),
            Err(HouseError::MalformedRecord { .. })
        ));

        let csv = "bedrooms,bathrooms,sqft_living,price\n3,1,1180,NaN\n";
        assert!(matches!(
            HouseDataset::from_reader(csv.as_bytes()),
            Err(HouseError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = HouseDataset::load(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, HouseError::Io(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bedrooms,bathrooms,sqft_living,price").unwrap();
        writeln!(file, "2,1,900,180000").unwrap();
        let dataset = HouseDataset::load(file.path()).unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_split_sizes() {
        let dataset = make_dataset(10);
        let split = dataset.train_test_split(0.2, 42).unwrap();
        assert_eq!(split.train.len(), 8);
        assert_eq!(split.test.len(), 2);

        // ceil(5 * 0.2) = 1
        let split = make_dataset(5).train_test_split(0.2, 42).unwrap();
        assert_eq!(split.train.len(), 4);
        assert_eq!(split.test.len(), 1);

        let split = make_dataset(5).train_test_split(0.0, 42).unwrap();
        assert_eq!(split.train.len(), 5);
        assert!(split.test.is_empty());
    }

    #[test]
    fn test_split_is_deterministic_and_disjoint() {
        let dataset = make_dataset(50);
        let a = dataset.train_test_split(0.2, 42).unwrap();
        let b = dataset.train_test_split(0.2, 42).unwrap();
        assert_eq!(a.train.records(), b.train.records());
        assert_eq!(a.test.records(), b.test.records());

        for r in a.test.records() {
            assert!(!a.train.records().contains(r));
        }
        assert_eq!(a.train.len() + a.test.len(), dataset.len());
    }

    #[test]
    fn test_split_rejects_bad_fraction() {
        let dataset = make_dataset(5);
        assert!(dataset.train_test_split(1.0, 42).is_err());
        assert!(dataset.train_test_split(-0.5, 42).is_err());
    }
}
