//! CSV ingest of raw listings.

use crate::dataset::record::RawRecord;
use crate::dataset::DatasetError;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Read every listing from a CSV file with a header row.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>, DatasetError> {
    let path = path.as_ref();
    let reader = csv::Reader::from_path(path).map_err(|source| DatasetError::Csv {
        path: path.display().to_string(),
        source,
    })?;
    let records = collect(reader, &path.display().to_string())?;
    info!(path = %path.display(), rows = records.len(), "loaded listings");
    Ok(records)
}

/// Read listings from any CSV source. Columns are matched by header name.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, DatasetError> {
    collect(csv::Reader::from_reader(reader), "<reader>")
}

fn collect<R: Read>(mut reader: csv::Reader<R>, origin: &str) -> Result<Vec<RawRecord>, DatasetError> {
    reader
        .deserialize()
        .collect::<Result<Vec<RawRecord>, _>>()
        .map_err(|source| DatasetError::Csv {
            path: origin.to_string(),
            source,
        })
}
