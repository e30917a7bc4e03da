/*!
# Sheet I/O

Reading the source sheet and writing the annotated copy. Both sides work on
whole tables held in memory; rows keep their original field count so the
annotated sheet lines up with the source row for row.
*/

use crate::{
    errors::{CsvError, CsvResult},
    schemas::{RawRow, OUTPUT_CSV_SUFFIX},
};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::path::{Path, PathBuf};

// ================================================================================================
// CSV Reading
// ================================================================================================

/// Read every row of a metadata sheet, header included, as raw rows.
///
/// The reader is flexible: rows may carry fewer or more fields than the
/// header, since team-name rows are frequently exported short.
pub fn read_metadata_csv<P: AsRef<Path>>(path: P) -> CsvResult<Vec<RawRow>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CsvError::Open {
        path: path.display().to_string(),
        source,
    })?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(RawRow::from(&record));
    }

    Ok(rows)
}

// ================================================================================================
// CSV Writing
// ================================================================================================

/// Write rows verbatim, one record per row, without forcing a common width.
pub fn write_metadata_csv<P: AsRef<Path>>(path: P, rows: &[RawRow]) -> CsvResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| CsvError::Create {
        path: path.display().to_string(),
        source,
    })?;

    let mut wtr = WriterBuilder::new().flexible(true).from_writer(file);
    for row in rows {
        wtr.write_record(row.fields())?;
    }

    wtr.flush()?;
    Ok(())
}

/// Path of the annotated sheet for `input`.
///
/// `hngi9.csv` becomes `hngi9.output.csv` in the same directory. A name
/// without the `.csv` extension just gets the suffix appended.
pub fn output_csv_path<P: AsRef<Path>>(input: P) -> CsvResult<PathBuf> {
    let input = input.as_ref();
    let file_name = input
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            CsvError::InvalidFormat(format!(
                "input path has no usable file name: {}",
                input.display()
            ))
        })?;

    let stem = file_name.strip_suffix(".csv").unwrap_or(file_name);
    Ok(input.with_file_name(format!("{stem}{OUTPUT_CSV_SUFFIX}")))
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::Column;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_read_metadata_csv_keeps_header_and_short_rows() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "TEAM NAMES,Series Number,Filename,Name,Description,Gender,Attributes,UUID"
        )
        .unwrap();
        writeln!(file, "TEAM BEVEL").unwrap();
        writeln!(
            file,
            ",1,bevel-1,Nina,\"A ticket, for lunch\",Female,\"hair:bald;eyes:black\",uuid-1"
        )
        .unwrap();

        let rows = read_metadata_csv(file.path()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get(Column::Uuid), "UUID");
        assert_eq!(rows[1].len(), 1);
        assert_eq!(rows[1].get(Column::TeamName), "TEAM BEVEL");
        assert_eq!(rows[2].get(Column::Description), "A ticket, for lunch");
        assert_eq!(rows[2].get(Column::Attributes), "hair:bald;eyes:black");
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.csv");

        let err = read_metadata_csv(&missing).unwrap_err();
        assert!(matches!(err, CsvError::Open { .. }));
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn test_write_preserves_ragged_rows() {
        let rows = vec![
            RawRow::from(["h1", "h2", "SHA256"]),
            RawRow::from(["a", "b"]),
            RawRow::from(["c", "d", "abc123"]),
        ];

        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_metadata_csv(&path, &rows).unwrap();

        let read_back = read_metadata_csv(&path).unwrap();
        assert_eq!(read_back, rows);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "h1,h2,SHA256\na,b\nc,d,abc123\n"
        );
    }

    #[test]
    fn test_output_csv_path() {
        assert_eq!(
            output_csv_path("hngi9-csv-file.csv").unwrap(),
            PathBuf::from("hngi9-csv-file.output.csv")
        );
        assert_eq!(
            output_csv_path("data/teams.csv").unwrap(),
            PathBuf::from("data/teams.output.csv")
        );
        assert_eq!(
            output_csv_path("data/teams.tsv").unwrap(),
            PathBuf::from("data/teams.tsv.output.csv")
        );
        assert!(output_csv_path("/").is_err());
    }
}
