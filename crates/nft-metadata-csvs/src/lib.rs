/*!
# NFT Metadata Sheet Definitions

This crate owns the **source sheet contract** for the metadata compiler:
the fixed column layout, the raw row type, and reading/writing whole sheets.

## Sheet Layout

| Column | Meaning |
|--------|---------|
| `TEAM NAMES` | Team (minting tool) name; only set on team rows |
| `Series Number` | Position of the item in the series |
| `Filename` | Base name of the emitted JSON document |
| `Name` | Item name |
| `Description` | Item description |
| `Gender` | Item gender |
| `Attributes` | `key:value` pairs separated by `;` or `,` |
| `UUID` | Item identifier |

## Usage

```rust,no_run
use nft_metadata_csvs::{output_csv_path, read_metadata_csv, write_metadata_csv, CsvResult};

fn example() -> CsvResult<()> {
    let rows = read_metadata_csv("hngi9-csv-file.csv")?;
    write_metadata_csv(output_csv_path("hngi9-csv-file.csv")?, &rows)?;
    Ok(())
}
```
*/

pub mod errors;
pub mod schemas;
pub mod tables;

// Re-export main types for convenience
pub use errors::{CsvError, CsvResult};
pub use schemas::{Column, RawRow, METADATA_CSV_HEADERS, OUTPUT_CSV_SUFFIX};
pub use tables::{output_csv_path, read_metadata_csv, write_metadata_csv};
