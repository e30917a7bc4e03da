/*!
# Source Sheet Layout

The metadata sheets are exported from a spreadsheet with a fixed column
order. Row 0 is always the header; every later row is either a team-name
row, an item row, or noise.

Columns are addressed through [`Column`] rather than bare indices so a
change in the sheet layout only has to be made here.
*/

/// Expected headers of the source sheet, in column order.
pub const METADATA_CSV_HEADERS: &[&str] = &[
    "TEAM NAMES",
    "Series Number",
    "Filename",
    "Name",
    "Description",
    "Gender",
    "Attributes",
    "UUID",
];

/// Suffix appended to the input stem when writing the annotated sheet.
pub const OUTPUT_CSV_SUFFIX: &str = ".output.csv";

// ================================================================================================
// Column Layout
// ================================================================================================

/// Fixed-position columns of the source sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    TeamName,
    SeriesNumber,
    Filename,
    Name,
    Description,
    Gender,
    Attributes,
    Uuid,
}

impl Column {
    /// All columns in sheet order.
    pub const ALL: [Column; 8] = [
        Column::TeamName,
        Column::SeriesNumber,
        Column::Filename,
        Column::Name,
        Column::Description,
        Column::Gender,
        Column::Attributes,
        Column::Uuid,
    ];

    pub const fn index(self) -> usize {
        match self {
            Column::TeamName => 0,
            Column::SeriesNumber => 1,
            Column::Filename => 2,
            Column::Name => 3,
            Column::Description => 4,
            Column::Gender => 5,
            Column::Attributes => 6,
            Column::Uuid => 7,
        }
    }

    /// Header text used by the source sheet for this column.
    pub fn header(self) -> &'static str {
        METADATA_CSV_HEADERS[self.index()]
    }
}

// ================================================================================================
// Raw Rows
// ================================================================================================

/// One line of the sheet, exactly as read.
///
/// Rows are allowed to be shorter than the layout; a missing trailing field
/// reads as the empty string. The only mutation is [`RawRow::push`], which is
/// how the fingerprint column gets appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<String>,
}

impl RawRow {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Field at `column`, untrimmed. Empty when the row is too short.
    pub fn get(&self, column: Column) -> &str {
        self.fields
            .get(column.index())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Field at `column` with surrounding whitespace removed.
    pub fn trimmed(&self, column: Column) -> &str {
        self.get(column).trim()
    }

    /// True when `column` is the only layout column holding a non-blank value.
    pub fn is_only_populated(&self, column: Column) -> bool {
        Column::ALL
            .iter()
            .all(|&c| (c == column) != self.trimmed(c).is_empty())
    }

    /// Columns whose header text differs from the expected layout, ignoring
    /// case and surrounding whitespace. Only meaningful on row 0.
    pub fn header_mismatches(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|&c| !self.trimmed(c).eq_ignore_ascii_case(c.header()))
            .collect()
    }

    pub fn push(&mut self, field: impl Into<String>) {
        self.fields.push(field.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl From<&csv::StringRecord> for RawRow {
    fn from(record: &csv::StringRecord) -> Self {
        Self::new(record.iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RawRow {
    fn from(fields: [&str; N]) -> Self {
        Self::new(fields.iter().map(|f| (*f).to_owned()).collect())
    }
}

// ================================================================================================
// Tests
// ================================================================================================
