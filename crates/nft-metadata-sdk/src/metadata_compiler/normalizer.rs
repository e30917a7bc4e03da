use super::fingerprint::is_document_filename;
use crate::{
    config::{CompilerConfig, ATTRIBUTE_KEY_VALUE_SEPARATOR},
    record::{Attribute, Record, CHIP_0007_FORMAT},
};
use nft_metadata_csvs::{Column, RawRow};

/// Team name carried forward from the most recent team-name row.
///
/// Owned by the compile loop and threaded through every call to
/// [`RowNormalizer::normalize`]; it starts out empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MintingTool(String);

impl MintingTool {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn replace(&mut self, name: &str) {
        self.0.clear();
        self.0.push_str(name);
    }
}

/// Why an item row produced no document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Name, description, uuid (or gender, when required) blank
    MissingRequiredField,
    /// Filename column is blank or is not a bare file name
    InvalidFilename,
    /// Series number column is not an unsigned integer
    InvalidSeriesNumber,
    /// Filename already used by an earlier record of the same run
    DuplicateFilename,
}

/// What a single row turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Row 0; gets the hash header label appended
    Header,
    /// Team-name row; updated the minting tool, emits nothing
    TeamName,
    /// Row dropped without error; left unchanged in the output sheet
    Skipped(SkipReason),
    /// Valid item row, ready to be fingerprinted
    Record(Record),
}

/// Turns raw sheet rows into records according to a [`CompilerConfig`].
#[derive(Debug, Clone, Copy)]
pub struct RowNormalizer<'a> {
    config: &'a CompilerConfig,
}

impl<'a> RowNormalizer<'a> {
    pub fn new(config: &'a CompilerConfig) -> Self {
        Self { config }
    }

    /// Normalize the row at `row_index`.
    ///
    /// Team-name rows overwrite `minting_tool`; item rows read it. Validation
    /// runs before the series number is parsed, and neither failure is an
    /// error.
    pub fn normalize(
        &self,
        row: &RawRow,
        row_index: usize,
        minting_tool: &mut MintingTool,
    ) -> RowOutcome {
        if row_index == 0 {
            return RowOutcome::Header;
        }

        let schema = self.config.schema;
        let team_name = row.trimmed(Column::TeamName);
        let name = row.trimmed(Column::Name);
        let description = row.trimmed(Column::Description);
        let gender = row.trimmed(Column::Gender);
        let uuid = row.trimmed(Column::Uuid);

        let mut attributes = Vec::new();
        if schema.gender_as_attribute() {
            attributes.push(Attribute::new("gender", gender));
        }
        attributes.extend(parse_attributes(
            row.get(Column::Attributes),
            &self.config.attribute_separators,
        ));

        let is_team_row = if schema.gender_as_attribute() {
            name.is_empty()
                && description.is_empty()
                && uuid.is_empty()
                && attributes.len() == 1
        } else {
            row.is_only_populated(Column::TeamName)
        };
        if is_team_row && !team_name.is_empty() {
            minting_tool.replace(team_name);
            return RowOutcome::TeamName;
        }

        let missing_gender = schema.requires_gender() && gender.is_empty();
        if name.is_empty() || description.is_empty() || uuid.is_empty() || missing_gender {
            return RowOutcome::Skipped(SkipReason::MissingRequiredField);
        }

        if !is_document_filename(row.trimmed(Column::Filename)) {
            return RowOutcome::Skipped(SkipReason::InvalidFilename);
        }

        let Ok(series_number) = row.trimmed(Column::SeriesNumber).parse::<u32>() else {
            return RowOutcome::Skipped(SkipReason::InvalidSeriesNumber);
        };

        RowOutcome::Record(Record {
            format: CHIP_0007_FORMAT.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            minting_tool: minting_tool.as_str().to_string(),
            sensitive_content: false,
            series_number,
            series_total: self.config.series_total,
            gender: (!schema.gender_as_attribute()).then(|| gender.to_string()),
            attributes,
            uuid: uuid.to_string(),
            collection: schema
                .emits_collection()
                .then(|| self.config.collection.clone()),
        })
    }
}

/// Parse an `Attributes` cell such as `"color:red;size:large;"`.
///
/// Tokens are split on any of `separators`, then once on `:`. Tokens without
/// a `:` (including the empty ones around stray separators) are dropped.
/// Keys and values come out trimmed and lower-cased, in source order.
pub fn parse_attributes(field: &str, separators: &[char]) -> Vec<Attribute> {
    field
        .split(|c: char| separators.contains(&c))
        .filter_map(|token| token.split_once(ATTRIBUTE_KEY_VALUE_SEPARATOR))
        .map(|(key, value)| {
            Attribute::new(key.trim().to_lowercase(), value.trim().to_lowercase())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchemaVariant;

    impl MintingTool {
        fn new(name: &str) -> Self {
            Self(name.to_string())
        }
    }

    fn chip0007_config() -> CompilerConfig {
        CompilerConfig {
            schema: SchemaVariant::Chip0007,
            ..CompilerConfig::default()
        }
    }

    fn item(series: &str, name: &str, gender: &str, uuid: &str) -> RawRow {
        RawRow::from(["", series, "f1", name, "desc", gender, "trait:val", uuid])
    }

    #[test]
    fn test_parse_attributes_ignores_trailing_separator() {
        let attributes = parse_attributes("color:red;size:large;", &[';']);
        assert_eq!(
            attributes,
            vec![Attribute::new("color", "red"), Attribute::new("size", "large")]
        );
    }

    #[test]
    fn test_parse_attributes_normalizes_and_drops_bare_tokens() {
        let attributes = parse_attributes(
            ";Hair: Bald , eyes: BLACK, freckles,teeth:none:gap",
            &[';', ','],
        );
        assert_eq!(
            attributes,
            vec![
                Attribute::new("hair", "bald"),
                Attribute::new("eyes", "black"),
                Attribute::new("teeth", "none:gap"),
            ]
        );
        assert!(parse_attributes("", &[';']).is_empty());
    }

    #[test]
    fn test_header_row() {
        let config = CompilerConfig::default();
        let mut tool = MintingTool::default();
        let outcome = RowNormalizer::new(&config).normalize(
            &RawRow::from(["TEAM NAMES", "Series Number"]),
            0,
            &mut tool,
        );
        assert_eq!(outcome, RowOutcome::Header);
        assert_eq!(tool.as_str(), "");
    }

    #[test]
    fn test_team_row_updates_minting_tool() {
        let config = CompilerConfig::default();
        let normalizer = RowNormalizer::new(&config);
        let mut tool = MintingTool::default();

        let team = RawRow::from([" AcmeTool ", "", "", "", "", "", "", ""]);
        assert_eq!(normalizer.normalize(&team, 1, &mut tool), RowOutcome::TeamName);
        assert_eq!(tool.as_str(), "AcmeTool");

        let RowOutcome::Record(record) =
            normalizer.normalize(&item("1", "Nina", "female", "uuid-1"), 2, &mut tool)
        else {
            panic!("expected a record");
        };
        assert_eq!(record.minting_tool, "AcmeTool");
        assert_eq!(record.series_number, 1);
        assert_eq!(record.gender.as_deref(), Some("female"));
        assert_eq!(record.attributes, vec![Attribute::new("trait", "val")]);
        assert_eq!(record.collection, Some(config.collection.clone()));
    }

    #[test]
    fn test_blank_row_keeps_minting_tool() {
        let config = chip0007_config();
        let mut tool = MintingTool::new("AcmeTool");
        let outcome = RowNormalizer::new(&config).normalize(&RawRow::default(), 3, &mut tool);
        assert_eq!(
            outcome,
            RowOutcome::Skipped(SkipReason::MissingRequiredField)
        );
        assert_eq!(tool.as_str(), "AcmeTool");
    }

    #[test]
    fn test_chip0007_team_row_may_carry_other_columns() {
        let config = chip0007_config();
        let mut tool = MintingTool::default();
        let team = RawRow::from(["Team Bevel", "", "", "", "", "Male", "", ""]);
        assert_eq!(
            RowNormalizer::new(&config).normalize(&team, 1, &mut tool),
            RowOutcome::TeamName
        );
        assert_eq!(tool.as_str(), "Team Bevel");
    }

    #[test]
    fn test_collection_team_row_must_be_team_only() {
        let config = CompilerConfig::default();
        let mut tool = MintingTool::new("Previous");
        let row = RawRow::from(["Team Bevel", "", "", "", "", "Male", "", ""]);
        assert_eq!(
            RowNormalizer::new(&config).normalize(&row, 1, &mut tool),
            RowOutcome::Skipped(SkipReason::MissingRequiredField)
        );
        assert_eq!(tool.as_str(), "Previous");
    }

    #[test]
    fn test_chip0007_synthesizes_gender_attribute() {
        let config = chip0007_config();
        let mut tool = MintingTool::new("AcmeTool");
        let row = item("7", "Nina", " Female ", "u");
        let RowOutcome::Record(record) = RowNormalizer::new(&config).normalize(&row, 1, &mut tool)
        else {
            panic!("expected a record");
        };
        assert_eq!(record.gender, None);
        assert_eq!(record.collection, None);
        assert_eq!(
            record.attributes,
            vec![
                Attribute::new("gender", "Female"),
                Attribute::new("trait", "val")
            ]
        );
    }

    #[test]
    fn test_missing_gender_only_rejected_by_collection_schema() {
        let mut tool = MintingTool::default();
        let row = item("1", "Nina", "", "uuid-1");

        let strict = CompilerConfig::default();
        assert_eq!(
            RowNormalizer::new(&strict).normalize(&row, 1, &mut tool),
            RowOutcome::Skipped(SkipReason::MissingRequiredField)
        );

        let lenient = chip0007_config();
        assert!(matches!(
            RowNormalizer::new(&lenient).normalize(&row, 1, &mut tool),
            RowOutcome::Record(_)
        ));
    }

    #[test]
    fn test_whitespace_only_fields_are_missing() {
        let config = CompilerConfig::default();
        let mut tool = MintingTool::default();
        let row = item("1", "   ", "female", "uuid-1");
        assert_eq!(
            RowNormalizer::new(&config).normalize(&row, 1, &mut tool),
            RowOutcome::Skipped(SkipReason::MissingRequiredField)
        );
    }

    #[test]
    fn test_bad_series_number_is_skipped() {
        let config = CompilerConfig::default();
        let normalizer = RowNormalizer::new(&config);
        let mut tool = MintingTool::default();

        for series in ["", "one", "-1", "1.5"] {
            assert_eq!(
                normalizer.normalize(&item(series, "Nina", "female", "u"), 1, &mut tool),
                RowOutcome::Skipped(SkipReason::InvalidSeriesNumber),
                "series number {series:?}"
            );
        }

        assert!(matches!(
            normalizer.normalize(&item(" 12 ", "Nina", "female", "u"), 1, &mut tool),
            RowOutcome::Record(Record { series_number: 12, .. })
        ));
    }

    #[test]
    fn test_validation_runs_before_series_parsing() {
        let config = CompilerConfig::default();
        let mut tool = MintingTool::default();
        let row = item("not-a-number", "", "female", "u");
        assert_eq!(
            RowNormalizer::new(&config).normalize(&row, 1, &mut tool),
            RowOutcome::Skipped(SkipReason::MissingRequiredField)
        );
    }

    #[test]
    fn test_filename_must_stay_inside_output_dir() {
        let config = CompilerConfig::default();
        let normalizer = RowNormalizer::new(&config);
        let mut tool = MintingTool::default();

        for filename in ["", "   ", "..", ".", "../escaped", "nested/f1", "/abs"] {
            let row = RawRow::from(["", "1", filename, "Nina", "desc", "female", "", "u"]);
            assert_eq!(
                normalizer.normalize(&row, 1, &mut tool),
                RowOutcome::Skipped(SkipReason::InvalidFilename),
                "filename {filename:?}"
            );
        }

        let row = RawRow::from(["", "1", " f1 ", "Nina", "desc", "female", "", "u"]);
        assert!(matches!(
            normalizer.normalize(&row, 1, &mut tool),
            RowOutcome::Record(_)
        ));
    }
}
