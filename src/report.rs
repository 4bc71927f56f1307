//! Result retrieval: parsing the engine's tabular report output and the
//! column-name helpers used to request it.
//!
//! A report file is whitespace-delimited text: row one is the field-name
//! header, every later row holds exactly one numeric token per header field.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::{Error, ReportError};
use crate::resources::{CoordinateSystem, ReportSink, Spacecraft};
use crate::script::utf8_path;

/// Parsed report contents: header fields plus numeric rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportTable {
    fields: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ReportTable {
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row by index, one value per header field.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Value at (row, field name).
    pub fn value(&self, row: usize, field: &str) -> Result<Option<f64>, ReportError> {
        let column = self
            .fields
            .iter()
            .position(|f| f == field)
            .ok_or_else(|| ReportError::UnknownField {
                field: field.to_string(),
            })?;
        Ok(self.rows.get(row).map(|r| r[column]))
    }
}

/// Parse a report file the engine produced.
///
/// Idempotent: parsing unchanged content twice yields structurally identical
/// tables. An empty file parses to an empty table.
pub fn parse_report(path: &Utf8Path) -> Result<ReportTable, ReportError> {
    let content = fs::read_to_string(path)?;
    let mut lines = content.lines().enumerate();

    let Some((_, header)) = lines.next() else {
        return Ok(ReportTable::default());
    };
    let fields: Vec<String> = header.split_whitespace().map(str::to_string).collect();

    let mut rows = Vec::new();
    for (index, line) in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != fields.len() {
            return Err(ReportError::ColumnCount {
                line: index + 1,
                expected: fields.len(),
                found: tokens.len(),
            });
        }
        let mut row = Vec::with_capacity(tokens.len());
        for token in tokens {
            let value = token.parse::<f64>().map_err(|_| ReportError::NonNumeric {
                line: index + 1,
                token: token.to_string(),
            })?;
            row.push(value);
        }
        rows.push(row);
    }
    Ok(ReportTable { fields, rows })
}

/// A report sink wired to a retained temporary output file, with a reader
/// for the results once the plan has run.
#[derive(Debug, Clone)]
pub struct ReportReader {
    sink: ReportSink,
    path: Utf8PathBuf,
}

impl ReportReader {
    /// Allocate a retained temp output file and build the sink around it.
    /// The sink's resource name is the file stem, which is unique per call.
    pub fn temp(fields: Vec<String>) -> Result<Self, Error> {
        let file = tempfile::Builder::new().prefix("report-").tempfile()?;
        let (_, path) = file.keep().map_err(|e| Error::Io(e.error))?;
        let path = utf8_path(path)?;
        let name = path
            .file_stem()
            .unwrap_or("report")
            .replace(|c: char| !c.is_ascii_alphanumeric(), "");
        let sink = ReportSink::new(name, path.as_str()).with_fields(fields);
        Ok(Self { sink, path })
    }

    /// The sink resource to declare in the plan.
    #[must_use]
    pub fn sink(&self) -> &ReportSink {
        &self.sink
    }

    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Parse whatever the engine wrote to the output file.
    pub fn load(&self) -> Result<ReportTable, ReportError> {
        parse_report(&self.path)
    }
}

/// `X/Y/Z/VX/VY/VZ` field names for a spacecraft in a frame.
#[must_use]
pub fn cartesian_headers(craft: &Spacecraft, frame: &CoordinateSystem) -> Vec<String> {
    ["X", "Y", "Z", "VX", "VY", "VZ"]
        .iter()
        .map(|c| format!("{}.{}.{c}", craft.name, frame.name))
        .collect()
}

/// Keplerian element field names. SMA, ECC, and TA are origin-relative;
/// the angles are frame-relative.
#[must_use]
pub fn keplerian_headers(craft: &Spacecraft, frame: &CoordinateSystem) -> Vec<String> {
    vec![
        format!("{}.{}.SMA", craft.name, frame.origin),
        format!("{}.{}.ECC", craft.name, frame.origin),
        format!("{}.{}.INC", craft.name, frame.name),
        format!("{}.{}.RAAN", craft.name, frame.name),
        format!("{}.{}.AOP", craft.name, frame.name),
        format!("{}.{}.TA", craft.name, frame.origin),
    ]
}

/// Radius magnitude plus planetodetic latitude/longitude field names.
#[must_use]
pub fn spherical_headers(craft: &Spacecraft, frame: &CoordinateSystem) -> Vec<String> {
    ["RMAG", "Latitude", "Longitude"]
        .iter()
        .map(|c| format!("{}.{}.{c}", craft.name, frame.origin))
        .collect()
}

/// Angular-momentum field names: origin-relative magnitude plus
/// frame-relative components.
#[must_use]
pub fn angular_momentum_headers(craft: &Spacecraft, frame: &CoordinateSystem) -> Vec<String> {
    vec![
        format!("{}.{}.HMAG", craft.name, frame.origin),
        format!("{}.{}.HX", craft.name, frame.name),
        format!("{}.{}.HY", craft.name, frame.name),
        format!("{}.{}.HZ", craft.name, frame.name),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{Axes, CelestialBody, KeplerianState, State};
    use std::io::Write;

    fn write_temp(content: &str) -> Utf8PathBuf {
        let mut file = tempfile::Builder::new().tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let (_, path) = file.keep().unwrap();
        Utf8PathBuf::from_path_buf(path).unwrap()
    }

    #[test]
    fn test_parse_report_values() {
        let path = write_temp("A B C\n1 2.5 -3\n4e2 0 0.125\n");
        let table = parse_report(&path).unwrap();
        assert_eq!(table.fields(), ["A", "B", "C"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.row(0).unwrap(), [1.0, 2.5, -3.0]);
        assert_eq!(table.value(1, "A").unwrap(), Some(400.0));
        assert_eq!(table.value(5, "A").unwrap(), None);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_parse_report_is_idempotent() {
        let path = write_temp("A\n1\n2\n");
        assert_eq!(parse_report(&path).unwrap(), parse_report(&path).unwrap());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_parse_report_empty_file() {
        let path = write_temp("");
        assert!(parse_report(&path).unwrap().is_empty());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_parse_report_column_mismatch() {
        let path = write_temp("A B\n1 2\n3\n");
        let err = parse_report(&path).unwrap_err();
        assert!(matches!(
            err,
            ReportError::ColumnCount { line: 3, expected: 2, found: 1 }
        ));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_parse_report_non_numeric() {
        let path = write_temp("A\nnan-but-not\n");
        let err = parse_report(&path).unwrap_err();
        assert!(matches!(err, ReportError::NonNumeric { line: 2, .. }));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_unknown_field_lookup() {
        let path = write_temp("A\n1\n");
        let table = parse_report(&path).unwrap();
        assert!(matches!(
            table.value(0, "Z"),
            Err(ReportError::UnknownField { .. })
        ));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_report_reader_round_trip() {
        let reader = ReportReader::temp(vec!["A".into()]).unwrap();
        assert!(reader.sink().script().contains(&format!("Filename = '{}'", reader.path())));
        std::fs::write(reader.path(), "A\n7\n").unwrap();
        let table = reader.load().unwrap();
        assert_eq!(table.value(0, "A").unwrap(), Some(7.0));
        std::fs::remove_file(reader.path()).unwrap();
    }

    #[test]
    fn test_header_helpers() {
        let sat = Spacecraft::new(
            "Sat1",
            State::Keplerian(KeplerianState::new(2000.0, 0.0, 0.0, 0.0, 0.0, 0.0)),
        );
        let frame =
            CoordinateSystem::new("MoonMJ2000Eq", &CelestialBody::luna(), Some(Axes::MJ2000Eq))
                .unwrap();
        assert_eq!(cartesian_headers(&sat, &frame)[0], "Sat1.MoonMJ2000Eq.X");
        let kep = keplerian_headers(&sat, &frame);
        assert_eq!(kep[0], "Sat1.Luna.SMA");
        assert_eq!(kep[2], "Sat1.MoonMJ2000Eq.INC");
        assert_eq!(spherical_headers(&sat, &frame)[1], "Sat1.Luna.Latitude");
        assert_eq!(angular_momentum_headers(&sat, &frame)[0], "Sat1.Luna.HMAG");
    }
}
