//! Report file output sinks.

use serde::{Deserialize, Serialize};

/// A report file the engine writes whitespace-delimited tabular output to.
///
/// The property block pins every setting the engine would otherwise default
/// per-installation, so the result file is parseable regardless of the host's
/// engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSink {
    pub name: String,
    /// Path the engine writes results to.
    pub output_path: String,
    /// Fields reported automatically at every integrator step. Report steps
    /// can name further fields at specific points in the sequence.
    pub fields: Vec<String>,
    pub write_headers: bool,
    pub delimiter: String,
}

impl ReportSink {
    #[must_use]
    pub fn new(name: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output_path: output_path.into(),
            fields: Vec::new(),
            write_headers: true,
            delimiter: " ".to_string(),
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_headers(mut self, write_headers: bool) -> Self {
        self.write_headers = write_headers;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    #[must_use]
    pub fn script(&self) -> String {
        let mut lines = vec![
            format!("Create ReportFile {};", self.name),
            format!("GMAT {}.SolverIterations = Current;", self.name),
            format!("GMAT {}.RelativeZOrder = 0;", self.name),
            format!("GMAT {}.Maximized = false;", self.name),
            format!("GMAT {}.Filename = '{}';", self.name, self.output_path),
            format!("GMAT {}.Precision = 16;", self.name),
            format!("GMAT {}.WriteHeaders = {};", self.name, self.write_headers),
            format!("GMAT {}.LeftJustify = On;", self.name),
            format!("GMAT {}.ZeroFill = Off;", self.name),
            format!("GMAT {}.FixedWidth = true;", self.name),
            format!("GMAT {}.Delimiter = '{}';", self.name, self.delimiter),
            format!("GMAT {}.ColumnWidth = 23;", self.name),
            format!("GMAT {}.WriteReport = true;", self.name),
        ];
        if !self.fields.is_empty() {
            lines.push(format!("GMAT {}.Add = {{{}}};", self.name, self.fields.join(", ")));
        }
        lines.join("\n")
    }
}
