//! Table input types.

use super::Alignment;
use serde::{Deserialize, Serialize};

/// A table block description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Header row texts (empty = no header row)
    #[serde(default)]
    pub headers: Vec<String>,

    /// Body rows
    #[serde(default)]
    pub rows: Vec<Vec<TableCellSpec>>,

    /// Column widths in points (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_widths: Option<Vec<f32>>,
}

impl TableSpec {
    /// Create a table with a header row.
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            column_widths: None,
        }
    }

    /// Add a body row.
    pub fn with_row(mut self, row: Vec<TableCellSpec>) -> Self {
        self.rows.push(row);
        self
    }

    /// Add a body row from plain text values.
    pub fn with_text_row<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.rows
            .push(values.into_iter().map(TableCellSpec::text).collect());
        self
    }

    /// Set column widths.
    pub fn with_column_widths(mut self, widths: Vec<f32>) -> Self {
        self.column_widths = Some(widths);
        self
    }

    /// Check whether a header row is present.
    pub fn has_header(&self) -> bool {
        !self.headers.is_empty()
    }

    /// Number of rows in the rendered table, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len() + usize::from(self.has_header())
    }

    /// Number of columns: the widest of the header and every body row.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    /// Check if the table renders nothing.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0 || self.column_count() == 0
    }

    /// Rectangular grid of cells, header first, short rows padded with empty cells.
    pub fn grid(&self) -> Vec<Vec<TableCellSpec>> {
        let cols = self.column_count();
        let mut grid = Vec::with_capacity(self.row_count());

        if self.has_header() {
            let mut header: Vec<TableCellSpec> =
                self.headers.iter().map(|h| TableCellSpec::text(h.as_str())).collect();
            header.resize_with(cols, TableCellSpec::default);
            grid.push(header);
        }
        for row in &self.rows {
            let mut row = row.clone();
            row.resize_with(cols, TableCellSpec::default);
            grid.push(row);
        }
        grid
    }
}

/// A table cell description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCellSpec {
    /// Cell text
    #[serde(default)]
    pub text: String,

    /// Cell background color (hex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// Bold cell text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    /// Cell paragraph alignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

impl TableCellSpec {
    /// Create a cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the background color.
    pub fn background(mut self, hex: impl Into<String>) -> Self {
        self.background = Some(hex.into());
        self
    }

    /// Make the cell text bold.
    pub fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }

    /// Set alignment.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }
}
