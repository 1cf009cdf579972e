//! Table geometry: closed-form structural offsets for an R x C table.
//!
//! Inserting an empty table at `t` reserves `3 + R(2C+1)` offsets: a leading
//! paragraph break, the table start, and per row a row marker plus, per
//! cell, a cell marker and the cell's empty paragraph terminator, then the
//! table end. The empty paragraph of cell `(r, c)` starts at
//! `t + 4 + r(2C+1) + 2c` while no cell has content yet.

/// Order in which cell contents are inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellOrder {
    /// Last cell first; every insertion lands at its unshifted base offset
    #[default]
    Reverse,
    /// First cell first; insertion points include earlier cells' lengths
    Natural,
}

/// One planned cell insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellWrite {
    /// Zero-based row
    pub row: usize,
    /// Zero-based column
    pub col: usize,
    /// Offset to insert at, valid at this point in the write sequence
    pub insert_at: usize,
    /// Where the content starts once every cell is written
    pub final_start: usize,
    /// Content length in offset units
    pub len: usize,
}

impl CellWrite {
    /// One past the content's last offset once every cell is written.
    pub fn final_end(&self) -> usize {
        self.final_start + self.len
    }
}

/// Geometry of an R x C table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableGeometry {
    rows: usize,
    cols: usize,
}

impl TableGeometry {
    /// Create geometry for `rows` x `cols`.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Offsets one row occupies while empty.
    pub fn row_stride(&self) -> usize {
        2 * self.cols + 1
    }

    /// Offsets reserved by the empty table.
    pub fn structural_size(&self) -> usize {
        3 + self.rows * self.row_stride()
    }

    /// Offset of the table element for a table inserted at `insert_at`.
    ///
    /// Cell style and column requests address the table by this offset,
    /// one past the leading paragraph break.
    pub fn table_start(&self, insert_at: usize) -> usize {
        insert_at + 1
    }

    /// Start of cell `(row, col)` before any cell content is written.
    pub fn cell_base(&self, insert_at: usize, row: usize, col: usize) -> usize {
        insert_at + 4 + row * self.row_stride() + 2 * col
    }

    /// Total offsets the table occupies once its cells hold `lengths`.
    pub fn filled_size(&self, lengths: &[usize]) -> usize {
        self.structural_size() + lengths.iter().sum::<usize>()
    }

    /// Plan every cell insertion.
    ///
    /// `inserted_at` is the offset the empty table was inserted at.
    /// `lengths` holds each cell's content length in row-major order; missing
    /// entries count as empty cells. Writes are returned in execution order.
    /// Both orders place every cell's content at the same final offsets.
    pub fn write_plan(
        &self,
        inserted_at: usize,
        lengths: &[usize],
        order: CellOrder,
    ) -> Vec<CellWrite> {
        debug_assert!(lengths.len() <= self.rows * self.cols);

        let mut writes = Vec::with_capacity(self.rows * self.cols);
        let mut written_before = 0;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let len = lengths.get(row * self.cols + col).copied().unwrap_or(0);
                let base = self.cell_base(inserted_at, row, col);
                let final_start = base + written_before;
                let insert_at = match order {
                    CellOrder::Reverse => base,
                    CellOrder::Natural => final_start,
                };
                writes.push(CellWrite {
                    row,
                    col,
                    insert_at,
                    final_start,
                    len,
                });
                written_before += len;
            }
        }

        if order == CellOrder::Reverse {
            writes.reverse();
        }
        writes
    }
}
