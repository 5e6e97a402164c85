//! Reading and editing the paragraphs and tables of word documents.

mod docx;
mod xml_tree;

pub use docx::*;

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("the document is not a valid docx archive")]
    Zip(#[from] zip::result::ZipError),
    #[error("the document contains invalid xml")]
    Xml(#[from] quick_xml::Error),
    #[error("the document contains unbalanced xml elements")]
    MalformedXml,
    #[error("the document is missing the part `{0}`")]
    MissingPart(&'static str),
    #[error("the document has no body")]
    MissingBody,
    #[error("paragraph {index} does not exist, the document has {len} paragraphs")]
    ParagraphOutOfRange { index: usize, len: usize },
    #[error("table {index} does not exist, the document has {len} tables")]
    TableOutOfRange { index: usize, len: usize },
    #[error("row {index} does not exist, table {table} has {len} rows")]
    RowOutOfRange {
        table: usize,
        index: usize,
        len: usize,
    },
    #[error("cell {index} does not exist, row {row} of table {table} has {len} cells")]
    CellOutOfRange {
        table: usize,
        row: usize,
        index: usize,
        len: usize,
    },
}

/// The parts of a document that are needed to fill out a timesheet.
///
/// Paragraphs and tables are the ones directly in the body of the document,
/// counted from `0` in document order.
pub trait Document {
    fn paragraph_text(&self, paragraph: usize) -> Result<String, DocumentError>;

    /// Replaces the whole text of the paragraph, keeping its style.
    fn set_paragraph_text(&mut self, paragraph: usize, text: &str) -> Result<(), DocumentError>;

    /// The number of cells in a row, a cell spanning multiple columns is
    /// counted once for each column.
    fn cell_count(&self, table: usize, row: usize) -> Result<usize, DocumentError>;

    /// The text of a cell, its paragraphs are separated by `\n`.
    fn cell_text(&self, table: usize, row: usize, cell: usize) -> Result<String, DocumentError>;

    /// Replaces the whole text of the cell, keeping its style.
    ///
    /// Cells continuing a vertical merge (`w:vMerge`) are written directly and
    /// not redirected to the cell where the merge starts.
    fn set_cell_text(
        &mut self,
        table: usize,
        row: usize,
        cell: usize,
        text: &str,
    ) -> Result<(), DocumentError>;
}
