use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::document::xml_tree::{self, Element, Node};
use crate::document::{Document, DocumentError};
use crate::utils;

const DOCUMENT_PART: &str = "word/document.xml";

/// A word document (`.docx`) that is edited in memory and written back with [`DocxDocument::save`].
///
/// Only the main document part is rewritten, every other entry of the archive
/// is copied as is.
#[derive(Debug, Clone)]
pub struct DocxDocument {
    path: PathBuf,
    archive: Vec<u8>,
    nodes: Vec<Node>,
}

impl DocxDocument {
    /// Copies the template to the output path, replacing an existing file.
    pub fn copy_template(
        template: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<(), DocumentError> {
        utils::copy(template, output)?;
        Ok(())
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref().to_path_buf();
        let archive = utils::read(&path)?;

        let mut xml = String::new();
        {
            let mut zip = ZipArchive::new(Cursor::new(archive.as_slice()))?;
            let mut part = zip.by_name(DOCUMENT_PART).map_err(|error| match error {
                ZipError::FileNotFound => DocumentError::MissingPart(DOCUMENT_PART),
                other => other.into(),
            })?;
            part.read_to_string(&mut xml)?;
        }

        let nodes = xml_tree::parse(&xml)?;
        let document = Self {
            path,
            archive,
            nodes,
        };

        // fail early for documents that can not be edited
        document.body()?;

        Ok(document)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the edited document back to the path it was opened from.
    ///
    /// The archive is first written to a temporary file next to the document,
    /// which then replaces the document.
    pub fn save(self) -> Result<(), DocumentError> {
        debug!("saving {}", self.path.display());

        let xml = xml_tree::serialize(&self.nodes)?;

        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp_file = NamedTempFile::new_in(directory)?;
        {
            let mut source = ZipArchive::new(Cursor::new(self.archive.as_slice()))?;
            let mut writer = ZipWriter::new(temp_file.as_file_mut());

            for index in 0..source.len() {
                let entry = source.by_index_raw(index)?;

                if entry.name() == DOCUMENT_PART {
                    let options =
                        SimpleFileOptions::default().compression_method(entry.compression());
                    writer.start_file(DOCUMENT_PART, options)?;
                    writer.write_all(&xml)?;
                } else {
                    writer.raw_copy_file(entry)?;
                }
            }

            writer.finish()?;
        }

        let permissions = std::fs::metadata(&self.path)?.permissions();
        temp_file.as_file().set_permissions(permissions)?;
        temp_file.persist(&self.path).map_err(|error| error.error)?;

        Ok(())
    }

    fn body(&self) -> Result<&Element, DocumentError> {
        xml_tree::root(&self.nodes)
            .and_then(|root| root.first_child(b"body"))
            .ok_or(DocumentError::MissingBody)
    }

    fn body_mut(&mut self) -> Result<&mut Element, DocumentError> {
        xml_tree::root_mut(&mut self.nodes)
            .and_then(|root| root.nth_child_mut(b"body", 0))
            .ok_or(DocumentError::MissingBody)
    }

    fn paragraph(&self, index: usize) -> Result<&Element, DocumentError> {
        let body = self.body()?;
        let len = body.count_children(b"p");

        body.nth_child(b"p", index)
            .ok_or(DocumentError::ParagraphOutOfRange { index, len })
    }

    fn paragraph_mut(&mut self, index: usize) -> Result<&mut Element, DocumentError> {
        let body = self.body_mut()?;
        let len = body.count_children(b"p");

        body.nth_child_mut(b"p", index)
            .ok_or(DocumentError::ParagraphOutOfRange { index, len })
    }

    fn row(&self, table: usize, index: usize) -> Result<&Element, DocumentError> {
        let body = self.body()?;
        let tables = body.count_children(b"tbl");
        let table_element = body
            .nth_child(b"tbl", table)
            .ok_or(DocumentError::TableOutOfRange {
                index: table,
                len: tables,
            })?;

        let len = table_element.count_children(b"tr");
        table_element
            .nth_child(b"tr", index)
            .ok_or(DocumentError::RowOutOfRange { table, index, len })
    }

    fn row_mut(&mut self, table: usize, index: usize) -> Result<&mut Element, DocumentError> {
        let body = self.body_mut()?;
        let tables = body.count_children(b"tbl");
        let table_element =
            body.nth_child_mut(b"tbl", table)
                .ok_or(DocumentError::TableOutOfRange {
                    index: table,
                    len: tables,
                })?;

        let len = table_element.count_children(b"tr");
        table_element
            .nth_child_mut(b"tr", index)
            .ok_or(DocumentError::RowOutOfRange { table, index, len })
    }
}

impl Document for DocxDocument {
    fn paragraph_text(&self, paragraph: usize) -> Result<String, DocumentError> {
        Ok(self.paragraph(paragraph)?.paragraph_text())
    }

    fn set_paragraph_text(&mut self, paragraph: usize, text: &str) -> Result<(), DocumentError> {
        self.paragraph_mut(paragraph)?.set_paragraph_text(text);
        Ok(())
    }

    fn cell_count(&self, table: usize, row: usize) -> Result<usize, DocumentError> {
        Ok(self.row(table, row)?.cell_positions().len())
    }

    fn cell_text(&self, table: usize, row: usize, cell: usize) -> Result<String, DocumentError> {
        let row_element = self.row(table, row)?;
        let positions = row_element.cell_positions();

        let position = *positions.get(cell).ok_or(DocumentError::CellOutOfRange {
            table,
            row,
            index: cell,
            len: positions.len(),
        })?;

        match row_element.children().get(position) {
            Some(Node::Element(element)) => Ok(element.cell_text()),
            _ => Err(DocumentError::MalformedXml),
        }
    }

    fn set_cell_text(
        &mut self,
        table: usize,
        row: usize,
        cell: usize,
        text: &str,
    ) -> Result<(), DocumentError> {
        let row_element = self.row_mut(table, row)?;
        let positions = row_element.cell_positions();

        let out_of_range = DocumentError::CellOutOfRange {
            table,
            row,
            index: cell,
            len: positions.len(),
        };

        let position = *positions.get(cell).ok_or(out_of_range)?;
        row_element
            .child_at_mut(position)
            .ok_or(DocumentError::MalformedXml)?
            .set_cell_text(text);

        Ok(())
    }
}
