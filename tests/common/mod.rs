use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use weekly_timesheet::document::DocxDocument;
use weekly_timesheet::input::Config;

pub const WEEK_RANGE_LABELS: &str = "Duration: Week Start Date:\t\tWeek End Date:";

fn paragraph(text: &str) -> String {
    format!(
        "<w:p><w:pPr><w:jc w:val=\"left\"/></w:pPr><w:r><w:rPr><w:b/></w:rPr>{}</w:r></w:p>",
        text.split('\t')
            .map(|part| format!("<w:t xml:space=\"preserve\">{}</w:t>", part))
            .collect::<Vec<_>>()
            .join("<w:tab/>")
    )
}

fn row(cells: impl IntoIterator<Item = String>) -> String {
    let cells: String = cells
        .into_iter()
        .map(|text| format!("<w:tc><w:tcPr><w:tcW w:w=\"900\"/></w:tcPr>{}</w:tc>", paragraph(&text)))
        .collect();

    format!("<w:tr>{}</w:tr>", cells)
}

/// The body of a template with the layout of the reference timesheet.
///
/// The day rows 1 to 5 have 6 cells, the totals row 8 has 9 cells and the
/// signature row 10 has 7 cells, every other row has 3 cells.
fn template_body() -> String {
    let mut body = String::new();

    for index in 0..6 {
        if index == 4 {
            body.push_str(&paragraph(WEEK_RANGE_LABELS));
        } else {
            body.push_str(&paragraph(&format!("paragraph {}", index)));
        }
    }

    body.push_str("<w:tbl>");
    body.push_str(&row(["Name".to_string(), "Employee".to_string()]));
    body.push_str("</w:tbl>");

    body.push_str("<w:p/><w:tbl>");
    for index in 0..11 {
        let cells = match index {
            1..=5 => 6,
            8 => 9,
            10 => 7,
            _ => 3,
        };

        body.push_str(&row((0..cells).map(|cell| format!("{}:{}", index, cell))));
    }
    body.push_str("</w:tbl>");

    body
}

pub fn write_template(path: &Path) {
    let document = format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\r\n",
            "<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">",
            "<w:body>{}<w:sectPr/></w:body></w:document>",
        ),
        template_body()
    );

    let mut writer = ZipWriter::new(File::create(path).expect("template should be writable"));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    writer.start_file("[Content_Types].xml", options).unwrap();
    writer.write_all(b"<Types/>").unwrap();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(document.as_bytes()).unwrap();
    writer.finish().unwrap();
}

/// A temporary directory with a template and a landing directory.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("should be able to create a temporary directory");
        write_template(&dir.path().join("template.docx"));

        Self { dir }
    }

    #[must_use]
    pub fn template(&self) -> PathBuf {
        self.dir.path().join("template.docx")
    }

    #[must_use]
    pub fn landing_dir(&self) -> PathBuf {
        self.dir.path().join("timesheets")
    }

    #[must_use]
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes a json config for the range and loads it.
    #[must_use]
    pub fn config(&self, start: &str, end: &str, holidays: &[&str]) -> Config {
        let config = serde_json::json!({
            "start_date": start,
            "end_date": end,
            "holidays": holidays,
            "template_doc": self.template(),
            "landing_dir": self.landing_dir(),
        });

        let path = self.path("config.json");
        fs::write(&path, config.to_string()).unwrap();

        Config::try_from_file(&path)
            .expect("config should be readable")
            .build()
            .expect("config should be valid")
    }

    /// The names of the files in the landing directory, sorted.
    #[must_use]
    pub fn landing_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.landing_dir())
            .expect("landing directory should exist")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

#[must_use]
pub fn open(path: &Path) -> DocxDocument {
    DocxDocument::open(path).expect("generated timesheet should be a valid document")
}

#[allow(dead_code)]
pub fn debug_setup() {
    std::env::set_var("RUST_BACKTRACE", "1");
    std::env::set_var("RUST_APP_LOG", "trace");
    color_backtrace::install();
    pretty_env_logger::init_custom_env("RUST_APP_LOG");
}
