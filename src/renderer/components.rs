/// Placeholder printed where a required value is missing from the document.
pub const UNDEFINED: &str = "undefined";

pub const FOLDER_GLYPH: &str = "📁";
pub const AUTH_GLYPH: &str = "🔑";

const SEPARATOR_GLYPH: &str = "⁃";
const SEPARATOR_WIDTH: usize = 47;

/// Line closing every request block.
pub fn separator() -> String {
    vec![SEPARATOR_GLYPH; SEPARATOR_WIDTH].join(" ")
}

pub fn or_undefined(value: Option<&str>) -> &str {
    value.unwrap_or(UNDEFINED)
}

/// The three kinds of heading in a rendered document, each with its own
/// base marker count and depth cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingKind {
    Folder,
    Request,
    Section,
}

impl HeadingKind {
    fn base(self) -> usize {
        match self {
            HeadingKind::Folder => 0,
            HeadingKind::Request => 1,
            HeadingKind::Section => 2,
        }
    }

    fn cap(self) -> usize {
        match self {
            HeadingKind::Folder => 5,
            HeadingKind::Request => 5,
            HeadingKind::Section => 4,
        }
    }

    /// Markdown heading level for a node at `depth`. Never below 1.
    pub fn level(self, depth: usize) -> usize {
        (self.base() + depth.min(self.cap())).max(1)
    }

    pub fn markers(self, depth: usize) -> String {
        "#".repeat(self.level(depth))
    }

    /// Full heading line including the trailing newline.
    pub fn line(self, depth: usize, title: &str) -> String {
        format!("{} {}\n", self.markers(depth), title)
    }
}

/// Markdown pipe table with a fixed column count.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    /// Adds a row. Missing cells are left empty and extra cells are dropped
    /// so every row matches the header width.
    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut row: Vec<String> = cells
            .into_iter()
            .take(self.headers.len())
            .map(|cell| escape_cell(cell.as_ref()))
            .collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("|{}|\n", self.headers.join("|")));
        output.push_str(&format!("|{}|\n", vec!["---"; self.headers.len()].join("|")));
        for row in &self.rows {
            output.push_str(&format!("|{}|\n", row.join("|")));
        }
        output
    }
}

fn escape_cell(cell: &str) -> String {
    cell.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}

/// Section heading followed by a table, in the layout shared by every
/// tabular sub-renderer.
pub fn table_section(depth: usize, title: &str, table: &Table) -> String {
    let mut output = String::new();
    output.push_str(&HeadingKind::Section.line(depth, title));
    output.push('\n');
    output.push_str(&table.render());
    output.push_str("\n\n");
    output
}

/// Fenced code block; `info` may be empty for a bare fence.
pub fn fenced(info: &str, content: &str) -> String {
    format!("```{}\n{}\n```\n", info, content)
}
