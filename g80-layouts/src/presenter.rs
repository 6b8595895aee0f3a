use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use layout_search_client::LayoutRecord;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Month/day/two-digit year, no padding
const DATE_FORMAT: &str = "%-m/%-d/%y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Column {
    Date,
    Title,
    Notes,
    Author,
}

impl Column {
    pub fn value(self, record: &LayoutRecord) -> String {
        match self {
            Column::Date => record
                .created_at()
                .map(|at| at.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            Column::Title => record.title().to_string(),
            Column::Notes => record.notes().to_string(),
            Column::Author => record.creator().to_string(),
        }
    }
}

pub fn row(record: &LayoutRecord) -> Vec<String> {
    Column::iter().map(|column| column.value(record)).collect()
}

pub fn table(records: &[LayoutRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = Column::iter()
        .map(|column| Cell::new(column).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for record in records {
        table.add_row(row(record));
    }
    table
}

pub fn print(records: &[LayoutRecord]) {
    println!("{}", table(records));
}
