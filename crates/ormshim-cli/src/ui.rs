use tabled::{
    Table, Tabled,
    settings::{Panel, Style},
};

#[derive(Debug, Clone, Default)]
pub struct Formatter {
    pub header: Option<String>,
    pub footer: Option<String>,
}

impl Formatter {
    pub fn build<T: Tabled, I: IntoIterator<Item = T>>(self, data: I) -> Table {
        let mut table = Table::new(data);
        if let Some(header) = self.header {
            table.with(Panel::header(header));
        }
        if let Some(footer) = self.footer {
            table.with(Panel::footer(footer));
        }

        table.with(Style::blank());
        table
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct BindingRow {
    pub operation: String,
    pub range: String,
    pub call: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct FailureRow {
    pub version: String,
    pub operation: String,
}
