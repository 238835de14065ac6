pub use crate::error::Error;

pub use anstream::eprintln;
pub use anstream::println;
pub use color_eyre::eyre::{eyre, Context, OptionExt, Result};
pub use colored::Colorize;

/// Borderless table with a rule under the header row.
pub fn new_table() -> prettytable::Table {
    use prettytable::format::{FormatBuilder, LinePosition, LineSeparator};

    let format = FormatBuilder::new()
        .column_separator(' ')
        .separator(LinePosition::Title, LineSeparator::new('-', ' ', ' ', ' '))
        .padding(1, 1)
        .build();

    let mut table = prettytable::Table::new();
    table.set_format(format);
    table
}
