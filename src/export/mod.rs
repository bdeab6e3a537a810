//! Export functionality for spendbook

pub mod csv;

pub use csv::{export_rows, write_expenses_csv, ExpenseRow};
