//! CSV export
//!
//! Writes one row per expense with the header `id,date,category,amount,note`,
//! in the ledger's current iteration order. Amounts render as plain
//! two-decimal numbers so an export can be re-imported without loss.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{SpendbookError, SpendbookResult};
use crate::models::Ledger;

/// One exported expense row
///
/// Field order defines the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub id: String,
    pub date: String,
    pub category: String,
    pub amount: String,
    pub note: String,
}

/// Render the ledger's expenses as export rows, in iteration order
pub fn export_rows(ledger: &Ledger) -> Vec<ExpenseRow> {
    ledger
        .expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.to_string(),
            date: e.date.clone(),
            category: e.category.clone(),
            amount: e.amount.to_decimal_string(),
            note: e.note.clone(),
        })
        .collect()
}

/// Write the ledger's expenses as CSV
pub fn write_expenses_csv<W: Write>(ledger: &Ledger, writer: W) -> SpendbookResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for row in export_rows(ledger) {
        csv_writer
            .serialize(row)
            .map_err(|e| SpendbookError::Export(format!("Failed to write CSV row: {}", e)))?;
    }

    csv_writer
        .flush()
        .map_err(|e| SpendbookError::Export(format!("Failed to flush CSV output: {}", e)))?;

    Ok(())
}
