//! CSV import
//!
//! Parses expense rows from CSV input. Header names are matched
//! case-insensitively; `id` is optional and every other missing field
//! has a defined default. Only a missing or non-numeric amount
//! disqualifies a row, and such rows are counted, not fatal.

use std::collections::HashSet;
use std::io::Read;

use csv::StringRecord;

use crate::error::{SpendbookError, SpendbookResult};
use crate::models::{current_timestamp, Expense, ExpenseId, Money};

/// Result of importing a batch of CSV rows
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// Expenses built from the accepted rows, in input order
    pub added: Vec<Expense>,
    /// Rows skipped because their amount was missing or unparseable
    pub skipped: usize,
}

/// Column positions resolved from the header row
#[derive(Debug, Default)]
struct ColumnMap {
    id: Option<usize>,
    date: Option<usize>,
    category: Option<usize>,
    amount: Option<usize>,
    note: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut map = Self::default();
        for (idx, header) in headers.iter().enumerate() {
            match header.trim().to_lowercase().as_str() {
                "id" => map.id = Some(idx),
                "date" => map.date = Some(idx),
                "category" => map.category = Some(idx),
                "amount" => map.amount = Some(idx),
                "note" => map.note = Some(idx),
                _ => {}
            }
        }
        map
    }
}

/// Parse expenses from CSV input
///
/// `existing_ids` holds the ids already present in the target ledger;
/// a row whose id is absent, unparseable, or already taken gets a fresh
/// one, keeping ids unique across the ledger and the batch.
pub fn read_expenses_csv<R: Read>(
    reader: R,
    existing_ids: &HashSet<ExpenseId>,
) -> SpendbookResult<ImportOutcome> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| SpendbookError::Import(format!("Failed to read CSV header: {}", e)))?
        .clone();
    let columns = ColumnMap::from_headers(&headers);

    let mut used_ids = existing_ids.clone();
    let mut added = Vec::new();
    let mut skipped = 0;

    for record in csv_reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(_) => {
                // A row too malformed to read has no usable amount
                skipped += 1;
                continue;
            }
        };

        match parse_record(&record, &columns, &mut used_ids) {
            Some(expense) => added.push(expense),
            None => skipped += 1,
        }
    }

    Ok(ImportOutcome { added, skipped })
}

/// Build an expense from one record; `None` means the row is skipped
fn parse_record(
    record: &StringRecord,
    columns: &ColumnMap,
    used_ids: &mut HashSet<ExpenseId>,
) -> Option<Expense> {
    let field = |col: Option<usize>| {
        col.and_then(|idx| record.get(idx))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };

    let amount = Money::parse(field(columns.amount)?).ok()?;

    let id = field(columns.id)
        .and_then(|s| ExpenseId::parse(s).ok())
        .filter(|id| !used_ids.contains(id))
        .unwrap_or_default();
    used_ids.insert(id);

    let date = field(columns.date)
        .map(str::to_string)
        .unwrap_or_else(current_timestamp);
    let category = field(columns.category).unwrap_or_default().to_string();
    let note = field(columns.note).unwrap_or_default().to_string();

    Some(Expense::from_parts(id, date, category, amount, note))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_CATEGORY;

    fn import(csv_data: &str) -> ImportOutcome {
        read_expenses_csv(csv_data.as_bytes(), &HashSet::new()).unwrap()
    }

    #[test]
    fn test_import_basic_rows() {
        let outcome = import(
            "date,category,amount,note\n\
             2025-01-15,Food,60.00,lunch\n\
             2025-01-16,Transport,12.50,bus",
        );

        assert_eq!(outcome.skipped, 0);
        assert_eq!(outcome.added.len(), 2);
        assert_eq!(outcome.added[0].category, "Food");
        assert_eq!(outcome.added[0].amount.cents(), 6000);
        assert_eq!(outcome.added[1].note, "bus");
    }

    #[test]
    fn test_headers_matched_case_insensitively() {
        let outcome = import("Date,Category,AMOUNT,Note\n2025-01-15,Food,60.00,lunch");

        assert_eq!(outcome.added.len(), 1);
        assert_eq!(outcome.added[0].date, "2025-01-15");
        assert_eq!(outcome.added[0].amount.cents(), 6000);
    }

    #[test]
    fn test_non_numeric_amount_skipped() {
        let outcome = import(
            "date,category,amount,note\n\
             2025-01-15,Food,abc,bad row\n\
             2025-01-16,Food,25.00,good row",
        );

        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.added.len(), 1);
        assert_eq!(outcome.added[0].note, "good row");
    }

    #[test]
    fn test_missing_amount_column_skips_everything() {
        let outcome = import("date,category,note\n2025-01-15,Food,lunch");

        assert_eq!(outcome.added.len(), 0);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let outcome = import("amount\n60.00");

        let e = &outcome.added[0];
        assert_eq!(e.category, DEFAULT_CATEGORY);
        assert_eq!(e.note, "");
        assert!(!e.date.is_empty());
    }

    #[test]
    fn test_missing_id_synthesized() {
        let outcome = import(
            "date,category,amount,note\n\
             2025-01-15,Food,60.00,a\n\
             2025-01-16,Food,25.00,b",
        );

        assert_ne!(outcome.added[0].id, outcome.added[1].id);
    }

    #[test]
    fn test_supplied_id_kept_when_free() {
        let id = ExpenseId::new();
        let csv_data = format!("id,date,category,amount,note\n{},2025-01-15,Food,60.00,x", id);
        let outcome = read_expenses_csv(csv_data.as_bytes(), &HashSet::new()).unwrap();

        assert_eq!(outcome.added[0].id, id);
    }

    #[test]
    fn test_colliding_id_replaced() {
        let id = ExpenseId::new();
        let existing: HashSet<_> = [id].into_iter().collect();
        let csv_data = format!("id,date,category,amount,note\n{},2025-01-15,Food,60.00,x", id);
        let outcome = read_expenses_csv(csv_data.as_bytes(), &existing).unwrap();

        assert_ne!(outcome.added[0].id, id);
    }

    #[test]
    fn test_duplicate_id_within_batch_replaced() {
        let id = ExpenseId::new();
        let csv_data = format!(
            "id,date,category,amount,note\n{id},2025-01-15,Food,60.00,a\n{id},2025-01-16,Food,25.00,b",
            id = id
        );
        let outcome = read_expenses_csv(csv_data.as_bytes(), &HashSet::new()).unwrap();

        assert_eq!(outcome.added.len(), 2);
        assert_ne!(outcome.added[0].id, outcome.added[1].id);
    }

    #[test]
    fn test_non_uuid_id_replaced() {
        let outcome = import("id,date,category,amount,note\n17258,2025-01-15,Food,60.00,x");

        assert_eq!(outcome.added.len(), 1);
        // A fresh uuid was generated in place of the foreign id
        assert!(ExpenseId::parse(&outcome.added[0].id.to_string()).is_ok());
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let outcome = import("date,category,amount,note\n2025-01-15,Food,60.00,\"lunch, with tip\"");

        assert_eq!(outcome.added[0].note, "lunch, with tip");
    }
}
