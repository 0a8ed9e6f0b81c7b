//! Line-item resolution with tolerance for inconsistent upstream labeling.
//!
//! Statement exports from different providers label the same concept with
//! different casing or wording ("Total Revenue" vs "TOTAL REVENUE" vs
//! "Total Revenue, Adjusted"). Resolution tries an explicit ordered list of
//! strategies and takes the first hit; when several row labels contain the
//! requested label as a substring the first one in table order wins, which
//! is a known ambiguity left to the caller's judgement.

use crate::domain::model::{FinancialTable, LineItem};
use crate::utils::error::{ReportError, Result};

/// Resolve `label` against the table: exact match, then UPPERCASE,
/// lowercase and Title Case variants, then a case-insensitive substring
/// scan in stable row order. Exhausting all strategies is an error that
/// carries every available label for diagnosability.
pub fn resolve<'a>(table: &'a FinancialTable, label: &str) -> Result<&'a LineItem> {
    let candidates = [
        label.to_string(),
        label.to_uppercase(),
        label.to_lowercase(),
        title_case(label),
    ];

    for candidate in &candidates {
        if let Some(item) = table.rows.iter().find(|row| &row.label == candidate) {
            return Ok(item);
        }
    }

    let needle = label.to_lowercase();
    if let Some(item) = table
        .rows
        .iter()
        .find(|row| row.label.to_lowercase().contains(&needle))
    {
        tracing::debug!("fuzzy match: '{}' resolved to row '{}'", label, item.label);
        return Ok(item);
    }

    Err(ReportError::LineItemNotFound {
        label: label.to_string(),
        available: table.labels(),
    })
}

/// Word-initial uppercase, everything else lowercased. Word boundaries are
/// any non-alphabetic character.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_boundary = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if at_boundary {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_boundary = false;
        } else {
            out.push(ch);
            at_boundary = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FinancialTable {
        let mut table = FinancialTable::new(vec!["2023".into(), "2024".into()]);
        table.push_row("Total Revenue".into(), vec![100.0, 120.0]);
        table.push_row("NET INCOME".into(), vec![10.0, 12.0]);
        table.push_row("operating cash flow".into(), vec![9.0, 14.0]);
        table
    }

    #[test]
    fn exact_match_wins() {
        let table = table();
        let item = resolve(&table, "Total Revenue").unwrap();
        assert_eq!(item.values, vec![100.0, 120.0]);
    }

    #[test]
    fn case_variants_resolve_to_the_same_row() {
        let table = table();
        let exact = resolve(&table, "Total Revenue").unwrap().values.clone();
        for query in ["total revenue", "TOTAL REVENUE", "Total revenue"] {
            assert_eq!(resolve(&table, query).unwrap().values, exact, "{query}");
        }
    }

    #[test]
    fn uppercase_and_lowercase_rows_are_found() {
        let table = table();
        assert_eq!(
            resolve(&table, "Net Income").unwrap().values,
            vec![10.0, 12.0]
        );
        assert_eq!(
            resolve(&table, "Operating Cash Flow").unwrap().values,
            vec![9.0, 14.0]
        );
    }

    #[test]
    fn substring_fallback_matches_decorated_labels() {
        let mut table = FinancialTable::new(vec!["2024".into()]);
        table.push_row("Total Revenue, Adjusted".into(), vec![42.0]);

        let item = resolve(&table, "Total Revenue").unwrap();
        assert_eq!(item.label, "Total Revenue, Adjusted");
        assert_eq!(item.values, vec![42.0]);
    }

    #[test]
    fn ambiguous_substring_takes_first_in_row_order() {
        // Known fuzziness: multiple substring hits are not disambiguated.
        // Neither row matches any case variant of the query, so both are
        // substring candidates and row order decides.
        let mut table = FinancialTable::new(vec!["2024".into()]);
        table.push_row("Net Income From Continuing Ops".into(), vec![1.0]);
        table.push_row("Net Income (Adjusted)".into(), vec![2.0]);

        let item = resolve(&table, "net income").unwrap();
        assert_eq!(item.label, "Net Income From Continuing Ops");
        assert_eq!(item.values, vec![1.0]);
    }

    #[test]
    fn case_variant_match_wins_over_substring_candidates() {
        // Title Case is tried before the substring scan, so an exact-variant
        // row beats an earlier row that would match as a substring.
        let mut table = FinancialTable::new(vec!["2024".into()]);
        table.push_row("Net Income From Continuing Ops".into(), vec![1.0]);
        table.push_row("Net Income".into(), vec![2.0]);

        let item = resolve(&table, "net income").unwrap();
        assert_eq!(item.label, "Net Income");
        assert_eq!(item.values, vec![2.0]);
    }

    #[test]
    fn missing_label_error_lists_all_labels() {
        let table = table();
        let err = resolve(&table, "Gross Profit").unwrap_err();
        match err {
            ReportError::LineItemNotFound { label, available } => {
                assert_eq!(label, "Gross Profit");
                assert_eq!(
                    available,
                    vec!["Total Revenue", "NET INCOME", "operating cash flow"]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn title_case_handles_multi_word_labels() {
        assert_eq!(title_case("total revenue"), "Total Revenue");
        assert_eq!(title_case("OPERATING CASH FLOW"), "Operating Cash Flow");
    }
}
