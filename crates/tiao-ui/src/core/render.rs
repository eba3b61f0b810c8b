//! Table renderers for host-supplied records.
//!
//! # Design
//! - Renderers produce plain-text cells; the view writes them as text nodes, so
//!   nothing the host sends is ever interpreted as markup.
//! - An empty debt list renders no rows and no placeholder, while an empty
//!   audit log renders a single "No data loaded." row. Views rely on that
//!   difference: the debt panel shows its own empty state.

use tiao_config::NumberLocale;
use tiao_protocol::{AuditLogEntry, DebtRecord};

use crate::core::format::currency;

/// Placeholder text for an empty audit log.
pub const NO_DATA: &str = "No data loaded.";

const AUDIT_LOG_COLUMNS: u32 = 3;

/// One table row of text cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableRow {
    /// Cell texts, in column order.
    pub cells: Vec<String>,
}

/// Row spanning the whole table, shown when there is nothing to list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placeholder {
    /// Message text.
    pub text: &'static str,
    /// Number of columns spanned.
    pub colspan: u32,
}

/// Rendered table body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableBody {
    /// Data rows.
    pub rows: Vec<TableRow>,
    /// Empty-state row, when the table shows one.
    pub placeholder: Option<Placeholder>,
}

impl TableBody {
    /// Number of data rows.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when there are neither rows nor a placeholder.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.rows.is_empty() && self.placeholder.is_none()
    }
}

/// Single debt shown in the detail panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebtDetailView {
    /// Debtor name.
    pub name: String,
    /// Citizen identifier.
    pub citizenid: String,
    /// Formatted amount.
    pub amount: String,
    /// Debt reason.
    pub reason: String,
}

impl Default for DebtDetailView {
    fn default() -> Self {
        Self::from_record(&DebtRecord::default(), NumberLocale::default())
    }
}

impl DebtDetailView {
    /// Format `record` with the same fallbacks as the debt table.
    #[must_use]
    pub fn from_record(record: &DebtRecord, locale: NumberLocale) -> Self {
        let [name, citizenid, amount, reason] = debt_cells(record, locale);
        Self {
            name,
            citizenid,
            amount,
            reason,
        }
    }
}

/// Render the active-debts table.
#[must_use]
pub fn debt_rows(debts: Option<&[DebtRecord]>, locale: NumberLocale) -> TableBody {
    TableBody {
        rows: debts
            .unwrap_or_default()
            .iter()
            .map(|record| TableRow {
                cells: debt_cells(record, locale).into(),
            })
            .collect(),
        placeholder: None,
    }
}

/// Render the admin audit log.
#[must_use]
pub fn audit_log_rows(logs: Option<&[AuditLogEntry]>) -> TableBody {
    let logs = logs.unwrap_or_default();
    if logs.is_empty() {
        return TableBody {
            rows: Vec::new(),
            placeholder: Some(Placeholder {
                text: NO_DATA,
                colspan: AUDIT_LOG_COLUMNS,
            }),
        };
    }
    TableBody {
        rows: logs
            .iter()
            .map(|entry| TableRow {
                cells: vec![
                    text_or(entry.timestamp.as_deref(), "-"),
                    text_or(entry.category.as_deref(), "-"),
                    text_or(entry.message.as_deref(), "-"),
                ],
            })
            .collect(),
        placeholder: None,
    }
}

fn debt_cells(record: &DebtRecord, locale: NumberLocale) -> [String; 4] {
    [
        text_or(record.player_name.as_deref(), "Unknown"),
        text_or(record.citizenid.as_deref(), "-"),
        currency(record.amount.unwrap_or(0.0), locale),
        text_or(record.reason.as_deref(), "-"),
    ]
}

fn text_or(value: Option<&str>, fallback: &str) -> String {
    value
        .filter(|text| !text.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiao_protocol::decode_payload;
    use tiao_test_support::fixtures;

    #[test]
    fn debt_rows_format_amounts_and_fill_gaps() {
        let debts: Vec<DebtRecord> =
            decode_payload("debts_active", Some(fixtures::debt_rows(2))).expect("debts decode");
        let body = debt_rows(Some(debts.as_slice()), NumberLocale::EnUs);
        assert_eq!(body.row_count(), 2);
        assert_eq!(
            body.rows[1].cells,
            vec!["Citizen 2", "CID002", "$2,000", "IPTU"]
        );

        let sparse = [DebtRecord::default()];
        let body = debt_rows(Some(sparse.as_slice()), NumberLocale::EnUs);
        assert_eq!(body.rows[0].cells, vec!["Unknown", "-", "$0", "-"]);
    }

    #[test]
    fn empty_debt_list_has_no_placeholder() {
        assert!(debt_rows(None, NumberLocale::EnUs).is_blank());
        assert!(debt_rows(Some(&[][..]), NumberLocale::EnUs).is_blank());
    }

    #[test]
    fn empty_audit_log_shows_one_placeholder() {
        for body in [audit_log_rows(None), audit_log_rows(Some(&[][..]))] {
            assert_eq!(body.row_count(), 0);
            assert_eq!(
                body.placeholder,
                Some(Placeholder {
                    text: NO_DATA,
                    colspan: 3,
                })
            );
        }
    }

    #[test]
    fn audit_log_cells_stay_plain_text() {
        let entries = [AuditLogEntry {
            timestamp: Some("10:00".into()),
            category: None,
            message: Some("<b>x</b>".into()),
        }];
        let body = audit_log_rows(Some(entries.as_slice()));
        assert_eq!(body.rows[0].cells, vec!["10:00", "-", "<b>x</b>"]);
        assert!(body.placeholder.is_none());
    }

    #[test]
    fn detail_view_uses_table_fallbacks() {
        let detail = DebtDetailView::from_record(
            &DebtRecord {
                player_name: Some(String::new()),
                citizenid: Some("ABC".into()),
                amount: Some(1_234.5),
                reason: None,
            },
            NumberLocale::PtBr,
        );
        assert_eq!(detail.name, "Unknown");
        assert_eq!(detail.citizenid, "ABC");
        assert_eq!(detail.amount, "$1.234");
        assert_eq!(detail.reason, "-");
    }
}
