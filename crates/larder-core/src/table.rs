//! Pure table presentation for item lists

use chrono::NaiveDate;

use crate::item::Item;

/// Days-left window treated as "expiring soon", inclusive.
pub const EXPIRY_WINDOW_DAYS: i64 = 7;

/// One rendered table row. All columns are display-ready strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub name: String,
    pub description: String,
    pub storage_type: String,
    pub date_stored: String,
    pub use_by_date: String,
    pub days_left: String,
}

/// Map an item list to display rows, one per item, in order.
pub fn rows(items: &[Item]) -> Vec<TableRow> {
    items.iter().map(row).collect()
}

fn row(item: &Item) -> TableRow {
    TableRow {
        name: item.name.clone(),
        description: item.description.clone().unwrap_or_default(),
        storage_type: capitalize(&item.storage_type),
        date_stored: format_date(item.date_stored),
        use_by_date: format_date(item.use_by_date),
        days_left: item
            .days_left
            .map(|d| d.to_string())
            .unwrap_or_default(),
    }
}

/// Fixed `MM/DD/YYYY` presentation, regardless of input format.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// Uppercase the first character only.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Count items whose days-left falls in `[0, threshold]`, in a single pass.
///
/// Items without a computed days-left are not counted. Used as an
/// observability signal after each refresh; not exposed over the API.
pub fn count_expiring(items: &[Item], threshold: i64) -> usize {
    items
        .iter()
        .filter(|item| matches!(item.days_left, Some(d) if (0..=threshold).contains(&d)))
        .count()
}
