//! Column header sorting.

use shared::{SortConfig, SortOrder};

/// Sort that a click on `column` should request.
///
/// Clicking the active column flips its direction; any other column starts
/// ascending.
pub fn next_sort(current: &SortConfig, column: &str) -> SortConfig {
    if current.sort_by == column {
        SortConfig::new(column, current.sort_order.toggled())
    } else {
        SortConfig::new(column, SortOrder::Asc)
    }
}

/// Arrow shown next to a header label
pub fn sort_indicator(current: &SortConfig, column: &str) -> Option<&'static str> {
    (current.sort_by == column).then(|| match current.sort_order {
        SortOrder::Asc => "▲",
        SortOrder::Desc => "▼",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_column_toggles() {
        let current = SortConfig::new("create_date", SortOrder::Desc);
        assert_eq!(
            next_sort(&current, "create_date"),
            SortConfig::new("create_date", SortOrder::Asc)
        );
        let flipped = next_sort(&current, "create_date");
        assert_eq!(next_sort(&flipped, "create_date").sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_new_column_resets_to_ascending() {
        let current = SortConfig::new("name", SortOrder::Desc);
        assert_eq!(
            next_sort(&current, "create_date"),
            SortConfig::new("create_date", SortOrder::Asc)
        );
    }

    #[test]
    fn test_indicator_only_on_active_column() {
        let current = SortConfig::new("name", SortOrder::Desc);
        assert_eq!(sort_indicator(&current, "name"), Some("▼"));
        assert_eq!(sort_indicator(&current, "id"), None);
    }
}
