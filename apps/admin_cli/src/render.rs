use std::fmt::Write as _;

use client_core::{EmptyState, ListView};
use shared::{domain::Record, protocol::ResourceStats};

/// Renders a list page as a plain-text table.
pub fn list_page<R: Record>(view: &ListView<R>) -> String {
    let mut out = String::new();

    match view.empty_state {
        Some(EmptyState::NoRecords) => {
            let _ = writeln!(out, "No {} yet.", R::KIND);
            return out;
        }
        Some(EmptyState::NoMatches) => {
            let _ = writeln!(out, "No {} match the current filters.", R::KIND);
            return out;
        }
        None => {}
    }

    let rows: Vec<[String; 4]> = view
        .records
        .iter()
        .map(|record| {
            [
                record.id().to_string(),
                record.title(),
                optional(record.category()),
                optional(record.status()),
            ]
        })
        .collect();
    let headers = ["ID", "NAME", "CATEGORY", "STATUS"];
    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(&mut out, &headers.map(str::to_string), &widths);
    for row in &rows {
        write_row(&mut out, row, &widths);
    }
    let _ = writeln!(
        out,
        "\npage {} of {} ({} {})",
        view.page + 1,
        view.total_pages,
        view.total_count,
        R::KIND
    );
    if view.incomplete {
        let _ = writeln!(out, "warning: the backend returned only part of the collection");
    }
    out
}

pub fn stats(stats: &ResourceStats) -> String {
    let mut out = String::new();
    let width = stats.0.keys().map(String::len).max().unwrap_or(0);
    for (counter, value) in &stats.0 {
        let _ = writeln!(out, "{counter:<width$}  {value}");
    }
    if stats.get("total").is_none() {
        let _ = writeln!(out, "{:<width$}  {}", "total", stats.total());
    }
    out
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|value| value.to_string()).unwrap_or_else(|| "-".into())
}

fn write_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{CreateDialog, ModalMode};
    use shared::{
        domain::EmployeeId,
        records::{Department, Employee, EmployeeStatus},
    };

    fn view(records: Vec<Employee>, empty_state: Option<EmptyState>) -> ListView<Employee> {
        ListView {
            total_count: records.len(),
            records,
            total_pages: 1,
            page: 0,
            page_size: 20,
            loading: false,
            loaded: true,
            incomplete: false,
            error: None,
            empty_state,
            stats: None,
            stats_error: None,
            mutation_error: None,
            modal: ModalMode::Closed,
            create: CreateDialog::Closed,
        }
    }

    #[test]
    fn list_page_lists_rows_and_footer() {
        let jane = Employee {
            id: EmployeeId::new("2"),
            first_name: "Jane".into(),
            last_name: "Smith".into(),
            email: "jane.smith@example.com".into(),
            phone: None,
            position: "Marketing Manager".into(),
            department: Department::Marketing,
            status: EmployeeStatus::Active,
            hire_date: None,
            salary: None,
        };

        let text = list_page(&view(vec![jane], None));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ID  NAME        CATEGORY   STATUS");
        assert_eq!(lines[1], "2   Jane Smith  marketing  active");
        assert_eq!(lines[3], "page 1 of 1 (1 employees)");
    }

    #[test]
    fn partial_collection_is_called_out() {
        let mut partial = view(Vec::new(), None);
        partial.incomplete = true;

        let text = list_page(&partial);

        assert!(text.ends_with("warning: the backend returned only part of the collection\n"));
    }

    #[test]
    fn empty_states_have_distinct_messages() {
        assert_eq!(
            list_page(&view(Vec::new(), Some(EmptyState::NoRecords))),
            "No employees yet.\n"
        );
        assert_eq!(
            list_page(&view(Vec::new(), Some(EmptyState::NoMatches))),
            "No employees match the current filters.\n"
        );
    }

    #[test]
    fn stats_add_total_when_missing() {
        let mut counters = std::collections::BTreeMap::new();
        counters.insert("active".to_string(), 3);
        counters.insert("inactive".to_string(), 1);

        let text = stats(&ResourceStats(counters));

        assert_eq!(text, "active    3\ninactive  1\ntotal     4\n");
    }
}
