//! Paged view of a table's rows.

use findash_core::dates::ISO_DATE_FORMAT;
use findash_core::table::{Column, Row, Table};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct DataTableProps {
    pub table: Table,
    #[props(default = 6)]
    pub page_size: usize,
    #[props(default = ISO_DATE_FORMAT.to_string())]
    pub date_format: String,
}

fn cell(table: &Table, row: &Row, column: &Column, date_format: &str) -> String {
    match column {
        Column::Date(_) => row.date.format(date_format).to_string(),
        Column::Category(_) => row.category.clone().unwrap_or_default(),
        Column::Value(name) => table
            .value_index(name)
            .and_then(|i| row.values[i])
            .map(|v| format!("{v:.2}"))
            .unwrap_or_default(),
    }
}

#[component]
pub fn DataTable(props: DataTableProps) -> Element {
    let mut page = use_signal(|| 0usize);
    let page_count = props.table.page_count(props.page_size);
    let current = page().min(page_count.saturating_sub(1));

    let headers: Vec<String> = props
        .table
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    let rows: Vec<Vec<String>> = props
        .table
        .page(current, props.page_size)
        .iter()
        .map(|row| {
            props
                .table
                .columns()
                .iter()
                .map(|c| cell(&props.table, row, c, &props.date_format))
                .collect()
        })
        .collect();

    rsx! {
        div {
            style: "margin: 12px 0; overflow-x: auto;",
            table {
                style: "border-collapse: collapse; width: 100%; font-size: 13px;",
                thead {
                    tr {
                        for header in headers.iter() {
                            th {
                                style: "text-align: left; padding: 6px 8px; border-bottom: 2px solid #ddd;",
                                "{header}"
                            }
                        }
                    }
                }
                tbody {
                    for row in rows.iter() {
                        tr {
                            for value in row.iter() {
                                td {
                                    style: "padding: 4px 8px; border-bottom: 1px solid #eee;",
                                    "{value}"
                                }
                            }
                        }
                    }
                }
            }
            if page_count > 1 {
                div {
                    style: "display: flex; gap: 8px; align-items: center; margin-top: 6px;",
                    button {
                        disabled: current == 0,
                        onclick: move |_| page.set(current.saturating_sub(1)),
                        "Previous"
                    }
                    span { "Page {current + 1} of {page_count}" }
                    button {
                        disabled: current + 1 >= page_count,
                        onclick: move |_| page.set((current + 1).min(page_count - 1)),
                        "Next"
                    }
                }
            }
        }
    }
}
