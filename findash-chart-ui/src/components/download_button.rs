//! Button that downloads a table as CSV.

use crate::js_bridge;
use findash_core::csv_io::write_csv;
use findash_core::dates::ISO_DATE_FORMAT;
use findash_core::table::Table;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct DownloadButtonProps {
    pub table: Table,
    pub filename: String,
    #[props(default = ISO_DATE_FORMAT.to_string())]
    pub date_format: String,
    #[props(default = "Download CSV".to_string())]
    pub label: String,
}

#[component]
pub fn DownloadButton(props: DownloadButtonProps) -> Element {
    use_hook(js_bridge::init_download);
    let table = props.table.clone();
    let filename = props.filename.clone();
    let date_format = props.date_format.clone();

    let on_click = move |_| match write_csv(&table, &date_format) {
        Ok(csv) => {
            log::info!("Downloading {} rows as {}", table.len(), filename);
            js_bridge::download_text(&filename, "text/csv", &csv);
        }
        Err(e) => log::error!("Failed to build CSV download: {}", e),
    };

    rsx! {
        button {
            style: "margin: 8px 0; padding: 6px 12px;",
            disabled: props.table.is_empty(),
            onclick: on_click,
            "{props.label}"
        }
    }
}
