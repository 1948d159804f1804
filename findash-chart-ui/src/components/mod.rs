//! Reusable Dioxus RSX components for findash dashboard apps.

mod chart_container;
mod chart_header;
mod control_panel;
mod data_table;
mod download_button;
mod loading_spinner;
mod multi_select;
mod notice_display;
mod radio_group;
mod select_control;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use control_panel::ControlPanel;
pub use data_table::DataTable;
pub use download_button::DownloadButton;
pub use loading_spinner::LoadingSpinner;
pub use multi_select::MultiSelect;
pub use notice_display::NoticeDisplay;
pub use radio_group::RadioGroup;
pub use select_control::SelectControl;
