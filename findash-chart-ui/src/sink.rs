//! Render sink that puts binder views on the page.

use crate::js_bridge;
use findash_core::binder::{Notice, RenderSink, View};
use dioxus::prelude::*;

/// Draws chart views through D3 and routes notices into a signal that the
/// page shows with `NoticeDisplay`.
pub struct DomSink {
    notice: Signal<Option<Notice>>,
}

impl DomSink {
    pub fn new(notice: Signal<Option<Notice>>) -> Self {
        Self { notice }
    }
}

impl RenderSink for DomSink {
    fn render(&mut self, target: &str, view: &View) {
        match view {
            View::Charts(charts) => {
                log::info!("Rendering {} chart(s) into {}", charts.len(), target);
                self.notice.set(None);
                js_bridge::init_charts();
                js_bridge::render_charts(target, charts);
            }
            View::Notice(notice) => {
                log::info!("Showing notice in {}: {}", target, notice.message);
                js_bridge::destroy_chart(target);
                self.notice.set(Some(notice.clone()));
            }
        }
    }
}
