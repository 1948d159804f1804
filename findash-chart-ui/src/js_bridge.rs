//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! D3.js chart functions live in `assets/js/*.js` and are loaded at runtime as
//! globals (no ES modules) exposed via `window.*`. Every value crossing the
//! bridge is serialized with `serde_json`, which also makes it a valid JS
//! literal, so no manual quote escaping is needed.

use findash_core::chart::ChartSpec;
use serde::Serialize;
use wasm_bindgen::JsValue;

// Embed all chart JS files at compile time
static TOOLTIP_JS: &str = include_str!("../assets/js/tooltip.js");
static LINE_CHART_JS: &str = include_str!("../assets/js/line-chart.js");
static DOWNLOAD_JS: &str = include_str!("../assets/js/download.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('findash JS call failed:', e); }}",
        code
    );
    if let Err(e) = js_sys::eval(&wrapped) {
        warn_js(&e);
    }
}

fn warn_js(value: &JsValue) {
    web_sys::console::warn_1(value);
}

/// Serialize `value` as a JS literal; `null` if serialization fails.
fn js_literal<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("Failed to serialize value for JS: {}", e);
        "null".to_string()
    })
}

fn init_charts_bundle() -> String {
    [TOOLTIP_JS, LINE_CHART_JS].join("\n")
}

/// Initialize chart scripts with a wait-for-D3 polling loop.
///
/// The scripts are evaluated at global scope via indirect eval once D3 is
/// ready, then each entry point is promoted to `window.*`. Safe to call more
/// than once.
pub fn init_charts() {
    call_js(&format!(
        "if (!window.__findashChartsReady && !window.__findashChartScripts) {{ window.__findashChartScripts = {}; }}",
        js_literal(&init_charts_bundle())
    ));

    let init_js = r#"
        (function() {
            if (window.__findashChartsReady || window.__findashChartsPolling) return;
            window.__findashChartsPolling = true;
            var waitForD3 = setInterval(function() {
                if (typeof d3 !== 'undefined') {
                    clearInterval(waitForD3);
                    (0, eval)(window.__findashChartScripts);
                    delete window.__findashChartScripts;
                    if (typeof renderChartSpecs !== 'undefined') window.renderChartSpecs = renderChartSpecs;
                    if (typeof renderLineChart !== 'undefined') window.renderLineChart = renderLineChart;
                    if (typeof initTooltip !== 'undefined') window.initTooltip = initTooltip;
                    if (typeof showTooltip !== 'undefined') window.showTooltip = showTooltip;
                    if (typeof hideTooltip !== 'undefined') window.hideTooltip = hideTooltip;
                    window.__findashChartsReady = true;
                    console.log('findash charts initialized');
                }
            }, 100);
        })();
    "#;
    call_js(init_js);
}

/// Install `window.downloadText`. It needs no D3, so it is loaded on its own
/// and a download works before any chart has been drawn. Safe to call more
/// than once.
pub fn init_download() {
    call_js(&download_init_script());
}

fn download_init_script() -> String {
    format!(
        "if (typeof window.downloadText === 'undefined') {{ (0, eval)({}); window.downloadText = downloadText; }}",
        js_literal(DOWNLOAD_JS)
    )
}

/// Replace the contents of `container_id` with one chart per spec.
///
/// Polls until D3, the chart scripts and the container element all exist.
/// The poll is kept per container so a later render or [`destroy_chart`]
/// cancels a draw that has not happened yet.
pub fn render_charts(container_id: &str, charts: &[ChartSpec]) {
    call_js(&render_script(container_id, charts));
}

fn cancel_poll_script(id: &str) -> String {
    format!(
        "window.__findashChartPolls = window.__findashChartPolls || {{}}; \
         if (window.__findashChartPolls[{id}]) {{ clearInterval(window.__findashChartPolls[{id}]); delete window.__findashChartPolls[{id}]; }}"
    )
}

fn render_script(container_id: &str, charts: &[ChartSpec]) -> String {
    let id = js_literal(container_id);
    let specs = js_literal(charts);
    let cancel = cancel_poll_script(&id);
    format!(
        r#"
        (function() {{
            {cancel}
            var poll = setInterval(function() {{
                if (window.__findashChartsReady &&
                    typeof window.renderChartSpecs !== 'undefined' &&
                    document.getElementById({id})) {{
                    clearInterval(poll);
                    delete window.__findashChartPolls[{id}];
                    try {{
                        window.renderChartSpecs({id}, {specs});
                    }} catch(e) {{ console.error('[findash] renderChartSpecs error:', e); }}
                }}
            }}, 100);
            window.__findashChartPolls[{id}] = poll;
        }})();
        "#,
    )
}

/// Clear a chart container and cancel any draw still waiting on it.
pub fn destroy_chart(container_id: &str) {
    call_js(&destroy_script(container_id));
}

fn destroy_script(container_id: &str) -> String {
    let id = js_literal(container_id);
    format!(
        "{} var el = document.getElementById({id}); if (el) el.innerHTML = '';",
        cancel_poll_script(&id)
    )
}

/// Offer `content` to the browser as a file download named `filename`.
pub fn download_text(filename: &str, mime: &str, content: &str) {
    init_download();
    call_js(&format!(
        "if (typeof window.downloadText !== 'undefined') {{ window.downloadText({}, {}, {}); }} else {{ console.warn('findash download script not loaded'); }}",
        js_literal(filename),
        js_literal(mime),
        js_literal(content)
    ));
}
