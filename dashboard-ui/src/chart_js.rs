//! Chart.js bindings
//!
//! `Chart` is the global loaded by `index.html`. The configuration comes from
//! the API as JSON; the tooltip label callback is attached here because a
//! JSON document cannot carry functions.

use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::api::ChartConfig;

#[wasm_bindgen]
extern "C" {
    /// A Chart.js chart instance
    pub type Chart;

    #[wasm_bindgen(constructor, catch)]
    fn new(canvas: &HtmlCanvasElement, config: &JsValue) -> Result<Chart, JsValue>;

    #[wasm_bindgen(method)]
    fn destroy(this: &Chart);
}

type LabelCallback = Closure<dyn Fn(JsValue) -> JsValue>;

/// A rendered chart; destroyed when dropped
pub struct SentimentChart {
    chart: Chart,
    _tooltip: LabelCallback,
}

impl SentimentChart {
    /// Render `config` into `canvas`
    pub fn render(canvas: &HtmlCanvasElement, config: &ChartConfig) -> Result<Self, JsValue> {
        let json = serde_json::to_string(config)
            .map_err(|e| JsValue::from_str(&format!("Serialize error: {}", e)))?;
        let js_config = js_sys::JSON::parse(&json)?;

        let (counts, percentages) = config
            .dataset()
            .map(|d| (d.data.clone(), d.percentages.clone()))
            .unwrap_or_default();

        let tooltip: LabelCallback = Closure::new(move |context: JsValue| {
            let index = Reflect::get(&context, &"dataIndex".into())
                .ok()
                .and_then(|v| v.as_f64())
                .map(|v| v as usize);

            index
                .and_then(|i| {
                    let count = *counts.get(i)?;
                    Some(tooltip_label(count, percentages.get(i).copied().flatten()))
                })
                .map(JsValue::from)
                .unwrap_or(JsValue::UNDEFINED)
        });

        let callbacks = child_object(&js_config, &["options", "plugins", "tooltip", "callbacks"])?;
        Reflect::set(&callbacks, &"label".into(), tooltip.as_ref())?;

        let chart = Chart::new(canvas, &js_config)?;

        Ok(Self {
            chart,
            _tooltip: tooltip,
        })
    }
}

impl Drop for SentimentChart {
    fn drop(&mut self) {
        self.chart.destroy();
    }
}

/// Walk `path` from `root`, creating empty objects where missing
fn child_object(root: &JsValue, path: &[&str]) -> Result<JsValue, JsValue> {
    let mut current = root.clone();

    for key in path {
        let key = JsValue::from_str(key);
        let mut next = Reflect::get(&current, &key)?;
        if !next.is_object() {
            next = Object::new().into();
            Reflect::set(&current, &key, &next)?;
        }
        current = next;
    }

    Ok(current)
}

/// `Count: N (P%)`, or `Count: N` when no percentage is known
///
/// Mirrors `sentiment_board::chart::tooltip_label` in the backend crate,
/// which this WASM crate cannot depend on; keep the two in sync.
pub fn tooltip_label(count: u64, percentage: Option<f64>) -> String {
    match percentage {
        Some(p) => format!("Count: {} ({}%)", count, p),
        None => format!("Count: {}", count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooltip_label() {
        assert_eq!(tooltip_label(3, Some(33.33)), "Count: 3 (33.33%)");
        assert_eq!(tooltip_label(2, Some(50.0)), "Count: 2 (50%)");
        assert_eq!(tooltip_label(0, None), "Count: 0");
    }
}
