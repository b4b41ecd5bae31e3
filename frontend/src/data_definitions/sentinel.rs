//! IntersectionObserver binding for the infinite list sentinel.

use anyhow::anyhow;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Watches one element and reports when it enters or leaves the viewport
/// (extended downwards by a margin). Disconnects when dropped.
pub struct SentinelObserver {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl SentinelObserver {
    pub fn observe(element: &Element, margin_px: u32, mut on_change: impl FnMut(bool) + 'static) -> anyhow::Result<Self> {
        let callback: ObserverCallback = Closure::new(move |entries: js_sys::Array, _observer: IntersectionObserver| {
            // several entries can be batched; the last one is the current state
            let last = entries.iter().filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok()).last();
            if let Some(entry) = last {
                on_change(entry.is_intersecting());
            }
        });
        let options = IntersectionObserverInit::new();
        options.set_root_margin(&format!("0px 0px {margin_px}px 0px"));
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .map_err(|e| anyhow!("cannot create IntersectionObserver: {e:?}"))?;
        observer.observe(element);
        Ok(Self { observer, _callback: callback })
    }
}

impl Drop for SentinelObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Current viewport width in CSS pixels, if there is a window.
pub fn viewport_width_px() -> Option<u32> {
    let width = web_sys::window()?.inner_width().ok()?.as_f64()?;
    Some(width.max(0.0) as u32)
}
