//! CDP-backed page handle and locators.
//!
//! [`PageHandle`] wraps one chromiumoxide page (one tab). It resolves
//! relative paths against the configured base URL and implements
//! [`BrowsingContext`] in terms of CDP lifecycle events. [`Locator`] is a
//! lazy selector wrapper: it does not query the DOM until an action or
//! read is performed.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchMouseEventParams, DispatchMouseEventType,
};
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams, EventDomContentEventFired,
    EventLifecycleEvent, EventLoadEventFired, SetLifecycleEventsEnabledParams,
};
use chromiumoxide::cdp::js_protocol::runtime::CallFunctionOnReturns;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use url::Url;

use crate::config::HarnessConfig;
use crate::context::{BrowsingContext, LoadState};
use crate::error::{Error, Result};

/// Attribute used to hand text-matched elements back to `querySelector`.
const MATCH_ATTR: &str = "data-e2e-match";

/// Default scope for text lookups: the interactive elements the site
/// renders its menus, filters, and buttons with.
const TEXT_SCOPE: &str = "a, button, label, span, [role='button'], [role='link']";

/// Poll interval for visibility waits.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Load-state observations for the current document.
///
/// CDP emits each lifecycle event once per navigation, so a waiter that
/// subscribes after the fact would block until the timeout. A background
/// listener records the events here and waits consult the recorded level.
#[derive(Debug, Default)]
struct LifecycleFlags {
    network_idle: AtomicBool,
}

impl LifecycleFlags {
    fn record(&self, event_name: &str) {
        match event_name {
            // A new document started loading; prior observations are stale.
            "init" => self.network_idle.store(false, Ordering::Relaxed),
            "networkIdle" => self.network_idle.store(true, Ordering::Relaxed),
            _ => {}
        }
    }

    fn is_network_idle(&self) -> bool {
        self.network_idle.load(Ordering::Relaxed)
    }
}

/// One browser tab.
#[derive(Debug, Clone)]
pub struct PageHandle {
    page: Arc<Page>,
    base: Url,
    flags: Arc<LifecycleFlags>,
}

impl PageHandle {
    /// Wraps a freshly created page, enables lifecycle event reporting, and
    /// starts the listener that records load states as they fire.
    pub(crate) async fn new(page: Page, config: &HarnessConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            Error::InvalidArgument(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;
        page.execute(SetLifecycleEventsEnabledParams::new(true))
            .await?;

        let flags = Arc::new(LifecycleFlags::default());
        let mut lifecycle = page.event_listener::<EventLifecycleEvent>().await?;
        let recorder = Arc::clone(&flags);
        tokio::spawn(async move {
            while let Some(event) = lifecycle.next().await {
                recorder.record(&event.name);
            }
        });

        Ok(Self {
            page: Arc::new(page),
            base,
            flags,
        })
    }

    /// Creates a locator from a CSS selector.
    pub fn locator(&self, selector: impl Into<String>) -> Locator {
        Locator {
            page: Arc::clone(&self.page),
            selector: Selector::Css(selector.into()),
            index: None,
        }
    }

    /// Creates a locator matching interactive elements whose normalized
    /// text content or `aria-label` equals `text`.
    pub fn get_by_text(&self, text: impl Into<String>) -> Locator {
        self.text_locator(TEXT_SCOPE, text, true)
    }

    /// Like [`get_by_text`](Self::get_by_text) but matches substrings and
    /// any element, for banners like "No items match your filters".
    pub fn get_by_partial_text(&self, text: impl Into<String>) -> Locator {
        self.text_locator("*", text, false)
    }

    /// Creates an exact text locator restricted to elements matching
    /// `scope` (CSS).
    pub fn get_by_text_within(
        &self,
        scope: impl Into<String>,
        text: impl Into<String>,
    ) -> Locator {
        self.text_locator(scope, text, true)
    }

    fn text_locator(
        &self,
        scope: impl Into<String>,
        text: impl Into<String>,
        exact: bool,
    ) -> Locator {
        Locator {
            page: Arc::clone(&self.page),
            selector: Selector::Text {
                scope: scope.into(),
                text: text.into(),
                exact,
            },
            index: None,
        }
    }

    /// Returns the page's current URL.
    pub async fn url(&self) -> Result<String> {
        let url = self.page.url().await?;
        Ok(url.unwrap_or_else(|| "about:blank".to_string()))
    }

    /// Evaluates a JavaScript expression and deserializes the result.
    pub async fn evaluate<T>(&self, expression: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let value = self
            .page
            .evaluate(expression.to_string())
            .await?
            .into_value()?;
        Ok(value)
    }

    /// Writes a full-page PNG screenshot to `path`, creating parent
    /// directories as needed.
    pub async fn save_screenshot(&self, path: impl AsRef<Path>) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let response = self
            .page
            .execute(
                CaptureScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .build(),
            )
            .await?;
        let bytes = base64::engine::general_purpose::STANDARD.decode(&response.data)?;
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }

    /// Resolves a relative path against the base URL; absolute URLs pass
    /// through untouched.
    fn resolve(&self, path: &str) -> Result<String> {
        if path.contains("://") || path.starts_with("about:") || path.starts_with("data:") {
            return Ok(path.to_string());
        }
        self.base
            .join(path)
            .map(|url| url.to_string())
            .map_err(|e| {
                Error::InvalidArgument(format!(
                    "cannot resolve '{}' against '{}': {}",
                    path, self.base, e
                ))
            })
    }

    async fn ready_state_reached(&self, state: LoadState) -> Result<bool> {
        match state {
            LoadState::NetworkIdle => Ok(self.flags.is_network_idle()),
            LoadState::DomContentLoaded => {
                let ready_state: String = self.evaluate("document.readyState").await?;
                Ok(ready_state == "interactive" || ready_state == "complete")
            }
            LoadState::Load => {
                let ready_state: String = self.evaluate("document.readyState").await?;
                Ok(ready_state == "complete")
            }
        }
    }

    async fn wait_for_event(&self, state: LoadState) -> Result<()> {
        match state {
            LoadState::DomContentLoaded => {
                let mut events = self.page.event_listener::<EventDomContentEventFired>().await?;
                events.next().await.ok_or_else(|| page_closed(state))?;
            }
            LoadState::Load => {
                let mut events = self.page.event_listener::<EventLoadEventFired>().await?;
                events.next().await.ok_or_else(|| page_closed(state))?;
            }
            LoadState::NetworkIdle => {
                // Idle is a level, not an edge: poll the recorded state so
                // an event that fired mid-subscription cannot be missed.
                while !self.flags.is_network_idle() {
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl BrowsingContext for PageHandle {
    async fn goto(&self, path: &str, wait_until: LoadState, timeout: Duration) -> Result<()> {
        let url = self.resolve(path)?;
        let transition = async {
            // Subscribe before requesting the transition so the load event
            // cannot slip past between navigate and listen.
            match wait_until {
                LoadState::DomContentLoaded => {
                    let mut events =
                        self.page.event_listener::<EventDomContentEventFired>().await?;
                    self.page.goto(url.as_str()).await?;
                    events.next().await.ok_or_else(|| page_closed(wait_until))?;
                }
                LoadState::Load => {
                    let mut events = self.page.event_listener::<EventLoadEventFired>().await?;
                    self.page.goto(url.as_str()).await?;
                    events.next().await.ok_or_else(|| page_closed(wait_until))?;
                }
                LoadState::NetworkIdle => {
                    let mut events = self.page.event_listener::<EventLifecycleEvent>().await?;
                    self.page.goto(url.as_str()).await?;
                    loop {
                        match events.next().await {
                            Some(event) if event.name == "networkIdle" => break,
                            Some(_) => continue,
                            None => return Err(page_closed(wait_until)),
                        }
                    }
                }
            }
            Ok(())
        };
        match tokio::time::timeout(timeout, transition).await {
            Ok(result) => result,
            Err(_) => Err(Error::NavigationTimeout {
                url,
                duration_ms: timeout.as_millis() as u64,
            }),
        }
    }

    async fn wait_for_load_state(&self, state: LoadState, timeout: Duration) -> Result<()> {
        let wait = async {
            // The event may already have fired for this document; check the
            // ready state before blocking on the next occurrence.
            if self.ready_state_reached(state).await? {
                return Ok(());
            }
            self.wait_for_event(state).await
        };
        match tokio::time::timeout(timeout, wait).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(format!(
                "load state '{}' not reached within {}ms",
                state.as_str(),
                timeout.as_millis()
            ))),
        }
    }

    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

fn page_closed(state: LoadState) -> Error {
    Error::TargetClosed {
        target_type: "Page".to_string(),
        context: format!("event stream ended waiting for '{}'", state.as_str()),
    }
}

#[derive(Debug, Clone)]
enum Selector {
    Css(String),
    Text {
        scope: String,
        text: String,
        exact: bool,
    },
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Css(css) => write!(f, "{css}"),
            Selector::Text { scope, text, exact } => {
                write!(f, "text={text:?} within '{scope}' (exact={exact})")
            }
        }
    }
}

/// Lazy handle to the elements matching a selector.
///
/// Actions operate on the first match unless [`nth`](Locator::nth) picked
/// a different one.
#[derive(Debug, Clone)]
pub struct Locator {
    page: Arc<Page>,
    selector: Selector,
    index: Option<usize>,
}

impl Locator {
    /// Narrows the locator to the first match
    pub fn first(mut self) -> Locator {
        self.index = Some(0);
        self
    }

    /// Narrows the locator to the zero-based nth match
    pub fn nth(mut self, index: usize) -> Locator {
        self.index = Some(index);
        self
    }

    /// Returns the number of matching elements.
    pub async fn count(&self) -> Result<usize> {
        Ok(self.elements().await?.len())
    }

    /// Scrolls the element into view and clicks it.
    pub async fn click(&self) -> Result<()> {
        let element = self.element().await?;
        element.scroll_into_view().await?;
        element.click().await?;
        Ok(())
    }

    /// Moves the mouse over the element (opens hover menus).
    pub async fn hover(&self) -> Result<()> {
        let element = self.element().await?;
        element.scroll_into_view().await?;
        let ret = element
            .call_js_fn(
                "function() { const r = this.getBoundingClientRect(); \
                 return [r.x + r.width / 2, r.y + r.height / 2]; }",
                false,
            )
            .await?;
        let (x, y): (f64, f64) = match ret.result.value {
            Some(value) => serde_json::from_value(value)?,
            None => {
                return Err(Error::ElementNotFound(format!(
                    "no layout box for {}",
                    self.selector
                )));
            }
        };
        let event = DispatchMouseEventParams::builder()
            .r#type(DispatchMouseEventType::MouseMoved)
            .x(x)
            .y(y)
            .build()
            .map_err(Error::InvalidArgument)?;
        self.page.execute(event).await?;
        Ok(())
    }

    /// Clears the input and types `text` into it.
    pub async fn fill(&self, text: &str) -> Result<()> {
        let element = self.element().await?;
        element.focus().await?;
        element
            .call_js_fn(
                "function() { this.value = ''; \
                 this.dispatchEvent(new Event('input', { bubbles: true })); }",
                false,
            )
            .await?;
        if !text.is_empty() {
            element.type_str(text).await?;
        }
        Ok(())
    }

    /// Presses a named key (e.g. "Enter") on the element.
    pub async fn press(&self, key: &str) -> Result<()> {
        self.element().await?.press_key(key).await?;
        Ok(())
    }

    /// Checks or unchecks a checkbox, clicking only when the state differs.
    pub async fn set_checked(&self, checked: bool) -> Result<()> {
        let element = self.element().await?;
        let current = element
            .call_js_fn("function() { return !!this.checked; }", false)
            .await
            .map(|ret| js_bool(&ret))?;
        if current != checked {
            element.scroll_into_view().await?;
            element.click().await?;
        }
        Ok(())
    }

    /// Returns the element's rendered text, empty when the element has none.
    pub async fn inner_text(&self) -> Result<String> {
        let text = self.element().await?.inner_text().await?;
        Ok(text.unwrap_or_default())
    }

    /// Returns the rendered text of every matching element.
    pub async fn all_inner_texts(&self) -> Result<Vec<String>> {
        let mut texts = Vec::new();
        for element in self.elements().await? {
            texts.push(element.inner_text().await?.unwrap_or_default());
        }
        Ok(texts)
    }

    /// Returns an attribute value, `None` when absent.
    pub async fn get_attribute(&self, name: &str) -> Result<Option<String>> {
        self.element().await?.attribute(name).await.map_err(Error::from)
    }

    /// True when the element exists and occupies layout space.
    pub async fn is_visible(&self) -> Result<bool> {
        let index = self.index.unwrap_or(0);
        let Some(element) = self.elements().await?.into_iter().nth(index) else {
            return Ok(false);
        };
        let ret = element
            .call_js_fn(
                "function() { const r = this.getBoundingClientRect(); \
                 const s = getComputedStyle(this); \
                 return r.width > 0 && r.height > 0 && \
                 s.visibility !== 'hidden' && s.display !== 'none'; }",
                false,
            )
            .await?;
        Ok(js_bool(&ret))
    }

    /// True when the element is not disabled via the DOM property, the
    /// `disabled` attribute, or `aria-disabled`.
    pub async fn is_enabled(&self) -> Result<bool> {
        let ret = self
            .element()
            .await?
            .call_js_fn(
                "function() { return !this.disabled && \
                 this.getAttribute('aria-disabled') !== 'true'; }",
                false,
            )
            .await?;
        Ok(js_bool(&ret))
    }

    /// Polls until the element is visible, erroring when `timeout` elapses.
    pub async fn wait_for_visible(&self, timeout: Duration) -> Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.is_visible().await.unwrap_or(false) {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(Error::Timeout(format!(
                    "element '{}' not visible within {}ms",
                    self.selector,
                    timeout.as_millis()
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn element(&self) -> Result<Element> {
        let index = self.index.unwrap_or(0);
        self.elements()
            .await?
            .into_iter()
            .nth(index)
            .ok_or_else(|| Error::ElementNotFound(format!("{} (nth {})", self.selector, index)))
    }

    async fn elements(&self) -> Result<Vec<Element>> {
        match &self.selector {
            Selector::Css(css) => Ok(self.page.find_elements(css.as_str()).await?),
            Selector::Text { scope, text, exact } => {
                // CSS cannot select on text content, so tag matches from JS
                // and query the tag attribute back out.
                let expression = format!(
                    r#"(() => {{
                        const scope = {scope};
                        const text = {text};
                        const exact = {exact};
                        document.querySelectorAll('[{attr}]')
                            .forEach(el => el.removeAttribute('{attr}'));
                        const norm = s => (s || '').replace(/\s+/g, ' ').trim();
                        let hits = 0;
                        for (const el of document.querySelectorAll(scope)) {{
                            const content = norm(el.textContent);
                            const label = norm(el.getAttribute('aria-label'));
                            const hit = exact
                                ? (content === text || label === text)
                                : (content.includes(text) || label.includes(text));
                            if (hit) el.setAttribute('{attr}', String(hits++));
                        }}
                        return hits;
                    }})()"#,
                    scope = js_string(scope),
                    text = js_string(text),
                    exact = exact,
                    attr = MATCH_ATTR,
                );
                let hits: u64 = self.page.evaluate(expression).await?.into_value()?;
                if hits == 0 {
                    return Ok(Vec::new());
                }
                Ok(self
                    .page
                    .find_elements(format!("[{MATCH_ATTR}]"))
                    .await?)
            }
        }
    }
}

/// Renders a Rust string as a JS string literal.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

fn js_bool(ret: &CallFunctionOnReturns) -> bool {
    ret.result
        .value
        .as_ref()
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}
