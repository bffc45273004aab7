//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestDesignBuilder` - builder for design managers with preloaded elements
//! - `FakeAuthSource` - scripted login state with a call counter
//! - `FakeArchive` - canned hourly weather series
//! - assertion helpers for element counts and history position

use miles_to_merch::auth::{AuthStatus, AuthStatusSource, User};
use miles_to_merch::design::{CanvasElement, DesignManager};
use miles_to_merch::error::{ApiError, ApiResult, WeatherError, WeatherResult};
use miles_to_merch::weather::{HourlySeries, WeatherArchive, WeatherQuery};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// TestDesignBuilder - Builder pattern for design managers
// ============================================================================

/// Builder for design managers whose history starts after setup.
///
/// # Example
/// ```ignore
/// let manager = TestDesignBuilder::new()
///     .with_text_box("Title", (0.0, 0.0))
///     .with_view("back")
///     .with_text_box("Back text", (10.0, 10.0))
///     .build();
/// ```
#[derive(Default)]
pub struct TestDesignBuilder {
    steps: Vec<Step>,
}

enum Step {
    Element(CanvasElement),
    View(String),
}

impl TestDesignBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text box with a predictable id to the current view
    pub fn with_text_box(mut self, text: &str, position: (f64, f64)) -> Self {
        let id = format!("text_{}", self.steps.len());
        self.steps.push(Step::Element(
            CanvasElement::text_box(text)
                .with_id(id)
                .with_position(position.0, position.1),
        ));
        self
    }

    pub fn with_element(mut self, element: CanvasElement) -> Self {
        self.steps.push(Step::Element(element));
        self
    }

    /// Switch to `view` before the following elements
    pub fn with_view(mut self, view: &str) -> Self {
        self.steps.push(Step::View(view.to_string()));
        self
    }

    /// Build the manager with a single history entry holding the setup
    pub fn build(self) -> DesignManager {
        let mut manager = DesignManager::new();
        for step in self.steps {
            match step {
                Step::Element(element) => {
                    manager.add_element(element);
                }
                Step::View(view) => manager.switch_view(&view),
            }
        }
        manager.init_history();
        manager
    }
}

/// Manager with one text box per entry of `texts`
pub fn manager_with_texts(texts: &[&str]) -> DesignManager {
    texts
        .iter()
        .enumerate()
        .fold(TestDesignBuilder::new(), |builder, (i, text)| {
            builder.with_text_box(text, (i as f64 * 10.0, 0.0))
        })
        .build()
}

// ============================================================================
// Assertions
// ============================================================================

pub fn assert_element_count(manager: &DesignManager, expected: usize) {
    assert_eq!(
        manager.current_design().elements.len(),
        expected,
        "Expected {} elements in view '{}'",
        expected,
        manager.current_view()
    );
}

pub fn assert_history(manager: &DesignManager, len: usize, index: usize) {
    assert_eq!(manager.history_len(), len, "history length");
    assert_eq!(manager.history_index(), index, "history index");
}

// ============================================================================
// Auth
// ============================================================================

/// Auth source returning whatever status the test sets; `None` fails
#[derive(Clone, Default)]
pub struct FakeAuthSource {
    status: Arc<Mutex<Option<AuthStatus>>>,
    calls: Arc<AtomicUsize>,
}

impl FakeAuthSource {
    pub fn with_status(status: AuthStatus) -> Self {
        let source = Self::default();
        source.set(Some(status));
        source
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn set(&self, status: Option<AuthStatus>) {
        *self.status.lock() = status;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AuthStatusSource for FakeAuthSource {
    fn fetch_status(&self) -> ApiResult<AuthStatus> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.status.lock().clone().ok_or(ApiError::Status(500))
    }
}

pub fn user(is_admin: bool) -> AuthStatus {
    let mut profile = serde_json::Map::new();
    profile.insert("email".to_string(), serde_json::json!("runner@example.com"));
    AuthStatus::logged_in_as(User { is_admin, profile })
}

// ============================================================================
// Weather
// ============================================================================

/// Archive answering every query with the same series, or failing
pub struct FakeArchive {
    series: Option<HourlySeries>,
}

impl FakeArchive {
    pub fn new(series: HourlySeries) -> Self {
        Self { series: Some(series) }
    }

    pub fn failing() -> Self {
        Self { series: None }
    }
}

impl WeatherArchive for FakeArchive {
    fn hourly(&self, _query: &WeatherQuery) -> WeatherResult<HourlySeries> {
        self.series.clone().ok_or(WeatherError::Status(503))
    }
}

/// Hourly series with a temperature and code for every timestamp
pub fn hourly(samples: &[(&str, f64, u8)]) -> HourlySeries {
    HourlySeries {
        time: samples.iter().map(|(t, _, _)| t.to_string()).collect(),
        temperature_2m: samples.iter().map(|(_, c, _)| Some(*c)).collect(),
        weathercode: samples.iter().map(|(_, _, code)| Some(*code)).collect(),
    }
}
