//! Headless input controls with change notification.
//!
//! Each control owns a [`Signal`]; handlers run synchronously, in connection
//! order, on the thread that changed the value. Setting a value equal to the
//! current one does not notify.
use std::fmt;

pub struct Signal<T> {
    handlers: Vec<Box<dyn FnMut(&T)>>,
    blocked: bool,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Signal { handlers: Vec::new(), blocked: false }
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("handlers", &self.handlers.len())
            .field("blocked", &self.blocked)
            .finish()
    }
}

impl<T> Signal<T> {
    pub fn connect(&mut self, handler: impl FnMut(&T) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn emit(&mut self, value: &T) {
        if self.blocked {
            return;
        }
        for handler in self.handlers.iter_mut() {
            handler(value);
        }
    }

    /// Returns the previous blocked state.
    pub fn block(&mut self, blocked: bool) -> bool {
        std::mem::replace(&mut self.blocked, blocked)
    }
}

#[derive(Debug)]
pub struct SpinBox {
    value: i64,
    minimum: i64,
    maximum: i64,
    single_step: i64,
    pub value_changed: Signal<i64>,
}

impl SpinBox {
    pub fn new(minimum: i64, maximum: i64) -> Self {
        SpinBox {
            value: minimum,
            minimum,
            maximum,
            single_step: 1,
            value_changed: Signal::default(),
        }
    }

    pub fn with_single_step(mut self, step: i64) -> Self {
        self.single_step = step.max(1);
        self
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn range(&self) -> (i64, i64) {
        (self.minimum, self.maximum)
    }

    /// Clamp `value` into range and notify if it changed.
    pub fn set_value(&mut self, value: i64) {
        let clamped = value.clamp(self.minimum, self.maximum);
        if clamped != self.value {
            self.value = clamped;
            self.value_changed.emit(&clamped);
        }
    }

    pub fn step_by(&mut self, steps: i64) {
        let delta = steps.saturating_mul(self.single_step);
        self.set_value(self.value.saturating_add(delta));
    }
}

#[derive(Debug)]
pub struct DoubleSpinBox {
    value: f64,
    minimum: f64,
    maximum: f64,
    single_step: f64,
    decimals: u32,
    pub value_changed: Signal<f64>,
}

impl DoubleSpinBox {
    pub fn new(minimum: f64, maximum: f64, decimals: u32) -> Self {
        DoubleSpinBox {
            value: minimum,
            minimum,
            maximum,
            single_step: 1.0,
            decimals,
            value_changed: Signal::default(),
        }
    }

    pub fn with_single_step(mut self, step: f64) -> Self {
        self.single_step = step;
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Round to the configured decimals, clamp, and notify if it changed.
    pub fn set_value(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        let scale = 10f64.powi(self.decimals as i32);
        let rounded = ((value * scale).round() / scale).clamp(self.minimum, self.maximum);
        if rounded != self.value {
            self.value = rounded;
            self.value_changed.emit(&rounded);
        }
    }

    pub fn step_by(&mut self, steps: i32) {
        self.set_value(self.value + f64::from(steps) * self.single_step);
    }
}

#[derive(Debug, Default)]
pub struct ComboBox {
    items: Vec<String>,
    current: Option<usize>,
    pub current_text_changed: Signal<String>,
}

impl ComboBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_text(&self) -> &str {
        self.current.and_then(|i| self.items.get(i)).map(String::as_str).unwrap_or("")
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.set_current_index(None);
    }

    /// Append items; an empty combo selects its first item.
    pub fn add_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items.extend(items.into_iter().map(Into::into));
        if self.current.is_none() && !self.items.is_empty() {
            self.set_current_index(Some(0));
        }
    }

    /// Select the item equal to `text`. Returns `false`, leaving the
    /// selection untouched, when no item matches.
    pub fn set_current_text(&mut self, text: &str) -> bool {
        match self.items.iter().position(|item| item == text) {
            Some(index) => {
                self.set_current_index(Some(index));
                true
            }
            None => false,
        }
    }

    pub fn set_current_index(&mut self, index: Option<usize>) {
        let index = index.filter(|&i| i < self.items.len());
        if index != self.current {
            self.current = index;
            let text = self.current_text().to_string();
            self.current_text_changed.emit(&text);
        }
    }
}

#[derive(Debug, Default)]
pub struct TextEdit {
    text: String,
    placeholder: String,
    pub text_changed: Signal<String>,
}

impl TextEdit {
    pub fn with_placeholder(placeholder: &str) -> Self {
        TextEdit { placeholder: placeholder.to_string(), ..Self::default() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn set_text(&mut self, text: &str) {
        if text != self.text {
            self.text = text.to_string();
            self.text_changed.emit(&self.text);
        }
    }
}
