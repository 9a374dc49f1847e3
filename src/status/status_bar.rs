//! Status indicator: a progress bar that is either busy or full, with a
//! coloured chunk and a text label.
use crate::status::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Foreground,
    Background,
    DeepBackground,
    Red,
    Yellow,
    Green,
    Blue,
}

impl Color {
    pub fn hex(self) -> &'static str {
        match self {
            Color::Foreground => "#E2E2E2",
            Color::Background => "#474747",
            Color::DeepBackground => "#333333",
            Color::Red => "#754343",
            Color::Yellow => "#68633C",
            Color::Green => "#437545",
            Color::Blue => "#53728E",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusBar {
    color: Color,
    text: String,
    minimum: u32,
    maximum: u32,
    value: u32,
}

impl Default for StatusBar {
    fn default() -> Self {
        let mut bar = StatusBar {
            color: Color::Yellow,
            text: String::new(),
            minimum: 0,
            maximum: 0,
            value: 0,
        };
        bar.update(&Status::Loading);
        bar
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, status: &Status) {
        match status {
            Status::Ready => {
                self.color = Color::Green;
                self.text = "Ready".to_string();
                self.set_busy(false);
            }
            Status::Error(message) => {
                self.color = Color::Red;
                self.text = message.clone().unwrap_or_else(|| "Error".to_string());
                self.set_busy(false);
            }
            Status::Processing => {
                self.color = Color::Blue;
                self.text = "Processing...".to_string();
                self.set_busy(true);
            }
            Status::Loading => {
                self.color = Color::Yellow;
                self.text = "Loading...".to_string();
                self.set_busy(true);
            }
        }
    }

    /// Busy is an indeterminate (0, 0) range; idle is a full bar.
    fn set_busy(&mut self, busy: bool) {
        self.minimum = 0;
        if busy {
            self.maximum = 0;
            self.value = 0;
        } else {
            self.maximum = 100;
            self.value = 100;
        }
    }

    pub fn is_busy(&self) -> bool {
        self.maximum == 0
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn style_sheet(&self) -> String {
        format!(
            "QProgressBar {{ color: {}; background-color: {}; }} \
             QProgressBar::chunk {{ background-color: {}; border: 1px solid {}; border-radius: 2px; }}",
            Color::Foreground.hex(),
            Color::DeepBackground.hex(),
            self.color.hex(),
            Color::DeepBackground.hex(),
        )
    }
}
