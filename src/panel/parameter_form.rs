//! The generation parameter form.
//!
//! Every control is connected to the shared [`Parameters`] record, so a user
//! edit is reflected in the record immediately. Ranges match what the API
//! accepts.
use std::cell::RefCell;
use std::rc::Rc;

use crate::panel::controls::{ComboBox, DoubleSpinBox, SpinBox, TextEdit};
use crate::settings::Parameters;

pub const STEPS_RANGE: (i64, i64) = (1, 150);
pub const SIZE_RANGE: (i64, i64) = (64, 2048);
pub const SIZE_STEP: i64 = 8;
pub const SEED_RANGE: (i64, i64) = (i32::MIN as i64, i32::MAX as i64);
pub const CFG_SCALE_RANGE: (f64, f64) = (1.0, 30.0);
pub const CFG_SCALE_STEP: f64 = 0.5;

#[derive(Debug)]
pub struct ParameterForm {
    pub model: ComboBox,
    pub prompt: TextEdit,
    pub negative_prompt: TextEdit,
    pub sampler: ComboBox,
    pub steps: SpinBox,
    pub width: SpinBox,
    pub height: SpinBox,
    pub seed: SpinBox,
    pub cfg_scale: DoubleSpinBox,
    parameters: Rc<RefCell<Parameters>>,
}

impl ParameterForm {
    pub fn new(parameters: Rc<RefCell<Parameters>>) -> Self {
        let mut form = ParameterForm {
            model: ComboBox::new(),
            prompt: TextEdit::with_placeholder("Place your prompt here"),
            negative_prompt: TextEdit::with_placeholder("Place your negative prompt here"),
            sampler: ComboBox::new(),
            steps: SpinBox::new(STEPS_RANGE.0, STEPS_RANGE.1),
            width: SpinBox::new(SIZE_RANGE.0, SIZE_RANGE.1).with_single_step(SIZE_STEP),
            height: SpinBox::new(SIZE_RANGE.0, SIZE_RANGE.1).with_single_step(SIZE_STEP),
            seed: SpinBox::new(SEED_RANGE.0, SEED_RANGE.1),
            cfg_scale: DoubleSpinBox::new(CFG_SCALE_RANGE.0, CFG_SCALE_RANGE.1, 1)
                .with_single_step(CFG_SCALE_STEP),
            parameters,
        };
        form.connect();
        form
    }

    fn connect(&mut self) {
        let p = Rc::clone(&self.parameters);
        self.prompt.text_changed.connect(move |text| p.borrow_mut().prompt = text.clone());
        let p = Rc::clone(&self.parameters);
        self.negative_prompt
            .text_changed
            .connect(move |text| p.borrow_mut().negative_prompt = text.clone());
        let p = Rc::clone(&self.parameters);
        self.model
            .current_text_changed
            .connect(move |model| p.borrow_mut().sd_model = non_empty(model));
        let p = Rc::clone(&self.parameters);
        self.sampler
            .current_text_changed
            .connect(move |sampler| p.borrow_mut().sampler = non_empty(sampler));
        let p = Rc::clone(&self.parameters);
        self.steps.value_changed.connect(move |v| p.borrow_mut().steps = *v);
        let p = Rc::clone(&self.parameters);
        self.width.value_changed.connect(move |v| p.borrow_mut().width = *v);
        let p = Rc::clone(&self.parameters);
        self.height.value_changed.connect(move |v| p.borrow_mut().height = *v);
        let p = Rc::clone(&self.parameters);
        self.seed.value_changed.connect(move |v| p.borrow_mut().seed = *v);
        let p = Rc::clone(&self.parameters);
        self.cfg_scale.value_changed.connect(move |v| p.borrow_mut().cfg_scale = *v);
    }

    pub fn update_model_options(&mut self, options: &[String]) {
        repopulate(&mut self.model, options);
    }

    pub fn update_sampler_options(&mut self, options: &[String]) {
        repopulate(&mut self.sampler, options);
    }

    /// Choose a model by name. Without an option list the name is taken
    /// as-is; otherwise it must be one of the options.
    pub fn set_model(&mut self, name: &str) -> bool {
        if self.model.items().is_empty() {
            self.parameters.borrow_mut().sd_model = non_empty(name);
            return true;
        }
        self.model.set_current_text(name)
    }

    /// Choose a sampler by name, with the same rules as [`Self::set_model`].
    pub fn set_sampler(&mut self, name: &str) -> bool {
        if self.sampler.items().is_empty() {
            self.parameters.borrow_mut().sampler = non_empty(name);
            return true;
        }
        self.sampler.set_current_text(name)
    }

    /// Push the record into the controls, then write back whatever the
    /// controls settled on (clamped numbers, fallback selections).
    pub fn populate_parameters(&mut self) {
        let snapshot = self.parameters.borrow().clone();

        select_or_keep(&mut self.model, snapshot.sd_model.as_deref());
        self.prompt.set_text(&snapshot.prompt);
        self.negative_prompt.set_text(&snapshot.negative_prompt);
        select_or_keep(&mut self.sampler, snapshot.sampler.as_deref());
        self.steps.set_value(snapshot.steps);
        self.width.set_value(snapshot.width);
        self.height.set_value(snapshot.height);
        self.seed.set_value(snapshot.seed);
        self.cfg_scale.set_value(snapshot.cfg_scale);

        let mut p = self.parameters.borrow_mut();
        if self.model.current_index().is_some() {
            p.sd_model = non_empty(self.model.current_text());
        }
        if self.sampler.current_index().is_some() {
            p.sampler = non_empty(self.sampler.current_text());
        }
        p.steps = self.steps.value();
        p.width = self.width.value();
        p.height = self.height.value();
        p.seed = self.seed.value();
        p.cfg_scale = self.cfg_scale.value();
    }
}

fn repopulate(combo: &mut ComboBox, options: &[String]) {
    let was = combo.current_text_changed.block(true);
    combo.clear();
    combo.add_items(options.iter().cloned());
    combo.current_text_changed.block(was);
}

/// Select `saved` when the combo offers it; otherwise leave the current
/// selection (the first option after a repopulate).
fn select_or_keep(combo: &mut ComboBox, saved: Option<&str>) {
    if let Some(saved) = saved {
        if !combo.set_current_text(saved) && !combo.items().is_empty() {
            tracing::warn!("Saved option '{}' is not offered, using '{}'", saved, combo.current_text());
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
