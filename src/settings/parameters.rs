//! Generation parameters and their mapping to the settings store.
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::settings::SettingsStore;

/// The user-editable request fields. Serialized field names double as the
/// `txt2img` request keys and the settings keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub sd_model: Option<String>,
    pub prompt: String,
    pub negative_prompt: String,
    pub sampler: Option<String>,
    pub steps: i64,
    pub width: i64,
    pub height: i64,
    pub seed: i64,
    pub cfg_scale: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            sd_model: None,
            prompt: String::new(),
            negative_prompt: String::new(),
            sampler: None,
            steps: 20,
            width: 512,
            height: 512,
            seed: -1,
            cfg_scale: 7.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterField {
    SdModel,
    Prompt,
    NegativePrompt,
    Sampler,
    Steps,
    Width,
    Height,
    Seed,
    CfgScale,
}

impl ParameterField {
    pub const ALL: [ParameterField; 9] = [
        ParameterField::SdModel,
        ParameterField::Prompt,
        ParameterField::NegativePrompt,
        ParameterField::Sampler,
        ParameterField::Steps,
        ParameterField::Width,
        ParameterField::Height,
        ParameterField::Seed,
        ParameterField::CfgScale,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ParameterField::SdModel => "sd_model",
            ParameterField::Prompt => "prompt",
            ParameterField::NegativePrompt => "negative_prompt",
            ParameterField::Sampler => "sampler",
            ParameterField::Steps => "steps",
            ParameterField::Width => "width",
            ParameterField::Height => "height",
            ParameterField::Seed => "seed",
            ParameterField::CfgScale => "cfg_scale",
        }
    }
}

impl Parameters {
    pub fn get(&self, field: ParameterField) -> Value {
        match field {
            ParameterField::SdModel => json!(self.sd_model),
            ParameterField::Prompt => json!(self.prompt),
            ParameterField::NegativePrompt => json!(self.negative_prompt),
            ParameterField::Sampler => json!(self.sampler),
            ParameterField::Steps => json!(self.steps),
            ParameterField::Width => json!(self.width),
            ParameterField::Height => json!(self.height),
            ParameterField::Seed => json!(self.seed),
            ParameterField::CfgScale => json!(self.cfg_scale),
        }
    }

    /// Assign `field` from a stored value. Returns `false`, leaving the
    /// field untouched, when the value has the wrong type.
    pub fn set(&mut self, field: ParameterField, value: &Value) -> bool {
        match field {
            ParameterField::SdModel => assign(&mut self.sd_model, optional_string(value)),
            ParameterField::Prompt => assign(&mut self.prompt, string(value)),
            ParameterField::NegativePrompt => assign(&mut self.negative_prompt, string(value)),
            ParameterField::Sampler => assign(&mut self.sampler, optional_string(value)),
            ParameterField::Steps => assign(&mut self.steps, integer(value)),
            ParameterField::Width => assign(&mut self.width, integer(value)),
            ParameterField::Height => assign(&mut self.height, integer(value)),
            ParameterField::Seed => assign(&mut self.seed, integer(value)),
            ParameterField::CfgScale => assign(&mut self.cfg_scale, float(value)),
        }
    }

    /// Write every field, then flush the store.
    pub fn save(&self, store: &mut dyn SettingsStore) -> AppResult<()> {
        for field in ParameterField::ALL {
            store.set_value(field.key(), self.get(field));
        }
        store.sync()
    }

    /// Overwrite the fields present in `store`; absent keys keep their value.
    pub fn load(&mut self, store: &dyn SettingsStore) {
        for field in ParameterField::ALL {
            if let Some(value) = store.value(field.key()) {
                if !self.set(field, value) {
                    tracing::warn!("Ignoring stored '{}' with unexpected value {}", field.key(), value);
                }
            }
        }
    }
}

fn assign<T>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *slot = v;
            true
        }
        None => false,
    }
}

fn string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn optional_string(value: &Value) -> Option<Option<String>> {
    match value {
        Value::Null => Some(None),
        Value::String(s) => Some(Some(s.clone())),
        _ => None,
    }
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
