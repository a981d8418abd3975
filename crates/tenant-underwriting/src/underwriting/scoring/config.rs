use serde::Serialize;
use serde_json::{Map, Value};

const DEFAULT_PD_MAX: f64 = 0.25;
const DEFAULT_ACCEPT_PD: f64 = 0.05;
const DEFAULT_CONDITIONAL_PD: f64 = 0.10;

/// Insurer-specific scoring configuration, fully populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub weights: ComponentWeights,
    pub pd_max: f64,
    pub decision_thresholds: DecisionThresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            name: None,
            weights: ComponentWeights::default(),
            pd_max: DEFAULT_PD_MAX,
            decision_thresholds: DecisionThresholds::default(),
        }
    }
}

impl ScoringConfig {
    /// True when the accept band sits above the conditional band.
    ///
    /// Such a configuration is stored as-is; `classify` evaluates the accept cutoff first.
    pub fn has_inverted_thresholds(&self) -> bool {
        self.decision_thresholds.accept_pd > self.decision_thresholds.conditional_pd
    }
}

/// Target maximum points per component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentWeights {
    pub personal: f64,
    pub employment: f64,
    pub financial: f64,
    pub housing: f64,
    pub other: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            personal: 10.0,
            employment: 25.0,
            financial: 20.0,
            housing: 25.0,
            other: 20.0,
        }
    }
}

impl ComponentWeights {
    pub fn total(&self) -> f64 {
        self.personal + self.employment + self.financial + self.housing + self.other
    }
}

/// PD cutoffs separating accept, conditional accept, and decline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionThresholds {
    pub accept_pd: f64,
    pub conditional_pd: f64,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            accept_pd: DEFAULT_ACCEPT_PD,
            conditional_pd: DEFAULT_CONDITIONAL_PD,
        }
    }
}

/// Raised when a supplied configuration field violates its type or bounds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid scoring configuration at `{field}`: {reason}")]
pub struct ConfigValidationError {
    pub field: String,
    pub reason: String,
}

impl ConfigValidationError {
    fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Produce a fully-populated configuration from an untyped, possibly partial payload.
///
/// Absent fields and explicit `null`s fall back to the system defaults. Unknown keys are
/// ignored so stored blobs from newer writers still load.
pub fn resolve_config(raw: Option<&Value>) -> Result<ScoringConfig, ConfigValidationError> {
    resolve_with_defaults(raw, &ScoringConfig::default())
}

/// Same as [`resolve_config`] but fills gaps from `defaults` instead of the built-in values.
pub fn resolve_with_defaults(
    raw: Option<&Value>,
    defaults: &ScoringConfig,
) -> Result<ScoringConfig, ConfigValidationError> {
    let Some(root) = object_at(raw, "$")? else {
        return Ok(defaults.clone());
    };

    let name = match present(root.get("name")) {
        None => defaults.name.clone(),
        Some(Value::String(name)) => Some(name.clone()),
        Some(_) => return Err(ConfigValidationError::new("name", "expected a string")),
    };

    let weights = match object_at(root.get("weights"), "weights")? {
        None => defaults.weights,
        Some(weights) => {
            let base = defaults.weights;
            ComponentWeights {
                personal: weight(weights, "personal", base.personal)?,
                employment: weight(weights, "employment", base.employment)?,
                financial: weight(weights, "financial", base.financial)?,
                housing: weight(weights, "housing", base.housing)?,
                other: weight(weights, "other", base.other)?,
            }
        }
    };

    if !weights.total().is_finite() {
        return Err(ConfigValidationError::new(
            "weights",
            "total weight must be a finite number",
        ));
    }

    let pd_max = match number_at(root.get("pdMax"), "pdMax")? {
        None => defaults.pd_max,
        Some(value) if value <= 0.0 => {
            return Err(ConfigValidationError::new("pdMax", "must be greater than 0"))
        }
        Some(value) if value > 1.0 => {
            return Err(ConfigValidationError::new("pdMax", "must not exceed 1"))
        }
        Some(value) => value,
    };

    let decision_thresholds =
        match object_at(root.get("decisionThresholds"), "decisionThresholds")? {
            None => defaults.decision_thresholds,
            Some(thresholds) => {
                let base = defaults.decision_thresholds;
                DecisionThresholds {
                    accept_pd: probability(thresholds, "acceptPd", base.accept_pd)?,
                    conditional_pd: probability(thresholds, "conditionalPd", base.conditional_pd)?,
                }
            }
        };

    Ok(ScoringConfig {
        name,
        weights,
        pd_max,
        decision_thresholds,
    })
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| !value.is_null())
}

fn object_at<'a>(
    value: Option<&'a Value>,
    path: &str,
) -> Result<Option<&'a Map<String, Value>>, ConfigValidationError> {
    match present(value) {
        None => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(ConfigValidationError::new(path, "expected an object")),
    }
}

fn number_at(value: Option<&Value>, path: &str) -> Result<Option<f64>, ConfigValidationError> {
    match present(value) {
        None => Ok(None),
        Some(Value::Number(number)) => match number.as_f64() {
            Some(value) if value.is_finite() => Ok(Some(value)),
            _ => Err(ConfigValidationError::new(path, "expected a finite number")),
        },
        Some(_) => Err(ConfigValidationError::new(path, "expected a number")),
    }
}

fn weight(
    weights: &Map<String, Value>,
    key: &str,
    fallback: f64,
) -> Result<f64, ConfigValidationError> {
    let path = format!("weights.{key}");
    match number_at(weights.get(key), &path)? {
        None => Ok(fallback),
        Some(value) if value < 0.0 => Err(ConfigValidationError::new(path, "must not be negative")),
        Some(value) => Ok(value),
    }
}

fn probability(
    thresholds: &Map<String, Value>,
    key: &str,
    fallback: f64,
) -> Result<f64, ConfigValidationError> {
    let path = format!("decisionThresholds.{key}");
    match number_at(thresholds.get(key), &path)? {
        None => Ok(fallback),
        Some(value) if !(0.0..=1.0).contains(&value) => {
            Err(ConfigValidationError::new(path, "must be within [0, 1]"))
        }
        Some(value) => Ok(value),
    }
}
