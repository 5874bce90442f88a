//! BMI calculator.

use super::{FeatureHandler, FeatureKind};
use crate::matcher::normalize;
use crate::templates::{BMI_MALFORMED, BMI_NOTE, BMI_PROMPT};
use crate::types::FeatureRequest;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static BMI_INTENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(bmi|body mass index)\b").expect("valid bmi intent pattern"));

static HEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(cm|centimeters?|m|meters?)").expect("valid height pattern")
});

static WEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(kg|kilograms?)").expect("valid weight pattern")
});

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BmiError {
    #[error("height must be a positive number, got {0}")]
    InvalidHeight(f64),

    #[error("weight must be a positive number, got {0}")]
    InvalidWeight(f64),

    #[error("BMI is not a finite number")]
    NotFinite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classify a BMI already rounded to one decimal
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi <= 24.9 {
            Self::Normal
        } else if (25.0..=29.9).contains(&bmi) {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::Underweight => "It seems you are underweight. Consider consulting a nutritionist for a balanced diet plan.",
            Self::Normal => "Great! You are in a healthy weight range. Keep maintaining a balanced diet and regular exercise.",
            Self::Overweight => "You are in the overweight range. Regular exercise and a balanced diet can help manage your weight.",
            Self::Obese => "Your BMI indicates obesity. It is recommended to consult a healthcare provider for personalized advice.",
        }
    }
}

/// Computed BMI, rounded to one decimal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiReading {
    pub bmi: f64,
    pub category: BmiCategory,
}

impl BmiReading {
    pub fn render(&self) -> String {
        format!(
            "<strong>Your BMI is {:.1} ({}).</strong><br><br>{}<br><br>{}",
            self.bmi,
            self.category.label(),
            self.category.advice(),
            BMI_NOTE
        )
    }
}

/// weight / height_m², rounded to one decimal place
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> Result<BmiReading, BmiError> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(BmiError::InvalidHeight(height_cm));
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(BmiError::InvalidWeight(weight_kg));
    }

    let height_m = height_cm / 100.0;
    let raw = weight_kg / (height_m * height_m);
    if !raw.is_finite() {
        return Err(BmiError::NotFinite);
    }

    // Round the exact decimal value, ties to even
    let bmi: f64 = format!("{:.1}", raw)
        .parse()
        .map_err(|_| BmiError::NotFinite)?;
    Ok(BmiReading {
        bmi,
        category: BmiCategory::classify(bmi),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeightUnit {
    Centimeters,
    Meters,
}

impl HeightUnit {
    fn parse(unit: &str) -> Self {
        if unit.starts_with('c') {
            Self::Centimeters
        } else {
            Self::Meters
        }
    }
}

/// Height in centimeters, if a height with unit is present
pub fn extract_height_cm(normalized: &str) -> Option<f64> {
    let caps = HEIGHT.captures(normalized)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    match HeightUnit::parse(caps.get(2)?.as_str()) {
        HeightUnit::Centimeters => Some(value),
        HeightUnit::Meters => Some(value * 100.0),
    }
}

/// Weight in kilograms, if present
pub fn extract_weight_kg(normalized: &str) -> Option<f64> {
    let caps = WEIGHT.captures(normalized)?;
    caps.get(1)?.as_str().parse().ok()
}

/// BMI feature handler
#[derive(Debug, Clone, Copy, Default)]
pub struct BmiHandler;

impl FeatureHandler for BmiHandler {
    fn kind(&self) -> FeatureKind {
        FeatureKind::Bmi
    }

    fn try_handle(&self, input: &str) -> FeatureRequest {
        let normalized = normalize(input);
        if !BMI_INTENT.is_match(&normalized) {
            return FeatureRequest::NoMatch;
        }

        let (Some(height_cm), Some(weight_kg)) = (
            extract_height_cm(&normalized),
            extract_weight_kg(&normalized),
        ) else {
            return FeatureRequest::NeedsInput(BMI_PROMPT.to_string());
        };

        match calculate_bmi(height_cm, weight_kg) {
            Ok(reading) => FeatureRequest::Resolved(reading.render()),
            Err(e) => {
                tracing::debug!("BMI calculation rejected: {}", e);
                FeatureRequest::Resolved(BMI_MALFORMED.to_string())
            }
        }
    }
}
