//! Response shapes of the advisory API.
//!
//! Bodies are decoded here, at the boundary, so rendering only ever sees
//! typed values. Backend-reported failures (`{"error": ...}`) decode into
//! `Rejected` variants rather than Rust errors.

use std::fmt;

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

use super::forms::NO_SELECTION;

/// A display value that the backend may send as a string, number, bool or
/// `null` (shown as `null`, the way list items are printed on the page).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scalar(String);

impl Scalar {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScalarVisitor;

        impl<'de> de::Visitor<'de> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, number, boolean or null")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Scalar::new(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Scalar(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Scalar(value.to_string()))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Scalar(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Scalar(format_number(value)))
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Scalar(value.to_string()))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Scalar::new("null"))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// Integral floats print without a fractional part (`18.0` → `18`).
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A backend `error` field. Falsy JSON (`null`, `false`, `0`, `""`) means
/// the body is not a rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "Value")]
struct ErrorField(Option<String>);

impl From<Value> for ErrorField {
    fn from(value: Value) -> Self {
        let message = match value {
            Value::Null | Value::Bool(false) => None,
            Value::String(text) if text.is_empty() => None,
            Value::Number(ref number) if number.as_f64() == Some(0.0) => None,
            Value::String(text) => Some(text),
            Value::Number(number) if number.is_f64() => number.as_f64().map(format_number),
            other => Some(other.to_string()),
        };
        ErrorField(message)
    }
}

impl ErrorField {
    fn into_message(self) -> Option<String> {
        self.0
    }
}

fn chosen(value: Option<&Scalar>) -> Option<&Scalar> {
    value.filter(|value| !value.is_empty() && value.as_str() != NO_SELECTION)
}

/// Crop risk category as labelled by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "Scalar")]
pub enum Risk {
    Low,
    Medium,
    High,
    Other(String),
}

impl From<Scalar> for Risk {
    fn from(value: Scalar) -> Self {
        match value.as_str() {
            "low" => Risk::Low,
            "medium" => Risk::Medium,
            "high" => Risk::High,
            _ => Risk::Other(value.0),
        }
    }
}

impl Risk {
    pub fn label(&self) -> &str {
        match self {
            Risk::Low => "low",
            Risk::Medium => "medium",
            Risk::High => "high",
            Risk::Other(label) => label,
        }
    }
}

// ---------- /api/crops ----------

#[derive(Clone, Debug, PartialEq)]
pub struct CropListing {
    pub month: Option<Scalar>,
    pub season: Option<Scalar>,
    pub crops: Vec<Scalar>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "Option<CropsDto>")]
pub enum CropsResponse {
    /// The backend answered with `null`.
    Empty,
    Rejected { error: String },
    Listing(CropListing),
}

#[derive(Debug, Deserialize)]
struct CropsDto {
    #[serde(default)]
    error: ErrorField,
    #[serde(default)]
    month: Option<Scalar>,
    #[serde(default)]
    season: Option<Scalar>,
    #[serde(default, deserialize_with = "null_as_default")]
    crops: Vec<Scalar>,
}

impl From<Option<CropsDto>> for CropsResponse {
    fn from(dto: Option<CropsDto>) -> Self {
        let Some(dto) = dto else {
            return CropsResponse::Empty;
        };
        if let Some(error) = dto.error.into_message() {
            return CropsResponse::Rejected { error };
        }
        CropsResponse::Listing(CropListing {
            month: dto.month,
            season: dto.season,
            crops: dto.crops,
        })
    }
}

// ---------- /api/recommend ----------

/// Parameters as the backend understood them.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct InputEcho {
    #[serde(default)]
    pub month: Option<Scalar>,
    #[serde(default)]
    pub soil: Option<Scalar>,
    #[serde(default)]
    pub water: Option<Scalar>,
    #[serde(default)]
    pub budget: Option<Scalar>,
    #[serde(default)]
    pub area: Option<Scalar>,
    #[serde(default)]
    pub previous_crop: Option<Scalar>,
    #[serde(default)]
    pub district: Option<Scalar>,
}

impl InputEcho {
    /// Previous crop, when a rotation bonus applies.
    pub fn rotation_crop(&self) -> Option<&Scalar> {
        chosen(self.previous_crop.as_ref())
    }

    /// District, when regional pricing applies.
    pub fn pricing_district(&self) -> Option<&Scalar> {
        chosen(self.district.as_ref())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FertilizerCosts {
    pub urea_cost: Option<Scalar>,
    pub tsp_cost: Option<Scalar>,
    pub mop_cost: Option<Scalar>,
    pub total: Option<Scalar>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "FertilizerDto")]
pub enum Fertilizer {
    Breakdown(FertilizerCosts),
    /// The backend could not price fertilizer for this crop.
    Unavailable(String),
}

impl Fertilizer {
    pub fn costs(&self) -> Option<&FertilizerCosts> {
        match self {
            Fertilizer::Breakdown(costs) => Some(costs),
            Fertilizer::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FertilizerDto {
    #[serde(default)]
    error: ErrorField,
    #[serde(default)]
    urea_cost: Option<Scalar>,
    #[serde(default)]
    tsp_cost: Option<Scalar>,
    #[serde(default)]
    mop_cost: Option<Scalar>,
    #[serde(default)]
    total: Option<Scalar>,
}

impl From<FertilizerDto> for Fertilizer {
    fn from(dto: FertilizerDto) -> Self {
        match dto.error.into_message() {
            Some(reason) => Fertilizer::Unavailable(reason),
            None => Fertilizer::Breakdown(FertilizerCosts {
                urea_cost: dto.urea_cost,
                tsp_cost: dto.tsp_cost,
                mop_cost: dto.mop_cost,
                total: dto.total,
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RecommendationItem {
    #[serde(default)]
    pub crop: Option<Scalar>,
    #[serde(default)]
    pub risk: Option<Risk>,
    #[serde(default)]
    pub yield_per_acre_kg: Option<Scalar>,
    #[serde(default)]
    pub revenue_bdt: Option<Scalar>,
    #[serde(default)]
    pub cost_bdt: Option<Scalar>,
    #[serde(default)]
    pub profit_bdt: Option<Scalar>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reasons: Vec<Scalar>,
    #[serde(default)]
    pub fertilizer: Option<Fertilizer>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Recommendation {
    pub input: InputEcho,
    /// Already ranked by the backend; `None` when the field was missing.
    pub top3: Option<Vec<RecommendationItem>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RecommendationDto")]
pub enum RecommendationResponse {
    Rejected { error: String },
    Ranked(Recommendation),
}

#[derive(Debug, Deserialize)]
struct RecommendationDto {
    #[serde(default)]
    error: ErrorField,
    #[serde(default, deserialize_with = "null_as_default")]
    input: InputEcho,
    #[serde(default)]
    top3: Option<Vec<RecommendationItem>>,
}

impl From<RecommendationDto> for RecommendationResponse {
    fn from(dto: RecommendationDto) -> Self {
        if let Some(error) = dto.error.into_message() {
            return RecommendationResponse::Rejected { error };
        }
        RecommendationResponse::Ranked(Recommendation {
            input: dto.input,
            top3: dto.top3,
        })
    }
}

// ---------- /api/diagnose ----------

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "DiagnosisDto")]
pub enum Diagnosis {
    Identified {
        crop: Option<Scalar>,
        symptom: Option<Scalar>,
        disease: Option<Scalar>,
        treatment: Option<Scalar>,
    },
    NotFound {
        crop: Option<Scalar>,
        symptom: Option<Scalar>,
    },
    /// Any status other than `success` / `not_found`, or none at all.
    Partial { disease: Option<Scalar> },
    Rejected {
        error: String,
    },
}

#[derive(Debug, Deserialize)]
struct DiagnosisDto {
    #[serde(default)]
    status: Option<Scalar>,
    #[serde(default)]
    error: ErrorField,
    #[serde(default)]
    crop: Option<Scalar>,
    #[serde(default)]
    symptom: Option<Scalar>,
    #[serde(default)]
    disease: Option<Scalar>,
    #[serde(default)]
    treatment: Option<Scalar>,
}

impl From<DiagnosisDto> for Diagnosis {
    fn from(dto: DiagnosisDto) -> Self {
        match dto.status.map(|status| status.0) {
            Some(status) if status == "success" => Diagnosis::Identified {
                crop: dto.crop,
                symptom: dto.symptom,
                disease: dto.disease,
                treatment: dto.treatment,
            },
            Some(status) if status == "not_found" => Diagnosis::NotFound {
                crop: dto.crop,
                symptom: dto.symptom,
            },
            None => match dto.error.into_message() {
                Some(error) => Diagnosis::Rejected { error },
                None => Diagnosis::Partial {
                    disease: dto.disease,
                },
            },
            Some(_) => Diagnosis::Partial {
                disease: dto.disease,
            },
        }
    }
}
