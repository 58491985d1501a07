//! Typed requests built from raw form values.

use super::query::QueryParams;

/// Select value meaning "no choice made" for the optional enhancers.
pub const NO_SELECTION: &str = "none";

pub fn normalize_month(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn enhancer(raw: &str) -> Option<String> {
    if raw.is_empty() || raw == NO_SELECTION {
        None
    } else {
        Some(raw.to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CropsRequest {
    pub month: String,
}

impl CropsRequest {
    pub fn from_form(month: &str) -> Self {
        Self {
            month: normalize_month(month),
        }
    }

    pub fn params(&self) -> QueryParams {
        QueryParams::new().with("month", self.month.clone())
    }
}

/// Raw field values of the recommendation form, as read from the page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecommendForm {
    pub month: String,
    pub soil: String,
    pub water: String,
    pub budget: String,
    pub area: String,
    pub previous_crop: String,
    pub district: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecommendRequest {
    pub month: String,
    pub soil: String,
    pub water: String,
    pub budget: String,
    pub area: String,
    /// Enables the backend's crop-rotation bonus.
    pub previous_crop: Option<String>,
    /// Enables district-specific market pricing.
    pub district: Option<String>,
}

impl RecommendRequest {
    pub fn from_form(form: &RecommendForm) -> Self {
        Self {
            month: normalize_month(&form.month),
            soil: form.soil.clone(),
            water: form.water.clone(),
            budget: form.budget.clone(),
            area: form.area.trim().to_string(),
            previous_crop: enhancer(&form.previous_crop),
            district: enhancer(&form.district),
        }
    }

    pub fn params(&self) -> QueryParams {
        QueryParams::new()
            .with("month", self.month.clone())
            .with("soil", self.soil.clone())
            .with("water", self.water.clone())
            .with("budget", self.budget.clone())
            .with("area", self.area.clone())
            .with_optional("previous_crop", self.previous_crop.clone())
            .with_optional("district", self.district.clone())
    }
}

/// Crop and symptom go out exactly as selected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnoseRequest {
    pub crop: String,
    pub symptom: String,
}

impl DiagnoseRequest {
    pub fn from_form(crop: &str, symptom: &str) -> Self {
        Self {
            crop: crop.to_string(),
            symptom: symptom.to_string(),
        }
    }

    pub fn params(&self) -> QueryParams {
        QueryParams::new()
            .with("crop", self.crop.clone())
            .with("symptom", self.symptom.clone())
    }
}
