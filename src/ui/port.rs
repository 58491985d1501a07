//! The surface the flows talk to: form fields, render regions and triggers.
//!
//! Identifiers keep the element ids of the advisor page so a port backed by a
//! real document and one backed by a map resolve the same names.

/// Form inputs read by the flows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    CropsMonth,
    RecommendMonth,
    Soil,
    Water,
    Budget,
    Area,
    PreviousCrop,
    District,
    DiagnoseCrop,
    Symptom,
}

impl Field {
    pub fn element_id(self) -> &'static str {
        match self {
            Field::CropsMonth => "month1",
            Field::RecommendMonth => "month2",
            Field::Soil => "soil",
            Field::Water => "water",
            Field::Budget => "budget",
            Field::Area => "area",
            Field::PreviousCrop => "previousCrop",
            Field::District => "district",
            Field::DiagnoseCrop => "diagnoseCrop",
            Field::Symptom => "symptom",
        }
    }
}

/// Output regions. `CropsRaw` and `RecommendRaw` hold plain text, the rest HTML.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    CropsView,
    CropsRaw,
    RecommendRaw,
    RecommendTable,
    Diagnosis,
}

impl Region {
    pub fn element_id(self) -> &'static str {
        match self {
            Region::CropsView => "cropsUI",
            Region::CropsRaw => "outCrops",
            Region::RecommendRaw => "outRec",
            Region::RecommendTable => "tableWrap",
            Region::Diagnosis => "diagnoseResult",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    Crops,
    Recommend,
    Diagnose,
}

impl Trigger {
    pub const ALL: [Trigger; 3] = [Trigger::Crops, Trigger::Recommend, Trigger::Diagnose];

    pub fn element_id(self) -> &'static str {
        match self {
            Trigger::Crops => "btnCrops",
            Trigger::Recommend => "btnRec",
            Trigger::Diagnose => "btnDiagnose",
        }
    }

    /// Region that shows this flow's outcome.
    pub fn result_region(self) -> Region {
        match self {
            Trigger::Crops => Region::CropsView,
            Trigger::Recommend => Region::RecommendTable,
            Trigger::Diagnose => Region::Diagnosis,
        }
    }
}

/// Everything the flows need from the page.
///
/// Writes to a region the page does not have are dropped by the caller, so
/// implementations only need to store content for regions they report.
pub trait UiPort {
    /// Current value of a form field, `None` when the page has no such field.
    fn field_value(&self, field: Field) -> Option<String>;

    fn has_region(&self, region: Region) -> bool;

    fn set_html(&self, region: Region, html: String);

    fn set_text(&self, region: Region, text: String);

    fn has_trigger(&self, trigger: Trigger) -> bool;
}
