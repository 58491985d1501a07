use std::collections::HashMap;

use dioxus::prelude::*;
use tracing::{error, warn};

use super::controller::{wire_triggers, ViewController};
use super::html;
use super::port::{Field, Region, Trigger, UiPort};
use crate::infra::advisor_api::{AdvisorClient, ApiError, DEFAULT_API_BASE};
use crate::infra::transport::ReqwestTransport;
use crate::util::settings::{save_settings, AdvisorSettings};

type Choices = &'static [(&'static str, &'static str)];

const SOILS: Choices = &[
    ("loamy", "Loamy"),
    ("clay", "Clay"),
    ("sandy", "Sandy"),
    ("silty", "Silty"),
];

const LEVELS: Choices = &[("low", "Low"), ("medium", "Medium"), ("high", "High")];

const PREVIOUS_CROPS: Choices = &[
    ("none", "None"),
    ("rice", "Rice"),
    ("wheat", "Wheat"),
    ("jute", "Jute"),
    ("potato", "Potato"),
    ("maize", "Maize"),
    ("lentil", "Lentil"),
    ("mustard", "Mustard"),
];

const DISTRICTS: Choices = &[
    ("none", "None"),
    ("dhaka", "Dhaka"),
    ("chattogram", "Chattogram"),
    ("rajshahi", "Rajshahi"),
    ("khulna", "Khulna"),
    ("sylhet", "Sylhet"),
    ("barishal", "Barishal"),
    ("rangpur", "Rangpur"),
    ("mymensingh", "Mymensingh"),
];

const DIAGNOSE_CROPS: Choices = &[
    ("rice", "Rice"),
    ("wheat", "Wheat"),
    ("potato", "Potato"),
    ("tomato", "Tomato"),
    ("jute", "Jute"),
    ("maize", "Maize"),
];

const SYMPTOMS: Choices = &[
    ("yellow leaves", "Yellow leaves"),
    ("brown spots", "Brown spots"),
    ("leaf curl", "Leaf curl"),
    ("wilting", "Wilting"),
    ("white powder", "White powder"),
    ("stem rot", "Stem rot"),
];

fn default_fields() -> HashMap<Field, String> {
    [
        (Field::CropsMonth, ""),
        (Field::RecommendMonth, ""),
        (Field::Soil, "loamy"),
        (Field::Water, "medium"),
        (Field::Budget, "medium"),
        (Field::Area, "1"),
        (Field::PreviousCrop, "none"),
        (Field::District, "none"),
        (Field::DiagnoseCrop, "rice"),
        (Field::Symptom, "yellow leaves"),
    ]
    .into_iter()
    .map(|(field, value)| (field, value.to_string()))
    .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub enum RegionContent {
    Html(String),
    Text(String),
}

/// [`UiPort`] backed by the page's signals. Every field, region and trigger
/// is rendered by [`AdvisorPage`], so all of them are always present.
#[derive(Clone, Copy, PartialEq)]
pub struct SignalPort {
    fields: Signal<HashMap<Field, String>>,
    regions: Signal<HashMap<Region, RegionContent>>,
}

impl SignalPort {
    fn paint(&self, region: Region, content: RegionContent) {
        let mut regions = self.regions;
        regions.with_mut(|all| {
            all.insert(region, content);
        });
    }
}

impl UiPort for SignalPort {
    fn field_value(&self, field: Field) -> Option<String> {
        self.fields.peek().get(&field).cloned()
    }

    fn has_region(&self, _region: Region) -> bool {
        true
    }

    fn set_html(&self, region: Region, html: String) {
        self.paint(region, RegionContent::Html(html));
    }

    fn set_text(&self, region: Region, text: String) {
        self.paint(region, RegionContent::Text(text));
    }

    fn has_trigger(&self, _trigger: Trigger) -> bool {
        true
    }
}

fn build_controller(
    port: SignalPort,
    api_base: &str,
) -> Result<ViewController<ReqwestTransport, SignalPort>, ApiError> {
    let transport = ReqwestTransport::new()?;
    let client = AdvisorClient::new(transport, api_base)?;
    Ok(ViewController::new(client, port))
}

#[component]
pub fn AdvisorPage() -> Element {
    let settings = use_context::<Signal<AdvisorSettings>>();
    let fields = use_signal(default_fields);
    let regions = use_signal(HashMap::<Region, RegionContent>::new);
    let port = SignalPort { fields, regions };
    let bindings = use_hook(move || wire_triggers(&port));

    // Each click is its own task; a slower earlier response may still land last.
    let run = move |trigger: Trigger| {
        let api_base = settings.peek().api_base.clone();
        spawn(async move {
            match build_controller(port, &api_base) {
                Ok(view) => view.dispatch(bindings, trigger).await,
                Err(err) => {
                    error!(error = %err, %api_base, "could not set up the advisory client");
                    port.set_html(trigger.result_region(), html::error_panel(&err.to_string()));
                }
            }
        });
    };

    rsx! {
        div { class: "panels",
            section { class: "card",
                h2 { "🗓️ Crops by Month" }
                div { class: "form-grid",
                    TextField { label: "Month", field: Field::CropsMonth, placeholder: "e.g. january", fields }
                }
                button {
                    id: Trigger::Crops.element_id(),
                    class: "btn",
                    onclick: move |_| run(Trigger::Crops),
                    "Show Crops"
                }
                RegionView { region: Region::CropsView, regions }
                RegionView { region: Region::CropsRaw, regions }
            }

            section { class: "card",
                h2 { "🌱 Smart Recommendation" }
                div { class: "form-grid",
                    TextField { label: "Month", field: Field::RecommendMonth, placeholder: "e.g. july", fields }
                    SelectField { label: "Soil", field: Field::Soil, options: SOILS, fields }
                    SelectField { label: "Water", field: Field::Water, options: LEVELS, fields }
                    SelectField { label: "Budget", field: Field::Budget, options: LEVELS, fields }
                    TextField { label: "Area (acre)", field: Field::Area, placeholder: "1", fields }
                    SelectField { label: "Previous crop", field: Field::PreviousCrop, options: PREVIOUS_CROPS, fields }
                    SelectField { label: "District", field: Field::District, options: DISTRICTS, fields }
                }
                button {
                    id: Trigger::Recommend.element_id(),
                    class: "btn",
                    onclick: move |_| run(Trigger::Recommend),
                    "Recommend"
                }
                RegionView { region: Region::RecommendTable, regions }
                RegionView { region: Region::RecommendRaw, regions }
            }

            section { class: "card",
                h2 { "🩺 Pest & Disease Diagnosis" }
                div { class: "form-grid",
                    SelectField { label: "Crop", field: Field::DiagnoseCrop, options: DIAGNOSE_CROPS, fields }
                    SelectField { label: "Symptom", field: Field::Symptom, options: SYMPTOMS, fields }
                }
                button {
                    id: Trigger::Diagnose.element_id(),
                    class: "btn",
                    onclick: move |_| run(Trigger::Diagnose),
                    "Diagnose"
                }
                RegionView { region: Region::Diagnosis, regions }
            }

            SettingsPanel {}
        }
    }
}

#[component]
fn TextField(
    label: &'static str,
    field: Field,
    placeholder: &'static str,
    fields: Signal<HashMap<Field, String>>,
) -> Element {
    let current = fields.with(|all| all.get(&field).cloned().unwrap_or_default());
    let mut fields = fields;
    rsx! {
        div { class: "field",
            label { class: "field-label", "{label}" }
            input {
                id: field.element_id(),
                class: "field-input",
                value: current,
                placeholder: placeholder,
                oninput: move |evt| {
                    fields.with_mut(|all| {
                        all.insert(field, evt.value());
                    });
                },
            }
        }
    }
}

#[component]
fn SelectField(
    label: &'static str,
    field: Field,
    options: Choices,
    fields: Signal<HashMap<Field, String>>,
) -> Element {
    let current = fields.with(|all| all.get(&field).cloned().unwrap_or_default());
    let mut fields = fields;
    rsx! {
        div { class: "field",
            label { class: "field-label", "{label}" }
            select {
                id: field.element_id(),
                class: "field-input",
                onchange: move |evt| {
                    fields.with_mut(|all| {
                        all.insert(field, evt.value());
                    });
                },
                for (value, text) in options.iter().copied() {
                    option { value: value, selected: value == current, "{text}" }
                }
            }
        }
    }
}

#[component]
fn RegionView(region: Region, regions: Signal<HashMap<Region, RegionContent>>) -> Element {
    let content = regions.with(|all| all.get(&region).cloned());
    match content {
        Some(RegionContent::Html(markup)) => rsx! {
            div { id: region.element_id(), class: "region", dangerous_inner_html: markup }
        },
        Some(RegionContent::Text(text)) => rsx! {
            pre { id: region.element_id(), class: "raw", "{text}" }
        },
        None => rsx! {
            div { id: region.element_id(), class: "region" }
        },
    }
}

#[component]
fn SettingsPanel() -> Element {
    let mut settings = use_context::<Signal<AdvisorSettings>>();
    let mut api_base_input = use_signal(|| settings.peek().api_base.clone());
    let mut status = use_signal(|| None::<String>);

    let mut apply = move |next: AdvisorSettings| {
        match save_settings(&next) {
            Ok(()) => status.set(Some(format!("Using {}", next.api_base))),
            Err(err) => {
                warn!(error = %err, "failed to save settings");
                status.set(Some(format!(
                    "Using {} for this session (not saved: {err})",
                    next.api_base
                )));
            }
        }
        settings.set(next);
    };

    let on_save = move |_| {
        apply(AdvisorSettings {
            api_base: api_base_input().trim().to_string(),
        })
    };

    let on_reset = move |_| {
        api_base_input.set(DEFAULT_API_BASE.to_string());
        apply(AdvisorSettings::default());
    };

    rsx! {
        section { class: "card settings",
            h2 { "⚙️ API" }
            div { class: "form-grid",
                div { class: "field",
                    label { class: "field-label", "Base URL" }
                    input {
                        class: "field-input",
                        value: api_base_input(),
                        oninput: move |evt| api_base_input.set(evt.value()),
                    }
                }
            }
            div { class: "actions",
                button { class: "btn", onclick: on_save, "Save" }
                button { class: "btn btn-secondary", onclick: on_reset, "Reset" }
            }
            if let Some(message) = status() {
                p { class: "muted", "{message}" }
            }
        }
    }
}
