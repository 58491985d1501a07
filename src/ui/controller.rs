//! The three advisor flows: crops lookup, recommendation and diagnosis.
//!
//! Each flow reads its fields from the [`UiPort`], paints a loading state,
//! awaits the backend and paints exactly one terminal state. Failures are
//! logged and rendered, never returned.

use tracing::{debug, error, info};

use super::html;
use super::port::{Field, Region, Trigger, UiPort};
use crate::domain::{CropsRequest, DiagnoseRequest, RecommendForm, RecommendRequest};
use crate::infra::advisor_api::AdvisorClient;
use crate::infra::transport::Transport;

/// Which triggers were found on the page at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bindings {
    crops: bool,
    recommend: bool,
    diagnose: bool,
}

impl Bindings {
    pub fn is_bound(&self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::Crops => self.crops,
            Trigger::Recommend => self.recommend,
            Trigger::Diagnose => self.diagnose,
        }
    }

    fn bind(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Crops => self.crops = true,
            Trigger::Recommend => self.recommend = true,
            Trigger::Diagnose => self.diagnose = true,
        }
    }
}

/// Binds every trigger the page has. A missing trigger is logged and skipped.
pub fn wire_triggers(port: &impl UiPort) -> Bindings {
    let mut bindings = Bindings::default();
    for trigger in Trigger::ALL {
        if port.has_trigger(trigger) {
            bindings.bind(trigger);
            info!(trigger = trigger.element_id(), "listener attached");
        } else {
            error!(trigger = trigger.element_id(), "trigger not found; flow left unbound");
        }
    }
    bindings
}

#[derive(Clone)]
pub struct ViewController<T, P> {
    client: AdvisorClient<T>,
    port: P,
}

impl<T, P> ViewController<T, P>
where
    T: Transport,
    P: UiPort,
{
    pub fn new(client: AdvisorClient<T>, port: P) -> Self {
        Self { client, port }
    }

    #[cfg(test)]
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Runs the flow behind `trigger` if it was bound at startup.
    pub async fn dispatch(&self, bindings: Bindings, trigger: Trigger) {
        if !bindings.is_bound(trigger) {
            debug!(trigger = trigger.element_id(), "ignoring unbound trigger");
            return;
        }
        match trigger {
            Trigger::Crops => self.show_crops().await,
            Trigger::Recommend => self.recommend().await,
            Trigger::Diagnose => self.diagnose().await,
        }
    }

    pub async fn show_crops(&self) {
        let request = CropsRequest::from_form(&self.read(Field::CropsMonth));

        self.paint_html(Region::CropsView, html::loading("Loading..."));
        self.paint_text(Region::CropsRaw, String::new());

        match self.client.crops(&request).await {
            Ok(fetched) => {
                self.paint_html(Region::CropsView, html::crops(&fetched.body));
                self.paint_text(Region::CropsRaw, fetched.pretty());
            }
            Err(err) => {
                error!(error = %err, month = %request.month, "crops lookup failed");
                self.paint_html(Region::CropsView, html::error_panel(&err.to_string()));
                self.paint_text(Region::CropsRaw, err.to_string());
            }
        }
    }

    pub async fn recommend(&self) {
        let form = RecommendForm {
            month: self.read(Field::RecommendMonth),
            soil: self.read(Field::Soil),
            water: self.read(Field::Water),
            budget: self.read(Field::Budget),
            area: self.read(Field::Area),
            previous_crop: self.read(Field::PreviousCrop),
            district: self.read(Field::District),
        };
        let request = RecommendRequest::from_form(&form);

        self.paint_text(Region::RecommendRaw, "Loading...".to_string());
        self.paint_html(
            Region::RecommendTable,
            html::loading("Loading recommendations..."),
        );

        match self.client.recommend(&request).await {
            Ok(fetched) => {
                self.paint_text(Region::RecommendRaw, fetched.pretty());
                self.paint_html(Region::RecommendTable, html::recommendation(&fetched.body));
            }
            Err(err) => {
                error!(error = %err, month = %request.month, "recommendation request failed");
                self.paint_text(Region::RecommendRaw, err.to_string());
                self.paint_html(Region::RecommendTable, html::error_panel(&err.to_string()));
            }
        }
    }

    pub async fn diagnose(&self) {
        let request =
            DiagnoseRequest::from_form(&self.read(Field::DiagnoseCrop), &self.read(Field::Symptom));

        self.paint_html(Region::Diagnosis, html::loading("Diagnosing..."));

        match self.client.diagnose(&request).await {
            Ok(fetched) => self.paint_html(Region::Diagnosis, html::diagnosis(&fetched.body)),
            Err(err) => {
                error!(
                    error = %err,
                    crop = %request.crop,
                    symptom = %request.symptom,
                    "diagnosis request failed"
                );
                self.paint_html(Region::Diagnosis, html::error_panel(&err.to_string()));
            }
        }
    }

    /// Missing fields read as empty and are dropped from the query.
    fn read(&self, field: Field) -> String {
        self.port.field_value(field).unwrap_or_default()
    }

    fn paint_html(&self, region: Region, markup: String) {
        if self.port.has_region(region) {
            self.port.set_html(region, markup);
        } else {
            debug!(region = region.element_id(), "render target missing; skipped");
        }
    }

    fn paint_text(&self, region: Region, text: String) {
        if self.port.has_region(region) {
            self.port.set_text(region, text);
        } else {
            debug!(region = region.element_id(), "render target missing; skipped");
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
