use dioxus::prelude::*;

use crate::util::settings::AdvisorSettings;
use crate::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    let settings = use_context::<Signal<AdvisorSettings>>();
    let api_base = settings.with(|s| s.api_base.clone());
    let version = version_label();

    rsx! {
        div { class: "app",
            header { class: "app-header",
                div {
                    h1 { class: "app-title", "🌾 {APP_NAME}" }
                    p { class: "tagline", "Seasonal crops, ranked recommendations and disease diagnosis" }
                }
                div { class: "app-meta",
                    span { class: "version", "{version}" }
                    span { class: "api-base", "API: {api_base}" }
                }
            }
            main { class: "app-main",
                {children}
            }
        }
    }
}
