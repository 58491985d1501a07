use dioxus::prelude::*;

use crate::{
    ui::{page::AdvisorPage, shell::Shell},
    util::{assets, settings::load_settings},
};

#[component]
pub fn App() -> Element {
    let settings = use_signal(|| load_settings().unwrap_or_default());
    use_context_provider(|| settings);

    rsx! {
        document::Style { "{assets::main_css()}" }
        Shell { AdvisorPage {} }
    }
}
