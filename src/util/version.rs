pub const APP_NAME: &str = "Crop Advisor";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("ADVISOR_GIT_TAG");

pub fn version_label() -> String {
    match GIT_TAG {
        Some(tag) => tag.to_string(),
        None => format!("v{APP_VERSION}"),
    }
}

pub fn user_agent() -> String {
    format!("crop-advisor/{APP_VERSION}")
}
