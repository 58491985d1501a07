use std::sync::OnceLock;

use rust_embed::RustEmbed;
use tracing::warn;

/// Embed the `assets/` directory into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static MAIN_CSS: OnceLock<String> = OnceLock::new();

/// Returns the contents of `assets/main.css`.
pub fn main_css() -> &'static str {
    MAIN_CSS.get_or_init(|| load_text("main.css")).as_str()
}

fn load_text(path: &str) -> String {
    match EmbeddedAssets::get(canonical_asset_path(path)) {
        Some(file) => String::from_utf8_lossy(&file.data).into_owned(),
        None => {
            warn!(path, "embedded asset missing; continuing without it");
            String::new()
        }
    }
}

fn canonical_asset_path(path: &str) -> &str {
    let trimmed = path.trim_start_matches('/');
    trimmed.strip_prefix("assets/").unwrap_or(trimmed)
}
