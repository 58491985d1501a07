//! HTML fragments for the advisor page.
//!
//! Every value that came from the backend or the user passes through
//! [`escape`] before it is placed in markup.

use crate::domain::{
    CropsResponse, Diagnosis, Fertilizer, FertilizerCosts, InputEcho, RecommendationItem,
    RecommendationResponse, Risk, Scalar,
};

const MISSING: &str = "n/a";

/// Replaces the five HTML-significant characters with named entities.
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn show(value: Option<&Scalar>) -> String {
    escape(value.map(Scalar::as_str).unwrap_or(MISSING))
}

pub fn loading(message: &str) -> String {
    format!("<div class=\"muted\">⏳ {}</div>", escape(message))
}

pub fn error_panel(message: &str) -> String {
    format!("<div class=\"err\">❌ {}</div>", escape(message))
}

// ---------- crops ----------

pub fn crops(response: &CropsResponse) -> String {
    let listing = match response {
        CropsResponse::Empty => return "<div class=\"muted\">No response</div>".to_string(),
        CropsResponse::Rejected { error } => return error_panel(error),
        CropsResponse::Listing(listing) => listing,
    };

    let chips = if listing.crops.is_empty() {
        "<span class=\"muted\">No crops found for this month.</span>".to_string()
    } else {
        listing
            .crops
            .iter()
            .map(|crop| format!("<span class=\"chip\">{}</span>", escape(crop.as_str())))
            .collect::<String>()
    };

    let mut html = String::with_capacity(256);
    html.push_str("<div class=\"meta\">");
    html.push_str(&format!(
        "<div><b>Month:</b> {}</div>",
        show(listing.month.as_ref())
    ));
    html.push_str(&format!(
        "<div><b>Season:</b> {}</div>",
        show(listing.season.as_ref())
    ));
    html.push_str("</div>");
    html.push_str(&format!("<div class=\"chips\">{chips}</div>"));
    html
}

// ---------- recommendations ----------

pub fn recommendation(response: &RecommendationResponse) -> String {
    match response {
        RecommendationResponse::Rejected { error } => error_panel(error),
        RecommendationResponse::Ranked(ranked) => match &ranked.top3 {
            Some(items) => format!("{}{}", input_summary(&ranked.input), ranking_table(items)),
            None => ranking_table(&[]),
        },
    }
}

pub fn input_summary(input: &InputEcho) -> String {
    let mut html = String::from("<div class=\"input-summary\">");
    html.push_str(&format!(
        "<div><b>📍 Input:</b> {} | {} soil | {} water | {} budget | {} acre</div>",
        show(input.month.as_ref()),
        show(input.soil.as_ref()),
        show(input.water.as_ref()),
        show(input.budget.as_ref()),
        show(input.area.as_ref()),
    ));
    if let Some(crop) = input.rotation_crop() {
        html.push_str(&format!(
            "<div><b>🔄 Rotation Bonus:</b> Previous crop was {}</div>",
            escape(crop.as_str())
        ));
    }
    if let Some(district) = input.pricing_district() {
        html.push_str(&format!(
            "<div><b>💰 Regional Pricing:</b> {} district</div>",
            escape(district.as_str())
        ));
    }
    html.push_str("</div>");
    html
}

/// Rows follow the backend's order; the rank column is positional.
pub fn ranking_table(items: &[RecommendationItem]) -> String {
    if items.is_empty() {
        return "<p class=\"muted\">No items</p>".to_string();
    }

    let mut html = String::with_capacity(1024 * items.len());
    html.push_str("<table><thead><tr>");
    for heading in [
        "#",
        "Crop",
        "Risk",
        "Yield/acre (kg)",
        "Revenue (BDT)",
        "Cost (BDT)",
        "Profit (BDT)",
        "Reasons",
    ] {
        html.push_str(&format!("<th>{heading}</th>"));
    }
    html.push_str("</tr></thead><tbody>");
    for (idx, item) in items.iter().enumerate() {
        html.push_str(&item_rows(idx + 1, item));
    }
    html.push_str("</tbody></table>");
    html
}

fn item_rows(rank: usize, item: &RecommendationItem) -> String {
    let reasons = item
        .reasons
        .iter()
        .map(Scalar::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let fertilizer = item
        .fertilizer
        .as_ref()
        .and_then(Fertilizer::costs)
        .map(fertilizer_breakdown)
        .unwrap_or_default();

    format!(
        "<tr><td>{rank}</td><td><b>{crop}</b></td><td>{badge}</td><td>{yield_kg}</td>\
         <td>{revenue}</td><td>{cost}</td><td><b class=\"profit\">{profit}</b></td>\
         <td>{reasons}</td></tr>\
         <tr class=\"fert-row\"><td colspan=\"8\">{fertilizer}</td></tr>",
        crop = show(item.crop.as_ref()),
        badge = risk_badge(item.risk.as_ref()),
        yield_kg = show(item.yield_per_acre_kg.as_ref()),
        revenue = show(item.revenue_bdt.as_ref()),
        cost = show(item.cost_bdt.as_ref()),
        profit = show(item.profit_bdt.as_ref()),
        reasons = escape(&reasons),
    )
}

pub fn risk_badge(risk: Option<&Risk>) -> String {
    let (class, label) = match risk {
        Some(risk) => (risk.label(), risk.label()),
        None => ("unknown", "N/A"),
    };
    format!(
        "<span class=\"risk-badge risk-{}\">{}</span>",
        escape(class),
        escape(label)
    )
}

pub fn fertilizer_breakdown(costs: &FertilizerCosts) -> String {
    format!(
        "<div class=\"fert-breakdown\">\
         <div class=\"fert-title\">💊 Fertilizer Costs:</div>\
         <div class=\"fert-item\">Urea: {} BDT</div>\
         <div class=\"fert-item\">TSP: {} BDT</div>\
         <div class=\"fert-item\">MoP: {} BDT</div>\
         <div class=\"fert-total\">Total: {} BDT</div>\
         </div>",
        show(costs.urea_cost.as_ref()),
        show(costs.tsp_cost.as_ref()),
        show(costs.mop_cost.as_ref()),
        show(costs.total.as_ref()),
    )
}

// ---------- diagnosis ----------

pub fn diagnosis(result: &Diagnosis) -> String {
    match result {
        Diagnosis::Identified {
            crop,
            symptom,
            disease,
            treatment,
        } => format!(
            "<div class=\"diagnosis-success\">\
             <div class=\"diag-header\"><span class=\"diag-icon\">✅</span><h3>Disease Identified</h3></div>\
             <div class=\"diag-info\">\
             <div><b>Crop:</b> {}</div>\
             <div><b>Symptom:</b> {}</div>\
             <div><b>Disease:</b> <span class=\"disease-name\">{}</span></div>\
             </div>\
             <div class=\"treatment-box\">\
             <div class=\"treatment-title\">💊 Treatment Recommendation:</div>\
             <div class=\"treatment-text\">{}</div>\
             </div>\
             </div>",
            show(crop.as_ref()),
            show(symptom.as_ref()),
            show(disease.as_ref()),
            show(treatment.as_ref()),
        ),
        Diagnosis::NotFound { crop, symptom } => format!(
            "<div class=\"err\">\
             <div><b>❌ No Match Found</b></div>\
             <div>No disease found for crop \"{}\" with symptom \"{}\".</div>\
             <div class=\"muted hint\">Please try a different combination.</div>\
             </div>",
            show(crop.as_ref()),
            show(symptom.as_ref()),
        ),
        Diagnosis::Partial { disease } => format!(
            "<div class=\"muted\">\
             <div><b>⚠️ Partial Result</b></div>\
             <div>Disease: {}</div>\
             <div>Treatment information not available.</div>\
             </div>",
            show(disease.as_ref()),
        ),
        Diagnosis::Rejected { error } => error_panel(error),
    }
}
