use serde_json::json;

use super::*;
use crate::infra::advisor_api::DEFAULT_API_BASE;
use crate::infra::testing::StubTransport;
use crate::ui::testing::{MemoryPort, Painted};

fn controller(
    transport: StubTransport,
    port: MemoryPort,
) -> ViewController<StubTransport, MemoryPort> {
    let client = AdvisorClient::new(transport, DEFAULT_API_BASE).unwrap();
    ViewController::new(client, port)
}

fn no_loading_left(port: &MemoryPort, regions: &[Region]) {
    for region in regions {
        let content = match port.painted(*region) {
            Some(Painted::Html(content)) | Some(Painted::Text(content)) => content,
            None => continue,
        };
        assert!(
            !content.contains("Loading...") && !content.contains("Diagnosing..."),
            "{region:?} still shows a loading state: {content}"
        );
    }
}

#[tokio::test]
async fn crops_flow_renders_chips_and_raw_echo() {
    let transport = StubTransport::json(json!({
        "month": "june", "season": "kharif", "crops": ["rice", "jute"]
    }));
    let port = MemoryPort::full().with_field(Field::CropsMonth, "  June ");
    let view = controller(transport.clone(), port);

    view.show_crops().await;

    assert_eq!(
        transport.requested(),
        vec!["http://localhost:8080/api/crops?month=june".to_string()]
    );
    let port = view.port();
    let html = port.html(Region::CropsView);
    assert_eq!(html.matches("class=\"chip\"").count(), 2);
    assert!(html.contains("<span class=\"chip\">rice</span><span class=\"chip\">jute</span>"));
    assert!(port.text(Region::CropsRaw).starts_with("{\n  \"month\": \"june\""));

    let history = port.history();
    assert_eq!(
        history[0],
        (Region::CropsView, Painted::Html(html::loading("Loading...")))
    );
    assert_eq!(history[1], (Region::CropsRaw, Painted::Text(String::new())));
    assert_eq!(history.len(), 4);
}

#[tokio::test]
async fn crops_network_failure_ends_in_error_panel() {
    let port = MemoryPort::full().with_field(Field::CropsMonth, "may");
    let view = controller(StubTransport::failing("connection refused"), port);

    view.show_crops().await;

    let port = view.port();
    assert_eq!(
        port.html(Region::CropsView),
        "<div class=\"err\">❌ network error: connection refused</div>"
    );
    assert_eq!(port.text(Region::CropsRaw), "network error: connection refused");
    no_loading_left(port, &[Region::CropsView, Region::CropsRaw]);
}

#[tokio::test]
async fn rerun_replaces_earlier_failure() {
    let transport = StubTransport::failing("connection refused").then(StubTransport::json(
        json!({ "month": "may", "season": "kharif", "crops": ["jute"] }),
    ));
    let port = MemoryPort::full().with_field(Field::CropsMonth, "may");
    let view = controller(transport.clone(), port);

    view.show_crops().await;
    assert!(view.port().html(Region::CropsView).contains("class=\"err\""));

    view.show_crops().await;

    let port = view.port();
    assert_eq!(transport.requested().len(), 2);
    let html = port.html(Region::CropsView);
    assert!(!html.contains("class=\"err\""));
    assert!(!html.contains("connection refused"));
    assert_eq!(html.matches("class=\"chip\"").count(), 1);
    let raw = port.text(Region::CropsRaw);
    assert_eq!(
        raw,
        "{\n  \"month\": \"may\",\n  \"season\": \"kharif\",\n  \"crops\": [\n    \"jute\"\n  ]\n}"
    );
    assert!(!raw.contains("network error"));
}

#[tokio::test]
async fn recommendation_flow_renders_summary_table_and_fertilizer() {
    let transport = StubTransport::json(json!({
        "input": { "month": "july", "soil": "loamy", "water": "high",
                   "budget": "medium", "area": "2", "district": "rajshahi" },
        "top3": [{
            "crop": "rice", "risk": "low", "yield_per_acre_kg": 2100,
            "revenue_bdt": 63000, "cost_bdt": 25000, "profit_bdt": 38000,
            "reasons": ["season match"],
            "fertilizer": { "urea_cost": 10, "tsp_cost": 5, "mop_cost": 3, "total": 18 }
        }]
    }));
    let port = MemoryPort::full()
        .with_field(Field::RecommendMonth, " JULY")
        .with_field(Field::Soil, "loamy")
        .with_field(Field::Water, "high")
        .with_field(Field::Budget, "medium")
        .with_field(Field::Area, " 2 ")
        .with_field(Field::PreviousCrop, "none")
        .with_field(Field::District, "rajshahi");
    let view = controller(transport.clone(), port);

    view.recommend().await;

    assert_eq!(
        transport.requested(),
        vec![
            "http://localhost:8080/api/recommend?month=july&soil=loamy&water=high&budget=medium&area=2&district=rajshahi"
                .to_string()
        ]
    );
    let port = view.port();
    let table = port.html(Region::RecommendTable);
    assert!(table.contains("Regional Pricing"));
    assert!(!table.contains("Rotation Bonus"));
    assert!(table.contains("<td>1</td><td><b>rice</b></td>"));
    assert!(table.contains("Total: 18 BDT"));
    assert!(port.text(Region::RecommendRaw).contains("\"top3\": ["));
    no_loading_left(port, &[Region::RecommendRaw, Region::RecommendTable]);
}

#[tokio::test]
async fn recommendation_failure_replaces_both_loading_states() {
    let view = controller(StubTransport::failing("timed out"), MemoryPort::full());

    view.recommend().await;

    let port = view.port();
    assert_eq!(port.text(Region::RecommendRaw), "network error: timed out");
    assert!(port
        .html(Region::RecommendTable)
        .starts_with("<div class=\"err\">❌ "));
    no_loading_left(port, &[Region::RecommendRaw, Region::RecommendTable]);
}

#[tokio::test]
async fn missing_fields_are_left_out_of_the_query() {
    let transport = StubTransport::json(json!({ "top3": [] }));
    let port = MemoryPort::full().with_field(Field::Soil, "clay");
    let view = controller(transport.clone(), port);

    view.recommend().await;

    assert_eq!(
        transport.requested(),
        vec!["http://localhost:8080/api/recommend?soil=clay".to_string()]
    );
    assert!(view
        .port()
        .html(Region::RecommendTable)
        .ends_with("<p class=\"muted\">No items</p>"));
}

#[tokio::test]
async fn diagnosis_not_found_names_the_pair() {
    let transport = StubTransport::json(json!({
        "status": "not_found", "crop": "rice", "symptom": "yellow leaves"
    }));
    let port = MemoryPort::full()
        .with_field(Field::DiagnoseCrop, "rice")
        .with_field(Field::Symptom, "yellow leaves");
    let view = controller(transport.clone(), port);

    view.diagnose().await;

    assert_eq!(
        transport.requested(),
        vec!["http://localhost:8080/api/diagnose?crop=rice&symptom=yellow%20leaves".to_string()]
    );
    let html = view.port().html(Region::Diagnosis);
    assert!(html.contains("No disease found for crop \"rice\" with symptom \"yellow leaves\"."));
    assert!(!html.contains("Treatment"));
}

#[tokio::test]
async fn diagnosis_server_error_without_json() {
    let view = controller(
        StubTransport::with_status(500, "Internal Server Error"),
        MemoryPort::full(),
    );

    view.diagnose().await;

    let port = view.port();
    assert_eq!(
        port.html(Region::Diagnosis),
        "<div class=\"err\">❌ server responded with HTTP 500 and no JSON body</div>"
    );
    no_loading_left(port, &[Region::Diagnosis]);
}

#[tokio::test]
async fn missing_render_targets_are_skipped() {
    let transport = StubTransport::json(json!({ "month": "may", "crops": ["maize"] }));
    let port = MemoryPort::full()
        .without_region(Region::CropsRaw)
        .with_field(Field::CropsMonth, "may");
    let view = controller(transport, port);

    view.show_crops().await;

    let port = view.port();
    assert!(port.painted(Region::CropsRaw).is_none());
    assert!(port.html(Region::CropsView).contains("<span class=\"chip\">maize</span>"));
}

#[tokio::test]
async fn missing_trigger_does_not_block_the_others() {
    let transport = StubTransport::json(json!({ "month": "may", "crops": [] }));
    let port = MemoryPort::full().without_trigger(Trigger::Recommend);
    let bindings = wire_triggers(&port);

    assert!(bindings.is_bound(Trigger::Crops));
    assert!(!bindings.is_bound(Trigger::Recommend));
    assert!(bindings.is_bound(Trigger::Diagnose));

    let view = controller(transport.clone(), port);
    view.dispatch(bindings, Trigger::Recommend).await;
    assert!(transport.requested().is_empty());
    assert!(view.port().painted(Region::RecommendTable).is_none());

    view.dispatch(bindings, Trigger::Crops).await;
    assert_eq!(transport.requested().len(), 1);
    assert!(view
        .port()
        .html(Region::CropsView)
        .contains("No crops found for this month."));
}
