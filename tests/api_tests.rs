use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use property_portal::{
    app,
    config::{AppState, Config},
    db::ExtensionRepository,
    models::{
        extension::PropertyExtension,
        property::{
            Project, PropertyRecord, PropertyStatus, PropertyType, SuggestionKind, SuggestionLocation,
            SuggestionProject, SuggestionsData,
        },
    },
    services::nainahub::{PropertySource, StaticSource},
};

const SKYLINE_ID: &str = "0b9e6f3a-5c1d-4e2f-9a7b-1c2d3e4f5a6b";

fn skyline_project() -> Project {
    Project {
        project_code: "PRJ1".into(),
        project_name_en: "The Skyline".into(),
        project_name_th: "เดอะ สกายไลน์".into(),
        address_district: Some("Sathorn".into()),
        address_province: Some("Bangkok".into()),
        ..Default::default()
    }
}

fn records() -> Vec<PropertyRecord> {
    vec![
        PropertyRecord {
            id: SKYLINE_ID.into(),
            agent_property_code: Some("SKY001".into()),
            property_type: PropertyType::Condo,
            property_title_en: "Skyline 1BR river view".into(),
            rental_rate_num: Some(25000.0),
            bed_room_num: 1,
            room_size_num: Some(35.0),
            image_urls: vec!["https://img.example/sky.jpg".into()],
            project_code: Some("PRJ1".into()),
            project: Some(skyline_project()),
            updated_at: Some(Utc::now() - Duration::days(3)),
            ..Default::default()
        },
        PropertyRecord {
            id: "house-2".into(),
            agent_property_code: Some("HSE002".into()),
            property_type: PropertyType::Townhouse,
            property_title_en: "Townhouse in Bang Na".into(),
            sell_price_num: Some(4_500_000.0),
            bed_room_num: 3,
            usable_area_sqm: Some(140.0),
            property_district: Some("Bang Na".into()),
            property_province: Some("Bangkok".into()),
            updated_at: Some(Utc::now() - Duration::hours(2)),
            ..Default::default()
        },
        PropertyRecord {
            id: "sold-3".into(),
            agent_property_code: Some("SLD003".into()),
            property_type: PropertyType::Condo,
            sell_price_num: Some(3_200_000.0),
            project_code: Some("PRJ1".into()),
            project: Some(skyline_project()),
            status: PropertyStatus::Sold,
            ..Default::default()
        },
        PropertyRecord {
            id: "hidden-4".into(),
            agent_property_code: Some("HID004".into()),
            property_type: PropertyType::Condo,
            rental_rate_num: Some(18000.0),
            ..Default::default()
        },
    ]
}

fn extensions() -> ExtensionRepository {
    ExtensionRepository::new(vec![
        PropertyExtension {
            property_id: "house-2".into(),
            is_recommended: true,
            ..Default::default()
        },
        PropertyExtension {
            property_id: "hidden-4".into(),
            is_hidden: true,
            ..Default::default()
        },
    ])
}

fn suggestions() -> SuggestionsData {
    SuggestionsData {
        projects: vec![
            SuggestionProject { name_en: "The Skyline".into(), name_th: "เดอะ สกายไลน์".into() },
            SuggestionProject { name_en: "Noble Ploenchit".into(), name_th: "โนเบิล เพลินจิต".into() },
        ],
        locations: vec![SuggestionLocation {
            text: "สาทร".into(),
            text_en: Some("Sathorn".into()),
            kind: SuggestionKind::Condo,
        }],
    }
}

struct TestApp {
    router: Router,
    dir: TempDir,
}

fn test_app_with(source: Arc<dyn PropertySource>) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        inquiries_path: dir.path().join("inquiries.jsonl"),
        ..Config::default()
    };
    let state = AppState::from_parts(config, source, extensions());
    TestApp { router: app(state), dir }
}

fn test_app() -> TestApp {
    test_app_with(Arc::new(StaticSource::new(records()).with_suggestions(suggestions())))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

#[tokio::test]
async fn health_is_ok() {
    let app = test_app();
    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn slug_and_uuid_resolve_to_the_same_record() {
    let app = test_app();

    let (status, by_slug) = get(&app.router, "/api/nainahub/property/for-rent-condo-the-skyline-SKY001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_slug["id"], SKYLINE_ID);

    // Code match is case-insensitive and ignores the rest of the slug.
    let (_, by_other_slug) = get(&app.router, "/api/nainahub/property/for-sale-house-somewhere-sky001").await;
    assert_eq!(by_other_slug["id"], SKYLINE_ID);

    let (status, by_uuid) = get(&app.router, &format!("/api/nainahub/property/{SKYLINE_ID}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_uuid, by_slug);
}

#[tokio::test]
async fn unknown_property_is_a_localized_404() {
    let app = test_app();

    let request = Request::builder()
        .uri("/api/nainahub/property/for-rent-condo-nowhere-NOPE99")
        .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Property not found.");

    let (status, body) = get(&app.router, "/api/nainahub/property/for-rent-condo-nowhere-NOPE99?locale=zh").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "未找到该房产。");
}

#[tokio::test]
async fn hidden_records_stay_out_of_public_lookups() {
    let app = test_app();

    let (status, _) = get(&app.router, "/api/nainahub/property/for-rent-condo-property-HID004").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The raw listing includes hidden records unless told otherwise.
    let (_, all) = get(&app.router, "/api/nainahub/properties").await;
    assert_eq!(all["data"].as_array().unwrap().len(), 4);
    let hidden = all["data"].as_array().unwrap().iter().find(|p| p["id"] == "hidden-4").unwrap();
    assert_eq!(hidden["isHidden"], true);

    let (_, visible) = get(&app.router, "/api/nainahub/properties?includeHidden=false").await;
    assert_eq!(visible["data"].as_array().unwrap().len(), 3);
    assert_eq!(visible["pagination"]["total"], 4);
}

#[tokio::test]
async fn search_never_returns_closed_deals() {
    let app = test_app();

    let (status, view) = get(&app.router, "/api/public/search?locale=en").await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<&str> = view["properties"].as_array().unwrap().iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, [SKYLINE_ID, "house-2"]);
    assert_eq!(view["properties"][0]["slug"], "for-rent-condo-the-skyline-SKY001");
    assert_eq!(view["projects"][0]["projectCode"], "PRJ1");
    assert_eq!(view["projects"][0]["count"], 1);
    assert_eq!(view["jsonLd"]["@type"], "ItemList");
    assert!(view.get("error").is_none());
}

#[tokio::test]
async fn search_applies_filters_locally() {
    let app = test_app();

    let (_, view) = get(&app.router, "/api/public/search?listingType=sale&propertyType=all&bedrooms=all").await;
    let ids: Vec<&str> = view["properties"].as_array().unwrap().iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["house-2"]);

    let (_, view) = get(&app.router, "/api/public/search?search=sathorn").await;
    assert_eq!(view["total"], 1);

    let (_, view) = get(&app.router, "/api/public/search?listingType=rent&maxPrice=20000").await;
    assert_eq!(view["total"], 0);

    let (_, view) = get(&app.router, "/api/public/search?search=all").await;
    assert_eq!(view["total"], 0);
}

#[tokio::test]
async fn upstream_failure_gives_empty_views_with_a_message() {
    let app = test_app_with(Arc::new(StaticSource::unavailable()));

    let (status, view) = get(&app.router, "/api/public/search?locale=en").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["total"], 0);
    assert_eq!(view["error"], "Failed to load properties. Please try again.");

    let (status, body) = get(&app.router, "/api/nainahub/properties").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn suggestions_failure_keeps_the_envelope_shape() {
    let app = test_app_with(Arc::new(StaticSource::new(records())));

    let (status, body) = get(&app.router, "/api/nainahub/suggestions").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["projects"], json!([]));
    assert_eq!(body["data"]["locations"], json!([]));
}

#[tokio::test]
async fn suggestions_narrow_by_query_and_language() {
    let app = test_app();

    let (_, all) = get(&app.router, "/api/nainahub/suggestions").await;
    assert_eq!(all["data"]["projects"].as_array().unwrap().len(), 2);

    let (_, narrowed) = get(&app.router, "/api/nainahub/suggestions?q=sky&locale=en").await;
    assert_eq!(narrowed["success"], true);
    assert_eq!(narrowed["data"]["projects"].as_array().unwrap().len(), 1);
    assert_eq!(narrowed["data"]["projects"][0]["nameEn"], "The Skyline");
}

#[tokio::test]
async fn home_view_assembles_every_section() {
    let app = test_app();

    let (status, view) = get(&app.router, "/api/public/home?locale=en&popupShown=true").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(view["popular"][0]["id"], "house-2");
    assert_eq!(view["closedDeals"][0]["id"], "sold-3");
    assert_eq!(view["latest"][0]["id"], "house-2");
    assert_eq!(view["latest"][0]["updatedAgo"], "2 hours ago");
    assert_eq!(view["projects"].as_array().unwrap().len(), 1);
    assert_eq!(view["notice"]["showPopup"], false);
    assert_eq!(view["organizationJsonLd"]["@type"], "RealEstateAgent");
}

#[tokio::test]
async fn favorites_resolve_in_favorites_order() {
    let app = test_app();

    let (status, body) = post_json(
        &app.router,
        "/api/favorites/properties",
        json!({ "ids": ["house-2", "gone", SKYLINE_ID] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<&str> = body["data"].as_array().unwrap().iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["house-2", SKYLINE_ID]);
}

#[tokio::test]
async fn seo_metadata_uses_canonical_slug_urls() {
    let app = test_app();

    let (status, body) = get(&app.router, &format!("/api/seo/property/{SKYLINE_ID}?locale=en")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["metadata"]["canonical"],
        "https://propertybyta168.com/en/property/for-rent-condo-the-skyline-SKY001"
    );
    assert_eq!(body["metadata"]["alternates"].as_array().unwrap().len(), 4);
    assert_eq!(body["jsonLd"]["offers"]["priceCurrency"], "THB");

    let (status, org) = get(&app.router, "/api/seo/organization").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(org["@type"], "RealEstateAgent");
}

#[tokio::test]
async fn invalid_inquiry_is_rejected_with_field_details() {
    let app = test_app();

    let (status, body) = post_json(
        &app.router,
        "/api/inquiries?locale=en",
        json!({ "name": "", "phone": "12", "email": "not-an-email" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "One or more fields are invalid.");
    assert!(body["details"]["name"].is_array());
    assert!(body["details"]["phone"].is_array());
    assert!(body["details"]["email"].is_array());
}

#[tokio::test]
async fn blank_name_and_phone_are_rejected() {
    let app = test_app();

    let (status, body) = post_json(
        &app.router,
        "/api/inquiries?locale=en",
        json!({ "name": "   ", "phone": "      \t  " }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["name"].is_array());
    assert!(body["details"]["phone"].is_array());
    assert!(!app.dir.path().join("inquiries.jsonl").exists());
}

#[tokio::test]
async fn valid_inquiry_is_stored() {
    let app = test_app();

    let (status, body) = post_json(
        &app.router,
        "/api/inquiries",
        json!({
            "name": "  Somchai ",
            "phone": "081-234-5678",
            "email": "",
            "propertyType": "Condo",
            "type": "list-property",
            "source": "popup"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);

    let raw = std::fs::read_to_string(app.dir.path().join("inquiries.jsonl")).unwrap();
    let stored: Value = serde_json::from_str(raw.lines().next().unwrap()).unwrap();
    assert_eq!(stored["id"], body["id"]);
    assert_eq!(stored["name"], "Somchai");
    assert_eq!(stored["type"], "list-property");
    assert_eq!(stored["email"], Value::Null);
    assert_eq!(stored["locale"], "th");
}
