use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use server::config::AppConfig;
use server::{create_router, state::AppState};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/models/gemini-test:generateContent";

// 1x1 transparent PNG
const PIXEL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

async fn setup_test_server() -> (TestServer, MockServer) {
    let mock_gemini = MockServer::start().await;

    let mut config = AppConfig::default();
    config.gemini.base_url = mock_gemini.uri();
    config.gemini.model = "gemini-test".to_string();
    config.gemini.timeout_secs = 5;

    let state = AppState::from_config(config, Some("test-key".to_string()))
        .expect("Failed to build state");
    let server = TestServer::new(create_router(state)).expect("Failed to create test server");

    (server, mock_gemini)
}

fn setup_unconfigured_server() -> TestServer {
    let state = AppState::new(AppConfig::default(), None);
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

fn model_text(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 100, "candidatesTokenCount": 20, "totalTokenCount": 120}
    })
}

fn model_json(value: Value) -> Value {
    model_text(&value.to_string())
}

async fn mount_reply(mock: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock)
        .await;
}

async fn sent_bodies(mock: &MockServer) -> Vec<Value> {
    mock.received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let (server, _mock) = setup_test_server().await;

        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["ai_configured"], true);
    }

    #[tokio::test]
    async fn test_openapi_document() {
        let (server, _mock) = setup_test_server().await;

        let response = server.get("/api/openapi.json").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert!(body["paths"]["/api/predictions/yield"]["post"].is_object());
        assert!(body["paths"]["/api/crops/{name}"]["get"].is_object());
    }
}

mod reference {
    use super::*;

    #[tokio::test]
    async fn test_list_counties() {
        let (server, _mock) = setup_test_server().await;

        let response = server.get("/api/counties").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let counties = body.as_array().unwrap();
        assert_eq!(counties.len(), 47);
        assert_eq!(counties[0]["name"], "Mombasa");
        assert!(counties
            .iter()
            .any(|c| c["name"] == "Nakuru" && c["baseRainfallMm"] == 900));
    }

    #[tokio::test]
    async fn test_list_crops_filtered_by_county() {
        let (server, _mock) = setup_test_server().await;

        let all: Value = server.get("/api/crops").await.json();
        let filtered = server.get("/api/crops").add_query_param("county", "Kericho").await;

        filtered.assert_status_ok();
        let filtered: Value = filtered.json();
        assert_eq!(all.as_array().unwrap().len(), 20);
        assert!(filtered.as_array().unwrap().len() < 20);
        assert!(filtered
            .as_array()
            .unwrap()
            .iter()
            .all(|c| c["counties"].as_array().unwrap().contains(&json!("Kericho"))));
    }

    #[tokio::test]
    async fn test_list_crops_unknown_county() {
        let (server, _mock) = setup_test_server().await;

        let response = server.get("/api/crops").add_query_param("county", "Gotham").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_get_crop() {
        let (server, _mock) = setup_test_server().await;

        let response = server.get("/api/crops/Maize").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["name"], "Maize");
        assert_eq!(body["historicalData"].as_array().unwrap().len(), 10);
        assert_eq!(body["historicalData"][0]["year"], 2015);
        assert!(body["historicalData"][0]["yield"].is_number());
    }

    #[tokio::test]
    async fn test_get_unknown_crop_returns_404() {
        let (server, _mock) = setup_test_server().await;

        let response = server.get("/api/crops/Quinoa").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["message"], "Unknown crop: Quinoa");
    }

    #[tokio::test]
    async fn test_input_catalogues() {
        let (server, _mock) = setup_test_server().await;

        let fertilizers: Value = server.get("/api/fertilizers").await.json();
        assert_eq!(fertilizers.as_array().unwrap().len(), 6);
        assert!(fertilizers.as_array().unwrap().contains(&json!("DAP")));

        let soils: Value = server.get("/api/soil-types").await.json();
        assert_eq!(soils.as_array().unwrap().len(), 6);
        assert!(soils.as_array().unwrap().contains(&json!("Loam")));
    }
}

mod rainfall {
    use super::*;

    #[tokio::test]
    async fn test_rainfall_estimate() {
        let (server, _mock) = setup_test_server().await;

        let response = server
            .get("/api/rainfall")
            .add_query_param("county", "Nakuru")
            .add_query_param("year", 2025)
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["rainfallMm"], 900);
        assert_eq!(body["knownCounty"], true);
    }

    #[tokio::test]
    async fn test_rainfall_floor_and_unknown_county() {
        let (server, _mock) = setup_test_server().await;

        let turkana: Value = server
            .get("/api/rainfall")
            .add_query_param("county", "Turkana")
            .add_query_param("year", 2024)
            .await
            .json();
        assert_eq!(turkana["rainfallMm"], 200);

        let unknown: Value = server
            .get("/api/rainfall")
            .add_query_param("county", "UnknownCounty")
            .add_query_param("year", 2029)
            .await
            .json();
        assert_eq!(unknown["rainfallMm"], 840);
        assert_eq!(unknown["knownCounty"], false);
    }

    #[tokio::test]
    async fn test_rainfall_requires_county() {
        let (server, _mock) = setup_test_server().await;

        let response = server.get("/api/rainfall").add_query_param("year", 2025).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["details"][0]["field"], "county");
    }

    #[tokio::test]
    async fn test_form_defaults_prepopulate_rainfall() {
        let (server, _mock) = setup_test_server().await;

        let response = server
            .get("/api/forms/defaults")
            .add_query_param("county", "Kisumu")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["county"], "Kisumu");
        assert_eq!(body["area"], 10.0);

        let year = body["year"].as_i64().unwrap();
        let estimate: Value = server
            .get("/api/rainfall")
            .add_query_param("county", "Kisumu")
            .add_query_param("year", year)
            .await
            .json();
        assert_eq!(body["rainfall"], estimate["rainfallMm"]);
    }

    #[tokio::test]
    async fn test_form_defaults_without_county() {
        let (server, _mock) = setup_test_server().await;

        let body: Value = server.get("/api/forms/defaults").await.json();
        assert_eq!(body["rainfall"], 500);
        assert!(body["county"].is_null());
    }
}

mod predictions {
    use super::*;

    fn form() -> Value {
        json!({
            "crop": "Maize",
            "county": "Nakuru",
            "year": 2100,
            "area": 10,
            "fertilizer": "DAP",
            "soilQuality": "Loam"
        })
    }

    #[tokio::test]
    async fn test_predict_yield() {
        let (server, mock) = setup_test_server().await;
        mount_reply(
            &mock,
            model_json(json!({
                "predictedYield": 31.5,
                "recommendedFertilizer": "CAN",
                "irrigationAdvice": "No irrigation needed."
            })),
        )
        .await;

        let response = server.post("/api/predictions/yield").json(&form()).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["predictedYield"], 31.5);
        assert_eq!(body["recommendedFertilizer"], "CAN");

        let sent = sent_bodies(&mock).await;
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0]["tools"][0]["functionDeclarations"][0]["name"],
            "getPredictedRainfall"
        );
    }

    #[tokio::test]
    async fn test_predict_yield_serves_rainfall_tool() {
        let (server, mock) = setup_test_server().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{"functionCall": {
                            "name": "getPredictedRainfall",
                            "args": {"county": "Nakuru", "year": 2025}
                        }}]
                    }
                }]
            })))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&mock)
            .await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(model_json(json!({
                "predictedYield": 28.0,
                "recommendedFertilizer": "DAP",
                "irrigationAdvice": "Supplementary irrigation in dry months."
            }))))
            .with_priority(2)
            .mount(&mock)
            .await;

        let response = server.post("/api/predictions/yield").json(&form()).await;

        response.assert_status_ok();
        let sent = sent_bodies(&mock).await;
        assert_eq!(sent.len(), 2);
        let tool_turn = &sent[1]["contents"][2];
        assert_eq!(tool_turn["role"], "user");
        assert_eq!(
            tool_turn["parts"][0]["functionResponse"]["response"]["predictedRainfallMm"],
            900
        );
    }

    #[tokio::test]
    async fn test_invalid_form_reports_every_field() {
        let (server, mock) = setup_test_server().await;

        let response = server
            .post("/api/predictions/yield")
            .json(&json!({
                "crop": "",
                "county": "Gotham",
                "year": 2000,
                "area": 0,
                "fertilizer": "Guano",
                "soilQuality": "Loam"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "validation_error");
        let fields: Vec<&str> = body["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["field"].as_str().unwrap())
            .collect();
        for field in ["crop", "county", "year", "area", "fertilizer"] {
            assert!(fields.contains(&field), "missing error for {}", field);
        }
        assert!(sent_bodies(&mock).await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_numbers_are_field_errors() {
        let (server, mock) = setup_test_server().await;

        let response = server
            .post("/api/predictions/yield")
            .json(&json!({
                "crop": "Maize",
                "county": "Nakuru",
                "year": "next year",
                "fertilizer": "DAP",
                "soilQuality": "Loam"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["details"][0]["field"], "year");
        assert_eq!(body["details"][1]["field"], "area");
        assert!(sent_bodies(&mock).await.is_empty());
    }

    #[tokio::test]
    async fn test_text_numbers_are_accepted() {
        let server = setup_unconfigured_server();

        let mut form = form();
        form["year"] = json!("2100");
        form["area"] = json!("10");
        let response = server.post("/api/predictions/yield").json(&form).await;

        // Validation passes, so the request reaches the missing advisor.
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_envelope() {
        let (server, _mock) = setup_test_server().await;

        let response = server
            .post("/api/predictions/yield")
            .content_type("application/json")
            .bytes("{\"crop\": ".into())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["details"][0]["field"], "body");
    }

    #[tokio::test]
    async fn test_model_error_maps_to_bad_gateway() {
        let (server, mock) = setup_test_server().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}
            })))
            .mount(&mock)
            .await;

        let response = server.post("/api/predictions/yield").json(&form()).await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert_eq!(body["error"], "upstream_error");
        assert!(body["message"].as_str().unwrap().contains("API key not valid"));
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_429() {
        let (server, mock) = setup_test_server().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
            .mount(&mock)
            .await;

        let response = server.post("/api/predictions/yield").json(&form()).await;

        response.assert_status(StatusCode::TOO_MANY_REQUESTS);
        let body: Value = response.json();
        assert_eq!(body["error"], "rate_limited");
    }

    #[tokio::test]
    async fn test_unconfigured_server_returns_503() {
        let server = setup_unconfigured_server();

        let response = server.post("/api/predictions/yield").json(&form()).await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = response.json();
        assert_eq!(body["error"], "not_configured");

        let health: Value = server.get("/health").await.json();
        assert_eq!(health["ai_configured"], false);
    }
}

mod advisory {
    use super::*;

    #[tokio::test]
    async fn test_recommendations_capped_at_three() {
        let (server, mock) = setup_test_server().await;
        mount_reply(
            &mock,
            model_json(json!({"recommendations": [
                {"cropName": "Tea", "reason": "Cool and wet"},
                {"cropName": "Maize", "reason": "Staple"},
                {"cropName": "Potatoes", "reason": "Highland"},
                {"cropName": "Kale (Sukuma Wiki)", "reason": "Quick market"}
            ]})),
        )
        .await;

        let response = server
            .post("/api/recommendations")
            .json(&json!({
                "county": "Kericho",
                "year": 2100,
                "area": 3.5,
                "rainfall": 1850,
                "soilQuality": "Loam"
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["recommendations"].as_array().unwrap().len(), 3);

        let sent = sent_bodies(&mock).await;
        assert_eq!(sent[0]["generationConfig"]["responseMimeType"], "application/json");
    }

    #[tokio::test]
    async fn test_farming_guide() {
        let (server, mock) = setup_test_server().await;
        mount_reply(
            &mock,
            model_text(
                "```json\n{\"cropName\": \"Avocado\", \"landPreparation\": \"Dig 60cm pits\", \"planting\": \"Grafted seedlings\", \"wateringAndIrrigation\": \"Drip\", \"fertilizerApplication\": \"Manure\", \"pestAndDiseaseControl\": \"Watch for thrips\", \"harvesting\": \"Pick mature fruit\", \"postHarvestHandling\": \"Ripen at room temperature\"}\n```",
            ),
        )
        .await;

        let response = server
            .post("/api/guides")
            .json(&json!({"cropName": "  Avocado "}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["cropName"], "Avocado");
        assert_eq!(body["landPreparation"], "Dig 60cm pits");
    }

    #[tokio::test]
    async fn test_farming_guide_requires_crop() {
        let (server, _mock) = setup_test_server().await;

        let response = server.post("/api/guides").json(&json!({"cropName": " "})).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_diagnosis() {
        let (server, mock) = setup_test_server().await;
        mount_reply(
            &mock,
            model_json(json!({
                "isPlant": true,
                "plantName": "Tomato",
                "isHealthy": true,
                "diagnosis": "",
                "remedy": "None needed"
            })),
        )
        .await;

        let response = server
            .post("/api/diagnoses")
            .json(&json!({"photoDataUri": PIXEL, "description": "Leaves look fine"}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["plantName"], "Tomato");
        assert!(body.get("diagnosis").is_none());
        assert!(body.get("remedy").is_none());

        let sent = sent_bodies(&mock).await;
        let parts = sent[0]["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
    }

    #[tokio::test]
    async fn test_diagnosis_requires_photo() {
        let (server, mock) = setup_test_server().await;

        let response = server
            .post("/api/diagnoses")
            .json(&json!({"description": "Spots"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["details"][0]["field"], "photoDataUri");

        let not_image = server
            .post("/api/diagnoses")
            .json(&json!({"photoDataUri": "data:text/plain;base64,aGVsbG8="}))
            .await;
        not_image.assert_status(StatusCode::BAD_REQUEST);

        assert!(sent_bodies(&mock).await.is_empty());
    }

    #[tokio::test]
    async fn test_trend_summary_returns_series() {
        let (server, mock) = setup_test_server().await;
        mount_reply(
            &mock,
            model_json(json!({"summary": "Yields climbed from 2015 to 2024."})),
        )
        .await;

        let response = server
            .post("/api/trends")
            .json(&json!({"crop": "Maize", "county": "Nakuru"}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["crop"], "Maize");
        assert_eq!(body["summary"], "Yields climbed from 2015 to 2024.");
        assert_eq!(body["series"].as_array().unwrap().len(), 10);

        let sent = sent_bodies(&mock).await;
        let prompt = sent[0]["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("Historical Data: Year 2015:"));
    }

    #[tokio::test]
    async fn test_trend_unknown_crop() {
        let (server, _mock) = setup_test_server().await;

        let response = server
            .post("/api/trends")
            .json(&json!({"crop": "Quinoa", "county": "Nakuru"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["details"][0]["message"], "Unknown crop: Quinoa");
    }
}
