//! Integration tests for the prediction endpoints

mod common;

use axum::http::StatusCode;
use rstest::rstest;
use serde_json::Value;

fn diabetes_payload() -> serde_json::Value {
    serde_json::json!({
        "gender": "Female",
        "age": 54,
        "hypertension": 0,
        "heart_disease": 0,
        "smoking_history": "never",
        "bmi": 27.3,
        "HbA1c_level": 6.6,
        "blood_glucose_level": 140
    })
}

fn cancer_payload() -> serde_json::Value {
    serde_json::json!({
        "Gender": "Male",
        "Age": 60,
        "BMI": 29.1,
        "Smoking": "Yes",
        "GeneticRisk": "Medium",
        "PhysicalActivity": 3.5,
        "AlcoholIntake": 2.0,
        "CancerHistory": "No"
    })
}

fn cardio_payload() -> serde_json::Value {
    serde_json::json!({
        "age": 55,
        "gender": 2,
        "height": 168,
        "weight": 85.0,
        "ap_hi": 140,
        "ap_lo": 90,
        "cholesterol": 2,
        "gluc": 1,
        "smoke": 0,
        "alco": 0,
        "active": 1
    })
}

#[rstest]
#[case::diabetes("/predict/diabetes", diabetes_payload())]
#[case::cancer("/predict/cancer", cancer_payload())]
#[case::cardio("/predict/cardio", cardio_payload())]
#[tokio::test]
async fn test_prediction_shape_and_bounds(#[case] route: &str, #[case] payload: Value) {
    let app = common::TestApp::new();

    let (status, body) = app.post(route, &payload.to_string()).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    let parsed: Value = serde_json::from_str(&body).unwrap();
    let prediction = parsed["prediction"].as_i64().unwrap();
    let probability = parsed["probability"].as_f64().unwrap();
    assert!(prediction == 0 || prediction == 1);
    assert!((0.0..=1.0).contains(&probability));
    // Label and probability must agree on the 0.5 decision threshold
    assert_eq!(prediction == 1, probability >= 0.5);
    assert!(parsed["message"].as_str().unwrap().contains("detected"));
}

#[rstest]
#[case::diabetes_gender("/predict/diabetes", diabetes_payload(), "gender", "Robot")]
#[case::diabetes_smoking("/predict/diabetes", diabetes_payload(), "smoking_history", "vaping")]
#[case::cancer_genetic_risk("/predict/cancer", cancer_payload(), "GeneticRisk", "Extreme")]
#[case::cancer_history("/predict/cancer", cancer_payload(), "CancerHistory", "maybe")]
#[tokio::test]
async fn test_unknown_category_is_client_error(
    #[case] route: &str,
    #[case] mut payload: Value,
    #[case] field: &str,
    #[case] label: &str,
) {
    let app = common::TestApp::new();
    payload[field] = Value::String(label.to_string());

    let (status, body) = app.post(route, &payload.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    let message = parsed["error"].as_str().unwrap();
    assert!(message.contains(field));
    assert!(message.contains(label));
}

#[rstest]
#[case::diabetes("/predict/diabetes", diabetes_payload(), "bmi")]
#[case::cancer("/predict/cancer", cancer_payload(), "Age")]
#[case::cardio("/predict/cardio", cardio_payload(), "ap_hi")]
#[tokio::test]
async fn test_missing_field_names_the_field(
    #[case] route: &str,
    #[case] mut payload: Value,
    #[case] field: &str,
) {
    let app = common::TestApp::new();
    payload.as_object_mut().unwrap().remove(field);

    let (status, body) = app.post(route, &payload.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert!(parsed["error"].as_str().unwrap().contains(field));
}

#[tokio::test]
async fn test_prediction_invariant_to_input_key_order() {
    let app = common::TestApp::new();

    let ordered = diabetes_payload().to_string();
    let shuffled = r#"{
        "blood_glucose_level": 140, "HbA1c_level": 6.6, "bmi": 27.3,
        "smoking_history": "never", "heart_disease": 0, "hypertension": 0,
        "age": 54, "gender": "Female"
    }"#;

    let (status_a, body_a) = app.post("/predict/diabetes", &ordered).await;
    let (status_b, body_b) = app.post("/predict/diabetes", shuffled).await;

    assert_eq!(status_a, StatusCode::OK);
    assert_eq!(status_b, StatusCode::OK);
    assert_eq!(body_a, body_b);
}

#[tokio::test]
async fn test_numeric_strings_are_coerced() {
    let app = common::TestApp::new();
    let mut payload = cardio_payload();
    payload["age"] = Value::String("55".to_string());
    payload["weight"] = Value::String("85.0".to_string());

    let (status, body) = app.post("/predict/cardio", &payload.to_string()).await;

    assert_eq!(status, StatusCode::OK, "{body}");
}

#[tokio::test]
async fn test_non_numeric_field_is_client_error() {
    let app = common::TestApp::new();
    let mut payload = cardio_payload();
    payload["weight"] = serde_json::json!(["heavy"]);

    let (status, body) = app.post("/predict/cardio", &payload.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert!(parsed["error"].as_str().unwrap().contains("weight"));
}

#[tokio::test]
async fn test_non_object_body_is_client_error() {
    let app = common::TestApp::new();

    let (status, _body) = app.post("/predict/diabetes", "[1, 2, 3]").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_extra_fields_are_ignored() {
    let app = common::TestApp::new();
    let mut payload = diabetes_payload();
    payload["comment"] = Value::String("please ignore".to_string());

    let base = app.post("/predict/diabetes", &diabetes_payload().to_string()).await;
    let extra = app.post("/predict/diabetes", &payload.to_string()).await;

    assert_eq!(base, extra);
}

#[tokio::test]
async fn test_health_reports_all_models_loaded() {
    let app = common::TestApp::new();

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["status"], "healthy");
    assert_eq!(parsed["models_loaded"]["diabetes"], true);
    assert_eq!(parsed["models_loaded"]["cancer"], true);
    assert_eq!(parsed["models_loaded"]["cardio"], true);
}

#[tokio::test]
async fn test_home_lists_routes() {
    let app = common::TestApp::new();

    let (status, body) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/predict/diabetes"));
    assert!(body.contains("/predict/cancer"));
    assert!(body.contains("/predict/cardio"));
}
