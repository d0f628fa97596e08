//! Integration tests for the TJM engine.
//!
//! This test suite drives the HTTP API end to end:
//! - Working-days calendar for reference years
//! - Day rates for full-time, part-time and edge-case scenarios
//! - Net-of-tax projection and VAT-inclusive prices
//! - Result cache round trips
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use tjm_engine::api::{AppState, create_router};
use tjm_engine::cache::ResultCache;
use tjm_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/fr").expect("Failed to load config")
}

fn create_router_for_test() -> Router {
    create_router(AppState::new(load_config()))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    send(
        router,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

async fn post_rates(router: Router, body: Value) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri("/rates")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

fn create_request(year: i32, personal_rent: u32, professional_workspace: u32) -> Value {
    json!({
        "year": year,
        "personal_expenses": { "housing": { "rent": personal_rent } },
        "professional_expenses": { "production": { "workspace": professional_workspace } }
    })
}

fn no_time_off() -> Value {
    json!({
        "working_time_ratio": 100,
        "vacation_weeks": 0,
        "training_weeks": 0,
        "prospecting_percent": 0,
        "hardship_reserve_months": 0
    })
}

fn zero_taxes() -> Value {
    json!({
        "income_tax_percent": 0,
        "social_charges_percent": 0,
        "other_taxes_percent": 0
    })
}

fn assert_decimal(value: &Value, expected: &str) {
    let actual = value
        .as_str()
        .unwrap_or_else(|| panic!("Expected a decimal string, got {}", value));
    assert_eq!(
        decimal(actual),
        decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

fn assert_rates(result: &Value, minimum: &str, comfortable: &str, optimal: &str) {
    assert_decimal(&result["minimum_rate"], minimum);
    assert_decimal(&result["comfortable_rate"], comfortable);
    assert_decimal(&result["optimal_rate"], optimal);
}

// =============================================================================
// SECTION 1: Working-Days Calendar
// =============================================================================

#[tokio::test]
async fn test_calendar_reference_years() {
    let expected = [
        (2019, 365, 104, 10, 251),
        (2020, 366, 104, 9, 253),
        (2021, 365, 104, 7, 254),
        (2022, 365, 105, 7, 253),
        (2023, 365, 105, 9, 251),
        (2024, 366, 104, 10, 252),
        (2025, 365, 104, 10, 251),
        (2026, 365, 104, 9, 252),
    ];

    for (year, total, weekend, holiday, working) in expected {
        let (status, stats) = get_json(create_router_for_test(), &format!("/calendar/{}", year)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["year"], year);
        assert_eq!(stats["total_days"], total, "total days in {}", year);
        assert_eq!(stats["weekend_days"], weekend, "weekend days in {}", year);
        assert_eq!(stats["holiday_days"], holiday, "holiday days in {}", year);
        assert_eq!(stats["working_days"], working, "working days in {}", year);
    }
}

#[tokio::test]
async fn test_calendar_lists_named_holidays() {
    let (status, stats) = get_json(create_router_for_test(), "/calendar/2024").await;
    assert_eq!(status, StatusCode::OK);

    let holidays = stats["holidays"].as_array().unwrap();
    let find = |name: &str| {
        holidays
            .iter()
            .find(|h| h["name"] == name)
            .unwrap_or_else(|| panic!("{} missing", name))
    };

    assert_eq!(find("Easter Sunday")["date"], "2024-03-31");
    assert_eq!(find("Easter Monday")["date"], "2024-04-01");
    assert_eq!(find("Ascension Day")["date"], "2024-05-09");
    assert_eq!(find("Whit Monday")["date"], "2024-05-20");
    assert_eq!(find("Bastille Day")["on_weekend"], true);
    assert_eq!(find("Christmas Day")["on_weekend"], false);
}

#[tokio::test]
async fn test_calendar_merges_coinciding_holidays() {
    // Ascension fell on Labour Day in 2008.
    let (_, stats) = get_json(create_router_for_test(), "/calendar/2008").await;
    let holidays = stats["holidays"].as_array().unwrap();
    assert_eq!(holidays.len(), 11);
    assert_eq!(
        holidays.iter().filter(|h| h["date"] == "2008-05-01").count(),
        1
    );
}

// =============================================================================
// SECTION 2: Day Rates
// =============================================================================

#[tokio::test]
async fn test_rates_default_parameters_2024() {
    let (status, body) = post_rates(create_router_for_test(), create_request(2024, 2000, 1000)).await;
    assert_eq!(status, StatusCode::OK);

    let result = &body["result"];
    assert_eq!(result["year"], 2024);
    assert_eq!(result["raw_working_days"], 252);
    assert_eq!(result["working_days"], 252);
    assert_eq!(result["billable_days"], 197);
    assert_eq!(result["day_breakdown"]["adjusted_vacation_days"], 25);
    assert_eq!(result["day_breakdown"]["adjusted_training_days"], 5);
    assert_eq!(result["day_breakdown"]["prospecting_days"], 25);
    assert_decimal(&result["monthly_expense_total"], "3000");
    assert_decimal(&result["hardship_reserve_amount"], "9000");
    assert_decimal(&result["total_required"], "45000");
    assert_rates(result, "508", "610", "762");
    assert_decimal(&result["annual_revenue_at_optimal"], "150114");
}

#[tokio::test]
async fn test_rates_no_time_off_no_tax() {
    let mut request = create_request(2024, 2000, 1000);
    request["time_allocation"] = no_time_off();
    request["taxes"] = zero_taxes();

    let (status, body) = post_rates(create_router_for_test(), request).await;
    assert_eq!(status, StatusCode::OK);

    let result = &body["result"];
    assert_eq!(result["billable_days"], 252);
    assert_rates(result, "143", "172", "215");
    assert_decimal(&result["annual_revenue_at_optimal"], "54180");
}

#[tokio::test]
async fn test_rates_half_time() {
    let mut request = create_request(2024, 2000, 1000);
    request["time_allocation"] = json!({ "working_time_ratio": 50 });

    let (status, body) = post_rates(create_router_for_test(), request).await;
    assert_eq!(status, StatusCode::OK);

    let result = &body["result"];
    assert_eq!(result["working_days"], 126);
    assert_eq!(result["day_breakdown"]["adjusted_vacation_days"], 12);
    assert_eq!(result["day_breakdown"]["adjusted_training_days"], 2);
    assert_eq!(result["day_breakdown"]["prospecting_days"], 13);
    assert_eq!(result["billable_days"], 99);
    assert_rates(result, "1011", "1214", "1517");
}

#[tokio::test]
async fn test_rates_part_time_2025() {
    let mut request = create_request(2025, 2500, 500);
    request["time_allocation"] = json!({ "working_time_ratio": 80 });
    request["taxes"] = json!({
        "income_tax_percent": 20,
        "social_charges_percent": 20,
        "other_taxes_percent": 10
    });

    let (status, body) = post_rates(create_router_for_test(), request).await;
    assert_eq!(status, StatusCode::OK);

    let result = &body["result"];
    assert_eq!(result["raw_working_days"], 251);
    assert_eq!(result["working_days"], 200);
    assert_eq!(result["billable_days"], 156);
    assert_rates(result, "577", "693", "866");
    assert_decimal(&result["annual_revenue_at_optimal"], "135096");
}

#[tokio::test]
async fn test_rates_excess_vacation_bills_one_day() {
    let mut request = create_request(2024, 2000, 1000);
    request["time_allocation"] = no_time_off();
    request["time_allocation"]["vacation_weeks"] = json!(60);
    request["taxes"] = zero_taxes();

    let (status, body) = post_rates(create_router_for_test(), request).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["result"]["billable_days"], 1);
    assert_rates(&body["result"], "36000", "43200", "54000");

    let warnings = body["audit_trace"]["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|w| w["code"] == "BILLABLE_DAYS_FLOORED"));
}

#[tokio::test]
async fn test_rates_zero_scenario() {
    let request = json!({
        "year": 2024,
        "time_allocation": no_time_off(),
        "taxes": zero_taxes()
    });

    let (status, body) = post_rates(create_router_for_test(), request).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["result"]["billable_days"], 252);
    assert_rates(&body["result"], "0", "0", "0");
    let warnings = body["audit_trace"]["warnings"].as_array().unwrap();
    assert_eq!(warnings[0]["code"], "NO_EXPENSES");
}

#[tokio::test]
async fn test_rates_lenient_ledger_leaves() {
    let request = json!({
        "year": 2024,
        "personal_expenses": {
            "housing": { "rent": "2000", "charges": "n/a", "other": -150 },
            "food": { "groceries": null },
            "notes": "ignored"
        },
        "professional_expenses": {
            "production": { "software": 600.5, "equipment": "399.5" }
        }
    });

    let (status, body) = post_rates(create_router_for_test(), request).await;
    assert_eq!(status, StatusCode::OK);

    let result = &body["result"];
    assert_decimal(&result["personal_expense_total"], "2000");
    assert_decimal(&result["professional_expense_total"], "1000");
    assert_rates(result, "508", "610", "762");
}

// =============================================================================
// SECTION 3: Projections
// =============================================================================

#[tokio::test]
async fn test_net_projection_and_vat() {
    let (_, body) = post_rates(create_router_for_test(), create_request(2024, 2000, 1000)).await;
    let result = &body["result"];

    let projection = &result["net_projection"];
    assert_decimal(&projection["income_tax"], "45034.20");
    assert_decimal(&projection["social_charges"], "33025.08");
    assert_decimal(&projection["other_taxes"], "4503.42");
    assert_decimal(&projection["total_taxes"], "82562.70");
    assert_decimal(&projection["net_annual_revenue"], "67551.30");

    let vat = &result["vat"];
    assert_decimal(&vat["rate_percent"], "20");
    assert_decimal(&vat["minimum"], "609.60");
    assert_decimal(&vat["comfortable"], "732.00");
    assert_decimal(&vat["optimal"], "914.40");

    assert_decimal(&result["monthly_revenue_at_optimal"], "12509.50");
}

// =============================================================================
// SECTION 4: Audit Trace
// =============================================================================

#[tokio::test]
async fn test_audit_trace_contains_steps() {
    let (status, body) = post_rates(create_router_for_test(), create_request(2024, 2000, 1000)).await;
    assert_eq!(status, StatusCode::OK);

    let steps = body["audit_trace"]["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 6);
    for (index, step) in steps.iter().enumerate() {
        assert_eq!(step["step_number"], index + 1);
        assert!(step["rule_id"].is_string());
        assert!(step["reasoning"].is_string());
    }
    assert_eq!(steps[1]["rule_id"], "working_days_calendar");
    assert!(body["audit_trace"]["duration_us"].is_number());
    assert!(body["calculation_id"].is_string());
    assert!(body["timestamp"].is_string());
}

// =============================================================================
// SECTION 5: Result Cache
// =============================================================================

#[tokio::test]
async fn test_last_result_round_trip() {
    let router = create_router_for_test();

    let (status, error) = get_json(router.clone(), "/rates/last").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "NO_CACHED_RESULT");

    let (_, first) = post_rates(router.clone(), create_request(2024, 2000, 1000)).await;
    let (_, second) = post_rates(router.clone(), create_request(2025, 1500, 500)).await;

    let (status, last) = get_json(router, "/rates/last").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(last["calculation_id"], second["calculation_id"]);
    assert_ne!(last["calculation_id"], first["calculation_id"]);
    assert_eq!(last["result"]["year"], 2025);
}

#[tokio::test]
async fn test_last_result_persists_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("last_result.json");

    let state = AppState::with_cache(load_config(), ResultCache::new(), Some(path.clone()));
    let (_, posted) = post_rates(create_router(state), create_request(2024, 2000, 1000)).await;
    assert!(path.exists());

    // A fresh server picks the result up again.
    let restored = ResultCache::load_from(&path).unwrap();
    let state = AppState::with_cache(load_config(), restored, Some(path));
    let (status, last) = get_json(create_router(state), "/rates/last").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(last["calculation_id"], posted["calculation_id"]);
}

// =============================================================================
// SECTION 6: Defaults
// =============================================================================

#[tokio::test]
async fn test_defaults_endpoint() {
    let (status, body) = get_json(create_router_for_test(), "/defaults").await;
    assert_eq!(status, StatusCode::OK);

    assert_decimal(&body["time_allocation"]["working_time_ratio"], "100");
    assert_decimal(&body["time_allocation"]["vacation_weeks"], "5");
    assert_decimal(&body["taxes"]["social_charges_percent"], "22");
    assert_decimal(&body["vat_percent"], "20");
    assert_eq!(body["personal_expenses"]["housing"]["propertyTax"], 0);
    assert_eq!(body["professional_expenses"]["charges"]["socialCharges"], 0);
}

// =============================================================================
// SECTION 7: Error Cases
// =============================================================================

#[tokio::test]
async fn test_error_ratio_above_100() {
    let mut request = create_request(2024, 2000, 1000);
    request["time_allocation"] = json!({ "working_time_ratio": 120 });

    let (status, error) = post_rates(create_router_for_test(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_PARAMETER");
    assert_eq!(error["details"], "working_time_ratio");
}

#[tokio::test]
async fn test_error_negative_weeks() {
    let mut request = create_request(2024, 2000, 1000);
    request["time_allocation"] = json!({ "training_weeks": -1 });

    let (status, error) = post_rates(create_router_for_test(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["details"], "training_weeks");
}

#[tokio::test]
async fn test_error_taxes_reach_100_percent() {
    let mut request = create_request(2024, 2000, 1000);
    request["taxes"] = json!({
        "income_tax_percent": 50,
        "social_charges_percent": 45,
        "other_taxes_percent": 5
    });

    let (status, error) = post_rates(create_router_for_test(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "TAX_RATE_OUT_OF_RANGE");
}

#[tokio::test]
async fn test_error_tax_percent_at_decimal_max() {
    let mut request = create_request(2024, 2000, 1000);
    request["taxes"] = json!({
        "income_tax_percent": "79228162514264337593543950335",
        "social_charges_percent": "79228162514264337593543950335"
    });

    let (status, error) = post_rates(create_router_for_test(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_PARAMETER");
    assert_eq!(error["details"], "income_tax_percent");
}

#[tokio::test]
async fn test_error_unsupported_year() {
    let (status, error) = post_rates(create_router_for_test(), create_request(1500, 2000, 1000)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_YEAR");

    let (status, error) = get_json(create_router_for_test(), "/calendar/twenty").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_YEAR");
}

#[tokio::test]
async fn test_error_malformed_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/rates")
        .header("Content-Type", "application/json")
        .body(Body::from("{ \"year\": "))
        .unwrap();

    let (status, error) = send(create_router_for_test(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_error_failed_request_does_not_touch_cache() {
    let router = create_router_for_test();
    let mut request = create_request(2024, 2000, 1000);
    request["time_allocation"] = json!({ "prospecting_percent": 101 });

    let (status, _) = post_rates(router.clone(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(router, "/rates/last").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
