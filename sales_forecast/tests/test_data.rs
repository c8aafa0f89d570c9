use chrono::NaiveDate;
use sales_forecast::{ForecastEngine, ForecastError, ForecastRange, Observation};
use serde_json::json;

#[test]
fn test_forecast_point_wire_format() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let history: Vec<Observation> = start
        .iter_days()
        .take(8)
        .map(|d| Observation::on_date(d, 120.0, 12.0))
        .collect();
    let today = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
    let outcome = ForecastEngine::new().forecast_from(&history, ForecastRange::SevenDays, today);

    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(
        value["points"][0],
        json!({
            "date": "2024-01-09",
            "sales": 120,
            "orders": 12,
            "salesLower": 120,
            "salesUpper": 120,
            "ordersLower": 12,
            "ordersUpper": 12,
            "isForecast": true
        })
    );
    assert!(value["confidence"].is_u64());
}

#[test]
fn test_range_serializes_as_wire_string() {
    assert_eq!(
        serde_json::to_string(&ForecastRange::ThreeMonths).unwrap(),
        "\"3months\""
    );
    let range: ForecastRange = serde_json::from_str("\"14d\"").unwrap();
    assert_eq!(range, ForecastRange::FourteenDays);
}

#[test]
fn test_observation_deserializes_from_json() {
    let obs: Observation = serde_json::from_value(json!({
        "timestamp": "2024-02-01T00:00:00Z",
        "sales": 99.5,
        "orders": 3.0
    }))
    .unwrap();
    assert_eq!(obs.timestamp.date_naive(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    assert_eq!(obs.sales, 99.5);
}

#[test]
fn test_error_display() {
    let err = "fortnight".parse::<ForecastRange>().unwrap_err();
    assert!(matches!(err, ForecastError::InvalidParameter(_)));
    assert_eq!(err.to_string(), "Invalid parameter: Unsupported forecast range: fortnight");

    let math = sales_math::MathError::CalculationError("zero mean".to_string());
    let err = ForecastError::from(math);
    assert!(err.to_string().starts_with("Math error:"));
}
