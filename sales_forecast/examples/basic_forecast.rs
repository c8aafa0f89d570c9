use chrono::{Duration, NaiveDate};
use sales_forecast::synthetic::generate_history;
use sales_forecast::{ForecastEngine, ForecastRange};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Three months of synthetic store history
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid start date")?;
    let history = generate_history(start, 90, 1500.0, 0.15, 2024)?;
    let today = start + Duration::days(90);

    let engine = ForecastEngine::new();
    let outcome = engine.forecast_from(&history, ForecastRange::FourteenDays, today);

    println!("Confidence: {}%", outcome.confidence);
    println!("{:<12} {:>8} {:>17} {:>7}", "date", "sales", "range", "orders");
    for point in &outcome.points {
        println!(
            "{:<12} {:>8} {:>8}-{:<8} {:>7}",
            point.date, point.sales, point.sales_lower, point.sales_upper, point.orders
        );
    }

    let summary = outcome.summary();
    println!(
        "Next {} days: {} in sales across {} orders",
        summary.days, summary.total_sales, summary.total_orders
    );

    Ok(())
}
