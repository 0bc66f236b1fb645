use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leave_accrual_backend::{
    config::Config,
    models::holiday::HolidayCalendar,
    repositories::JsonFileEmployeeRepository,
    services::{accrual::LeaveAccrualCalculator, leave::LeaveService},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leave_accrual_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    let as_of = config.as_of_date();
    tracing::info!(
        employees_path = %config.employees_path.display(),
        holiday_calendar_path = %config.holiday_calendar_path.display(),
        time_zone = %config.time_zone,
        %as_of,
        "Loaded configuration from environment/.env"
    );

    let calendar = HolidayCalendar::from_file(&config.holiday_calendar_path)?;
    tracing::info!(
        version = calendar.version(),
        years = ?calendar.year_span(),
        rest_days = ?calendar.rest_days(),
        "Loaded holiday calendar"
    );

    let repo = Arc::new(JsonFileEmployeeRepository::new(config.employees_path.clone()));
    let service = LeaveService::new(repo, LeaveAccrualCalculator::new(calendar));

    let report = service.recalculate_all(as_of).await?;
    for failure in &report.failures {
        tracing::error!(
            position = failure.position,
            employee_id = ?failure.employee_id,
            name = ?failure.name,
            error = %failure.error,
            "Employee leave was not recalculated"
        );
    }

    tracing::info!(
        processed = report.processed(),
        updated = report.updated,
        failed = report.failures.len(),
        "Leave recalculation completed"
    );

    Ok(())
}
