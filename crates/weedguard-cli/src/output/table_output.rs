//! Table formatting for CLI output

use chrono::{DateTime, Local, Utc};
use tabled::{settings::Style, Table, Tabled};
use weedguard_sdk::types::{MonthlyTrend, Prediction, RecentActivity, WeedStatistic};

/// Format a UTC timestamp as local `YY-MM-DD HH:MM:SS`
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%y-%m-%d %H:%M:%S")
        .to_string()
}

/// Display predictions in table format
pub fn display_predictions(predictions: &[Prediction]) {
    #[derive(Tabled)]
    struct PredictionRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Site")]
        site_name: String,
        #[tabled(rename = "Location")]
        location: String,
        #[tabled(rename = "Result")]
        result: String,
        #[tabled(rename = "Date")]
        date: String,
    }

    let rows: Vec<PredictionRow> = predictions
        .iter()
        .map(|prediction| PredictionRow {
            id: prediction.id.clone(),
            site_name: prediction.site_name.clone(),
            location: prediction.location.clone(),
            result: prediction.result.clone(),
            date: format_timestamp(&prediction.timestamp),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("{table}");
}

/// Display per-result prediction counts in table format
pub fn display_weed_statistics(statistics: &[WeedStatistic]) {
    #[derive(Tabled)]
    struct StatisticRow {
        #[tabled(rename = "Result")]
        result: String,
        #[tabled(rename = "Count")]
        count: u64,
    }

    let rows: Vec<StatisticRow> = statistics
        .iter()
        .map(|stat| StatisticRow {
            result: stat.result.clone(),
            count: stat.count,
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("{table}");
}

/// Display monthly prediction volume in table format
pub fn display_monthly_trends(trends: &[MonthlyTrend]) {
    #[derive(Tabled)]
    struct TrendRow {
        #[tabled(rename = "Month")]
        month: String,
        #[tabled(rename = "Predictions")]
        count: u64,
    }

    let rows: Vec<TrendRow> = trends
        .iter()
        .map(|trend| TrendRow {
            month: trend.month.clone(),
            count: trend.count,
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("{table}");
}

/// Display recent activity entries in table format
pub fn display_recent_activity(activity: &[RecentActivity]) {
    #[derive(Tabled)]
    struct ActivityRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Site")]
        site_name: String,
        #[tabled(rename = "Location")]
        location: String,
        #[tabled(rename = "Result")]
        result: String,
    }

    let rows: Vec<ActivityRow> = activity
        .iter()
        .map(|entry| ActivityRow {
            date: format_timestamp(&entry.timestamp),
            site_name: entry.site_name.clone(),
            location: entry.location.clone(),
            result: entry.result.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("{table}");
}
