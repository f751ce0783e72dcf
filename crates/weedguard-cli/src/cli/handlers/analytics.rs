//! Analytics dashboard handler

use crate::config::CliConfig;
use crate::error::Result;
use crate::output::{json_output, print_info, table_output};
use console::style;

/// Handle analytics command
pub async fn handle_analytics(config: &CliConfig, json: bool) -> Result<()> {
    let client = config.client()?;
    let summary = client.analytics_summary().await?;

    if json {
        return json_output(&summary);
    }

    println!("{}", style("Overview").bold());
    println!("  Total predictions:  {}", summary.overview.total_predictions);
    println!("  Recent predictions: {}", summary.overview.recent_predictions);
    println!("  Unique locations:   {}", summary.overview.unique_locations);
    println!("  Unique sites:       {}", summary.overview.unique_sites);
    println!();

    if summary.weed_statistics.is_empty() {
        print_info("No weed statistics yet");
    } else {
        println!("{}", style("Results").bold());
        table_output::display_weed_statistics(&summary.weed_statistics);
    }

    if !summary.monthly_trends.is_empty() {
        println!("{}", style("Monthly trend").bold());
        table_output::display_monthly_trends(&summary.monthly_trends);
    }

    if !summary.recent_activity.is_empty() {
        println!("{}", style("Recent activity").bold());
        table_output::display_recent_activity(&summary.recent_activity);
    }

    Ok(())
}
