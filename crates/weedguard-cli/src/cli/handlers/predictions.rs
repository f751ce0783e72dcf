//! Prediction upload and browsing handlers

use std::path::{Path, PathBuf};

use crate::config::CliConfig;
use crate::error::Result;
use crate::output::{json_output, print_info, print_success, table_output};
use crate::progress::{complete_spinner_and_clear, complete_spinner_error, create_spinner};
use weedguard_sdk::types::PredictionUpload;
use weedguard_sdk::ApiError;

/// Handle predict command: upload one image with its metadata
pub async fn handle_predict(
    image: PathBuf,
    site_name: String,
    location: String,
    farmer_id: String,
    config: &CliConfig,
) -> Result<()> {
    let bytes = tokio::fs::read(&image).await?;
    let file_name = image
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.jpg")
        .to_string();
    let mime_type = mime_for(&image);

    let upload = PredictionUpload {
        image: bytes,
        file_name,
        mime_type,
        site_name,
        location,
        farmer_id,
    };

    let client = config.client()?;
    let spinner = create_spinner("Uploading image for prediction...");
    match client.upload_prediction(&upload).await {
        Ok(outcome) => {
            complete_spinner_and_clear(spinner);
            print_success(&format!("Prediction: {}", outcome.result));
            Ok(())
        }
        Err(err) => {
            complete_spinner_error(spinner, "Upload failed");
            login_hint(&err);
            Err(err.into())
        }
    }
}

/// Handle predictions list command
pub async fn handle_list(config: &CliConfig, json: bool) -> Result<()> {
    let client = config.client()?;
    let predictions = client.list_predictions().await.inspect_err(login_hint)?;

    if json {
        return json_output(&predictions);
    }
    if predictions.is_empty() {
        print_info("No predictions available");
        return Ok(());
    }
    table_output::display_predictions(&predictions);
    Ok(())
}

/// Handle prediction detail command
pub async fn handle_show(id: &str, config: &CliConfig, json: bool) -> Result<()> {
    let client = config.client()?;
    let prediction = client.get_prediction(id).await.inspect_err(login_hint)?;

    if json {
        return json_output(&prediction);
    }
    println!("Site:     {}", prediction.site_name);
    println!("Location: {}", prediction.location);
    println!("Result:   {}", prediction.result);
    println!(
        "Date:     {}",
        table_output::format_timestamp(&prediction.timestamp)
    );
    Ok(())
}

fn login_hint(err: &ApiError) {
    if err.is_auth_expired() {
        print_info("Session expired. Run 'weedguard login' to authenticate again");
    }
}

/// MIME type from the file extension; the backend only accepts images.
fn mime_for(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_detection_covers_common_image_types() {
        assert_eq!(mime_for(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_for(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("a.png")), "image/png");
        assert_eq!(mime_for(Path::new("a.bin")), "application/octet-stream");
        assert_eq!(mime_for(Path::new("noext")), "application/octet-stream");
    }
}
