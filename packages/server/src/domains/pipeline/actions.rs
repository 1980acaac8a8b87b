use tracing::{info, warn};

use super::data::{DisasterResponse, ProcessRequest};
use super::fixtures;
use crate::common::{DisasterType, PipelineError, PipelineResult};
use crate::domains::alerts::{fetch_alert_feed, ingest_alerts};
use crate::domains::classifier::select_best_samples;
use crate::domains::extraction::{
    extract_relevant_info, format_training_samples, DisasterData, FormattedSample,
};
use crate::domains::reports::generate_report;
use crate::domains::scraping::{scrape_page, ScrapeRequest};
use crate::domains::social::fetch_social_posts;
use crate::kernel::ServerDeps;

/// Location used for the demo path when the model names no district.
const UNKNOWN_LOCATION: &str = "unknown";

/// Full pipeline: scrape → alerts → social → extract → (train) → report.
///
/// Steps run one after another. Alert feed failures are logged and skipped;
/// every other failure aborts the run.
pub async fn process_disaster_data(
    request: ProcessRequest,
    deps: &ServerDeps,
) -> PipelineResult<DisasterResponse> {
    let request = request.normalized()?;
    info!(
        disaster_type = %request.disaster_type,
        location = %request.location,
        url = %request.url,
        train = request.train,
        "Processing disaster data"
    );

    let page = scrape_page(
        &ScrapeRequest {
            url: request.url.clone(),
            disaster_type: request.disaster_type.clone(),
            location: request.location.clone(),
            latitude: request.lat,
            longitude: request.lon,
        },
        deps,
    )
    .await?;
    let weather = page.weather();

    let alert_feed = match fetch_alert_feed(deps).await {
        Ok(payload) => {
            if let Err(e) = ingest_alerts(&payload, deps).await {
                warn!(error = %e, "Alert ingestion failed");
            }
            Some(payload)
        }
        Err(e) => {
            warn!(error = %e, kind = e.kind(), "Alert feed unavailable, continuing");
            None
        }
    };

    let social_posts =
        fetch_social_posts(&request.disaster_type, &request.location, deps).await?;

    let mut data = DisasterData::new(&request.disaster_type, &request.location);
    data.scraped_pages = vec![page];
    data.social_posts = social_posts.clone();
    data.weather = weather.clone();
    if let Some(payload) = &alert_feed {
        data = data.with_alert_feed(payload);
    }

    let extracted = extract_relevant_info(&data, deps).await?;

    let best_samples = if request.train || deps.settings.train_classifier {
        train_on_samples(&request, &data, deps).await?
    } else {
        Vec::new()
    };

    let report = generate_report(&extracted, &request.location, &best_samples, deps).await?;

    info!(report_id = %report.id, "Disaster data processed");
    Ok(DisasterResponse::assemble(
        extracted,
        report,
        &social_posts,
        weather,
    ))
}

/// Format and store samples, then train. Too few samples is not fatal.
async fn train_on_samples(
    request: &ProcessRequest,
    data: &DisasterData,
    deps: &ServerDeps,
) -> PipelineResult<Vec<FormattedSample>> {
    format_training_samples(&request.disaster_type, &request.location, data, deps).await?;

    match select_best_samples(&request.disaster_type, &request.location, deps).await {
        Ok(best) => Ok(best),
        Err(PipelineError::InsufficientData(reason)) => {
            warn!(reason = %reason, "Skipping classifier");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// Demo path over a canned fixture: extract → report → social insights.
pub async fn process_fixture(
    disaster_type: DisasterType,
    deps: &ServerDeps,
) -> PipelineResult<DisasterResponse> {
    info!(disaster_type = %disaster_type, "Processing demo fixture");
    let data = fixtures::fixture(disaster_type);

    let extracted = extract_relevant_info(&data, deps).await?;
    let location = extracted
        .affected_districts
        .first()
        .cloned()
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());

    let report = generate_report(&extracted, &location, &[], deps).await?;
    let social_posts = fetch_social_posts(&extracted.disaster_type, &location, deps).await?;

    Ok(DisasterResponse::assemble(
        extracted,
        report,
        &social_posts,
        None,
    ))
}
