//! One-off geocoding lookups from the command line.

use console::style;

use geoproxy::config::Settings;
use geoproxy::geo::{Feature, GeoError, GeoLookup, MapboxGeoService};

/// Forward geocode free text and print the results.
pub async fn cmd_locate(settings: &Settings, text: &str, json: bool) -> anyhow::Result<()> {
    let service = MapboxGeoService::from_settings(settings)?;
    let features = service
        .search_by_location(text)
        .await
        .map_err(describe_error)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&features)?);
    } else {
        print_features(&format!("Results for \"{}\"", text), &features);
    }
    Ok(())
}

/// Reverse geocode a coordinate pair and print the result.
pub async fn cmd_reverse(settings: &Settings, lat: f64, lng: f64, json: bool) -> anyhow::Result<()> {
    let service = MapboxGeoService::from_settings(settings)?;
    let features = service
        .search_by_coords(lat, lng)
        .await
        .map_err(describe_error)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&features)?);
    } else {
        print_features(&format!("Location at {}, {}", lat, lng), &features);
    }
    Ok(())
}

fn describe_error(err: GeoError) -> anyhow::Error {
    if err.is_provider_rejected() {
        anyhow::anyhow!("{} (check GEOCODE_API_KEY)", err)
    } else {
        err.into()
    }
}

fn print_features(title: &str, features: &[Feature]) {
    println!("{}", style(title).bold());

    if features.is_empty() {
        println!("  {}", style("No results").dim());
        return;
    }

    for (i, feature) in features.iter().enumerate() {
        println!("{}", format_feature(i + 1, feature));
    }
}

fn format_feature(rank: usize, feature: &Feature) -> String {
    let name = feature.place_name().unwrap_or("(unnamed)");
    let mut line = format!("  {}. {}", rank, name);

    if let Some((lng, lat)) = feature.center() {
        line.push_str(&format!(" (lat: {}, lng: {})", lat, lng));
    }
    if let Some(relevance) = feature.relevance() {
        line.push_str(&format!(" [relevance {:.2}]", relevance));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_feature_full() {
        let feature = Feature::new(json!({
            "place_name": "Chicago, Illinois, United States",
            "center": [-87.6244, 41.8756],
            "relevance": 1
        }));
        assert_eq!(
            format_feature(1, &feature),
            "  1. Chicago, Illinois, United States (lat: 41.8756, lng: -87.6244) [relevance 1.00]"
        );
    }

    #[test]
    fn test_format_feature_sparse() {
        let feature = Feature::new(json!({"id": 7}));
        assert_eq!(format_feature(3, &feature), "  3. (unnamed)");
    }

    #[test]
    fn test_rejection_hint() {
        let err = describe_error(GeoError::ProviderRejected { status: 401 });
        assert!(err.to_string().contains("GEOCODE_API_KEY"));
    }
}
