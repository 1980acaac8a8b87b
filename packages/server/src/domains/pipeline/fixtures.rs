//! Canned inputs for the demo endpoint, one per supported disaster type.

use serde_json::{json, Value};

use crate::common::DisasterType;
use crate::domains::extraction::DisasterData;

fn as_vec(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

fn build(
    disaster_type: DisasterType,
    location: &str,
    news: Value,
    events: Value,
    reports: Value,
    weather: Value,
) -> DisasterData {
    DisasterData {
        news_articles: as_vec(news),
        disaster_events: as_vec(events),
        ai_reports: as_vec(reports),
        weather_data: as_vec(weather),
        ..DisasterData::new(disaster_type.as_str(), location)
    }
}

pub fn fixture(disaster_type: DisasterType) -> DisasterData {
    match disaster_type {
        DisasterType::Flood => flood(),
        DisasterType::Earthquake => earthquake(),
        DisasterType::Cyclone => cyclone(),
        DisasterType::Wildfire => wildfire(),
        DisasterType::Landslide => landslide(),
    }
}

fn flood() -> DisasterData {
    build(
        DisasterType::Flood,
        "East District",
        json!([{
            "article_id": "news123",
            "title": "Severe Flooding in Eastern Districts",
            "link": "https://example.com/news/123",
            "description": "Heavy rainfall has caused severe flooding in multiple districts",
            "content": "The recent heavy rainfall has resulted in severe flooding across the eastern districts. Rivers have overflowed and several dams are at critical levels. Local authorities have begun evacuation operations.",
            "pubDate": "2025-03-29T12:00:00Z",
            "source_name": "Regional News Network",
            "language": "en",
            "country": ["India"],
            "category": ["disaster", "flood", "weather"],
            "sentiment": "negative",
            "ai_tag": ["flooding", "evacuation", "eastern region"]
        }]),
        json!([{
            "event_id": "flood123",
            "event_type": "flood",
            "severity": 8.5,
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[85.123, 25.456], [85.234, 25.567], [85.345, 25.456], [85.123, 25.456]]]
            },
            "affected_regions": ["East District", "North District", "Central Region"],
            "timestamp": "2025-03-28T12:00:00Z",
            "source": "Regional Disaster Management Authority"
        }]),
        json!([{
            "report_id": "ai123",
            "location": "Eastern Region",
            "summary": "Severe flooding affecting three districts with approximately 50,000 people impacted.",
            "detailed_report": "The flooding began after 72 hours of continuous rainfall. Water levels in the main river have risen by 3.2 meters above the danger mark. Five villages are completely submerged, and fifteen others are partially affected. Infrastructure damage includes three bridges and approximately 25 km of roads.",
            "severity_index": 8.2,
            "top_affected_areas": {"East District": 0.85, "North District": 0.75, "Central Region": 0.65}
        }]),
        json!([{
            "location_id": "loc123",
            "location_name": "East District",
            "temperature": 27.5,
            "humidity": 95,
            "wind_speed": 15.2,
            "rainfall": 320.5,
            "air_quality_index": 85,
            "timestamp": "2025-03-29T18:00:00Z"
        }]),
    )
}

fn earthquake() -> DisasterData {
    build(
        DisasterType::Earthquake,
        "Hill District",
        json!([{
            "article_id": "news456",
            "title": "Magnitude 6.8 Earthquake Strikes Hill District",
            "description": "A strong earthquake has damaged buildings across the hill towns",
            "content": "A magnitude 6.8 earthquake struck at a depth of 12 km early this morning. Several multi-storey buildings have collapsed in the district headquarters and landslides have blocked the main highway. Rescue teams are searching for people trapped under debris.",
            "pubDate": "2025-04-02T04:30:00Z",
            "source_name": "National Broadcast",
            "category": ["disaster", "earthquake"],
            "sentiment": "negative"
        }]),
        json!([{
            "event_id": "eq456",
            "event_type": "earthquake",
            "severity": 7.9,
            "magnitude": 6.8,
            "depth_km": 12,
            "epicenter": {"lat": 27.71, "lon": 85.32},
            "affected_regions": ["Hill District", "River Valley", "Upper Ridge"],
            "timestamp": "2025-04-02T03:58:00Z",
            "source": "Seismological Centre"
        }]),
        json!([{
            "report_id": "ai456",
            "location": "Hill District",
            "summary": "Major structural damage in three towns; an estimated 30,000 people displaced.",
            "detailed_report": "Twelve aftershocks above magnitude 4 have been recorded. Hospitals in the district headquarters are operating at reduced capacity due to structural cracks. Water supply lines are broken in two wards.",
            "severity_index": 7.6,
            "top_affected_areas": {"Hill District": 0.9, "River Valley": 0.6}
        }]),
        json!([{
            "location_name": "Hill District",
            "temperature": 14.0,
            "humidity": 60,
            "wind_speed": 4.1,
            "rainfall": 0.0,
            "timestamp": "2025-04-02T06:00:00Z"
        }]),
    )
}

fn cyclone() -> DisasterData {
    build(
        DisasterType::Cyclone,
        "Coastal District",
        json!([{
            "article_id": "news789",
            "title": "Severe Cyclone Makes Landfall on the Coast",
            "description": "Winds of up to 180 km/h battered coastal villages overnight",
            "content": "The cyclone made landfall near the port town with sustained winds of 180 km/h and a storm surge of 3 meters. Power lines are down across the coastal belt and thousands of fishing boats have been damaged.",
            "pubDate": "2025-05-18T22:00:00Z",
            "source_name": "Coastal Times",
            "category": ["disaster", "cyclone", "weather"],
            "sentiment": "negative"
        }]),
        json!([{
            "event_id": "cy789",
            "event_type": "cyclone",
            "severity": 8.8,
            "wind_speed_kmh": 180,
            "central_pressure_hpa": 950,
            "storm_surge_m": 3.0,
            "affected_regions": ["Coastal District", "Delta Block", "Port Town"],
            "timestamp": "2025-05-18T20:00:00Z",
            "source": "Meteorological Department"
        }]),
        json!([{
            "report_id": "ai789",
            "location": "Coastal District",
            "summary": "Over 200,000 people evacuated ahead of landfall; widespread power outages.",
            "detailed_report": "Storm surge flooded low-lying villages up to 2 km inland. Two cyclone shelters report overcrowding. Road access to the delta block is cut off by fallen trees.",
            "severity_index": 8.5,
            "top_affected_areas": {"Coastal District": 0.9, "Delta Block": 0.8, "Port Town": 0.7}
        }]),
        json!([{
            "location_name": "Coastal District",
            "temperature": 26.0,
            "humidity": 98,
            "wind_speed": 50.0,
            "rainfall": 210.0,
            "timestamp": "2025-05-19T00:00:00Z"
        }]),
    )
}

fn wildfire() -> DisasterData {
    build(
        DisasterType::Wildfire,
        "Forest Range",
        json!([{
            "article_id": "news321",
            "title": "Wildfire Spreads Across Forest Range",
            "description": "Dry winds push the fire towards hillside settlements",
            "content": "The wildfire has burned more than 4,500 hectares and is 20 percent contained. Smoke has pushed the air quality index above 300 in nearby towns, and two villages have been ordered to evacuate.",
            "pubDate": "2025-04-20T15:00:00Z",
            "source_name": "Mountain Herald",
            "category": ["disaster", "wildfire"],
            "sentiment": "negative"
        }]),
        json!([{
            "event_id": "wf321",
            "event_type": "wildfire",
            "severity": 7.2,
            "area_burned_ha": 4500,
            "containment_percent": 20,
            "affected_regions": ["Forest Range", "Pine Valley"],
            "timestamp": "2025-04-20T12:00:00Z",
            "source": "Forest Department"
        }]),
        json!([{
            "report_id": "ai321",
            "location": "Forest Range",
            "summary": "Fire expanding under dry winds; 8,000 residents at risk.",
            "detailed_report": "Firefighting crews are building containment lines on the eastern flank. Respiratory complaints have tripled at the district hospital. Water sources for aerial firefighting are limited.",
            "severity_index": 7.0,
            "top_affected_areas": {"Forest Range": 0.85, "Pine Valley": 0.6}
        }]),
        json!([{
            "location_name": "Forest Range",
            "temperature": 36.5,
            "humidity": 12,
            "wind_speed": 9.5,
            "rainfall": 0.0,
            "air_quality_index": 310,
            "timestamp": "2025-04-20T14:00:00Z"
        }]),
    )
}

fn landslide() -> DisasterData {
    build(
        DisasterType::Landslide,
        "Ridge District",
        json!([{
            "article_id": "news654",
            "title": "Landslides Bury Homes After Days of Rain",
            "description": "Multiple slope failures have cut off mountain villages",
            "content": "Continuous rainfall over four days triggered several landslides along the ridge road. At least 40 homes are buried and the only highway connecting six villages is blocked by debris.",
            "pubDate": "2025-07-11T09:00:00Z",
            "source_name": "Hill News",
            "category": ["disaster", "landslide"],
            "sentiment": "negative"
        }]),
        json!([{
            "event_id": "ls654",
            "event_type": "landslide",
            "severity": 7.4,
            "slope_failures": 6,
            "soil_saturation_percent": 92,
            "affected_regions": ["Ridge District", "Upper Villages"],
            "timestamp": "2025-07-11T05:00:00Z",
            "source": "Geological Survey"
        }]),
        json!([{
            "report_id": "ai654",
            "location": "Ridge District",
            "summary": "Six villages isolated; about 5,000 people without road access.",
            "detailed_report": "Soil on adjacent slopes remains saturated and further failures are likely if rain continues. Helicopter drops are the only supply route until the highway is cleared.",
            "severity_index": 7.3,
            "top_affected_areas": {"Ridge District": 0.8, "Upper Villages": 0.75}
        }]),
        json!([{
            "location_name": "Ridge District",
            "temperature": 19.0,
            "humidity": 90,
            "wind_speed": 3.0,
            "rainfall": 145.0,
            "timestamp": "2025-07-11T08:00:00Z"
        }]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_a_complete_fixture() {
        for disaster_type in DisasterType::ALL {
            let data = fixture(disaster_type);
            assert_eq!(data.disaster_type, disaster_type.as_str());
            assert_eq!(data.news_articles.len(), 1);
            assert_eq!(data.disaster_events.len(), 1);
            assert_eq!(data.ai_reports.len(), 1);
            assert_eq!(data.weather_data.len(), 1);
        }
    }
}
