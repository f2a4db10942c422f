use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, Time};
use uuid::Uuid;

/// Body for both create and update. On update the `itineraryId` field is
/// ignored: the stored parent link is never reassigned.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    pub name: String,
    pub location: String,
    pub start_time: Time,
    pub duration_minutes: i32,
    pub cost: Decimal,
    pub date: Date,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    pub itinerary_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub start_time: Time,
    pub duration_minutes: i32,
    // Rendered as a bare JSON number, the shape the web client already
    // consumes. Arithmetic stays in Decimal; only the output is a float.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub cost: Decimal,
    pub date: Date,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
    pub itinerary_id: Uuid,
}

impl From<crate::activities::repo::Activity> for ActivityResponse {
    fn from(a: crate::activities::repo::Activity) -> Self {
        Self {
            id: a.id,
            name: a.name,
            location: a.location,
            start_time: a.start_time,
            duration_minutes: a.duration_minutes,
            cost: a.cost,
            date: a.date,
            latitude: a.latitude,
            longitude: a.longitude,
            notes: a.notes,
            itinerary_id: a.itinerary_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListActivitiesParams {
    pub itinerary_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct DateParam {
    pub date: Date,
}

/// Budget total for an itinerary, serialized as a bare JSON number.
#[derive(Debug, Serialize)]
pub struct CostTotal(
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")] pub Decimal,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::{date, time};

    #[test]
    fn request_parses_camel_case_fields() {
        let body = json!({
            "name": "Tram 28 ride",
            "location": "Lisbon",
            "startTime": serde_json::to_value(time!(09:30)).unwrap(),
            "durationMinutes": 45,
            "cost": "12.50",
            "date": "2026-09-02",
            "itineraryId": "00000000-0000-0000-0000-000000000001"
        });
        let req: ActivityRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.start_time, time!(09:30));
        assert_eq!(req.duration_minutes, 45);
        assert_eq!(req.cost, Decimal::new(1250, 2));
        assert_eq!(req.date, date!(2026 - 09 - 02));
        assert_eq!(req.latitude, None);
        assert_eq!(req.notes, None);
    }

    #[test]
    fn response_uses_camel_case() {
        let res = ActivityResponse {
            id: Uuid::nil(),
            name: "Tram 28 ride".into(),
            location: "Lisbon".into(),
            start_time: time!(09:30),
            duration_minutes: 45,
            cost: Decimal::new(1250, 2),
            date: date!(2026 - 09 - 02),
            latitude: Some(38.7125),
            longitude: Some(-9.1332),
            notes: None,
            itinerary_id: Uuid::nil(),
        };
        let json = serde_json::to_string(&res).unwrap();
        assert!(json.contains("startTime"));
        assert!(json.contains("durationMinutes"));
        assert!(json.contains("itineraryId"));
        assert!(json.contains(r#""cost":12.5"#));
    }

    #[test]
    fn cost_total_serializes_as_json_number() {
        let json = serde_json::to_string(&CostTotal(Decimal::new(1975, 2))).unwrap();
        assert_eq!(json, "19.75");
    }
}
