use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

/// Body for both create and update. On update the `userId` field is
/// ignored: the stored owner link is never reassigned.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRequest {
    pub name: String,
    pub location: String,
    pub start_date: Date,
    pub end_date: Date,
    #[serde(default)]
    pub notes: Option<String>,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResponse {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub start_date: Date,
    pub end_date: Date,
    pub notes: Option<String>,
    pub user_id: Uuid,
}

impl From<crate::itineraries::repo::Itinerary> for ItineraryResponse {
    fn from(i: crate::itineraries::repo::Itinerary) -> Self {
        Self {
            id: i.id,
            name: i.name,
            location: i.location,
            start_date: i.start_date,
            end_date: i.end_date,
            notes: i.notes,
            user_id: i.user_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItinerariesParams {
    pub user_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn request_parses_iso_dates() {
        let req: ItineraryRequest = serde_json::from_str(
            r#"{
                "name": "Lisbon week",
                "location": "Lisbon",
                "startDate": "2026-09-01",
                "endDate": "2026-09-07",
                "userId": "00000000-0000-0000-0000-000000000007"
            }"#,
        )
        .unwrap();
        assert_eq!(req.start_date, date!(2026 - 09 - 01));
        assert_eq!(req.end_date, date!(2026 - 09 - 07));
        assert_eq!(req.notes, None);
    }

    #[test]
    fn response_uses_camel_case() {
        let res = ItineraryResponse {
            id: Uuid::nil(),
            name: "Lisbon week".into(),
            location: "Lisbon".into(),
            start_date: date!(2026 - 09 - 01),
            end_date: date!(2026 - 09 - 07),
            notes: None,
            user_id: Uuid::nil(),
        };
        let json = serde_json::to_string(&res).unwrap();
        assert!(json.contains("startDate"));
        assert!(json.contains("endDate"));
        assert!(json.contains("userId"));
    }
}
