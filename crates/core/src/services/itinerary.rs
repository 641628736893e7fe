//! Itinerary aggregation.
//!
//! Folds the denormalized row set produced by
//! `TourRepository::itinerary_rows` (one row per tour x schedule-day x
//! activity combination, gallery URLs pre-joined into a comma-separated
//! string) into nested tour -> schedules -> activities views.
//!
//! The fold is a pure, single-pass function over an already-fetched row
//! sequence; it holds no shared state, so concurrent requests each run
//! their own fold independently.

use std::collections::HashMap;

use serde::Serialize;
use wayfare_db::repositories::ItineraryRow;

/// Substitutes for null scalar columns, applied in one place so tests can
/// enumerate every default.
///
/// | field                                            | default   |
/// |--------------------------------------------------|-----------|
/// | `price_adult`, `price_child`, `price_baby`       | `"0.00"`  |
/// | `status`                                         | `"draft"` |
/// | `agency_name`, `country`, `city`, `service`      | `""`      |
/// | `itinerary`, `duration`, `departure_date`,       | `""`      |
/// | `departure_place`, `public_id`, `cover_photo`,   | `""`      |
/// | `description`, `created_at`, `updated_at`        | `""`      |
pub mod defaults {
    /// Default for missing price tiers.
    pub const PRICE: &str = "0.00";
    /// Default for a missing status.
    pub const STATUS: &str = "draft";
    /// Default for missing text and timestamp fields.
    pub const TEXT: &str = "";
}

/// A timed activity within a schedule day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityView {
    pub time: String,
    pub activity: String,
}

/// One day of a tour's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleView {
    pub day: i32,
    pub summary: String,
    pub activities: Vec<ActivityView>,
}

/// Fully aggregated tour, as served by the read API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TourView {
    pub id: String,
    pub agency_id: String,
    pub agency_name: String,
    pub tour_name: String,
    pub country: String,
    pub city: String,
    pub service: String,
    pub itinerary: String,
    pub duration: String,
    pub departure_date: String,
    pub departure_place: String,
    pub public_id: String,
    pub cover_photo: String,
    pub description: String,
    pub price_adult: String,
    pub price_child: String,
    pub price_baby: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub galleries: Vec<String>,
    pub schedules: Vec<ScheduleView>,
}

/// Fold a flat itinerary row sequence into one [`TourView`] per distinct
/// tour id, preserving first-seen order of tour ids.
///
/// Guarantees:
/// - exactly one view per distinct tour id, however many rows it spans;
/// - no row dropped, no activity fabricated or deduplicated;
/// - idempotent: the same rows always produce the same views;
/// - schedule order is first-encountered day order (the row source
///   orders by day number ascending, so the output is ascending too --
///   the fold itself never resorts).
#[must_use]
pub fn build_tour_views(rows: &[ItineraryRow]) -> Vec<TourView> {
    let mut views: Vec<TourView> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let idx = match index_by_id.get(&row.id) {
            Some(&idx) => idx,
            None => {
                views.push(new_view(row));
                index_by_id.insert(row.id.clone(), views.len() - 1);
                views.len() - 1
            }
        };
        let view = &mut views[idx];

        if let Some(day) = row.day_number {
            let schedule = match view.schedules.iter_mut().position(|s| s.day == day) {
                Some(pos) => &mut view.schedules[pos],
                None => {
                    view.schedules.push(ScheduleView {
                        day,
                        summary: String::new(),
                        activities: Vec::new(),
                    });
                    let last = view.schedules.len() - 1;
                    &mut view.schedules[last]
                }
            };

            if schedule.summary.is_empty()
                && let Some(summary) = &row.schedule_summary
            {
                schedule.summary.clone_from(summary);
            }

            if let (Some(time), Some(activity)) = (&row.activity_time, &row.activity_description) {
                schedule.activities.push(ActivityView {
                    time: time.clone(),
                    activity: activity.clone(),
                });
            }
        }
    }

    views
}

/// Seed a view from the first row seen for a tour id.
fn new_view(row: &ItineraryRow) -> TourView {
    TourView {
        id: row.id.clone(),
        agency_id: row.agency_id.clone(),
        agency_name: text_or_default(row.agency_name.as_deref()),
        tour_name: row.tour_name.clone(),
        country: text_or_default(row.country.as_deref()),
        city: text_or_default(row.city.as_deref()),
        service: text_or_default(row.service.as_deref()),
        itinerary: text_or_default(row.itinerary.as_deref()),
        duration: text_or_default(row.duration.as_deref()),
        departure_date: row
            .departure_date
            .map_or_else(|| defaults::TEXT.to_string(), |d| d.to_string()),
        departure_place: text_or_default(row.departure_place.as_deref()),
        public_id: text_or_default(row.public_id.as_deref()),
        cover_photo: text_or_default(row.cover_photo.as_deref()),
        description: text_or_default(row.description.as_deref()),
        price_adult: price_or_default(row.price_adult),
        price_child: price_or_default(row.price_child),
        price_baby: price_or_default(row.price_baby),
        status: row
            .status
            .clone()
            .unwrap_or_else(|| defaults::STATUS.to_string()),
        created_at: row
            .created_at
            .map_or_else(|| defaults::TEXT.to_string(), |t| t.to_rfc3339()),
        updated_at: row
            .updated_at
            .map_or_else(|| defaults::TEXT.to_string(), |t| t.to_rfc3339()),
        galleries: split_gallery_urls(row.gallery_urls.as_deref()),
        schedules: Vec::new(),
    }
}

fn text_or_default(value: Option<&str>) -> String {
    value.map_or_else(|| defaults::TEXT.to_string(), ToString::to_string)
}

/// Format a price tier with two decimal places, `"0.00"` when missing.
fn price_or_default(value: Option<f64>) -> String {
    value.map_or_else(|| defaults::PRICE.to_string(), |p| format!("{p:.2}"))
}

/// Split a comma-joined gallery string into URLs. Null or empty decodes
/// to an empty list.
fn split_gallery_urls(value: Option<&str>) -> Vec<String> {
    match value {
        None => Vec::new(),
        Some(s) if s.is_empty() => Vec::new(),
        Some(s) => s.split(',').map(ToString::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_row(id: &str, name: &str) -> ItineraryRow {
        ItineraryRow {
            id: id.to_string(),
            agency_id: "ag1".to_string(),
            agency_name: Some("Sunrise Travel".to_string()),
            tour_name: name.to_string(),
            country: None,
            city: None,
            service: None,
            itinerary: None,
            duration: None,
            departure_date: None,
            departure_place: None,
            public_id: None,
            cover_photo: None,
            description: None,
            price_adult: None,
            price_child: None,
            price_baby: None,
            status: None,
            created_at: None,
            updated_at: None,
            gallery_urls: None,
            day_number: None,
            schedule_summary: None,
            activity_time: None,
            activity_description: None,
        }
    }

    fn schedule_row(
        id: &str,
        name: &str,
        galleries: &str,
        day: i32,
        summary: &str,
        time: &str,
        activity: &str,
    ) -> ItineraryRow {
        ItineraryRow {
            gallery_urls: Some(galleries.to_string()),
            day_number: Some(day),
            schedule_summary: Some(summary.to_string()),
            activity_time: Some(time.to_string()),
            activity_description: Some(activity.to_string()),
            ..bare_row(id, name)
        }
    }

    #[test]
    fn test_one_view_per_distinct_tour_id() {
        let rows = vec![
            schedule_row("t1", "A", "a.jpg", 1, "Day 1", "09:00", "Walk"),
            schedule_row("t1", "A", "a.jpg", 1, "Day 1", "14:00", "Temple"),
            schedule_row("t2", "B", "b.jpg", 1, "Day 1", "08:00", "Bus"),
            schedule_row("t1", "A", "a.jpg", 2, "Day 2", "10:00", "Museum"),
        ];

        let views = build_tour_views(&rows);
        assert_eq!(views.len(), 2);
        // First-seen order, not id order
        assert_eq!(views[0].id, "t1");
        assert_eq!(views[1].id, "t2");
    }

    #[test]
    fn test_tour_with_no_joins_yields_empty_collections() {
        let rows = vec![bare_row("t1", "Bare Tour")];

        let views = build_tour_views(&rows);
        assert_eq!(views.len(), 1);
        assert!(views[0].galleries.is_empty());
        assert!(views[0].schedules.is_empty());
    }

    #[test]
    fn test_two_days_with_activity_counts() {
        let rows = vec![
            schedule_row("t1", "A", "a.jpg", 1, "Day 1", "09:00", "Walk"),
            schedule_row("t1", "A", "a.jpg", 1, "Day 1", "14:00", "Temple"),
            schedule_row("t1", "A", "a.jpg", 2, "Day 2", "10:00", "Museum"),
        ];

        let views = build_tour_views(&rows);
        assert_eq!(views.len(), 1);

        let schedules = &views[0].schedules;
        assert_eq!(schedules.len(), 2);
        assert_eq!(schedules[0].day, 1);
        assert_eq!(schedules[0].activities.len(), 2);
        assert_eq!(schedules[1].day, 2);
        assert_eq!(schedules[1].activities.len(), 1);
    }

    #[test]
    fn test_gallery_string_splitting() {
        assert_eq!(
            split_gallery_urls(Some("url1,url2,url3")),
            vec!["url1", "url2", "url3"]
        );
        assert_eq!(split_gallery_urls(Some("")), Vec::<String>::new());
        assert_eq!(split_gallery_urls(None), Vec::<String>::new());
    }

    #[test]
    fn test_activities_are_not_deduplicated() {
        // Two identical rows contribute two identical activity entries.
        let rows = vec![
            schedule_row("t1", "A", "a.jpg", 1, "Day 1", "09:00", "Walk"),
            schedule_row("t1", "A", "a.jpg", 1, "Day 1", "09:00", "Walk"),
        ];

        let views = build_tour_views(&rows);
        assert_eq!(views[0].schedules[0].activities.len(), 2);
    }

    #[test]
    fn test_idempotence() {
        let rows = vec![
            schedule_row("t1", "A", "a.jpg,b.jpg", 1, "Day 1", "09:00", "Walk"),
            schedule_row("t1", "A", "a.jpg,b.jpg", 2, "Day 2", "10:00", "Museum"),
            bare_row("t2", "B"),
        ];

        let first = build_tour_views(&rows);
        let second = build_tour_views(&rows);
        assert_eq!(first, second);
    }

    #[test]
    fn test_defaults_table() {
        let views = build_tour_views(&[bare_row("t1", "Bare Tour")]);
        let view = &views[0];

        assert_eq!(view.price_adult, "0.00");
        assert_eq!(view.price_child, "0.00");
        assert_eq!(view.price_baby, "0.00");
        assert_eq!(view.status, "draft");
        assert_eq!(view.country, "");
        assert_eq!(view.city, "");
        assert_eq!(view.service, "");
        assert_eq!(view.itinerary, "");
        assert_eq!(view.duration, "");
        assert_eq!(view.departure_date, "");
        assert_eq!(view.departure_place, "");
        assert_eq!(view.public_id, "");
        assert_eq!(view.cover_photo, "");
        assert_eq!(view.description, "");
        assert_eq!(view.created_at, "");
        assert_eq!(view.updated_at, "");
    }

    #[test]
    fn test_price_formatting_two_decimal_places() {
        let row = ItineraryRow {
            price_adult: Some(120.0),
            price_child: Some(59.5),
            price_baby: Some(0.0),
            ..bare_row("t1", "Priced")
        };

        let views = build_tour_views(&[row]);
        assert_eq!(views[0].price_adult, "120.00");
        assert_eq!(views[0].price_child, "59.50");
        assert_eq!(views[0].price_baby, "0.00");
    }

    #[test]
    fn test_summary_keeps_first_value_for_a_day() {
        let mut second = schedule_row("t1", "A", "a.jpg", 1, "Changed", "14:00", "Temple");
        second.schedule_summary = Some("Changed".to_string());

        let rows = vec![
            schedule_row("t1", "A", "a.jpg", 1, "City tour", "09:00", "Walk"),
            second,
        ];

        let views = build_tour_views(&rows);
        assert_eq!(views[0].schedules[0].summary, "City tour");
    }

    #[test]
    fn test_hanoi_trip_end_to_end() {
        let rows = vec![
            schedule_row(
                "5",
                "Hanoi Trip",
                "a.jpg,b.jpg",
                1,
                "City tour",
                "09:00",
                "Old Quarter walk",
            ),
            schedule_row(
                "5",
                "Hanoi Trip",
                "a.jpg,b.jpg",
                1,
                "City tour",
                "14:00",
                "Temple visit",
            ),
        ];

        let views = build_tour_views(&rows);
        assert_eq!(views.len(), 1);

        let view = &views[0];
        assert_eq!(view.id, "5");
        assert_eq!(view.tour_name, "Hanoi Trip");
        assert_eq!(view.galleries, vec!["a.jpg", "b.jpg"]);
        assert_eq!(
            view.schedules,
            vec![ScheduleView {
                day: 1,
                summary: "City tour".to_string(),
                activities: vec![
                    ActivityView {
                        time: "09:00".to_string(),
                        activity: "Old Quarter walk".to_string(),
                    },
                    ActivityView {
                        time: "14:00".to_string(),
                        activity: "Temple visit".to_string(),
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_day_without_activity_yields_empty_activity_list() {
        let mut row = schedule_row("t1", "A", "", 1, "Free day", "x", "x");
        row.activity_time = None;
        row.activity_description = None;

        let views = build_tour_views(&[row]);
        assert_eq!(views[0].schedules.len(), 1);
        assert!(views[0].schedules[0].activities.is_empty());
    }
}
