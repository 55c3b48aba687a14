//! View accounting for portfolio documents.
//!
//! A portfolio keeps a running total plus one bucket per calendar day on
//! which it was viewed. Buckets are kept in first-seen order.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::utils::time_utils::view_date_from_utc;

/// Views aggregated for a single calendar day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub count: u64,
}

/// Running view statistics of one portfolio.
///
/// Invariant: at most one bucket per `date`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ViewStats {
    pub total: u64,
    pub daily: Vec<DailyBucket>,
}

/// Read-only view of the statistics as served by the stats endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_views: u64,
    pub today_views: u64,
    pub daily_stats: Vec<DailyBucket>,
}

impl ViewStats {
    /// Counts one view on `day`, returning the day's new count.
    pub fn record_view(&mut self, day: NaiveDate) -> u64 {
        self.total += 1;
        match self.daily.iter_mut().find(|bucket| bucket.date == day) {
            Some(bucket) => {
                bucket.count += 1;
                bucket.count
            }
            None => {
                self.daily.push(DailyBucket {
                    date: day,
                    count: 1,
                });
                1
            }
        }
    }

    /// Views counted on `day`, 0 when the day has no bucket.
    pub fn views_on(&self, day: NaiveDate) -> u64 {
        self.daily
            .iter()
            .find(|bucket| bucket.date == day)
            .map(|bucket| bucket.count)
            .unwrap_or(0)
    }

    /// Read-only summary with `today` as the current day.
    pub fn summary(&self, today: NaiveDate) -> StatsSummary {
        StatsSummary {
            total_views: self.total,
            today_views: self.views_on(today),
            daily_stats: self.daily.clone(),
        }
    }
}

/// Applies one view at `now` and returns the updated statistics.
pub fn accumulate(mut stats: ViewStats, now: DateTime<Utc>, tz: Tz) -> ViewStats {
    stats.record_view(view_date_from_utc(now, tz));
    stats
}

/// Summarizes `stats` relative to the day `now` falls on.
pub fn project(stats: &ViewStats, now: DateTime<Utc>, tz: Tz) -> StatsSummary {
    stats.summary(view_date_from_utc(now, tz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_accumulate_on_empty_stats() {
        let stats = accumulate(ViewStats::default(), at(2024, 3, 9, 15), chrono_tz::UTC);
        assert_eq!(
            stats,
            ViewStats {
                total: 1,
                daily: vec![DailyBucket {
                    date: day(2024, 3, 9),
                    count: 1
                }],
            }
        );
    }

    #[test]
    fn test_accumulate_appends_new_day() {
        let stats = ViewStats {
            total: 5,
            daily: vec![DailyBucket {
                date: day(2024, 1, 1),
                count: 5,
            }],
        };

        let stats = accumulate(stats, at(2024, 1, 2, 10), chrono_tz::UTC);

        assert_eq!(stats.total, 6);
        assert_eq!(
            stats.daily,
            vec![
                DailyBucket {
                    date: day(2024, 1, 1),
                    count: 5
                },
                DailyBucket {
                    date: day(2024, 1, 2),
                    count: 1
                },
            ]
        );

        let summary = project(&stats, at(2024, 1, 2, 0), chrono_tz::UTC);
        assert_eq!(summary.total_views, 6);
        assert_eq!(summary.today_views, 1);
        assert_eq!(summary.daily_stats, stats.daily);
    }

    #[test]
    fn test_same_day_views_share_bucket() {
        let stats = accumulate(ViewStats::default(), at(2024, 5, 1, 1), chrono_tz::UTC);
        let stats = accumulate(stats, at(2024, 5, 1, 23), chrono_tz::UTC);

        assert_eq!(stats.total, 2);
        assert_eq!(stats.daily.len(), 1);
        assert_eq!(stats.daily[0].count, 2);
    }

    #[test]
    fn test_matching_bucket_updated_in_place_when_unsorted() {
        let mut stats = ViewStats {
            total: 3,
            daily: vec![
                DailyBucket {
                    date: day(2024, 2, 10),
                    count: 1,
                },
                DailyBucket {
                    date: day(2024, 2, 3),
                    count: 2,
                },
            ],
        };

        assert_eq!(stats.record_view(day(2024, 2, 3)), 3);
        assert_eq!(stats.daily[0].date, day(2024, 2, 10));
        assert_eq!(stats.daily[1].count, 3);
        assert_eq!(stats.total, 4);
    }

    #[test]
    fn test_project_without_views_today() {
        let stats = ViewStats {
            total: 2,
            daily: vec![DailyBucket {
                date: day(2024, 1, 1),
                count: 2,
            }],
        };
        let summary = project(&stats, at(2024, 6, 1, 12), chrono_tz::UTC);
        assert_eq!(summary.today_views, 0);
        assert_eq!(summary.total_views, 2);
        assert_eq!(summary.daily_stats.len(), 1);
    }

    #[test]
    fn test_day_boundary_follows_timezone() {
        // 16:00 UTC is already the next day in Seoul
        let seoul = chrono_tz::Asia::Seoul;
        let stats = accumulate(ViewStats::default(), at(2024, 1, 1, 10), seoul);
        let stats = accumulate(stats, at(2024, 1, 1, 16), seoul);

        assert_eq!(
            stats.daily.iter().map(|b| b.date).collect::<Vec<_>>(),
            vec![day(2024, 1, 1), day(2024, 1, 2)]
        );
    }

    #[test]
    fn test_summary_serializes_camel_case_with_plain_dates() {
        let stats = accumulate(ViewStats::default(), at(2024, 1, 2, 10), chrono_tz::UTC);
        let json = serde_json::to_value(project(&stats, at(2024, 1, 2, 11), chrono_tz::UTC))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalViews": 1,
                "todayViews": 1,
                "dailyStats": [{ "date": "2024-01-02", "count": 1 }]
            })
        );
    }
}
