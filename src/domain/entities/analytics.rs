//! Aggregated click analytics shown on the dashboard.

/// Totals across all of a user's short URLs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlAnalytics {
    pub total_clicks: i64,
    pub total_urls: i64,
}

impl UrlAnalytics {
    /// Aggregates per-URL click counters.
    pub fn from_clicks<I>(clicks: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        clicks
            .into_iter()
            .fold(Self::default(), |acc, c| Self {
                total_clicks: acc.total_clicks + c.max(0),
                total_urls: acc.total_urls + 1,
            })
    }

    /// Average clicks per URL as displayed: one decimal place with halves
    /// rounded up (`1.25` shows as `1.3`), or `0` with no URLs.
    pub fn average_clicks(&self) -> String {
        if self.total_urls <= 0 {
            return "0".to_string();
        }

        let clicks = i128::from(self.total_clicks.max(0));
        let urls = i128::from(self.total_urls);
        let tenths = (clicks * 20 + urls) / (urls * 2);
        format!("{}.{}", tenths / 10, tenths % 10)
    }
}
