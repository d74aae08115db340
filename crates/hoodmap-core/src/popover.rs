//! Marker popover content.

use crate::directory::{NeighbourhoodRecord, PriceTrend};
use crate::markup::escape_html;
use serde::{Deserialize, Serialize};

/// Label of the navigation action.
pub const VIEW_DETAILS_LABEL: &str = "View neighbourhood";
/// Label of the lead-capture action.
pub const REQUEST_REPORT_LABEL: &str = "Get a market report";

/// Summary card shown for the selected marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopoverCard {
    /// Slug of the record this card describes
    pub slug: String,
    /// Display name
    pub title: String,
    /// One-line summary
    pub tagline: String,
    /// Average price display string
    pub avg_price: String,
    /// Signed change display string
    pub price_change: String,
    /// Direction of the change
    pub trend: PriceTrend,
    /// Include the report request button
    pub offer_report: bool,
}

impl PopoverCard {
    /// Build the card for a directory record.
    #[must_use]
    pub fn from_record(record: &NeighbourhoodRecord) -> Self {
        Self {
            slug: record.slug.clone(),
            title: record.name.clone(),
            tagline: record.tagline.clone(),
            avg_price: record.avg_price.clone(),
            price_change: record.price_change.clone(),
            trend: record.trend(),
            offer_report: false,
        }
    }

    /// Show the market-report action.
    #[must_use]
    pub const fn with_report_action(mut self, offer: bool) -> Self {
        self.offer_report = offer;
        self
    }

    /// Render as an HTML fragment. All record text is escaped.
    ///
    /// Buttons carry `data-action` attributes matching the serialized
    /// `PopoverAction` names so the engine adapter can report them back.
    #[must_use]
    pub fn to_html(&self) -> String {
        let trend_class = match self.trend {
            PriceTrend::Up => "up",
            PriceTrend::Down => "down",
            PriceTrend::Flat => "flat",
        };
        let mut html = format!(
            r#"<div class="hoodmap-popover" data-slug="{slug}"><h3>{title}</h3>"#,
            slug = escape_html(&self.slug),
            title = escape_html(&self.title),
        );
        if !self.tagline.is_empty() {
            html.push_str(&format!("<p>{}</p>", escape_html(&self.tagline)));
        }
        html.push_str(&format!(
            concat!(
                "<dl><dt>Average price</dt><dd>{price}</dd>",
                r#"<dt>Change</dt><dd class="trend-{trend_class}">{change}</dd></dl>"#
            ),
            price = escape_html(&self.avg_price),
            change = escape_html(&self.price_change),
            trend_class = trend_class,
        ));
        html.push_str(&format!(
            r#"<button data-action="view_details">{VIEW_DETAILS_LABEL}</button>"#
        ));
        if self.offer_report {
            html.push_str(&format!(
                r#"<button data-action="request_report">{REQUEST_REPORT_LABEL}</button>"#
            ));
        }
        html.push_str("</div>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::Directory;

    fn oakridge() -> PopoverCard {
        let dir = Directory::builtin();
        PopoverCard::from_record(dir.by_slug("oakridge").unwrap())
    }

    #[test]
    fn test_card_from_record() {
        let card = oakridge();
        assert_eq!(card.slug, "oakridge");
        assert_eq!(card.title, "Oakridge");
        assert_eq!(card.avg_price, "$1.2M");
        assert_eq!(card.price_change, "+4.3%");
        assert_eq!(card.trend, PriceTrend::Up);
        assert!(!card.offer_report);
    }

    #[test]
    fn test_card_html_contents() {
        let html = oakridge().to_html();
        assert!(html.contains("<h3>Oakridge</h3>"));
        assert!(html.contains("$1.2M"));
        assert!(html.contains(r#"<dd class="trend-up">+4.3%</dd>"#));
        assert!(html.contains(r#"data-action="view_details""#));
        assert!(!html.contains("request_report"));
    }

    #[test]
    fn test_card_html_report_action() {
        let html = oakridge().with_report_action(true).to_html();
        assert!(html.contains(r#"data-action="request_report""#));
    }

    #[test]
    fn test_card_html_escapes_record_text() {
        let mut card = oakridge();
        card.tagline = "Parks & <b>schools</b>".into();
        let html = card.to_html();
        assert!(html.contains("<p>Parks &amp; &lt;b&gt;schools&lt;/b&gt;</p>"));
    }
}
