use serde::Deserialize;

use crate::domain::price::clean_price;
use crate::domain::record::ListingRecord;

// getComplexArticleList response
//  result
//   └── list[] — one article per advertised listing

#[derive(Debug, Deserialize)]
pub struct ArticleListResponse {
    pub result: Option<ArticleListBody>,
}

#[derive(Debug, Deserialize)]
pub struct ArticleListBody {
    #[serde(default)]
    pub list: Vec<Article>,
}

/// One article as the mobile API returns it. Everything is optional: the
/// source drops fields freely, and a partial article should never sink a
/// whole page.
#[derive(Debug, Default, Deserialize)]
pub struct Article {
    #[serde(rename = "atclNo")]
    pub article_no: Option<String>,
    #[serde(rename = "atclNm")]
    pub complex_name: Option<String>,
    #[serde(rename = "bildNm")]
    pub building_name: Option<String>,
    #[serde(rename = "flrInfo")]
    pub floor_info: Option<String>,
    pub direction: Option<String>,
    /// Supply area in m², as a string like "112".
    #[serde(rename = "spc1")]
    pub supply_area: Option<String>,
    /// Exclusive area in m², as a string like "84.97".
    #[serde(rename = "spc2")]
    pub exclusive_area: Option<String>,
    #[serde(rename = "prcInfo")]
    pub price_info: Option<String>,
    #[serde(rename = "rltrNm")]
    pub realtor_name: Option<String>,
    #[serde(rename = "atclFetrDesc")]
    pub feature_desc: Option<String>,
    #[serde(rename = "tradTpNm")]
    pub trade_type_name: Option<String>,
    #[serde(rename = "atclCfmYmd")]
    pub confirmed_date: Option<String>,
}

impl Article {
    /// Map a wire article onto a stored record. Articles without an article
    /// number are dropped: without a stable id they can't take part in any
    /// snapshot comparison.
    pub fn into_record(self, batch_stamp: &str) -> Option<ListingRecord> {
        let listing_id = self.article_no?;
        let price_display = self.price_info.unwrap_or_default();

        Some(ListingRecord {
            listing_id,
            complex_name: self.complex_name.unwrap_or_default(),
            building_label: self.building_name.unwrap_or_default(),
            floor_info: self.floor_info.unwrap_or_default(),
            direction: self.direction.unwrap_or_default(),
            area_supply: parse_area(self.supply_area.as_deref()),
            area_exclusive: parse_area(self.exclusive_area.as_deref()).unwrap_or(0.0),
            price_amount: clean_price(&price_display),
            price_display,
            realtor_name: self.realtor_name.unwrap_or_default(),
            feature_description: self.feature_desc.unwrap_or_default(),
            trade_type: self.trade_type_name.unwrap_or_default(),
            confirmed_date: self.confirmed_date.unwrap_or_default(),
            snapshot_time: batch_stamp.to_string(),
        })
    }
}

// The API sometimes sends "-" for missing areas.
fn parse_area(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_wire_article_to_record() {
        let raw = r#"{"result":{"list":[{
            "atclNo":"2401",
            "atclNm":"래미안테스트",
            "bildNm":"101동",
            "flrInfo":"중/15",
            "direction":"남향",
            "spc1":"112",
            "spc2":"84.97",
            "prcInfo":"10억 5,000",
            "rltrNm":"한국공인중개",
            "atclFetrDesc":"로얄층 급매",
            "tradTpNm":"매매",
            "atclCfmYmd":"26.01.15."
        }]}}"#;

        let parsed: ArticleListResponse = serde_json::from_str(raw).unwrap();
        let article = parsed.result.unwrap().list.into_iter().next().unwrap();
        let record = article.into_record("2026-01-01 09:00:00").unwrap();

        assert_eq!(record.listing_id, "2401");
        assert_eq!(record.complex_name, "래미안테스트");
        assert_eq!(record.price_display, "10억 5,000");
        assert_eq!(record.price_amount, 1_050_000_000);
        assert_eq!(record.area_supply, Some(112.0));
        assert_eq!(record.area_exclusive, 84.97);
        assert_eq!(record.snapshot_time, "2026-01-01 09:00:00");
    }

    #[test]
    fn article_without_id_is_dropped() {
        let article: Article = serde_json::from_str("{}").unwrap();
        assert!(article.into_record("2026-01-01 09:00:00").is_none());
    }

    #[test]
    fn dash_area_becomes_none() {
        let article: Article =
            serde_json::from_str(r#"{"atclNo":"1","spc1":"-","spc2":"-"}"#).unwrap();
        let record = article.into_record("2026-01-01 09:00:00").unwrap();
        assert_eq!(record.area_supply, None);
        assert_eq!(record.area_exclusive, 0.0);
    }
}
