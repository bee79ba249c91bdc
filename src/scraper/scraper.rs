// scraper.rs
use rand::Rng;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::record::ListingRecord;
use crate::domain::snapshot::batch_stamp;
use crate::scraper::models::{Article, ArticleListResponse};
use crate::scraper::ScrapeError;
use crate::store::SnapshotStore;

const ARTICLE_LIST_URL: &str = "https://m.land.naver.com/complex/getComplexArticleList";

const USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 10; SM-G981B) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/80.0.3987.162 Mobile Safari/537.36";

// The mobile API pages at roughly 20 articles; a shorter page is the last one.
const PAGE_SIZE_HINT: usize = 20;
const MAX_PAGES: u32 = 5;
const MAX_ATTEMPTS: u32 = 3;

/// Blocking client for the Naver Land mobile article-list API.
pub struct NaverLandClient {
    client: Client,
}

impl NaverLandClient {
    pub fn new() -> Result<Self, ScrapeError> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static("https://m.land.naver.com/"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7"),
        );
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    /// One full collection run for a complex. Every returned record carries
    /// the same batch stamp, taken once before the first page.
    ///
    /// Pagination stops on an empty page, a short page, or the page cap. A
    /// page that keeps failing after retries ends the run with whatever was
    /// already collected -- a partial snapshot beats none, and the anomaly
    /// filter downstream absorbs the resulting burst if it is implausible.
    pub fn fetch_complex_articles(
        &self,
        complex_no: &str,
        trade_type: &str,
    ) -> Result<Vec<ListingRecord>, ScrapeError> {
        if complex_no.trim().is_empty() {
            return Err(ScrapeError::Config(
                "complex id (hscpNo) is required".into(),
            ));
        }

        let stamp = batch_stamp();
        let mut records = Vec::new();
        let mut page: u32 = 1;

        loop {
            let articles = match self.fetch_page_with_retry(complex_no, trade_type, page) {
                Ok(articles) => articles,
                Err(e) => {
                    if records.is_empty() {
                        return Err(e);
                    }
                    eprintln!(
                        "⚠️ Page {page} failed after retries, keeping {} records: {e}",
                        records.len()
                    );
                    break;
                }
            };

            let fetched = articles.len();
            if fetched == 0 {
                break;
            }

            records.extend(articles.into_iter().filter_map(|a| a.into_record(&stamp)));
            eprintln!("✅ Page {page} parsed ({fetched} articles)");

            if fetched < PAGE_SIZE_HINT || page >= MAX_PAGES {
                break;
            }
            page += 1;

            // Polite randomized delay between pages.
            let delay = rand::thread_rng().gen_range(500..=1500);
            std::thread::sleep(Duration::from_millis(delay));
        }

        Ok(records)
    }

    fn fetch_page_with_retry(
        &self,
        complex_no: &str,
        trade_type: &str,
        page: u32,
    ) -> Result<Vec<Article>, ScrapeError> {
        let mut last_err = None;

        for attempt in 1..=MAX_ATTEMPTS {
            match self.fetch_page(complex_no, trade_type, page) {
                Ok(articles) => return Ok(articles),
                Err(e) => {
                    eprintln!("⚠️ Page {page} attempt {attempt} failed: {e}");
                    last_err = Some(e);

                    let base = 2 * attempt as u64;
                    let jitter = rand::thread_rng().gen_range(0..=2);
                    std::thread::sleep(Duration::from_secs(base + jitter));
                }
            }
        }

        Err(last_err
            .unwrap_or_else(|| ScrapeError::Network("retry loop ended without error".into())))
    }

    fn fetch_page(
        &self,
        complex_no: &str,
        trade_type: &str,
        page: u32,
    ) -> Result<Vec<Article>, ScrapeError> {
        let page_no = page.to_string();
        let resp = self
            .client
            .get(ARTICLE_LIST_URL)
            .query(&[
                ("hscpNo", complex_no),
                ("tradTpCd", trade_type),
                ("order", "date_desc"),
                ("showR0", "N"),
                ("page", &page_no),
            ])
            .send()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp.text().map_err(|e| ScrapeError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ScrapeError::Network(format!("HTTP {status}: {text}")));
        }

        let parsed: ArticleListResponse =
            serde_json::from_str(&text).map_err(|e| ScrapeError::JsonParse(e.to_string()))?;
        let body = parsed
            .result
            .ok_or_else(|| ScrapeError::UnexpectedShape("result missing".to_string()))?;

        Ok(body.list)
    }
}

/// Run one collection and append the batch. Returns how many records were
/// stored; zero means the source returned no articles.
pub fn collect_once(
    store: &dyn SnapshotStore,
    complex_no: &str,
    trade_type: &str,
) -> Result<usize, ScrapeError> {
    let client = NaverLandClient::new()?;
    let records = client.fetch_complex_articles(complex_no, trade_type)?;

    if records.is_empty() {
        return Ok(0);
    }

    store
        .append(&records)
        .map_err(|e| ScrapeError::Store(e.to_string()))?;
    Ok(records.len())
}

/// Fire-and-forget collection for the admin "collect now" control. The
/// request returns immediately; the outcome only shows up in the logs and in
/// the next dashboard refresh.
pub fn run_background_collection(
    store: Arc<dyn SnapshotStore>,
    complex_no: String,
    trade_type: String,
) {
    std::thread::spawn(move || {
        eprintln!("🧵 Collection thread started for complex {complex_no} ({trade_type})");
        match collect_once(store.as_ref(), &complex_no, &trade_type) {
            Ok(0) => eprintln!("🏁 No articles returned for complex {complex_no}"),
            Ok(n) => eprintln!("✅ Collection complete: {n} records"),
            Err(e) => eprintln!("❌ Collection failed: {e}"),
        }
    });
}
