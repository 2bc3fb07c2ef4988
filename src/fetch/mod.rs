//! Draw repository adapter.
//!
//! Retrieves completed draws from the public draw-result endpoint, one
//! request per period, all issued concurrently. Periods that fail to load or
//! that have not been drawn yet are dropped rather than failing the batch.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use futures_util::future::join_all;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::models::{DrawRecord, RecordError};

/// Errors that can occur while fetching draws.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Draw #{0} has not been held yet")]
    NotDrawn(u32),

    #[error("Draw #{sequence}: invalid date {date:?}")]
    InvalidDate { sequence: u32, date: String },

    #[error("Invalid draw payload: {0}")]
    InvalidRecord(#[from] RecordError),
}

/// Source of historical draws.
#[async_trait]
pub trait DrawRepository: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &'static str;

    /// Completed draws for the last `count` periods, most recent first.
    ///
    /// Periods that could not be retrieved are omitted, so the result may
    /// hold fewer than `count` records.
    async fn fetch_recent(&self, count: u32) -> Result<Vec<DrawRecord>, FetchError>;
}

/// Configuration for the draw-result client.
#[derive(Debug, Clone)]
pub struct DrawSourceConfig {
    /// Endpoint queried with `method=getLottoNumber&drwNo=N`
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,
}

impl Default for DrawSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.dhlottery.co.kr/common.do".to_string(),
            timeout: Duration::from_secs(10),
            user_agent: "lotto-advisor/0.1.0".to_string(),
        }
    }
}

/// Raw payload returned for one draw number.
///
/// Failed lookups only carry `returnValue: "fail"`, so every draw field is optional.
#[derive(Debug, Deserialize)]
struct DrawPayload {
    #[serde(rename = "returnValue")]
    return_value: String,
    #[serde(rename = "drwNo")]
    draw_no: Option<u32>,
    #[serde(rename = "drwNoDate")]
    draw_date: Option<String>,
    #[serde(rename = "drwtNo1")]
    no1: Option<u8>,
    #[serde(rename = "drwtNo2")]
    no2: Option<u8>,
    #[serde(rename = "drwtNo3")]
    no3: Option<u8>,
    #[serde(rename = "drwtNo4")]
    no4: Option<u8>,
    #[serde(rename = "drwtNo5")]
    no5: Option<u8>,
    #[serde(rename = "drwtNo6")]
    no6: Option<u8>,
    #[serde(rename = "bnusNo")]
    bonus: Option<u8>,
}

impl DrawPayload {
    /// Convert into a validated record. `requested` is the draw number asked for.
    fn into_record(self, requested: u32) -> Result<DrawRecord, FetchError> {
        if self.return_value != "success" {
            return Err(FetchError::NotDrawn(requested));
        }

        let numbers = [self.no1, self.no2, self.no3, self.no4, self.no5, self.no6];
        let (sequence, date, bonus) = match (self.draw_no, self.draw_date, self.bonus) {
            (Some(seq), Some(date), Some(bonus)) if numbers.iter().all(Option::is_some) => {
                (seq, date, bonus)
            }
            _ => return Err(FetchError::NotDrawn(requested)),
        };

        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| FetchError::InvalidDate { sequence, date })?;
        let numbers = numbers.map(|n| n.unwrap_or(0));

        Ok(DrawRecord::new(sequence, date, numbers, bonus)?)
    }
}

/// Parse one draw-result response body.
pub fn parse_draw_payload(body: &str, requested: u32) -> Result<DrawRecord, FetchError> {
    let payload: DrawPayload = serde_json::from_str(body).map_err(|e| {
        debug!("Unparseable payload for draw #{}: {}", requested, e);
        FetchError::NotDrawn(requested)
    })?;
    payload.into_record(requested)
}

/// Number of the most recent draw held at `now`.
///
/// Draw #1 was held on 2002-12-07 at 20:00 KST and draws are weekly.
/// Returns `None` before the first draw.
pub fn latest_draw_number(now: DateTime<Utc>) -> Option<u32> {
    let first_draw = NaiveDate::from_ymd_opt(2002, 12, 7)?
        .and_hms_opt(11, 0, 0)?
        .and_utc();
    let elapsed = now.signed_duration_since(first_draw);
    if elapsed < chrono::Duration::zero() {
        return None;
    }
    u32::try_from(elapsed.num_weeks()).ok().map(|weeks| weeks + 1)
}

/// Draw numbers for a window of `count` periods ending at `latest`, newest first.
pub fn window_numbers(latest: u32, count: u32) -> Vec<u32> {
    (0..count)
        .map_while(|offset| latest.checked_sub(offset))
        .filter(|&n| n > 0)
        .collect()
}

/// Client for the public draw-result endpoint.
pub struct DhLotteryRepository {
    client: Client,
    config: DrawSourceConfig,
}

impl DhLotteryRepository {
    /// Create a new repository client with the given configuration.
    pub fn new(config: DrawSourceConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("lotto-advisor/0.1.0")),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a repository client with default configuration.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(DrawSourceConfig::default())
    }

    fn draw_url(&self, draw_no: u32) -> Result<Url, FetchError> {
        Ok(Url::parse_with_params(
            &self.config.base_url,
            &[
                ("method", "getLottoNumber".to_string()),
                ("drwNo", draw_no.to_string()),
            ],
        )?)
    }

    /// Fetch a single draw by number.
    pub async fn fetch_draw(&self, draw_no: u32) -> Result<DrawRecord, FetchError> {
        let url = self.draw_url(draw_no)?;
        debug!("Fetching {}", url);

        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await?;
        parse_draw_payload(&body, draw_no)
    }

    /// Fetch the `count` periods ending at `latest`, dropping failed periods.
    pub async fn fetch_window(&self, latest: u32, count: u32) -> Vec<DrawRecord> {
        let draw_numbers = window_numbers(latest, count);
        let results = join_all(draw_numbers.iter().map(|&n| self.fetch_draw(n))).await;

        let mut records: Vec<DrawRecord> = draw_numbers
            .into_iter()
            .zip(results)
            .filter_map(|(draw_no, result)| match result {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping draw #{}: {}", draw_no, e);
                    None
                }
            })
            .collect();

        records.sort_by(|a, b| b.sequence_number.cmp(&a.sequence_number));
        records.dedup_by_key(|r| r.sequence_number);
        records
    }
}

#[async_trait]
impl DrawRepository for DhLotteryRepository {
    fn name(&self) -> &'static str {
        "dhlottery"
    }

    async fn fetch_recent(&self, count: u32) -> Result<Vec<DrawRecord>, FetchError> {
        let latest = match latest_draw_number(Utc::now()) {
            Some(n) if count > 0 => n,
            _ => return Ok(Vec::new()),
        };

        info!("Fetching {} draws ending at #{}", count, latest);
        let records = self.fetch_window(latest, count).await;
        info!("Retrieved {}/{} draws", records.len(), count);

        Ok(records)
    }
}

/// In-memory repository for testing.
#[cfg(test)]
pub struct InMemoryRepository {
    records: Vec<DrawRecord>,
}

#[cfg(test)]
impl InMemoryRepository {
    pub fn new(records: Vec<DrawRecord>) -> Self {
        Self { records }
    }
}

#[cfg(test)]
#[async_trait]
impl DrawRepository for InMemoryRepository {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn fetch_recent(&self, count: u32) -> Result<Vec<DrawRecord>, FetchError> {
        Ok(self.records.iter().take(count as usize).cloned().collect())
    }
}
