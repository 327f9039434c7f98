use async_trait::async_trait;
use reqwest::{StatusCode, Url};

use crate::api::models::{parse_envelope, AccidentRecord};
use crate::api::FetchError;
use crate::config::ApiConfig;
use crate::domain::{District, Year};

pub const DEFAULT_ENDPOINT: &str =
    "http://apis.data.go.kr/B552061/frequentzoneTmzon/getRestFrequentzoneTmzon";

/// Rows requested per call. Only the first page is ever fetched.
pub const PAGE_SIZE: u32 = 10;
pub const PAGE_NUMBER: u32 = 1;

/// Anything that can answer a (district, year) query with accident records.
#[async_trait]
pub trait AccidentSource: Send + Sync {
    async fn fetch(&self, district: District, year: Year)
        -> Result<Vec<AccidentRecord>, FetchError>;
}

/// HTTP client for the data.go.kr black-spot endpoint.
#[derive(Debug, Clone)]
pub struct BlackspotClient {
    http: reqwest::Client,
    endpoint: Url,
    service_key: String,
}

impl BlackspotClient {
    pub fn new(config: &ApiConfig) -> color_eyre::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| color_eyre::eyre::eyre!("Invalid endpoint {}: {e}", config.endpoint))?;

        if config.service_key.is_none() {
            log::warn!("SERVICE_KEY is not set; the accident API will reject every request");
        }

        Ok(Self {
            http: builder.build()?,
            endpoint,
            service_key: config.service_key.clone().unwrap_or_default(),
        })
    }

    /// Builds the request URL for one query.
    ///
    /// The service key goes in verbatim: data.go.kr hands out keys that are
    /// already percent-encoded.
    pub fn request_url(&self, district: District, year: Year) -> Url {
        let mut url = self.endpoint.clone();
        url.set_query(Some(&format!(
            "serviceKey={}&{}",
            self.service_key,
            query_string(district, year)
        )));
        url
    }
}

/// Every query parameter except the service key.
pub fn query_string(district: District, year: Year) -> String {
    format!(
        "searchYearCd={}&siDo={}&guGun={}&type=json&numOfRows={PAGE_SIZE}&pageNo={PAGE_NUMBER}",
        year.value(),
        district.region_code,
        district.district_code,
    )
}

fn check_status(status: StatusCode) -> Result<(), FetchError> {
    if status.is_success() {
        return Ok(());
    }

    Err(FetchError::Unreachable {
        status: Some(status.as_u16()),
        message: format!("HTTP {status}"),
    })
}

#[async_trait]
impl AccidentSource for BlackspotClient {
    async fn fetch(
        &self,
        district: District,
        year: Year,
    ) -> Result<Vec<AccidentRecord>, FetchError> {
        let url = self.request_url(district, year);
        log::debug!(
            "GET {}?{} (serviceKey redacted)",
            self.endpoint,
            query_string(district, year)
        );

        let response = self.http.get(url).send().await?;
        check_status(response.status())?;

        let body = response.text().await?;
        let records = parse_envelope(&body)?;
        log::debug!(
            "{year} {district}: {} black spots received",
            records.len()
        );

        Ok(records)
    }
}
