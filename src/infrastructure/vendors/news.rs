//! News lookup (NewsAPI everything endpoint)

use serde::Deserialize;

use super::{Auth, VendorClient, VendorRequest, VendorResult};
use crate::application::errors::{Capability, VendorError};
use crate::infrastructure::config::NewsVendorConfig;

/// Never render more than this many headlines
pub const MAX_HEADLINES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub title: String,
    pub source: String,
    pub url: Option<String>,
}

#[derive(Deserialize, Debug)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Deserialize, Debug)]
struct Article {
    title: Option<String>,
    source: Option<Source>,
    url: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Source {
    name: Option<String>,
}

pub fn headlines_request(config: &NewsVendorConfig, api_key: &str) -> VendorRequest {
    VendorRequest::get(Capability::News, config.url.as_str())
        .with_auth(Auth::Header { name: "X-Api-Key", value: api_key.to_string() })
        .with_query("q", config.query.as_str())
        .with_query("sortBy", "publishedAt")
        .with_query("pageSize", config.page_size.to_string())
        .with_query("language", config.language.as_str())
}

fn headlines_from(response: NewsResponse) -> VendorResult<Vec<Headline>> {
    let headlines: Vec<Headline> = response
        .articles
        .into_iter()
        .take(MAX_HEADLINES)
        .map(|article| Headline {
            title: article.title.unwrap_or_else(|| "No title".to_string()),
            source: article
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            url: article.url.filter(|u| !u.is_empty()),
        })
        .collect();

    if headlines.is_empty() {
        return Err(VendorError::data_miss(Capability::News, "articles"));
    }
    Ok(headlines)
}

impl VendorClient {
    pub async fn latest_headlines(&self, api_key: &str) -> VendorResult<Vec<Headline>> {
        let request = headlines_request(&self.config().vendors.news, api_key);
        let response: NewsResponse = self.execute_json(request).await?;
        headlines_from(response)
    }
}
