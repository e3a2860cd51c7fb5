//! Home feed: banners, categories, hot picks, "guess you like"

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::HttpClient;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::request::RequestOptions;

use super::payload;

/// Banner position used by the home page.
pub const HOME_DISTRIBUTION_SITE: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BannerItem {
    pub id: String,
    pub img_url: String,
    pub href_url: String,
    #[serde(rename = "type")]
    pub kind: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryItem {
    pub id: String,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotItem {
    pub id: String,
    pub alt: String,
    pub pictures: Vec<String>,
    pub target: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GuessItem {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub price: f64,
    pub picture: String,
    pub order_num: i64,
}

/// Page-based query (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// One page of a paginated list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub counts: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub page_size: u32,
}

pub fn banner_request(distribution_site: u32) -> RequestOptions {
    RequestOptions::get("/home/banner").with_data(json!({ "distributionSite": distribution_site }))
}

pub fn category_request() -> RequestOptions {
    RequestOptions::get("/home/category/mutli")
}

pub fn hot_request() -> RequestOptions {
    RequestOptions::get("/home/hot/mutli")
}

pub fn guess_like_request(params: Option<&PageParams>) -> Result<RequestOptions> {
    let mut options = RequestOptions::get("/home/goods/guessLike");
    if let Some(params) = params {
        options = options.with_data(payload(params)?);
    }
    Ok(options)
}

/// Home feed endpoints.
pub struct HomeService<'a> {
    client: &'a HttpClient,
}

impl<'a> HomeService<'a> {
    pub(crate) fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Banners of one distribution site ([`HOME_DISTRIBUTION_SITE`] for the home page).
    pub async fn banner(&self, distribution_site: u32) -> Result<Envelope<Vec<BannerItem>>> {
        self.client.request(banner_request(distribution_site)).await
    }

    /// Front-page categories.
    pub async fn category(&self) -> Result<Envelope<Vec<CategoryItem>>> {
        self.client.request(category_request()).await
    }

    pub async fn hot(&self) -> Result<Envelope<Vec<HotItem>>> {
        self.client.request(hot_request()).await
    }

    pub async fn guess_like(
        &self,
        params: Option<&PageParams>,
    ) -> Result<Envelope<PageResult<GuessItem>>> {
        self.client.request(guess_like_request(params)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;

    #[test]
    fn banner_sends_distribution_site() {
        let options = banner_request(HOME_DISTRIBUTION_SITE);
        assert_eq!(options.method, Method::Get);
        assert_eq!(options.url, "/home/banner");
        assert_eq!(options.data, Some(json!({"distributionSite": 1})));
    }

    #[test]
    fn category_and_hot_paths() {
        assert_eq!(category_request().url, "/home/category/mutli");
        assert_eq!(hot_request().url, "/home/hot/mutli");
        assert!(hot_request().data.is_none());
    }

    #[test]
    fn guess_like_params_optional() {
        let options = guess_like_request(None);
        assert!(matches!(&options, Ok(o) if o.data.is_none()));

        let params = PageParams {
            page: Some(2),
            page_size: None,
        };
        let options = guess_like_request(Some(&params));
        assert!(matches!(&options, Ok(o) if o.data == Some(json!({"page": 2}))));
    }

    #[test]
    fn page_result_decodes() {
        let raw = r#"{"counts":1,"pageSize":10,"pages":1,"page":1,
            "items":[{"id":"g1","name":"Tea","desc":"","price":9.9,"picture":"p","orderNum":3}]}"#;
        let page: std::result::Result<PageResult<GuessItem>, _> = serde_json::from_str(raw);
        assert!(page.is_ok(), "decode failed: {page:?}");
        let Ok(page) = page else { return };
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].order_num, 3);
    }
}
