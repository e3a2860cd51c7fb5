//! KA / sales project listings
//!
//! The query bodies are defined by the backend's filter forms and are passed
//! through as any serializable value.

use serde::{Deserialize, Serialize};

use crate::client::HttpClient;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::request::RequestOptions;

use super::payload;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleProjectItem {
    pub id: String,
    pub number: i64,
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KaProjectItem {
    pub id: String,
    pub number: i64,
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KaNumberItem {
    pub id: i64,
    pub number: i64,
    pub date: String,
}

pub fn ka_projects_request<Q: Serialize + ?Sized>(query: &Q) -> Result<RequestOptions> {
    Ok(RequestOptions::post("/project/selectKAProject").with_data(payload(query)?))
}

pub fn sale_projects_request<Q: Serialize + ?Sized>(query: &Q) -> Result<RequestOptions> {
    Ok(RequestOptions::post("/project/selectSaleProject").with_data(payload(query)?))
}

pub fn ka_numbers_request<Q: Serialize + ?Sized>(query: &Q) -> Result<RequestOptions> {
    Ok(RequestOptions::post("/project/selectKANumber").with_data(payload(query)?))
}

/// KA listing endpoints.
pub struct KaService<'a> {
    client: &'a HttpClient,
}

impl<'a> KaService<'a> {
    pub(crate) fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    pub async fn ka_projects<Q: Serialize + ?Sized>(
        &self,
        query: &Q,
    ) -> Result<Envelope<Vec<KaProjectItem>>> {
        self.client.request(ka_projects_request(query)?).await
    }

    pub async fn sale_projects<Q: Serialize + ?Sized>(
        &self,
        query: &Q,
    ) -> Result<Envelope<Vec<SaleProjectItem>>> {
        self.client.request(sale_projects_request(query)?).await
    }

    pub async fn ka_numbers<Q: Serialize + ?Sized>(
        &self,
        query: &Q,
    ) -> Result<Envelope<Vec<KaNumberItem>>> {
        self.client.request(ka_numbers_request(query)?).await
    }
}
