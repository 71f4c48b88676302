//! HTTP implementation of the ledger traits.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use gudang_core::{CategoryId, OpnameId, StockId, ToolId};
use gudang_inventory::{
    Category, CategoryDraft, OpnameUpdate, StockDraft, StockKind, StockOpnameRecord,
    StockTransaction, Tool, ToolDraft,
};

use crate::config::ClientConfig;
use crate::envelope::{self, Validate};
use crate::error::ClientError;
use crate::ledger::{InventoryStore, OpnameLedger, StockLedger};

/// Ledger client over `reqwest`.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpLedger {
    base_url: Url,
    token: Option<String>,
    http: reqwest::Client,
}

impl HttpLedger {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Config(format!("base_url {:?}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "base_url {:?} cannot be a base",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            base_url,
            token: config.token,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the API root, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        tracing::debug!(%method, %url, "ledger request");

        let req = self.http.request(method, url);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn execute(&self, req: RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let resp = req
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %body, "ledger rejected request");
            return Err(ClientError::Api(status.as_u16(), body));
        }
        Ok(resp)
    }

    async fn fetch<T>(&self, segments: &[&str]) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Validate,
    {
        let resp = self.execute(self.request(Method::GET, segments)).await?;
        let body = resp
            .bytes()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        envelope::decode(&body)
    }

    async fn write<B>(&self, method: Method, segments: &[&str], body: &B) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.execute(self.request(method, segments).json(body)).await?;
        Ok(())
    }
}

#[async_trait]
impl OpnameLedger for HttpLedger {
    async fn list_opname(&self) -> Result<Vec<StockOpnameRecord>, ClientError> {
        self.fetch(&["stock-opname"]).await
    }

    async fn update_opname(&self, id: &OpnameId, update: &OpnameUpdate) -> Result<(), ClientError> {
        self.write(Method::PUT, &["stock-opname", id.as_str()], update)
            .await
    }
}

#[async_trait]
impl InventoryStore for HttpLedger {
    async fn list_tools(&self) -> Result<Vec<Tool>, ClientError> {
        self.fetch(&["tool"]).await
    }

    async fn create_tool(&self, draft: &ToolDraft) -> Result<(), ClientError> {
        self.write(Method::POST, &["tool"], draft).await
    }

    async fn update_tool(&self, id: &ToolId, draft: &ToolDraft) -> Result<(), ClientError> {
        self.write(Method::PUT, &["tool", id.as_str()], draft).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.fetch(&["category"]).await
    }

    async fn create_category(&self, draft: &CategoryDraft) -> Result<(), ClientError> {
        self.write(Method::POST, &["category"], draft).await
    }

    async fn update_category(
        &self,
        id: &CategoryId,
        draft: &CategoryDraft,
    ) -> Result<(), ClientError> {
        self.write(Method::PUT, &["category", id.as_str()], draft)
            .await
    }
}

#[async_trait]
impl StockLedger for HttpLedger {
    async fn list_stock(&self, kind: StockKind) -> Result<Vec<StockTransaction>, ClientError> {
        self.fetch(&[kind.resource()]).await
    }

    async fn get_stock(
        &self,
        kind: StockKind,
        id: &StockId,
    ) -> Result<StockTransaction, ClientError> {
        self.fetch(&[kind.resource(), id.as_str()]).await
    }

    async fn create_stock(&self, kind: StockKind, draft: &StockDraft) -> Result<(), ClientError> {
        self.write(Method::POST, &[kind.resource()], draft).await
    }

    async fn update_stock(
        &self,
        kind: StockKind,
        id: &StockId,
        draft: &StockDraft,
    ) -> Result<(), ClientError> {
        self.write(Method::PUT, &[kind.resource(), id.as_str()], draft)
            .await
    }

    async fn delete_stock(&self, kind: StockKind, id: &StockId) -> Result<(), ClientError> {
        self.execute(self.request(Method::DELETE, &[kind.resource(), id.as_str()]))
            .await?;
        Ok(())
    }
}
