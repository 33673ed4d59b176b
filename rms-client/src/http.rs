//! HTTP client for network-based API calls
//!
//! The server sets the session in an HttpOnly `token` cookie; reqwest's
//! cookie store sends it back on every request.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{
    DiningTable, DiningTableCreate, DiningTableUpdate, Menu, Order, OrderCreate, OrderDetail,
    OrderStatus, Page, Setting, User, UserCreate, UserUpdate,
};
use shared::{Count, ErrorBody, LoginRequest, SessionInfo, TableLoginRequest, TableLoginResponse};

use crate::{ClientConfig, ClientError, ClientResult, RmsApi};

/// HTTP client for making network requests to the RMS server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = %method, url = %url, "Sending request");
        self.client.request(method, url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<T> {
        let mut request = self.request(Method::PATCH, path);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.send(request).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::DELETE, path)).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            // 只按状态码分类，消息体仅用于展示
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.message)
                .unwrap_or(text);
            tracing::debug!(status = %status, message = %message, "Request failed");
            return Err(ClientError::from_status(status, message));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl RmsApi for HttpClient {
    async fn login(&self, req: &LoginRequest) -> ClientResult<User> {
        self.post("/auth/login", req).await
    }

    async fn table_login(&self, req: &TableLoginRequest) -> ClientResult<TableLoginResponse> {
        self.post("/auth/table-login", req).await
    }

    async fn check_session(&self) -> ClientResult<SessionInfo> {
        self.get("/auth/check-session").await
    }

    async fn logout(&self) -> ClientResult<()> {
        self.send(self.request(Method::POST, "/auth/logout")).await
    }

    async fn list_orders(&self) -> ClientResult<Vec<OrderDetail>> {
        self.get("/orders").await
    }

    async fn list_orders_by_status(
        &self,
        status: OrderStatus,
        page: Page,
    ) -> ClientResult<Vec<OrderDetail>> {
        let request = self
            .request(Method::GET, &format!("/orders/status/{}", status))
            .query(&page);
        self.send(request).await
    }

    async fn list_table_orders(&self, table_id: &str) -> ClientResult<Vec<OrderDetail>> {
        self.get(&format!("/orders/table/{}", table_id)).await
    }

    async fn place_orders(&self, items: &[OrderCreate]) -> ClientResult<Vec<Order>> {
        self.post("/orders", items).await
    }

    async fn cancel_order(&self, id: &str) -> ClientResult<Order> {
        self.patch::<_, ()>(&format!("/orders/cancel/{}", id), None).await
    }

    async fn serve_order(&self, id: &str) -> ClientResult<Order> {
        self.patch::<_, ()>(&format!("/orders/serve/{}", id), None).await
    }

    async fn finish_order(&self, id: &str) -> ClientResult<Order> {
        self.patch::<_, ()>(&format!("/orders/finish/{}", id), None).await
    }

    async fn list_tables(&self) -> ClientResult<Vec<DiningTable>> {
        self.get("/tables").await
    }

    async fn count_tables(&self) -> ClientResult<i64> {
        self.get::<Count>("/tables/count").await.map(|c| c.count)
    }

    async fn create_table(&self, data: &DiningTableCreate) -> ClientResult<DiningTable> {
        self.post("/tables", data).await
    }

    async fn update_table(&self, id: &str, data: &DiningTableUpdate) -> ClientResult<DiningTable> {
        self.patch(&format!("/tables/{}", id), Some(data)).await
    }

    async fn delete_table(&self, id: &str) -> ClientResult<DiningTable> {
        self.delete(&format!("/tables/{}", id)).await
    }

    async fn list_users(&self) -> ClientResult<Vec<User>> {
        self.get("/users").await
    }

    async fn count_users(&self) -> ClientResult<i64> {
        self.get::<Count>("/users/count").await.map(|c| c.count)
    }

    async fn create_user(&self, data: &UserCreate) -> ClientResult<User> {
        self.post("/users", data).await
    }

    async fn update_user(&self, id: &str, data: &UserUpdate) -> ClientResult<User> {
        self.patch(&format!("/users/{}", id), Some(data)).await
    }

    async fn delete_user(&self, id: &str) -> ClientResult<User> {
        self.delete(&format!("/users/{}", id)).await
    }

    async fn list_menus(&self) -> ClientResult<Vec<Menu>> {
        self.get("/menus").await
    }

    async fn count_menus(&self) -> ClientResult<i64> {
        self.get::<Count>("/menus/count").await.map(|c| c.count)
    }

    async fn get_setting(&self, name: &str) -> ClientResult<Setting> {
        self.get(&format!("/settings/{}", name)).await
    }
}
