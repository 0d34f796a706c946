use reminder_scheduler_api_structs::ErrorResponse;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

pub(crate) struct BaseClient {
    address: String,
    user_token: Option<String>,
    sweep_secret: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum APIErrorVariant {
    Network,
    MalformedResponse,
    BadClientData,
    Unauthorized,
    PreferenceDisabled,
    NotFound,
    Conflict,
    InternalError,
    UnexpectedStatusCode(StatusCode),
}

#[derive(Debug)]
pub struct APIError {
    pub variant: APIErrorVariant,
    /// Error message from the server, if it sent one
    pub message: String,
}

impl APIError {
    fn new(variant: APIErrorVariant, message: String) -> Self {
        Self { variant, message }
    }
}

pub type APIResponse<T> = Result<T, APIError>;

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            address,
            user_token: None,
            sweep_secret: None,
        }
    }

    pub fn set_user_token(&mut self, token: String) {
        self.user_token = Some(token);
    }

    pub fn set_sweep_secret(&mut self, secret: String) {
        self.sweep_secret = Some(secret);
    }

    fn get_client(&self, method: Method, path: String) -> RequestBuilder {
        let client = Client::new();
        let url = format!("{}/{}", self.address, path);
        let mut builder = client.request(method, &url);

        if let Some(token) = &self.user_token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        if let Some(secret) = &self.sweep_secret {
            builder = builder.header("x-sweep-secret", secret.clone());
        }
        builder
    }

    async fn check_status_code(
        &self,
        res: Response,
        expected_status_code: StatusCode,
    ) -> Result<Response, APIError> {
        let status = res.status();
        if status == expected_status_code {
            return Ok(res);
        }

        let variant = match status {
            StatusCode::BAD_REQUEST => APIErrorVariant::BadClientData,
            StatusCode::UNAUTHORIZED => APIErrorVariant::Unauthorized,
            StatusCode::FORBIDDEN => APIErrorVariant::PreferenceDisabled,
            StatusCode::NOT_FOUND => APIErrorVariant::NotFound,
            StatusCode::CONFLICT => APIErrorVariant::Conflict,
            StatusCode::INTERNAL_SERVER_ERROR => APIErrorVariant::InternalError,
            _ => APIErrorVariant::UnexpectedStatusCode(status),
        };
        let message = match res.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => String::new(),
        };
        Err(APIError::new(variant, message))
    }

    async fn handle_api_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.check_status_code(res, expected_status_code).await?;
        res.json::<T>()
            .await
            .map_err(|e| APIError::new(APIErrorVariant::MalformedResponse, e.to_string()))
    }

    async fn send<T: for<'de> Deserialize<'de>>(
        &self,
        builder: RequestBuilder,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = builder
            .send()
            .await
            .map_err(|e| APIError::new(APIErrorVariant::Network, e.to_string()))?;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.send(self.get_client(Method::GET, path), expected_status_code)
            .await
    }

    pub async fn put<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.send(
            self.get_client(Method::PUT, path).json(&body),
            expected_status_code,
        )
        .await
    }

    pub async fn post<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.send(
            self.get_client(Method::POST, path).json(&body),
            expected_status_code,
        )
        .await
    }

    pub async fn post_empty<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.send(self.get_client(Method::POST, path), expected_status_code)
            .await
    }
}
