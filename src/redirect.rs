// src/redirect.rs

//! Legacy fulfillment-URL redirect.
//!
//! AWS Marketplace POSTs the registration token to the fulfillment URL
//! configured on the listing. This handler forwards requests that still
//! arrive at the legacy URL to the new landing page, carrying the token
//! form as the query string.

use aws_lambda_events::event::lambda_function_urls::{
    LambdaFunctionUrlRequest, LambdaFunctionUrlResponse,
};
use aws_lambda_events::http::{HeaderMap, HeaderValue, header};
use tracing::info;
use url::Url;

use crate::error::{AppError, Result};
use crate::http::{self, bad_request, method_not_allowed};

/// Redirect request handler.
pub struct Redirect {
    location: Url,
}

impl Redirect {
    pub fn new(location: Url) -> Self {
        Self { location }
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    /// Dispatch a Function URL request by method.
    pub fn handle(&self, request: &LambdaFunctionUrlRequest) -> Result<LambdaFunctionUrlResponse> {
        match request.request_context.http.method.as_deref() {
            Some("POST") => self.redirect(request),
            _ => Ok(method_not_allowed()),
        }
    }

    /// POST: forward the marketplace token form to the landing page.
    fn redirect(&self, request: &LambdaFunctionUrlRequest) -> Result<LambdaFunctionUrlResponse> {
        if !http::is_form_urlencoded(request) {
            return Ok(bad_request());
        }
        let token = http::decode_body(request)?;
        let location = format!("{}?{}", self.location, token);
        let mut headers = HeaderMap::new();
        headers.insert(
            header::LOCATION,
            HeaderValue::from_str(&location)
                .map_err(|e| AppError::message(format!("invalid redirect location: {e}")))?,
        );

        info!("Redirecting legacy fulfillment request to {}", self.location);
        let mut response = LambdaFunctionUrlResponse::default();
        response.status_code = 302;
        response.headers = headers;
        response.body = None;
        response.is_base64_encoded = false;
        response.cookies = Vec::new();
        Ok(response)
    }
}
