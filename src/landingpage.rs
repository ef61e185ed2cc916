// src/landingpage.rs

//! Registration landing page for the marketplace listing.
//!
//! GET renders the registration form; POST resolves the registration token,
//! stores the subscriber record, and queues the entitlement refresh.

use aws_lambda_events::event::lambda_function_urls::{
    LambdaFunctionUrlRequest, LambdaFunctionUrlResponse,
};
use chrono::Utc;
use tracing::info;

use crate::error::Result;
use crate::http::{self, bad_request, html_response, method_not_allowed};
use crate::models::{EntitlementNotification, RegistrationForm, SubscriberRecord};
use crate::services::{CustomerResolver, EntitlementQueue};
use crate::storage::SubscriberStore;

/// Query parameter carrying the marketplace registration token.
pub const TOKEN_PARAM: &str = "x-amzn-marketplace-token";

/// Registration form template; `{token}` is replaced with the escaped
/// marketplace token for the post-back URL.
const INDEX_TEMPLATE: &str = include_str!("templates/index.html");

/// Page shown when the marketplace token is missing.
const BAD_REQUEST_PAGE: &str = include_str!("templates/badrequest.html");

/// Fragment returned after a successful registration.
const SUBSCRIBE_SUCCESS: &str = r#"<div class="alert alert-success" role="alert">
  You have purchased an enterprise product that requires some additional setup.
A representative from our team will be contacting you within two business days with your account credentials.
Please contact Support through our website if you have any questions.
</div>"#;

/// Landing-page request handler.
pub struct LandingPage<R, S, Q> {
    resolver: R,
    store: S,
    queue: Q,
}

impl<R, S, Q> LandingPage<R, S, Q>
where
    R: CustomerResolver,
    S: SubscriberStore,
    Q: EntitlementQueue,
{
    pub fn new(resolver: R, store: S, queue: Q) -> Self {
        Self {
            resolver,
            store,
            queue,
        }
    }

    /// Dispatch a Function URL request by method.
    pub async fn handle(
        &self,
        request: LambdaFunctionUrlRequest,
    ) -> Result<LambdaFunctionUrlResponse> {
        match request.request_context.http.method.as_deref() {
            Some("GET") => self.render_form(&request),
            Some("POST") => self.register(&request).await,
            _ => Ok(method_not_allowed()),
        }
    }

    /// GET: render the registration form around the marketplace token.
    fn render_form(
        &self,
        request: &LambdaFunctionUrlRequest,
    ) -> Result<LambdaFunctionUrlResponse> {
        match request.query_string_parameters.get(TOKEN_PARAM) {
            Some(token) if !token.is_empty() => {
                let escaped: String =
                    url::form_urlencoded::byte_serialize(token.as_bytes()).collect();
                Ok(html_response(200, INDEX_TEMPLATE.replace("{token}", &escaped)))
            }
            _ => Ok(html_response(400, BAD_REQUEST_PAGE)),
        }
    }

    /// POST: resolve the token, store the subscriber, queue the refresh.
    async fn register(
        &self,
        request: &LambdaFunctionUrlRequest,
    ) -> Result<LambdaFunctionUrlResponse> {
        if !http::is_form_urlencoded(request) {
            return Ok(bad_request());
        }
        let token = match request.query_string_parameters.get(TOKEN_PARAM) {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => return Ok(bad_request()),
        };
        if request.body.as_deref().unwrap_or_default().is_empty() {
            return Ok(bad_request());
        }
        let body = http::decode_body(request)?;
        let Some(form) = RegistrationForm::parse(&body) else {
            return Ok(bad_request());
        };

        let customer = self.resolver.resolve_customer(&token).await?;
        let notification = EntitlementNotification::entitlement_updated(
            &customer.customer_identifier,
            &customer.product_code,
        );
        let record = SubscriberRecord::new(customer, form, Utc::now());
        self.store.put_subscriber(&record).await?;
        self.queue.publish(&notification).await?;

        info!(
            "Registered subscriber {} for product {}",
            record.customer_identifier, record.product_code
        );
        Ok(html_response(202, SUBSCRIBE_SUCCESS))
    }
}
