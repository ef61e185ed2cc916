// src/http.rs

//! Helpers shared by the Function URL handlers.

use aws_lambda_events::event::lambda_function_urls::{
    LambdaFunctionUrlRequest, LambdaFunctionUrlResponse,
};
use aws_lambda_events::http::{HeaderMap, HeaderValue, header};
use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::error::Result;

/// Content type required for form submissions.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Response body for rejected requests.
pub const MSG_BAD_REQUEST: &str = "bad request";

/// Response body for unsupported methods.
pub const MSG_METHOD_NOT_ALLOWED: &str = "method not allowed";

/// Build a `text/html` response with the given status code.
pub fn html_response(status_code: i64, body: impl Into<String>) -> LambdaFunctionUrlResponse {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html"));
    let mut response = LambdaFunctionUrlResponse::default();
    response.status_code = status_code;
    response.headers = headers;
    response.body = Some(body.into());
    response.is_base64_encoded = false;
    response.cookies = Vec::new();
    response
}

/// The standard 400 response.
pub fn bad_request() -> LambdaFunctionUrlResponse {
    html_response(400, MSG_BAD_REQUEST)
}

/// The standard 405 response.
pub fn method_not_allowed() -> LambdaFunctionUrlResponse {
    html_response(405, MSG_METHOD_NOT_ALLOWED)
}

/// True when the request carries the urlencoded-form content type.
pub fn is_form_urlencoded(request: &LambdaFunctionUrlRequest) -> bool {
    request
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        == Some(FORM_URLENCODED)
}

/// Request body, base64-decoded when the runtime flagged it as encoded.
pub fn decode_body(request: &LambdaFunctionUrlRequest) -> Result<String> {
    let body = request.body.clone().unwrap_or_default();
    if request.is_base64_encoded {
        let bytes = STANDARD.decode(body.as_bytes())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    } else {
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_response_sets_content_type() {
        let response = html_response(200, "<p>ok</p>");
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body.as_deref(), Some("<p>ok</p>"));
        assert_eq!(
            response.headers.get(header::CONTENT_TYPE).unwrap(),
            "text/html"
        );
    }

    #[test]
    fn bad_request_and_method_not_allowed_bodies() {
        assert_eq!(bad_request().status_code, 400);
        assert_eq!(bad_request().body.as_deref(), Some(MSG_BAD_REQUEST));
        assert_eq!(method_not_allowed().status_code, 405);
        assert_eq!(
            method_not_allowed().body.as_deref(),
            Some(MSG_METHOD_NOT_ALLOWED)
        );
    }

    #[test]
    fn is_form_urlencoded_requires_exact_match() {
        let mut request = LambdaFunctionUrlRequest::default();
        assert!(!is_form_urlencoded(&request));

        request.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(FORM_URLENCODED),
        );
        assert!(is_form_urlencoded(&request));

        request
            .headers
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!is_form_urlencoded(&request));
    }

    #[test]
    fn decode_body_passes_plain_bodies_through() {
        let mut request = LambdaFunctionUrlRequest::default();
        request.body = Some("inputName=Jo".to_string());
        assert_eq!(decode_body(&request).unwrap(), "inputName=Jo");
    }

    #[test]
    fn decode_body_decodes_base64_bodies() {
        let mut request = LambdaFunctionUrlRequest::default();
        request.body = Some(STANDARD.encode("inputName=Jo"));
        request.is_base64_encoded = true;
        assert_eq!(decode_body(&request).unwrap(), "inputName=Jo");
    }

    #[test]
    fn decode_body_rejects_invalid_base64() {
        let mut request = LambdaFunctionUrlRequest::default();
        request.body = Some("not base64!".to_string());
        request.is_base64_encoded = true;
        assert!(decode_body(&request).is_err());
    }

    #[test]
    fn decode_body_handles_missing_body() {
        assert_eq!(
            decode_body(&LambdaFunctionUrlRequest::default()).unwrap(),
            ""
        );
    }
}
