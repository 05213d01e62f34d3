//! AWS Lambda handler for scenario evaluation
//!
//! Accepts a scenario document (optional preset plus overrides) as the JSON
//! body of a Lambda Function URL request and returns the full evaluation.
//! Requests are independent; nothing is shared between invocations.

use aws_lambda_events::event::lambda_function_urls::{
    LambdaFunctionUrlRequest, LambdaFunctionUrlResponse,
};
use battery_npv::{ScenarioRequest, ScenarioRunner};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde_json::json;

fn response(status_code: i64, body: Option<String>) -> Result<LambdaFunctionUrlResponse, Error> {
    let mut response = LambdaFunctionUrlResponse {
        status_code,
        headers: Default::default(),
        body,
        is_base64_encoded: false,
        cookies: Vec::new(),
    };
    response.headers.insert("content-type", "application/json".parse()?);
    response.headers.insert("access-control-allow-origin", "*".parse()?);
    response.headers.insert("access-control-allow-methods", "POST, OPTIONS".parse()?);
    response.headers.insert("access-control-allow-headers", "Content-Type".parse()?);
    Ok(response)
}

fn error_response(status_code: i64, message: &str) -> Result<LambdaFunctionUrlResponse, Error> {
    response(status_code, Some(json!({ "error": message }).to_string()))
}

/// Lambda handler function
async fn handler(
    event: LambdaEvent<LambdaFunctionUrlRequest>,
) -> Result<LambdaFunctionUrlResponse, Error> {
    let request = event.payload;

    // Handle CORS preflight
    if request.request_context.http.method.as_deref() == Some("OPTIONS") {
        return response(200, None);
    }

    if request.is_base64_encoded {
        return error_response(400, "binary request bodies are not supported");
    }

    let body = request.body.unwrap_or_else(|| "{}".to_string());
    let config = match ScenarioRequest::from_json(&body).and_then(|r| r.resolve()) {
        Ok(config) => config,
        Err(e) => {
            warn!("Rejected scenario: {}", e);
            return error_response(400, &e.to_string());
        }
    };

    let result = match ScenarioRunner::new().run(&config) {
        Ok(result) => result,
        Err(e) => return error_response(400, &e.to_string()),
    };

    info!(
        "Evaluated scenario: project NPV {:.2}, IRR {}",
        result.summary.project_npv,
        result.project.irr.display_pct()
    );

    response(200, Some(serde_json::to_string(&result)?))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
