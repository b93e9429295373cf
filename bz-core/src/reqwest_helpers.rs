use http::Extensions;
use log::{debug, error};
use reqwest::{Client, Request, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware, Next};
use std::time::Instant;

const USER_AGENT: &str = concat!("bz-conversion-generator/", env!("CARGO_PKG_VERSION"));

/// One attempt per request, no rate limiting. The generator only issues two requests per run.
pub fn create_client() -> reqwest::Result<ClientWithMiddleware> {
    let reqwest_client = Client::builder().user_agent(USER_AGENT).build()?;

    Ok(ClientBuilder::new(reqwest_client).with(ErrorLoggingMiddleware).build())
}

pub struct ErrorLoggingMiddleware;

#[async_trait::async_trait]
impl Middleware for ErrorLoggingMiddleware {
    async fn handle(&self, req: Request, extensions: &mut Extensions, next: Next<'_>) -> reqwest_middleware::Result<Response> {
        let start = Instant::now();
        let method = req.method().clone();
        let url = req.url().clone();

        let result = next.run(req, extensions).await;

        let duration = start.elapsed();

        match &result {
            Ok(resp) if !resp.status().is_success() => {
                error!("Request failed: {} {} - Status: {}, Duration: {:?}", method, url, resp.status(), duration);
            }
            Err(e) => {
                error!("Request error: {} {} - Error: {}, Duration: {:?}", method, url, e, duration);
            }
            _ => {
                debug!("Request succeeded: {} {} - Duration: {:?}", method, url, duration);
            }
        }

        result
    }
}
