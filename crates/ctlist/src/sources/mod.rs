pub mod crtsh_html;
pub mod crtsh_json;

use self::crtsh_html::CrtShHtml;
use self::crtsh_json::CrtShJson;
use crate::config::ParseMode;
use crate::model::ResultSet;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, error, info, instrument, trace};

// crt.sh regularly needs tens of seconds for popular domains
pub const HTTP_REQUEST_TIMEOUT_MS: u64 = 60000;
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub trait Module {
    fn name(&self) -> String;
    fn description(&self) -> String;
}

/// A certificate transparency lookup: one request per domain, then a parse of
/// the body into the domain's result set.
#[async_trait]
pub trait CtSource: Module + Send + Sync {
    /// Full URL queried for a domain, without the `q` parameter.
    fn url(&self) -> String;

    /// Inserts the names found in `body` and returns how many were new.
    fn parse(&self, body: &str, result: &mut ResultSet) -> Result<usize>;

    async fn fetch(&self, http_client: &Client, domain: &str) -> Result<String> {
        let res = http_request(http_client, &self.url(), domain).await?;

        if !res.status().is_success() {
            return Err(Error::InvalidHttpResponse(format!(
                "{} answered {}",
                self.name(),
                res.status()
            )));
        }

        let body = res.text().await?;
        trace!("Body: {:?}", body);
        Ok(body)
    }
}

pub fn source_for(mode: ParseMode, endpoint: &str) -> Box<dyn CtSource> {
    match mode {
        ParseMode::Json => Box::new(CrtShJson::new(endpoint)),
        ParseMode::Html => Box::new(CrtShHtml::new(endpoint)),
    }
}

pub fn new_http_client() -> Result<Client> {
    let http_timeout = Duration::from_millis(HTTP_REQUEST_TIMEOUT_MS);
    let http_client = Client::builder()
        .timeout(http_timeout)
        .user_agent(USER_AGENT)
        .build()?;
    debug!("HTTP Client created: {:?}", http_client);
    Ok(http_client)
}

// region:        --- HTTP requests

#[instrument(name = "HTTP_request", level = "info", skip_all, fields(url = url, q = domain))]
pub async fn http_request(http_client: &Client, url: &str, domain: &str) -> Result<Response> {
    info!("Sending request");
    match http_client.get(url).query(&[("q", domain)]).send().await {
        Ok(res) => {
            info!("Receive with status: {}", res.status());
            debug!("Response: {:?}", res);
            Ok(res)
        }
        Err(err) => {
            error!("Reason: {}", err);
            Err(Error::Reqwest(err))
        }
    }
}

// endregion:     --- HTTP requests

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn source_follows_mode() {
        let json = source_for(ParseMode::Json, "https://crt.sh");
        let html = source_for(ParseMode::Html, "https://crt.sh");

        assert_eq!(json.name(), "crtsh/json");
        assert_eq!(json.url(), "https://crt.sh/json");
        assert_eq!(html.name(), "crtsh/html");
        assert_eq!(html.url(), "https://crt.sh/");
    }

    #[tokio::test]
    async fn fetch_sends_domain_as_query() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .and(query_param("q", "example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let source = source_for(ParseMode::Json, &mock_server.uri());
        let client = new_http_client().unwrap();
        let body = source.fetch(&client, "example.com").await.unwrap();

        assert_eq!(body, "[]");
    }

    #[tokio::test]
    async fn fetch_rejects_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("[]"))
            .mount(&mock_server)
            .await;

        let source = source_for(ParseMode::Html, &mock_server.uri());
        let client = new_http_client().unwrap();
        let res = source.fetch(&client, "example.com").await;

        assert!(matches!(res, Err(Error::InvalidHttpResponse(_))));
    }

    #[tokio::test]
    async fn fetch_reports_unreachable_service() {
        let source = source_for(ParseMode::Json, "http://127.0.0.1:9");
        let client = new_http_client().unwrap();
        let res = source.fetch(&client, "example.com").await;

        assert!(matches!(res, Err(Error::Reqwest(_))));
    }
}
