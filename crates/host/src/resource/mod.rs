// ABOUTME: Fetches archive pages over HTTP for the translators.
// ABOUTME: Guards against private-network targets, caps body size and decodes legacy charsets.

use std::collections::HashMap;
use std::net::IpAddr;

use bytes::Bytes;
use ipnet::{Ipv4Net, Ipv6Net};
use url::Url;

use crate::error::HostError;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Options for fetching a resource.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub headers: HashMap<String, String>,
    pub allow_private_networks: bool,
}

/// A fetched document.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decodes the body using the Content-Type charset, or by detection.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Check if an IP address is in a private/reserved range.
pub(crate) fn is_private_ip(addr: &IpAddr) -> bool {
    match addr {
        IpAddr::V4(ip) => {
            let blocked: [Ipv4Net; 5] = [
                "10.0.0.0/8".parse().unwrap(),
                "172.16.0.0/12".parse().unwrap(),
                "192.168.0.0/16".parse().unwrap(),
                "127.0.0.0/8".parse().unwrap(),
                "169.254.0.0/16".parse().unwrap(),
            ];
            blocked.iter().any(|net| net.contains(ip))
        }
        IpAddr::V6(ip) => {
            if ip.is_loopback() {
                return true;
            }
            let unique_local: Ipv6Net = "fc00::/7".parse().unwrap();
            let link_local: Ipv6Net = "fe80::/10".parse().unwrap();
            unique_local.contains(ip) || link_local.contains(ip)
        }
    }
}

/// Decode body bytes to a String using charset from content-type header or detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(encoding) = content_type
        .and_then(extract_charset)
        .and_then(|charset| encoding_rs::Encoding::for_label(charset.as_bytes()))
    {
        let (decoded, _, _) = encoding.decode(body);
        return decoded.into_owned();
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract charset value from Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    content_type.to_lowercase().split(';').find_map(|part| {
        part.trim()
            .strip_prefix("charset=")
            .map(|charset| charset.trim_matches('"').trim_matches('\'').to_string())
    })
}

/// Rejects hosts that are, or resolve to, private addresses.
async fn check_public_host(target: &Url, url: &str, reason: &str) -> Result<(), HostError> {
    let Some(host) = target.host_str() else {
        return Ok(());
    };
    let host = host.trim_start_matches('[').trim_end_matches(']');

    if let Ok(ip) = host.parse::<IpAddr>() {
        if is_private_ip(&ip) {
            return Err(HostError::ssrf(url, "Fetch", Some(anyhow::anyhow!("{}", reason))));
        }
        return Ok(());
    }

    let port = target.port_or_known_default().unwrap_or(80);
    let addrs = tokio::net::lookup_host((host, port)).await.map_err(|e| {
        HostError::fetch(url, "Fetch", Some(anyhow::anyhow!("DNS lookup failed for {}: {}", host, e)))
    })?;
    for socket_addr in addrs {
        if is_private_ip(&socket_addr.ip()) {
            return Err(HostError::ssrf(url, "Fetch", Some(anyhow::anyhow!("{}", reason))));
        }
    }
    Ok(())
}

fn request_error(url: &str, what: &str, err: reqwest::Error) -> HostError {
    if err.is_timeout() {
        HostError::timeout(url, "Fetch", Some(anyhow::anyhow!("{}: {}", what, err)))
    } else {
        HostError::fetch(url, "Fetch", Some(anyhow::anyhow!("{}: {}", what, err)))
    }
}

/// Fetch a resource from the given URL.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchResult, HostError> {
    if url.is_empty() {
        return Err(HostError::invalid_url(url, "Fetch", None));
    }

    let parsed_url = Url::parse(url).map_err(|e| {
        HostError::invalid_url(url, "Fetch", Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;

    let scheme = parsed_url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(HostError::invalid_url(
            url,
            "Fetch",
            Some(anyhow::anyhow!("scheme must be http or https")),
        ));
    }

    if !opts.allow_private_networks {
        check_public_host(&parsed_url, url, "private IP addresses are not allowed").await?;
    }

    let mut request = client.get(url);
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }

    tracing::debug!(url, "fetching");
    let response = request
        .send()
        .await
        .map_err(|e| request_error(url, "request failed", e))?;

    if !opts.allow_private_networks {
        check_public_host(
            response.url(),
            url,
            "redirect to private IP address is not allowed",
        )
        .await?;
    }

    let content_length = response.content_length().or_else(|| {
        response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
    });
    if content_length.is_some_and(|len| len as usize > MAX_CONTENT_LENGTH) {
        return Err(HostError::fetch(url, "Fetch", Some(anyhow::anyhow!("content too large"))));
    }

    let status = response.status().as_u16();
    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    let body = response
        .bytes()
        .await
        .map_err(|e| request_error(url, "failed to read body", e))?;

    if body.len() > MAX_CONTENT_LENGTH {
        return Err(HostError::fetch(url, "Fetch", Some(anyhow::anyhow!("content too large"))));
    }

    if status != 200 {
        return Err(HostError::fetch(
            url,
            "Fetch",
            Some(anyhow::anyhow!("HTTP status {}", status)),
        ));
    }

    tracing::debug!(url, final_url = %final_url, bytes = body.len(), "fetched");
    Ok(FetchResult {
        status,
        url: url.to_string(),
        final_url,
        content_type,
        body,
    })
}
