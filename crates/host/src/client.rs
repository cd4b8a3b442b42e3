// ABOUTME: The Client that drives translators: fetch, detect, then scrape or list-select-fetch-scrape.
// ABOUTME: Provides async translate() and translate_html() plus detect() for classification only.

use std::net::ToSocketAddrs;
use std::sync::Arc;

use folio_translators::{load_builtin_registry, Item, Page, PageKind, Translator, TranslatorRegistry};
use futures::future::join_all;

use crate::error::HostError;
use crate::options::{ClientBuilder, Options};
use crate::resource::{fetch, is_private_ip, FetchOptions};
use crate::selection::SelectItems;

/// What a first page asks the client to do next.
enum Next {
    Done(Vec<Item>),
    Follow(Vec<String>),
}

/// Builds the redirect policy that refuses hops into private networks.
fn redirect_policy(allow_private: bool) -> reqwest::redirect::Policy {
    reqwest::redirect::Policy::custom(move |attempt| {
        if allow_private {
            return attempt.follow();
        }
        let next = attempt.url().clone();
        let Some(host) = next.host_str() else {
            return attempt.follow();
        };
        let host = host.trim_start_matches('[').trim_end_matches(']');
        if let Ok(ip) = host.parse::<std::net::IpAddr>() {
            if is_private_ip(&ip) {
                return attempt.error("redirect to private IP blocked");
            }
            return attempt.follow();
        }

        // synchronous DNS resolution; the redirect policy cannot await
        let port = next.port_or_known_default().unwrap_or(80);
        match (host, port).to_socket_addrs() {
            Ok(mut addrs) => {
                if addrs.any(|sa| is_private_ip(&sa.ip())) {
                    attempt.error("redirect to private IP blocked")
                } else {
                    attempt.follow()
                }
            }
            Err(_) => attempt.error("DNS lookup failed during redirect"),
        }
    })
}

/// The Folio client: owns the HTTP client and the translator registry.
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
    registry: TranslatorRegistry,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Result<Self, HostError> {
        let http_client = match opts.http_client.clone() {
            Some(client) => client,
            None => reqwest::Client::builder()
                .redirect(redirect_policy(opts.allow_private_networks))
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .cookie_store(true)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .map_err(|e| {
                    HostError::fetch("", "Build", Some(anyhow::anyhow!("HTTP client: {}", e)))
                })?,
        };

        let registry = opts.registry.clone().unwrap_or_else(load_builtin_registry);

        Ok(Self {
            opts,
            http_client,
            registry,
        })
    }

    /// The translators this client dispatches to.
    pub fn registry(&self) -> &TranslatorRegistry {
        &self.registry
    }

    fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            headers: self.opts.headers.clone(),
            allow_private_networks: self.opts.allow_private_networks,
        }
    }

    fn translator_for(&self, url: &str) -> Option<Arc<dyn Translator>> {
        let translator = self.registry.find(url);
        match &translator {
            Some(t) => tracing::debug!(url, translator = t.label(), "translator matched"),
            None => tracing::info!(url, "no translator for URL"),
        }
        translator
    }

    async fn fetch_page(&self, url: &str) -> Result<Page, HostError> {
        let fetched = fetch(&self.http_client, url, &self.fetch_options()).await?;
        Ok(Page::parse(&fetched.final_url, &fetched.text())?)
    }

    fn parse_page(html: &str, url: &str) -> Result<Page, HostError> {
        if html.is_empty() {
            return Err(HostError::invalid_url(
                url,
                "TranslateHTML",
                Some(anyhow::anyhow!("empty HTML")),
            ));
        }
        Ok(Page::parse(url, html)?)
    }

    /// Classifies the page at `url` without scraping it.
    pub async fn detect(&self, url: &str) -> Result<Option<PageKind>, HostError> {
        let Some(translator) = self.translator_for(url) else {
            return Ok(None);
        };
        let page = self.fetch_page(url).await?;
        Ok(translator.detect(&page))
    }

    /// Classifies a provided document.
    pub fn detect_html(&self, html: &str, url: &str) -> Result<Option<PageKind>, HostError> {
        let Some(translator) = self.translator_for(url) else {
            return Ok(None);
        };
        let page = Self::parse_page(html, url)?;
        Ok(translator.detect(&page))
    }

    /// Translates the page at `url`.
    ///
    /// A detail page yields at most one item. A listing page is offered to
    /// `selector`, and every chosen URL is fetched and scraped concurrently;
    /// failures there are logged and skipped.
    pub async fn translate(
        &self,
        url: &str,
        selector: &dyn SelectItems,
    ) -> Result<Vec<Item>, HostError> {
        if url.is_empty() {
            return Err(HostError::invalid_url(url, "Translate", None));
        }
        let Some(translator) = self.translator_for(url) else {
            return Ok(vec![]);
        };
        let page = self.fetch_page(url).await?;
        let next = Self::first_pass(translator.as_ref(), page, selector)?;
        self.finish(translator, next).await
    }

    /// Translates a provided document; pages chosen from a listing are
    /// still fetched over HTTP.
    pub async fn translate_html(
        &self,
        html: &str,
        url: &str,
        selector: &dyn SelectItems,
    ) -> Result<Vec<Item>, HostError> {
        let Some(translator) = self.translator_for(url) else {
            return Ok(vec![]);
        };
        let page = Self::parse_page(html, url)?;
        let next = Self::first_pass(translator.as_ref(), page, selector)?;
        self.finish(translator, next).await
    }

    /// Detects and either scrapes the page or lists the URLs to follow.
    fn first_pass(
        translator: &dyn Translator,
        page: Page,
        selector: &dyn SelectItems,
    ) -> Result<Next, HostError> {
        let url = page.url().to_string();
        match translator.detect(&page) {
            None => {
                tracing::info!(url = %url, "page not recognised");
                Ok(Next::Done(vec![]))
            }
            Some(PageKind::Single(item_type)) => {
                tracing::debug!(url = %url, %item_type, "single record");
                let item = translator
                    .scrape(&page)
                    .map_err(|e| HostError::translate(url.as_str(), "Scrape", e))?;
                Ok(Next::Done(item.into_iter().collect()))
            }
            Some(PageKind::Multiple) => {
                let Some(results) = translator.collect(&page) else {
                    return Ok(Next::Done(vec![]));
                };
                let chosen = selector.select(&results);
                tracing::info!(
                    url = %url,
                    candidates = results.len(),
                    chosen = chosen.len(),
                    "listing page"
                );
                if chosen.is_empty() {
                    Ok(Next::Done(vec![]))
                } else {
                    Ok(Next::Follow(chosen))
                }
            }
        }
    }

    async fn finish(
        &self,
        translator: Arc<dyn Translator>,
        next: Next,
    ) -> Result<Vec<Item>, HostError> {
        let urls = match next {
            Next::Done(items) => return Ok(items),
            Next::Follow(urls) => urls,
        };

        let scrapes = urls.iter().map(|url| self.scrape_remote(translator.as_ref(), url));
        let outcomes = join_all(scrapes).await;

        let mut items = Vec::with_capacity(outcomes.len());
        for (url, outcome) in urls.iter().zip(outcomes) {
            match outcome {
                Ok(Some(item)) => items.push(item),
                Ok(None) => tracing::debug!(url = %url, "no record on page"),
                Err(e) => tracing::warn!(url = %url, error = %e, "skipping record"),
            }
        }
        Ok(items)
    }

    async fn scrape_remote(
        &self,
        translator: &dyn Translator,
        url: &str,
    ) -> Result<Option<Item>, HostError> {
        let page = self.fetch_page(url).await?;
        translator
            .scrape(&page)
            .map_err(|e| HostError::translate(url, "Scrape", e))
    }
}
