use crate::error::Result;
use crate::target::RequestTarget;
use async_trait::async_trait;
use reqwest::Client;

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Issues a single GET and returns the response status.
    ///
    /// `Err` means no response was obtained at all.
    async fn fetch(&self, target: &RequestTarget) -> Result<u16>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: Option<&str>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(agent) = user_agent {
            builder = builder.user_agent(agent);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, target: &RequestTarget) -> Result<u16> {
        log::debug!("GET {}", target);

        // The response only exists on the Ok path; the status is never read otherwise.
        let res = self.client.get(target.as_str()).send().await?;
        Ok(res.status().as_u16())
    }
}
