// Shared fakes for pipeline tests: a scripted fetcher and in-memory sinks.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url_checker::{CheckResult, Error, Fetcher, RequestTarget, Result, ResultSink};

/// Answers every URL with 200 after `delay`, unless scripted otherwise.
/// Tracks how many fetches overlap.
#[derive(Default)]
pub struct FakeFetcher {
    delay: Duration,
    slow: HashMap<String, Duration>,
    unreachable: Vec<String>,
    hanging: Vec<String>,
    statuses: HashMap<String, u16>,
    current: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    pub fn slow(mut self, url: &str, delay: Duration) -> Self {
        self.slow.insert(url.to_string(), delay);
        self
    }

    pub fn unreachable(mut self, url: &str) -> Self {
        self.unreachable.push(url.to_string());
        self
    }

    /// Never answers `url`, like a host that accepts and stays silent.
    pub fn hang(mut self, url: &str) -> Self {
        self.hanging.push(url.to_string());
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.statuses.insert(url.to_string(), status);
        self
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, target: &RequestTarget) -> Result<u16> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if self.hanging.iter().any(|u| u == target.as_str()) {
            futures::future::pending::<()>().await;
        }

        let delay = self.slow.get(target.as_str()).copied().unwrap_or(self.delay);
        tokio::time::sleep(delay).await;
        self.current.fetch_sub(1, Ordering::SeqCst);

        if self.unreachable.iter().any(|u| u == target.as_str()) {
            return Err(Error::Internal(format!("connection refused: {}", target)));
        }
        Ok(self.statuses.get(target.as_str()).copied().unwrap_or(200))
    }
}

/// Keeps every written result; clones share the same storage.
#[derive(Clone, Default)]
pub struct MemorySink {
    results: Arc<Mutex<Vec<CheckResult>>>,
    closed: Arc<AtomicUsize>,
}

impl MemorySink {
    pub fn results(&self) -> Vec<CheckResult> {
        self.results.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self
            .results()
            .iter()
            .map(|r| r.target.as_str().to_string())
            .collect();
        urls.sort();
        urls
    }

    pub fn close_count(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResultSink for MemorySink {
    async fn write(&mut self, result: &CheckResult) -> Result<()> {
        self.results.lock().unwrap().push(result.clone());
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Fails on the write after `ok_writes` successful ones.
pub struct FailingSink {
    ok_writes: usize,
}

impl FailingSink {
    pub fn after(ok_writes: usize) -> Self {
        Self { ok_writes }
    }
}

#[async_trait]
impl ResultSink for FailingSink {
    async fn write(&mut self, _result: &CheckResult) -> Result<()> {
        if self.ok_writes == 0 {
            return Err(Error::Io(std::io::Error::other("disk full")));
        }
        self.ok_writes -= 1;
        Ok(())
    }
}

/// Sleeps on every write and remembers how far the record source had been
/// read ahead of the writes.
pub struct ThrottledSink {
    delay: Duration,
    pulled: Arc<AtomicUsize>,
    written: usize,
    max_lead: Arc<AtomicUsize>,
}

impl ThrottledSink {
    pub fn new(delay: Duration, pulled: Arc<AtomicUsize>, max_lead: Arc<AtomicUsize>) -> Self {
        Self {
            delay,
            pulled,
            written: 0,
            max_lead,
        }
    }
}

#[async_trait]
impl ResultSink for ThrottledSink {
    async fn write(&mut self, _result: &CheckResult) -> Result<()> {
        let lead = self.pulled.load(Ordering::SeqCst) - self.written;
        self.max_lead.fetch_max(lead, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.written += 1;
        Ok(())
    }
}

/// `n` records that count every pull into `pulled`.
pub fn counted_urls(n: usize, pulled: Arc<AtomicUsize>) -> impl Iterator<Item = Result<String>> + Send + 'static {
    (0..n).map(move |i| {
        pulled.fetch_add(1, Ordering::SeqCst);
        Ok(format!("http://fake.test/{}", i))
    })
}

pub fn urls(n: usize) -> Vec<Result<String>> {
    (0..n).map(|i| Ok(format!("http://fake.test/{}", i))).collect()
}

pub fn sorted(mut urls: Vec<String>) -> Vec<String> {
    urls.sort();
    urls
}
