// Test doubles shared by the engine tests.

use futures::future::BoxFuture;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::Row;
use crate::checker::{Prober, Status};

pub fn pending_rows(urls: &[&str]) -> Vec<Row> {
    urls.iter()
        .enumerate()
        .map(|(i, url)| Row::pending(i, *url))
        .collect()
}

/// Prober with canned answers. Unknown URLs are Valid after no delay.
#[derive(Default)]
pub struct ScriptedProber {
    answers: HashMap<String, (Status, Duration)>,
    hanging: HashSet<String>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    probed: Mutex<Vec<String>>,
    finished: Mutex<Vec<String>>,
}

impl ScriptedProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, status: Status, delay_ms: u64) -> Self {
        self.answers
            .insert(url.to_string(), (status, Duration::from_millis(delay_ms)));
        self
    }

    /// Probes of `url` never finish, like a request stuck mid-flight when
    /// the process is killed
    pub fn hang(mut self, url: &str) -> Self {
        self.hanging.insert(url.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn probed_urls(&self) -> Vec<String> {
        self.probed.lock().unwrap().clone()
    }

    /// URLs in the order their probes completed
    pub fn finished_urls(&self) -> Vec<String> {
        self.finished.lock().unwrap().clone()
    }
}

impl Prober for ScriptedProber {
    fn probe<'a>(&'a self, url: &'a str, _timeout: Duration) -> BoxFuture<'a, Status> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.probed.lock().unwrap().push(url.to_string());
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            if self.hanging.contains(url) {
                futures::future::pending::<()>().await;
            }

            let (status, delay) = self
                .answers
                .get(url)
                .cloned()
                .unwrap_or((Status::Valid, Duration::ZERO));
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.finished.lock().unwrap().push(url.to_string());
            status
        })
    }
}
