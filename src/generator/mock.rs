use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::Generator;

/// A scripted generator for tests. Returns pre-defined responses in order
/// and remembers every prompt it was handed.
pub struct MockGenerator {
    responses: Vec<Result<String, String>>,
    index: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn new(responses: Vec<&str>) -> Self {
        Self::scripted(responses.into_iter().map(|r| Ok(r.to_string())).collect())
    }

    /// A generator whose every call fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self::scripted(vec![Err(message.to_string())])
    }

    fn scripted(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses,
            index: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let i = self.index.fetch_add(1, Ordering::SeqCst);
        // A single failing script fails forever.
        let scripted = match self.responses.as_slice() {
            [Err(e)] => Some(Err(e.clone())),
            all => all.get(i).cloned(),
        };
        match scripted {
            Some(Ok(text)) => Ok(text),
            Some(Err(e)) => Err(anyhow!(e)),
            None => Err(anyhow!(
                "MockGenerator: no more responses (called {} times)",
                i + 1
            )),
        }
    }

    fn model(&self) -> &str {
        "mock"
    }
}
