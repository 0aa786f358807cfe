//! Scripted completion doubles shared by integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use socratic_tutor::TextCompletion;

/// One scripted outcome per call; the last outcome repeats once the script runs out.
pub enum Scripted {
    Text(String),
    Fail(String),
    Hang(Duration),
}

pub struct ScriptedCompletion {
    script: Mutex<VecDeque<Scripted>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedCompletion {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::new(vec![Scripted::Text(text.to_string())])
    }

    pub fn failing(message: &str) -> Self {
        Self::new(vec![Scripted::Fail(message.to_string())])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next(&self) -> Scripted {
        let mut script = self.script.lock().unwrap();
        let step = if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().map(|step| match step {
                Scripted::Text(text) => Scripted::Text(text.clone()),
                Scripted::Fail(message) => Scripted::Fail(message.clone()),
                Scripted::Hang(delay) => Scripted::Hang(*delay),
            })
        };
        step.unwrap_or_else(|| Scripted::Fail("script exhausted".to_string()))
    }
}

#[async_trait]
impl TextCompletion for ScriptedCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.next() {
            Scripted::Text(text) => Ok(text),
            Scripted::Fail(message) => Err(anyhow::anyhow!(message)),
            Scripted::Hang(delay) => {
                tokio::time::sleep(delay).await;
                Ok("{}".to_string())
            }
        }
    }
}
