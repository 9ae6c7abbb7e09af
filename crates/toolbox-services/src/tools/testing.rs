//! Test doubles for handlers that call an upstream

use std::sync::Mutex;

use serde_json::Value;
use toolbox::error::Result;
use toolbox::network::JsonSource;

/// A recorded GET: url plus query pairs
pub type Call = (String, Vec<(String, String)>);

/// `JsonSource` that records every call and answers from a closure
pub struct FakeSource {
    calls: Mutex<Vec<Call>>,
    respond: Box<dyn Fn(&str) -> Result<Value> + Send + Sync>,
}

impl FakeSource {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&str) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        }
    }

    pub fn returning(value: Value) -> Self {
        Self::new(move |_| Ok(value.clone()))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Query value of the only recorded call
    pub fn query_param(&self, key: &str) -> Option<String> {
        let calls = self.calls();
        calls[0]
            .1
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

impl JsonSource for FakeSource {
    fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push((
            url.to_string(),
            query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        ));
        (self.respond)(url)
    }
}
