//! Tool layer: each governance operation exposed as a named function
//! taking and returning JSON, ready to hand to an LLM orchestrator or
//! any other in-process caller.
//!
//! Backend failures never surface as Rust errors here. They become
//! structured payloads with an error code, message, and remediation
//! hint; the caller branches on the returned structure.

mod expiration;
mod lookup;
mod register;
mod score;

pub use expiration::ExpirationTool;
pub use lookup::{CatalogLookupTool, ContractLookupTool, HistoryTool, PriorCaveatsTool};
pub use register::RegisterTool;
pub use score::ScoreTool;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use parecer_core::DeterministicScoringEngine;
use parecer_store::Backends;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    async fn execute(&self, input: Value) -> Result<Value>;
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    /// Registry wired with all seven governance tools over the given
    /// backends.
    pub fn with_backends(backends: &Backends) -> Self {
        let mut registry = Self::default();
        registry.register(ContractLookupTool::new(Arc::clone(&backends.contracts)));
        registry.register(CatalogLookupTool::new(Arc::clone(&backends.catalog)));
        registry.register(ExpirationTool);
        registry.register(HistoryTool::new(Arc::clone(&backends.history)));
        registry.register(PriorCaveatsTool::new(Arc::clone(&backends.history)));
        registry.register(ScoreTool::new(DeterministicScoringEngine::default()));
        registry.register(RegisterTool::new(Arc::clone(&backends.opinions)));
        registry
    }

    pub async fn execute(&self, name: &str, input: Value) -> Result<Value> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("unknown tool: {name}"))?;
        tool.execute(input).await
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
