use crate::types::FetchError;
use alloy_primitives::Address;
use async_trait::async_trait;
use std::collections::HashMap;
use std::future::Future;

/// Source of deployed bytecode, usually an `eth_getCode` call.
///
/// Returns the code as hex (`0x` optional). An empty string or `0x` means no code.
#[async_trait]
pub trait CodeFetcher: Send + Sync {
    async fn fetch_code(&self, address: Address) -> Result<String, FetchError>;
}

#[async_trait]
impl<F, Fut> CodeFetcher for F
where
    F: Fn(Address) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, FetchError>> + Send + 'static,
{
    async fn fetch_code(&self, address: Address) -> Result<String, FetchError> {
        self(address).await
    }
}

/// Fixed address → code map. Unknown addresses have no code.
#[derive(Debug, Clone, Default)]
pub struct StaticCodeFetcher {
    codes: HashMap<Address, String>,
}

impl StaticCodeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: Address, code: impl Into<String>) {
        self.codes.insert(address, code.into());
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl FromIterator<(Address, String)> for StaticCodeFetcher {
    fn from_iter<I: IntoIterator<Item = (Address, String)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl CodeFetcher for StaticCodeFetcher {
    async fn fetch_code(&self, address: Address) -> Result<String, FetchError> {
        Ok(self.codes.get(&address).cloned().unwrap_or_default())
    }
}
