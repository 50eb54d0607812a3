use crate::{fetcher::CodeFetcher, types::FetchError, words::strip_0x};
use alloy_primitives::{keccak256, Address, B256};
use std::time::Duration;
use tracing::{debug, warn};

/// keccak256 of hex-encoded code. Shared by fingerprinting and CREATE address derivation.
pub fn hash_bytecode_hex(code: &str) -> Result<B256, hex::FromHexError> {
    let bytes = hex::decode(strip_0x(code.trim()))?;
    Ok(keccak256(bytes))
}

/// Fetches the code at `address` and hashes it, bounded by `timeout`.
pub async fn try_fingerprint<F>(
    address: Address,
    fetcher: &F,
    timeout: Duration,
) -> Result<B256, FetchError>
where
    F: CodeFetcher + ?Sized,
{
    let code = tokio::time::timeout(timeout, fetcher.fetch_code(address))
        .await
        .map_err(|_| FetchError::Timeout(timeout))??;

    if strip_0x(code.trim()).is_empty() {
        return Err(FetchError::EmptyCode);
    }
    Ok(hash_bytecode_hex(&code)?)
}

/// Like [`try_fingerprint`], but any failure is logged and turned into `None`.
pub async fn fingerprint<F>(address: Address, fetcher: &F, timeout: Duration) -> Option<B256>
where
    F: CodeFetcher + ?Sized,
{
    match try_fingerprint(address, fetcher, timeout).await {
        Ok(hash) => Some(hash),
        Err(FetchError::EmptyCode) => {
            debug!(%address, "no code at address");
            None
        }
        Err(err) => {
            warn!(%address, error = %err, "could not fingerprint contract");
            None
        }
    }
}
