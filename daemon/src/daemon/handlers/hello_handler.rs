use crate::daemon::state::DaemonState;
use anyhow::{anyhow, Context, Result};
use wirecall_core::codec::encode_to_vec;

/// Handles `hello`: no parameters, one string result.
pub async fn handle_hello(params: &[u8], state: &DaemonState) -> Result<Vec<u8>> {
    if !params.is_empty() {
        log::warn!("hello takes no parameters, got {} byte(s)", params.len());
        return Err(anyhow!(
            "hello takes no parameters, got {} byte(s)",
            params.len()
        ));
    }

    let greeting = state.greeting().await;
    log::debug!("Replying to hello with {:?}", greeting);
    encode_to_vec(&greeting).context("Failed to encode hello result")
}
