// 导出子模块
pub mod hello_handler;

pub use hello_handler::handle_hello;

use crate::daemon::DaemonState;
use anyhow::Result;
use wirecall_core::utils::{HELLO_FUNCTION, HELLO_INSTANCE};

/// Routes one invocation to its handler.
///
/// Returns `Ok(None)` when nothing is exported under `instance`/`name`.
pub async fn dispatch(
    instance: &str,
    name: &str,
    params: &[u8],
    state: &DaemonState,
) -> Result<Option<Vec<u8>>> {
    match (instance, name) {
        (HELLO_INSTANCE, HELLO_FUNCTION) => handle_hello(params, state).await.map(Some),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirecall_core::codec::read_string;

    #[tokio::test]
    async fn test_dispatch_hello() -> Result<()> {
        let state = DaemonState::new("hello from Rust");
        let reply = dispatch(HELLO_INSTANCE, HELLO_FUNCTION, &[], &state)
            .await?
            .expect("hello is exported");
        assert_eq!(read_string(&mut reply.as_slice())?, "hello from Rust");
        Ok(())
    }

    #[tokio::test]
    async fn test_dispatch_hello_rejects_params() {
        let state = DaemonState::new("hi");
        assert!(dispatch(HELLO_INSTANCE, HELLO_FUNCTION, &[0x00], &state)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_dispatch_unknown() -> Result<()> {
        let state = DaemonState::new("hi");
        assert!(dispatch(HELLO_INSTANCE, "goodbye", &[], &state)
            .await?
            .is_none());
        assert!(dispatch("other:pkg/iface", HELLO_FUNCTION, &[], &state)
            .await?
            .is_none());
        Ok(())
    }
}
