#![cfg(unix)]

use std::io::{Read, Write};
use std::os::unix::net::UnixListener;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Result;
use wirecall_core::codec::write_string;
use wirecall_core::error::{DecodeError, InvokeError, Stage};
use wirecall_core::rpc::unix::read_request_header;
use wirecall_core::rpc::{hello, invoke, UnixInvoker};
use wirecall_core::utils::{HELLO_FUNCTION, HELLO_INSTANCE};

/// Serves a single connection, replying with whatever `respond` writes.
fn serve_once<F>(respond: F) -> Result<(tempfile::TempDir, PathBuf, JoinHandle<Vec<u8>>)>
where
    F: FnOnce(&str, &str, &[u8]) -> Vec<u8> + Send + 'static,
{
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("wirecall.sock");
    let listener = UnixListener::bind(&path)?;
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        stream.read_to_end(&mut request).unwrap();
        let mut r = request.as_slice();
        let (instance, name) = read_request_header(&mut r).unwrap();
        let params = r.to_vec();
        let reply = respond(&instance, &name, &params);
        stream.write_all(&reply).unwrap();
        params
    });
    Ok((dir, path, handle))
}

#[test]
fn test_hello_round_trip() -> Result<()> {
    let (_dir, path, server) = serve_once(|instance, name, _| {
        assert_eq!(instance, HELLO_INSTANCE);
        assert_eq!(name, HELLO_FUNCTION);
        let mut reply = Vec::new();
        write_string(&mut reply, "hello from Rust").unwrap();
        reply
    })?;

    let invoker = UnixInvoker::new(&path);
    assert_eq!(hello(&invoker)?, "hello from Rust");
    assert!(server.join().unwrap().is_empty());
    Ok(())
}

#[test]
fn test_params_reach_the_server() -> Result<()> {
    let (_dir, path, server) = serve_once(|_, _, params| {
        let mut reply = Vec::new();
        write_string(&mut reply, &format!("{} bytes", params.len())).unwrap();
        reply
    })?;

    let invoker = UnixInvoker::new(&path);
    let reply: String = invoke(&invoker, "wirecall:test/echo", "measure", "four")?;
    assert_eq!(reply, "5 bytes");
    assert_eq!(server.join().unwrap(), b"\x04four");
    Ok(())
}

#[test]
fn test_truncated_reply() -> Result<()> {
    let (_dir, path, server) = serve_once(|_, _, _| b"\x05hel".to_vec())?;

    let err = hello(&UnixInvoker::new(&path)).unwrap_err();
    assert_eq!(err.stage(), Stage::Body);
    assert!(err.decode_error().is_some_and(DecodeError::is_truncation));
    server.join().unwrap();
    Ok(())
}

#[test]
fn test_no_reply() -> Result<()> {
    let (_dir, path, server) = serve_once(|_, _, _| Vec::new())?;

    let err = hello(&UnixInvoker::new(&path)).unwrap_err();
    assert!(matches!(
        err,
        InvokeError::Result {
            index: 0,
            source: DecodeError::Eof
        }
    ));
    server.join().unwrap();
    Ok(())
}

#[test]
fn test_missing_socket() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let err = hello(&UnixInvoker::new(dir.path().join("absent.sock"))).unwrap_err();
    assert_eq!(err.stage(), Stage::Invoke);
    assert_eq!(err.to_string(), "failed to invoke `hello`");
    Ok(())
}

#[test]
fn test_timeout_surfaces_as_read_failure() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("slow.sock");
    let listener = UnixListener::bind(&path)?;
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        stream.read_to_end(&mut request).unwrap();
        thread::sleep(Duration::from_millis(500));
    });

    let invoker = UnixInvoker::new(&path).with_timeout(Duration::from_millis(50));
    let err = hello(&invoker).unwrap_err();
    assert!(matches!(
        err.decode_error(),
        Some(DecodeError::LengthRead(_))
    ));
    server.join().unwrap();
    Ok(())
}
