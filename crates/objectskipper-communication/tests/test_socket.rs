use objectskipper_communication::{InterceptionMode, SocketInterceptConnection};
use objectskipper_core::{
    Code, CodeType, ConnectionError, ControlCodes, InterceptConnection, ObjectFilter,
    ResolveResult,
};
use serde_json::Value;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

// Fake command interpreter: performs the handshake, sends `codes` one at a
// time, collects one reply per code, then hangs up.
fn spawn_server(
    accept_handshake: bool,
    codes: Vec<&'static str>,
) -> (tempfile::TempDir, PathBuf, JoinHandle<(Value, Vec<Value>)>) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dcs.sock");
    let listener = UnixListener::bind(&path).unwrap();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut writer = stream.try_clone().unwrap();
        let mut reader = BufReader::new(stream);

        writeln!(writer, r#"{{"version":11,"id":7}}"#).unwrap();
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let init: Value = serde_json::from_str(&line).unwrap();

        if !accept_handshake {
            writeln!(
                writer,
                r#"{{"success":false,"errorType":"InvalidOperationException","errorMessage":"interceptor busy"}}"#
            )
            .unwrap();
            return (init, Vec::new());
        }
        writeln!(writer, r#"{{"success":true}}"#).unwrap();

        let mut replies = Vec::new();
        for code in codes {
            writeln!(writer, "{}", code).unwrap();
            line.clear();
            reader.read_line(&mut line).unwrap();
            replies.push(serde_json::from_str(&line).unwrap());
        }
        (init, replies)
    });

    (dir, path, handle)
}

#[test]
fn test_handshake_sends_intercept_init() {
    let (_dir, path, server) = spawn_server(true, vec![]);

    let conn = SocketInterceptConnection::connect(&path, InterceptionMode::Pre).unwrap();
    assert_eq!(conn.server_version(), 11);
    assert_eq!(conn.connection_id(), 7);
    drop(conn);

    let (init, _) = server.join().unwrap();
    assert_eq!(init["mode"], "Intercept");
    assert_eq!(init["interceptionMode"], "Pre");
}

#[test]
fn test_rejected_handshake() {
    let (_dir, path, server) = spawn_server(false, vec![]);

    let err = SocketInterceptConnection::connect(&path, InterceptionMode::Pre).unwrap_err();
    match err {
        ConnectionError::HandshakeRejected { error_type, message } => {
            assert_eq!(error_type, "InvalidOperationException");
            assert_eq!(message, "interceptor busy");
        }
        other => panic!("unexpected error: {other}"),
    }
    server.join().unwrap();
}

#[test]
fn test_receive_and_reply() {
    let (_dir, path, server) = spawn_server(
        true,
        vec![
            r#"{"type":"G","majorNumber":1,"parameters":[{"letter":"X","value":10.5}]}"#,
            r#"{"type":"C","comment":" printing object Cube"}"#,
        ],
    );

    let mut conn = SocketInterceptConnection::connect(&path, InterceptionMode::Pre).unwrap();
    let code = conn.receive_code().unwrap();
    assert_eq!(code.code_type, CodeType::GCode);
    assert_eq!(code.major_number, Some(1));
    conn.ignore_code().unwrap();

    let code = conn.receive_code().unwrap();
    assert_eq!(code, Code::comment(" printing object Cube"));
    conn.resolve_code(ResolveResult::Warning, "noted").unwrap();

    assert!(matches!(
        conn.receive_code(),
        Err(ConnectionError::Disconnected)
    ));

    let (_, replies) = server.join().unwrap();
    assert_eq!(replies[0]["command"], "Ignore");
    assert_eq!(replies[1]["command"], "Resolve");
    assert_eq!(replies[1]["type"], "Warning");
    assert_eq!(replies[1]["content"], "noted");
}

#[test]
fn test_filter_over_socket() {
    let (_dir, path, server) = spawn_server(
        true,
        vec![
            r#"{"type":"M","majorNumber":50,"parameters":[{"letter":"P","value":"EDGE"}]}"#,
            r#"{"type":"C","comment":"EDGE Cube"}"#,
            r#"{"type":"M","majorNumber":52,"parameters":[{"letter":"S","value":2}]}"#,
            r#"{"type":"G","majorNumber":1,"parameters":[{"letter":"X","value":3}]}"#,
            r#"{"type":"M","majorNumber":53}"#,
            r#"{"type":"G","majorNumber":1,"parameters":[{"letter":"X","value":4}]}"#,
        ],
    );

    let mut conn = SocketInterceptConnection::connect(&path, InterceptionMode::Pre).unwrap();
    let mut filter = ObjectFilter::new(ControlCodes::default());
    filter.run(&mut conn).unwrap();

    let (_, replies) = server.join().unwrap();
    let commands: Vec<&str> = replies
        .iter()
        .map(|r| r["command"].as_str().unwrap())
        .collect();
    assert_eq!(
        commands,
        vec!["Resolve", "Ignore", "Resolve", "Resolve", "Resolve", "Ignore"]
    );
    assert_eq!(replies[3]["content"], "");
    assert_eq!(replies[4]["content"], "Filtering disabled");
}

#[test]
fn test_malformed_code_is_a_protocol_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dcs.sock");
    let listener = UnixListener::bind(&path).unwrap();

    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        writeln!(stream, r#"{{"version":11,"id":1}}"#).unwrap();
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        writeln!(stream, r#"{{"success":true}}"#).unwrap();
        writeln!(stream, r#"{{"type":"Z"}}"#).unwrap();
    });

    let stream = UnixStream::connect(&path).unwrap();
    let mut conn = SocketInterceptConnection::from_stream(stream, InterceptionMode::Pre).unwrap();
    let err = conn.receive_code().unwrap_err();
    assert!(matches!(err, ConnectionError::Protocol { .. }));
    server.join().unwrap();
}

#[test]
fn test_shutdown_unblocks_receive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dcs.sock");
    let listener = UnixListener::bind(&path).unwrap();
    let (done_tx, done_rx) = std::sync::mpsc::channel::<()>();

    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        writeln!(stream, r#"{{"version":11,"id":2}}"#).unwrap();
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        writeln!(stream, r#"{{"success":true}}"#).unwrap();
        // keep the connection open until the client is done
        let _ = done_rx.recv();
    });

    let mut conn = SocketInterceptConnection::connect(&path, InterceptionMode::Pre).unwrap();
    let handle = conn.shutdown_handle().unwrap();
    let client = thread::spawn(move || conn.receive_code());

    thread::sleep(std::time::Duration::from_millis(50));
    handle.shutdown().unwrap();

    let result = client.join().unwrap();
    assert!(matches!(result, Err(ConnectionError::Disconnected)));
    done_tx.send(()).unwrap();
    server.join().unwrap();
}
