// tests/http_source.rs
//
// Tiny one-shot HTTP server on localhost to exercise GET/HEAD handling.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

use arcade_board::source;

/// Serve `n` requests, answering each with `status` and `body`.
/// Returns the base URL and a handle yielding the request lines seen.
fn serve(n: usize, status: &'static str, body: &'static str) -> (String, thread::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for stream in listener.incoming().take(n) {
            let mut stream = stream.unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() { break; }
            }
            let is_head = request_line.starts_with("HEAD");
            seen.push(request_line.trim_end().to_string());

            let mut resp = format!(
                "HTTP/1.0 {status}\r\nContent-Type: text/csv\r\nLast-Modified: Tue, 14 Nov 2023 22:13:20 GMT\r\n\r\n"
            );
            if !is_head { resp.push_str(body); }
            stream.write_all(resp.as_bytes()).unwrap();
        }
        seen
    });

    (format!("http://127.0.0.1:{port}/board/data.csv"), handle)
}

#[test]
fn get_and_head_report_last_modified() {
    let (url, server) = serve(2, "200 OK", "User Name\nAda\n");
    let src = source::open(&url).unwrap();

    let got = src.fetch().unwrap();
    assert_eq!(got.text, "User Name\nAda\n");
    let modified = got.modified.unwrap();
    assert_eq!(modified.timestamp(), 1_700_000_000);

    assert_eq!(src.probe().unwrap(), Some(modified));

    let seen = server.join().unwrap();
    assert_eq!(seen, vec!["GET /board/data.csv HTTP/1.0", "HEAD /board/data.csv HTTP/1.0"]);
}

#[test]
fn non_success_status_is_transport_error() {
    let (url, server) = serve(1, "404 Not Found", "nope");
    let err = source::open(&url).unwrap().fetch().unwrap_err();
    assert!(err.is_transport());
    assert!(err.to_string().contains("404"));
    server.join().unwrap();
}

#[test]
fn refused_connection_is_transport_error() {
    // bind then drop to get a port nobody listens on
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let src = source::open(&format!("http://127.0.0.1:{port}/x.csv")).unwrap();
    assert!(src.probe().unwrap_err().is_transport());
}
