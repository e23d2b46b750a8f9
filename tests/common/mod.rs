#![allow(dead_code)]

pub mod test_server {
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpStream};
    use std::sync::{Arc, Once};
    use std::time::Duration;

    use brrtlite::router::RouteTable;
    use brrtlite::server::{AppService, HttpServer, ServerHandle};
    use brrtlite::Dispatcher;

    /// Ensures May coroutines are configured only once
    static MAY_INIT: Once = Once::new();

    pub fn setup_may_runtime() {
        MAY_INIT.call_once(|| {
            may::config().set_stack_size(0x8000);
        });
    }

    /// Start a server on an ephemeral port and wait until it accepts.
    pub fn start_service(table: RouteTable, dispatcher: Dispatcher) -> (ServerHandle, SocketAddr) {
        setup_may_runtime();
        let service = AppService::new(Arc::new(table.freeze()), Arc::new(dispatcher));
        let handle = HttpServer::new(service).start("127.0.0.1:0").unwrap();
        handle.wait_ready().unwrap();
        let addr = handle.addr();
        (handle, addr)
    }

    /// Write `req` and read until the server closes the connection.
    pub fn send_request(addr: &SocketAddr, req: &[u8]) -> Vec<u8> {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(req).unwrap();
        stream.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
        let mut buf = Vec::new();
        loop {
            let mut tmp = [0u8; 1024];
            match stream.read(&mut tmp) {
                Ok(0) => break,
                Ok(n) => buf.extend_from_slice(&tmp[..n]),
                Err(ref e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    break
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::ConnectionReset => break,
                Err(e) => panic!("read error: {e:?}"),
            }
        }
        buf
    }
}

pub mod http {
    /// A response split into its status line pieces, header lines and body.
    #[derive(Debug)]
    pub struct Parsed {
        pub status: u16,
        pub reason: String,
        pub headers: Vec<(String, String)>,
        pub body: Vec<u8>,
    }

    impl Parsed {
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }

        pub fn header_all(&self, name: &str) -> Vec<&str> {
            self.headers
                .iter()
                .filter(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
                .collect()
        }

        pub fn body_text(&self) -> String {
            String::from_utf8_lossy(&self.body).to_string()
        }
    }

    pub fn parse_parts(resp: &[u8]) -> Parsed {
        let split = resp
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("response has a header block");
        let head = String::from_utf8_lossy(&resp[..split]).to_string();
        let body = resp[split + 4..].to_vec();

        let mut lines = head.split("\r\n");
        let status_line = lines.next().unwrap_or_default();
        let mut parts = status_line.splitn(3, ' ');
        assert_eq!(parts.next(), Some("HTTP/1.1"));
        let status = parts.next().unwrap_or("0").parse().unwrap();
        let reason = parts.next().unwrap_or_default().to_string();

        let headers = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .collect();

        Parsed {
            status,
            reason,
            headers,
            body,
        }
    }
}
