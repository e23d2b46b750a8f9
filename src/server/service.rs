use std::io::{self, Read, Write};
use std::net::Shutdown;
use std::sync::Arc;

use may::net::TcpStream;
use tracing::{debug, error, info, warn};

use super::response::serialize;
use crate::dispatcher::Dispatcher;
use crate::ids::ConnectionId;
use crate::request::Request;
use crate::router::Router;

/// Default read buffer: the largest request accepted in one read (1 MiB).
pub const DEFAULT_MAX_REQUEST_SIZE: usize = 1024 * 1024;

/// Per-connection request handling shared by every accepted connection.
#[derive(Clone)]
pub struct AppService {
    pub router: Arc<Router>,
    pub dispatcher: Arc<Dispatcher>,
    pub max_request_size: usize,
}

impl AppService {
    pub fn new(router: Arc<Router>, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            router,
            dispatcher,
            max_request_size: DEFAULT_MAX_REQUEST_SIZE,
        }
    }

    #[must_use]
    pub fn with_max_request_size(mut self, bytes: usize) -> Self {
        self.max_request_size = bytes.max(1);
        self
    }

    /// Serve exactly one request on `stream`, then close it.
    ///
    /// I/O errors are logged and end this connection only.
    pub fn handle_connection(&self, mut stream: TcpStream) {
        let conn_id = ConnectionId::new();
        let peer = stream.peer_addr().ok();
        debug!(conn_id = %conn_id, peer = ?peer, "Connection accepted");

        if let Err(e) = self.serve(&mut stream, conn_id) {
            warn!(conn_id = %conn_id, peer = ?peer, error = %e, "Connection aborted");
        }
        if let Err(e) = stream.shutdown(Shutdown::Both) {
            debug!(conn_id = %conn_id, error = %e, "Connection shutdown failed");
        }
    }

    /// Read once, dispatch and write the response.
    ///
    /// Returns the number of response bytes written; `0` when the peer closed
    /// the connection without sending anything.
    pub fn serve<S: Read + Write>(&self, stream: &mut S, conn_id: ConnectionId) -> io::Result<usize> {
        let mut buf = vec![0u8; self.max_request_size];
        let n = stream.read(&mut buf)?;
        if n == 0 {
            debug!(conn_id = %conn_id, "Connection closed before sending a request");
            return Ok(0);
        }
        if n == buf.len() {
            warn!(
                conn_id = %conn_id,
                max_request_size = self.max_request_size,
                "Request filled the read buffer and may be truncated"
            );
        }

        let req = Request::parse(&buf[..n]);
        let ctx = self.dispatcher.dispatch(&self.router, &req);
        let bytes = serialize(&ctx);

        if let Err(e) = stream.write_all(&bytes).and_then(|()| stream.flush()) {
            error!(conn_id = %conn_id, error = %e, "Response write failed");
            return Err(e);
        }

        info!(
            conn_id = %conn_id,
            method = ?req.method(),
            path = %req.path(),
            status = ctx.status(),
            request_bytes = n,
            response_bytes = bytes.len(),
            "Request completed"
        );
        Ok(bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::router::RouteTable;
    use std::io::Cursor;

    /// In-memory duplex stream: reads from `input`, collects writes.
    struct MockStream {
        input: Cursor<Vec<u8>>,
        output: Vec<u8>,
    }

    impl MockStream {
        fn new(input: &[u8]) -> Self {
            Self {
                input: Cursor::new(input.to_vec()),
                output: Vec::new(),
            }
        }
    }

    impl Read for MockStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for MockStream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.write(buf)
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn service() -> AppService {
        let mut table = RouteTable::new();
        table
            .get("/ping", |_req: &Request, ctx: &mut Context| ctx.text("pong"))
            .unwrap();
        AppService::new(Arc::new(table.freeze()), Arc::new(Dispatcher::new()))
    }

    #[test]
    fn test_serve_writes_one_response() {
        let mut stream = MockStream::new(b"GET /ping HTTP/1.1\r\nHost: x\r\n\r\n");
        let written = service().serve(&mut stream, ConnectionId::new()).unwrap();
        assert_eq!(written, stream.output.len());
        assert_eq!(
            String::from_utf8(stream.output).unwrap(),
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\npong"
        );
    }

    #[test]
    fn test_empty_read_writes_nothing() {
        let mut stream = MockStream::new(b"");
        assert_eq!(service().serve(&mut stream, ConnectionId::new()).unwrap(), 0);
        assert!(stream.output.is_empty());
    }

    #[test]
    fn test_request_truncated_to_buffer() {
        let svc = service().with_max_request_size(14);
        let mut stream = MockStream::new(b"GET /ping HTTP/1.1\r\n\r\n");
        svc.serve(&mut stream, ConnectionId::new()).unwrap();
        // Only "GET /ping HTTP" was read; the path is still intact.
        assert!(stream.output.ends_with(b"pong"));
    }
}
