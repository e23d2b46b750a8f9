use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::Duration;

use may::coroutine::{self, JoinHandle};
use may::net::TcpListener;
use tracing::{error, info, warn};

use super::service::AppService;

/// Default coroutine stack size for connection handlers (64 KiB).
pub const DEFAULT_STACK_SIZE: usize = 0x10000;

/// Accept loop that serves each connection on its own coroutine.
pub struct HttpServer {
    service: AppService,
    stack_size: usize,
}

/// Handle to a running HTTP server
///
/// Provides methods for waiting until the server is ready, stopping it, or
/// joining the accept coroutine.
pub struct ServerHandle {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ServerHandle {
    /// The bound address. With port `0` this carries the port actually assigned.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Wait for the server to be ready to accept connections
    ///
    /// Polls the server address by attempting TCP connections until successful.
    ///
    /// # Errors
    ///
    /// Returns `TimedOut` if the server doesn't become ready within ~250ms (50 attempts × 5ms).
    pub fn wait_ready(&self) -> io::Result<()> {
        for _ in 0..50 {
            if TcpStream::connect(self.addr).is_ok() {
                return Ok(());
            }
            thread::sleep(Duration::from_millis(5));
        }
        Err(io::Error::new(io::ErrorKind::TimedOut, "server not ready"))
    }

    /// Stop accepting connections.
    ///
    /// Cancels the accept coroutine and waits for it to finish. Connections
    /// already being served run to completion on their own coroutines.
    pub fn stop(self) {
        info!(addr = %self.addr, "HTTP server stopping");
        // SAFETY: cancel() is marked unsafe by the may runtime. The handle is
        // owned here and the accept loop holds no state that outlives it.
        unsafe {
            self.handle.coroutine().cancel();
        }
        let _ = self.handle.join();
    }

    /// Block until the accept coroutine finishes.
    ///
    /// # Errors
    ///
    /// Returns an error if the accept coroutine panicked or was cancelled.
    pub fn join(self) -> std::thread::Result<()> {
        self.handle.join()
    }
}

impl HttpServer {
    pub fn new(service: AppService) -> Self {
        Self {
            service,
            stack_size: DEFAULT_STACK_SIZE,
        }
    }

    #[must_use]
    pub fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = stack_size;
        self
    }

    /// Bind `addr` and start accepting connections.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid, the port cannot be bound,
    /// or the accept coroutine cannot be spawned.
    pub fn start<A: ToSocketAddrs>(self, addr: A) -> io::Result<ServerHandle> {
        let addr = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid address"))?;
        let listener = TcpListener::bind(addr)?;
        let addr = listener.local_addr()?;
        let HttpServer { service, stack_size } = self;

        info!(
            addr = %addr,
            stack_size = stack_size,
            max_request_size = service.max_request_size,
            routes_count = service.router.routes().len(),
            "HTTP server listening"
        );

        // SAFETY: Builder::spawn() is marked unsafe by the may runtime. The
        // closure owns everything it touches and never blocks the OS thread.
        let handle = unsafe {
            coroutine::Builder::new()
                .name("brrtlite-accept".to_string())
                .stack_size(stack_size)
                .spawn(move || accept_loop(listener, service, stack_size))
        }?;

        Ok(ServerHandle { addr, handle })
    }
}

fn accept_loop(listener: TcpListener, service: AppService, stack_size: usize) {
    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                warn!(error = %e, "Accept failed");
                continue;
            }
        };

        let service = service.clone();
        // SAFETY: as above; each connection coroutine owns its stream and a
        // clone of the service.
        let spawned = unsafe {
            coroutine::Builder::new()
                .stack_size(stack_size)
                .spawn(move || service.handle_connection(stream))
        };
        if let Err(e) = spawned {
            error!(error = %e, stack_size = stack_size, "Failed to spawn connection coroutine");
        }
    }
}
