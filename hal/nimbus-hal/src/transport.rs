//! Asset transport abstraction
//!
//! Assets (icon images) do not travel inside push events. The event names
//! an asset by digest and the watch fetches the bytes over a separate
//! connection to the sync transport. Every fetch is its own
//! connect/fetch/disconnect cycle; nothing is kept open between events.
//!
//! All calls are blocking. Callers must run them off the rendering context.

/// Errors from the asset transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Connection not established within the timeout
    Timeout,
    /// Connection refused or dropped
    ConnectionFailed,
    /// Transport does not know the asset
    UnknownAsset,
    /// Asset is larger than the provided buffer
    BufferTooSmall,
    /// Operation requires an open connection
    NotConnected,
}

/// Bounded-time connection to the sync transport
pub trait AssetTransport {
    /// Open a connection, giving up after `timeout_ms`
    ///
    /// Blocks the calling context for at most `timeout_ms`.
    fn connect(&mut self, timeout_ms: u32) -> Result<(), TransportError>;

    /// Fetch the bytes of the asset named by `digest` into `buffer`
    ///
    /// Returns the number of bytes written. Requires an open connection.
    fn fetch(&mut self, digest: &str, buffer: &mut [u8]) -> Result<usize, TransportError>;

    /// Close the connection; a no-op if none is open
    fn disconnect(&mut self);

    /// Check whether a connection is currently open
    fn is_connected(&self) -> bool;
}
