//! Asset resolution
//!
//! Turns an asset reference from a push event into a decoded image. Each
//! resolution opens its own connection, bounded by
//! `ASSET_CONNECT_TIMEOUT_MS`, and closes it before decoding. Nothing is
//! retried; the next push event is the only resynchronisation.

use alloc::vec;
use alloc::vec::Vec;

use nimbus_display::{CodecError, Image, ImageCodec};
use nimbus_hal::{AssetTransport, TransportError};
use nimbus_protocol::AssetRef;

/// Bound on establishing the asset connection
pub const ASSET_CONNECT_TIMEOUT_MS: u32 = 3000;

/// Largest compressed icon accepted
pub const MAX_ICON_BYTES: usize = 64 * 1024;

/// Why an icon could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssetError {
    /// Event carried no asset reference
    InvalidAsset,
    /// Connect or fetch failed
    Transport(TransportError),
    /// Fetched bytes are not a usable image
    Codec(CodecError),
}

impl From<TransportError> for AssetError {
    fn from(e: TransportError) -> Self {
        AssetError::Transport(e)
    }
}

impl From<CodecError> for AssetError {
    fn from(e: CodecError) -> Self {
        AssetError::Codec(e)
    }
}

/// Connection state of the current resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Resolves asset references through a transport and a codec
pub struct AssetResolver<T, C> {
    transport: T,
    codec: C,
    state: ConnectionState,
    buffer: Vec<u8>,
}

impl<T: AssetTransport, C: ImageCodec> AssetResolver<T, C> {
    pub fn new(transport: T, codec: C) -> Self {
        Self {
            transport,
            codec,
            state: ConnectionState::Disconnected,
            buffer: vec![0; MAX_ICON_BYTES],
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Resolve `asset` into an image
    ///
    /// Blocks for at most the connect timeout plus the fetch. The
    /// connection is always closed again before this returns.
    pub fn resolve(&mut self, asset: Option<&AssetRef>) -> Result<Image, AssetError> {
        let asset = asset.ok_or(AssetError::InvalidAsset)?;

        self.state = ConnectionState::Connecting;
        if let Err(e) = self.transport.connect(ASSET_CONNECT_TIMEOUT_MS) {
            self.state = ConnectionState::Disconnected;
            return Err(e.into());
        }
        self.state = ConnectionState::Connected;

        let fetched = self.transport.fetch(asset.digest(), &mut self.buffer);
        self.transport.disconnect();
        self.state = ConnectionState::Disconnected;

        let len = fetched?;
        debug!("fetched asset {} ({} bytes)", asset.digest(), len);
        Ok(self.codec.decode(&self.buffer[..len])?)
    }
}
