//! HTTP Handlers

mod ping;
mod preview;
mod voices;
mod websocket;

pub use ping::*;
pub use preview::*;
pub use voices::*;
pub use websocket::*;

#[cfg(test)]
pub(crate) mod test_support;
