//! Request building, transport, validation and decoding for the commits API.

pub mod client;
pub mod decode;
pub mod endpoint;
pub mod request;
pub mod response;
pub mod transport;

pub use client::CommitsClient;
pub use decode::DateDecoding;
pub use endpoint::{CommitFiles, CommitList, Endpoint};
pub use transport::{RawResponse, ReqwestTransport, Transport};
