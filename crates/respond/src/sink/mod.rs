//! [`ResponseWriter`](uhsapi::server::ResponseWriter) implementations.

mod recorder;
mod sender;

pub use recorder::Recorder;
pub use sender::Sender;
