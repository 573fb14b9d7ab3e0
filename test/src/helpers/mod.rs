pub mod assertions;
pub mod packet_exchange;
pub mod recording_transport;

pub use packet_exchange::exchange_messages;
pub use recording_transport::{count_to, summarize, RecordingTransport};
pub use test_protocol::{Flare, Smoke, Spark, TestProtocol, BONFIRE};
pub use test_scene::{TestObserver, TestScene};
