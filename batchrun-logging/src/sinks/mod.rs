pub mod memory;
pub mod null;
pub mod tracing_sink;

pub use memory::MemorySink;
pub use null::NullSink;
pub use tracing_sink::TracingSink;
