mod hyper_chunk_sink;
mod multipart_reader;
mod routes;

pub use hyper_chunk_sink::HyperChunkSink;
pub use multipart_reader::{MultipartReader, Part};
pub use routes::{routes, serve_camera, AppContext};
