mod backend;
mod wire;

pub use backend::HttpBackend;
