pub mod lifetime;

pub use lifetime::startup::{EngineContext, bootstrap, init_tracing, prepare_engine};
