// Download execution backends

pub mod cli;

pub use cli::YtDlpBackend;
