// Adapters layer: concrete implementations of the domain ports (http backend, terminal views, csv export).

pub mod export;
pub mod http;
pub mod terminal;

pub use export::export_results_csv;
pub use http::HttpBackend;
pub use terminal::{ConsoleInput, StdinNamePrompt, TerminalGameView, TerminalResultsView};
