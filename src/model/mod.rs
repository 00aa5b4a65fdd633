pub mod config;
pub mod instrument;
pub mod row;

pub use config::AnalysisConfig;
pub use instrument::InstrumentSnapshot;
pub use row::{Analysis, AnalysisRow, SkippedInstrument};
