//! `hm-output` — trace writers for the rust_hm framework.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature  | Backend | Files created                                                                      |
//! |----------|---------|------------------------------------------------------------------------------------|
//! | *(none)* | CSV     | `ue_positions.csv`, `power_measurements.csv`, `flow_stats.csv`, `handover_log.txt` |
//! | `sqlite` | SQLite  | `traces.db`                                                                        |
//!
//! Both backends implement [`TraceWriter`] and are driven by
//! [`TraceObserver`], which implements `hm_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hm_output::{CsvTraceWriter, TraceObserver};
//!
//! let writer = CsvTraceWriter::new(Path::new("./output")).unwrap();
//! let mut obs = TraceObserver::new(writer);
//! sim.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("trace error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvTraceWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{FlowRow, HandoverRow, PositionRow, PowerRow};
pub use writer::TraceWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteTraceWriter;
