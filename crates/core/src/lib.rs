//! # guext core
//!
//! Moves per-file `using` directives of C# projects into one project-wide
//! `GlobalUsings.cs`.
//!
//! ## Pipeline
//!
//! ```text
//! Target directory
//!     │
//!     ├──> Project Scanner
//!     │      └─> Project roots (directories holding *.csproj)
//!     │
//!     ├──> Workspace Isolator (optional)
//!     │      └─> .guext-tmp/<uuid> copy, rescanned
//!     │
//!     ├──> Directive Extractor (every .cs file of a root)
//!     │      └─> Removed `using` lines
//!     │
//!     └──> Aggregate Writer
//!            └─> GlobalUsings.cs (appended, then deduplicated)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use guext_core::{GuextConfig, Pipeline, RunOutcome};
//!
//! fn main() -> guext_core::Result<()> {
//!     let pipeline = Pipeline::new(GuextConfig::default()).with_isolation(true);
//!     match pipeline.run("/path/to/solution")? {
//!         RunOutcome::NoProjectRoots { .. } => println!("nothing to do"),
//!         RunOutcome::Completed(report) => {
//!             println!("{} directives moved", report.total_directives())
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod aggregate;
mod config;
mod dedup;
mod error;
mod extractor;
mod fsio;
mod isolate;
mod pipeline;
mod scanner;
mod stats;

pub use aggregate::{AggregateReport, AggregateWriter};
pub use config::{GuextConfig, CONFIG_ENV_VAR};
pub use dedup::{dedup_file, dedup_lines, DedupReport};
pub use error::{GuextError, Result};
pub use extractor::{split_directives, DirectiveExtractor, Extraction};
pub use isolate::{Workspace, WorkspaceIsolator};
pub use pipeline::{Pipeline, PipelineStage, RunOutcome};
pub use scanner::ProjectScanner;
pub use stats::{RootReport, RunReport};
