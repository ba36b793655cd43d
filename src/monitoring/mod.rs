/*!
 * Monitoring
 * Tracing subscriber setup and run-level spans
 */

mod tracer;

pub use tracer::{init_tracing, span_run};
