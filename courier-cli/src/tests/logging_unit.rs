//! Unit tests for log subscriber installation.

use super::*;
use rstest::rstest;

#[rstest]
fn repeated_logging_setup_keeps_the_first_subscriber() {
    init_logging(true);
    init_logging(false);
    assert!(tracing::dispatcher::has_been_set());
    log::info!("still logging after a second setup");
}
