
pub(crate) use counter_fixture::*;

mod diagnostics_tests;
mod render_skip_tests;
