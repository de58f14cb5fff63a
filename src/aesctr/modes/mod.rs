mod ctr;
mod util;

pub use ctr::{PROGRESS_INTERVAL, Progress};
pub(crate) use ctr::{ctr_core, ctr_core_observed};

#[cfg(test)]
pub(crate) use ctr::test_util;
