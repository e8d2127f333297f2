//! Options model of a load-test run.
//!
//! Options come from several independent sources, each materialized as an
//! [`Options`] value where every field may be absent. Sources are folded
//! together with [`Options::apply`], typically defaults, then option files,
//! then environment variables.

pub use self::{
    duration::Duration,
    error::Error,
    null::Nullable,
    options::Options,
    stage::{parse_stages, Stage},
    threshold::{Threshold, Thresholds},
};

pub mod cfg;
pub mod cmd;
pub mod duration;
pub mod env;
mod error;
pub mod logging;
mod null;
mod options;
pub mod stage;
mod threshold;
pub mod tls;
