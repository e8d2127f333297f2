use serde::{Deserialize, Serialize};

use crate::{duration::Duration, error::Error, null::Nullable};

/// One segment of a ramp profile.
///
/// Runs for `duration`, moving the number of active VUs towards `target`.
/// Without a target the current level is held.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Stage {
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub duration: Nullable<Duration>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub target: Nullable<i64>,
}

impl Stage {
    #[inline]
    pub fn new(duration: Duration, target: Option<i64>) -> Self {
        Self {
            duration: duration.into(),
            target: target.into(),
        }
    }
}

/// Parses a comma-separated stage list, e.g. "30s:10,1m,10s:0".
///
/// Each segment is `<duration>` or `<duration>:<target>`. Empty input yields
/// no stages.
pub fn parse_stages(s: &str) -> Result<Vec<Stage>, Error> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }

    s.split(',').map(parse_stage).collect()
}

fn parse_stage(segment: &str) -> Result<Stage, Error> {
    let invalid = |reason: String| Error::InvalidStage {
        segment: segment.to_owned(),
        reason,
    };

    let (duration, target) = match segment.trim().split_once(':') {
        Some((duration, target)) => (duration, Some(target)),
        None => (segment.trim(), None),
    };

    let duration: Duration = duration.trim().parse().map_err(|err: Error| invalid(err.to_string()))?;
    let target = match target {
        Some(target) => {
            let v = target
                .trim()
                .parse::<i64>()
                .map_err(|err| invalid(format!("invalid target {target:?}: {err}")))?;
            Some(v)
        }
        None => None,
    };

    Ok(Stage::new(duration, target))
}

/// Returns the total length of the timeline described by the given stages.
///
/// Stages without a duration contribute nothing.
pub fn stages_duration(stages: &[Stage]) -> Option<Duration> {
    stages
        .iter()
        .filter_map(|stage| stage.duration.get().copied())
        .try_fold(Duration::ZERO, Duration::checked_add)
}
