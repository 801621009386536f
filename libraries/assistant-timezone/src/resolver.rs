//! Timezone detection and the override decision

use crate::{FixTimezoneResult, Result, TimezoneError, TimezoneRanges, Zone};
use assistant_core::{Asset, ExifData};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// When a recorded timezone may be replaced by a detected one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OverridePolicy {
    /// Keep any recorded timezone
    #[default]
    Never,
    /// Replace only if the two zones put the asset at different instants
    IfDifferentOffset,
    /// Replace whenever the zone identifiers differ
    IfDifferent,
}

impl OverridePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            OverridePolicy::Never => "never",
            OverridePolicy::IfDifferentOffset => "if-different-offset",
            OverridePolicy::IfDifferent => "if-different",
        }
    }
}

impl FromStr for OverridePolicy {
    type Err = TimezoneError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "never" => Ok(OverridePolicy::Never),
            "if-different-offset" => Ok(OverridePolicy::IfDifferentOffset),
            "if-different" => Ok(OverridePolicy::IfDifferent),
            _ => Err(TimezoneError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for OverridePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One asset and what resolving its timezone gave
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetOutcome<'a> {
    pub asset: &'a Asset,
    pub result: FixTimezoneResult,
}

/// Detects zones from validated ranges and applies an [`OverridePolicy`]
#[derive(Debug, Clone)]
pub struct TimezoneResolver {
    ranges: TimezoneRanges,
    policy: OverridePolicy,
}

impl TimezoneResolver {
    pub fn new(ranges: TimezoneRanges, policy: OverridePolicy) -> Self {
        Self { ranges, policy }
    }

    /// Zone of the range containing `local`, if any
    pub fn detect(&self, local: NaiveDateTime) -> Option<&Zone> {
        self.ranges.find(local).map(|range| range.zone())
    }

    /// Decide for an asset that has EXIF data, with `recorded` its timezone
    pub fn decide(&self, local: NaiveDateTime, recorded: Option<&Zone>) -> FixTimezoneResult {
        let detected = self.detect(local);

        if let Some(recorded) = recorded {
            if !self.should_override(local, recorded, detected) {
                return FixTimezoneResult::Untouched;
            }
        }

        match detected {
            Some(new) => FixTimezoneResult::TimezoneFixed {
                old: recorded.cloned(),
                new: new.clone(),
            },
            None => FixTimezoneResult::MissingTimezoneRange,
        }
    }

    // Without a detected zone an override is always allowed, so the asset
    // ends up reported as missing a range.
    fn should_override(&self, local: NaiveDateTime, recorded: &Zone, detected: Option<&Zone>) -> bool {
        match (self.policy, detected) {
            (OverridePolicy::Never, _) => false,
            (_, None) => true,
            (OverridePolicy::IfDifferentOffset, Some(detected)) => {
                detected.to_instant(local) != recorded.to_instant(local)
            }
            (OverridePolicy::IfDifferent, Some(detected)) => detected != recorded,
        }
    }

    pub fn resolve(&self, asset: &Asset, exif: Option<&ExifData>) -> Result<FixTimezoneResult> {
        let Some(exif) = exif else {
            return Ok(FixTimezoneResult::MissingExifData);
        };

        let recorded = exif
            .time_zone
            .as_deref()
            .map(|value| {
                value
                    .parse::<Zone>()
                    .map_err(|_| TimezoneError::UnrecognizedRecordedZone {
                        asset_id: asset.id.clone(),
                        value: value.to_string(),
                    })
            })
            .transpose()?;

        Ok(self.decide(asset.local_date_time, recorded.as_ref()))
    }

    /// Resolve every selected asset, in catalog order
    ///
    /// Invisible assets (such as the video half of a live photo) are skipped
    /// unless `include_invisible` is set.
    pub fn resolve_all<'a>(
        &self,
        assets: &'a [Asset],
        exif: &[ExifData],
        include_invisible: bool,
    ) -> Result<Vec<AssetOutcome<'a>>> {
        let exif_by_asset: HashMap<&str, &ExifData> =
            exif.iter().map(|e| (e.asset_id.as_str(), e)).collect();

        let outcomes = assets
            .iter()
            .filter(|asset| asset.is_visible || include_invisible)
            .map(|asset| {
                let result = self.resolve(asset, exif_by_asset.get(asset.id.as_str()).copied())?;
                Ok(AssetOutcome { asset, result })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            assets = assets.len(),
            resolved = outcomes.len(),
            policy = %self.policy,
            "Resolved asset timezones"
        );
        Ok(outcomes)
    }
}
