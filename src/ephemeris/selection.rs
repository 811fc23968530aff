use std::collections::BTreeMap;

use itertools::Itertools;
use log::debug;

use crate::{
    ephemeris::{EphemerisRecord, GpsEphemeris},
    prelude::{GpsTime, SV},
};

/// Groups records per [SV], each group sorted chronologically.
/// Parsing never does this on its own: records come out in file order.
pub fn group_by_sv<I>(records: I) -> BTreeMap<SV, Vec<EphemerisRecord>>
where
    I: IntoIterator<Item = EphemerisRecord>,
{
    records
        .into_iter()
        .into_group_map_by(|rec| rec.sv())
        .into_iter()
        .map(|(sv, group)| {
            let sorted = group.into_iter().sorted_by(|a, b| a.cmp_epoch(b)).collect();
            (sv, sorted)
        })
        .collect()
}

/// Selects the healthy [GpsEphemeris] for `sv` whose ToE is nearest to `t`,
/// amongst the ones that are still valid at `t`.
pub fn select_gps<'a, I>(records: I, sv: SV, t: GpsTime) -> Option<&'a GpsEphemeris>
where
    I: IntoIterator<Item = &'a EphemerisRecord>,
{
    let selected = records
        .into_iter()
        .filter_map(EphemerisRecord::as_gps)
        .filter(|eph| eph.sv == sv && eph.health == 0 && eph.is_valid(t))
        .min_by(|a, b| (t - a.toe).abs().total_cmp(&(t - b.toe).abs()));

    if selected.is_none() {
        debug!("{}({}) - no valid ephemeris", t, sv);
    }

    selected
}
