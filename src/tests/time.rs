use rstest::*;

use crate::{
    prelude::{
        Duration, Epoch, Error, GpsTime, LeapBoundary, LeapExtrapolation, LeapSecondTable,
        LeapSecondsOpts, TimeScale, TimeSync, Unit,
    },
    tests::init_logger,
};

#[rstest]
#[case(GpsTime::new(2000, 0.0), 604_800.0, 2001, 0.0)]
#[case(GpsTime::new(2000, 604_799.0), 1.0, 2001, 0.0)]
#[case(GpsTime::new(2000, 10.0), -20.0, 1999, 604_790.0)]
#[case(GpsTime::new(2000, 100.0), 3.0 * 604_800.0 + 50.0, 2003, 150.0)]
#[case(GpsTime::new(2000, 100.0), -3.0 * 604_800.0, 1997, 100.0)]
#[case(GpsTime::new(2000, 0.5), -0.5, 2000, 0.0)]
fn week_rollover(#[case] t: GpsTime, #[case] dt: f64, #[case] week: i32, #[case] tow: f64) {
    let t = t + dt;
    assert_eq!(t.week, week, "bad week");
    assert_eq!(t.tow, tow, "bad time of week");
}

#[test]
fn whole_week_delta() {
    for t in [
        GpsTime::new(1025, 409_904.0),
        GpsTime::new(2362, 553_628.0),
        GpsTime::new(0, 0.0),
    ] {
        assert_eq!((t + 604_800.0) - t, 604_800.0);
        assert_eq!(t - (t - 604_800.0), 604_800.0);
    }
}

#[test]
fn normalization() {
    let t = GpsTime::new(10, 2.5 * 604_800.0);
    assert_eq!(t.week, 12);
    assert_eq!(t.tow, 302_400.0);

    let t = GpsTime::new(10, -1.0);
    assert_eq!(t.week, 9);
    assert_eq!(t.tow, 604_799.0);
}

#[test]
fn ordering() {
    let t0 = GpsTime::new(2000, 604_700.0);
    let t1 = GpsTime::new(2001, 10.0);

    assert!(t1 > t0);
    assert!(t0 < t1);
    assert_eq!(t1 - t0, 110.0);
    assert_eq!(t0 - t1, -110.0);
}

#[test]
fn duration_arithmetic() {
    let mut t = GpsTime::new(2000, 0.0);
    t = t + 2.0 * Unit::Hour;
    assert_eq!(t, GpsTime::new(2000, 7_200.0));

    t = t - Duration::from_seconds(7_201.0);
    assert_eq!(t, GpsTime::new(1999, 604_799.0));

    t += 1.0;
    t -= 604_800.0;
    assert_eq!(t, GpsTime::new(1999, 0.0));
}

#[test]
fn utc_to_gpst() {
    init_logger();

    let table = LeapSecondTable::default();
    let utc = Epoch::from_gregorian_utc(2025, 4, 19, 9, 46, 50, 0);

    let t = GpsTime::from_utc(utc, &table).unwrap();
    assert_eq!(t.week, 2362);
    assert_eq!(t.tow, 553_628.0);

    assert_eq!(t.to_utc(&table).unwrap(), utc);
}

#[rstest]
#[case(2006, 1, 1, 0, 0, 0)]
#[case(2008, 12, 31, 23, 59, 59)]
#[case(2012, 7, 1, 0, 0, 0)]
#[case(2015, 6, 30, 12, 0, 0)]
#[case(2016, 12, 31, 23, 59, 59)]
#[case(2017, 1, 1, 0, 0, 0)]
#[case(2024, 2, 29, 18, 30, 15)]
fn utc_round_trip(
    #[case] y: i32,
    #[case] m: u8,
    #[case] d: u8,
    #[case] hh: u8,
    #[case] mm: u8,
    #[case] ss: u8,
) {
    let table = LeapSecondTable::default();
    let utc = Epoch::from_gregorian_utc(y, m, d, hh, mm, ss, 0);

    let t = GpsTime::from_utc(utc, &table).unwrap();
    let back = t.to_utc(&table).unwrap();

    assert_eq!(back, utc, "{} -> {} -> {}", utc, t, back);
}

#[test]
fn offset_is_applied() {
    let table = LeapSecondTable::default();

    // 14s in 2006
    let utc = Epoch::from_gregorian_utc_at_midnight(2006, 6, 1);
    let t = GpsTime::from_utc(utc, &table).unwrap();
    let gpst = GpsTime::from_gpst_gregorian(2006, 6, 1, 0, 0, 14, 0).unwrap();
    assert_eq!(t, gpst);

    // 18s since 2017
    let utc = Epoch::from_gregorian_utc_at_midnight(2020, 6, 1);
    let t = GpsTime::from_utc(utc, &table).unwrap();
    let gpst = GpsTime::from_gpst_gregorian(2020, 6, 1, 0, 0, 18, 0).unwrap();
    assert_eq!(t, gpst);
}

#[test]
fn unknown_leap_seconds() {
    let table = LeapSecondTable::default();

    let utc = Epoch::from_gregorian_utc_at_midnight(2005, 6, 1);
    assert_eq!(
        GpsTime::from_utc(utc, &table),
        Err(Error::UnknownLeapSeconds(utc))
    );

    let t = GpsTime::from_gpst_gregorian(1999, 9, 2, 17, 51, 44, 0).unwrap();
    assert!(matches!(
        t.to_utc(&table),
        Err(Error::UnknownLeapSeconds(_))
    ));
}

#[test]
fn leap_extrapolation() {
    init_logger();

    let utc = Epoch::from_gregorian_utc_at_midnight(2030, 1, 1);

    let table = LeapSecondTable::default();
    let t = GpsTime::from_utc(utc, &table).unwrap();
    assert_eq!(t, GpsTime::from_gpst_gregorian(2030, 1, 1, 0, 0, 18, 0).unwrap());

    let opts = LeapSecondsOpts {
        extrapolation: LeapExtrapolation::Reject,
        ..Default::default()
    };

    let table = LeapSecondTable::new(&opts);
    assert_eq!(
        GpsTime::from_utc(utc, &table),
        Err(Error::OutdatedLeapSeconds(utc))
    );
}

#[test]
fn gpst_calendar() {
    let t = GpsTime::from_gpst_gregorian(1980, 1, 6, 0, 0, 0, 0).unwrap();
    assert_eq!(t, GpsTime::new(0, 0.0));

    let t = GpsTime::from_gpst_gregorian(1999, 9, 2, 17, 51, 44, 0).unwrap();
    assert_eq!(t.week, 1025);
    assert_eq!(t.tow, 409_904.0);

    let t = GpsTime::from_gpst_gregorian(1979, 12, 30, 0, 0, 0, 0).unwrap();
    assert_eq!(t, GpsTime::new(-1, 0.0));
    assert_eq!(t.to_epoch(), Err(Error::TimeUnderflow));

    assert_eq!(
        GpsTime::from_gpst_gregorian(2024, 2, 30, 0, 0, 0, 0),
        Err(Error::InvalidDate)
    );
}

#[test]
fn hifitime_epochs() {
    let t = GpsTime::new(2362, 553_628.0);

    let epoch = t.to_epoch().unwrap();
    assert_eq!(epoch.time_scale, TimeScale::GPST);
    assert_eq!(epoch.to_time_of_week(), (2362, 553_628_000_000_000));

    assert_eq!(GpsTime::from_epoch(epoch), t);
}

#[test]
fn glonass_epoch() {
    let table = LeapSecondTable::default();

    // 2024-07-23 03:15:00 Moscow time: cycle 8 started 2024-01-01
    let t = GpsTime::from_glonass(8, 205, 11_700.0, &table).unwrap();

    let utc = Epoch::from_gregorian_utc(2024, 7, 23, 0, 15, 0, 0);
    assert_eq!(t, GpsTime::from_utc(utc, &table).unwrap());
    assert_eq!(t.week, 2324);
    assert_eq!(t.tow, 173_718.0);

    // day rollover within the Moscow offset
    let t = GpsTime::from_glonass(8, 205, 3_600.0, &table).unwrap();
    let utc = Epoch::from_gregorian_utc(2024, 7, 22, 22, 0, 0, 0);
    assert_eq!(t, GpsTime::from_utc(utc, &table).unwrap());
}

#[test]
fn time_sync() {
    let table = LeapSecondTable::default();
    let utc = Epoch::from_gregorian_utc(2025, 4, 19, 9, 46, 50, 0);

    let sync = TimeSync::from_utc(utc, &table).unwrap();
    assert_eq!(sync.ref_gpst, GpsTime::new(2362, 553_628.0));

    let t = sync.mono_to_gpst(Duration::from_seconds(51_172.0));
    assert_eq!(t, GpsTime::new(2363, 0.0));
    assert_eq!(sync.gpst_to_mono(t), Duration::from_seconds(51_172.0));

    let sync = TimeSync::new(Duration::from_seconds(100.0), GpsTime::new(2000, 50.0));
    assert_eq!(sync.mono_to_gpst(Duration::from_seconds(40.0)), GpsTime::new(1999, 604_790.0));
}

static GPS_1999_TABLE: &[LeapBoundary] = &[LeapBoundary {
    year: 1999,
    month: 1,
    day: 1,
    seconds: 13,
}];

#[test]
fn custom_leap_table() {
    let table = LeapSecondTable::default().with_boundaries(GPS_1999_TABLE);

    let t = GpsTime::from_gpst_gregorian(1999, 9, 2, 17, 51, 44, 0).unwrap();
    let utc = t.to_utc(&table).unwrap();

    assert_eq!(utc, Epoch::from_gregorian_utc(1999, 9, 2, 17, 51, 31, 0));
    assert_eq!(GpsTime::from_utc(utc, &table).unwrap(), t);
}
