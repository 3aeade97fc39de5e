use chrono::{DateTime, Duration, TimeZone, Utc};
use mstreamb0t::store::{first_run_threshold, format_checkpoint, CheckpointError, CheckpointStore};
use speculate2::speculate;
use tempfile::TempDir;

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

speculate! {
    before {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = CheckpointStore::in_dir(dir.path());
    }

    describe "load" {
        it "returns roughly one year ago when no checkpoint exists" {
            let loaded = store.load().expect("first run should not fail");
            let expected = Utc::now() - Duration::days(365);

            assert!((loaded - expected).num_days().abs() <= 1);
            assert!(!store.path().exists());
        }

        it "reads a stored timestamp" {
            std::fs::write(store.path(), "2018-08-07T12:09:46-07:00").expect("write");

            let loaded = store.load().expect("load");
            assert_eq!(loaded, Utc.with_ymd_and_hms(2018, 8, 7, 19, 9, 46).unwrap());
        }

        it "tolerates a trailing newline" {
            std::fs::write(store.path(), "2018-08-07T19:09:46Z\n").expect("write");

            let loaded = store.load().expect("load");
            assert_eq!(loaded, ts("2018-08-07T19:09:46Z"));
        }

        it "fails on a corrupt checkpoint" {
            std::fs::write(store.path(), "yesterday-ish").expect("write");

            let err = store.load().unwrap_err();
            assert!(matches!(err, CheckpointError::Parse { .. }));
            assert!(err.to_string().contains("parsing time"));
        }

        it "fails on an empty checkpoint" {
            std::fs::write(store.path(), "").expect("write");
            assert!(matches!(store.load(), Err(CheckpointError::Parse { .. })));
        }
    }

    describe "store" {
        it "round-trips a timestamp" {
            let at = ts("2024-02-29T23:59:59+00:00");
            store.store(at).expect("store");

            assert_eq!(store.load().expect("load"), at);
        }

        it "replaces the previous content" {
            store.store(ts("2020-01-01T00:00:00Z")).expect("store");
            store.store(ts("2021-06-15T08:30:00Z")).expect("store");

            let raw = std::fs::read_to_string(store.path()).expect("read");
            assert_eq!(raw, "2021-06-15T08:30:00Z");
        }

        it "records the current time with store_now" {
            let before = Utc::now() - Duration::seconds(1);
            let stored = store.store_now().expect("store_now");
            let loaded = store.load().expect("load");

            assert!(loaded >= before);
            assert!(loaded <= stored);
            assert!((stored - loaded).num_seconds() < 1);
        }

        it "fails when the directory does not exist" {
            let missing = CheckpointStore::in_dir(dir.path().join("nope"));
            let err = missing.store(Utc::now()).unwrap_err();
            assert!(matches!(err, CheckpointError::Write { .. }));
        }
    }

    describe "format" {
        it "uses second precision with a Z suffix" {
            let at = Utc.with_ymd_and_hms(2018, 8, 7, 19, 9, 46).unwrap()
                + Duration::milliseconds(789);
            assert_eq!(format_checkpoint(at), "2018-08-07T19:09:46Z");
        }

        it "goes back a calendar year for the first run" {
            let now = ts("2024-02-29T12:00:00Z");
            assert_eq!(first_run_threshold(now), ts("2023-02-28T12:00:00Z"));
        }
    }
}
