use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use mstreamb0t::cli::Cli;
use mstreamb0t::config::{Config, ConfigError};
use speculate2::speculate;
use tempfile::TempDir;

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["mstreamb0t"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("arguments should parse")
}

fn home() -> Option<PathBuf> {
    Some(PathBuf::from("/home/reader"))
}

speculate! {
    describe "command line" {
        it "defaults to a one minute daemon" {
            let cli = cli(&["--manga-names=Fairy"]);
            assert_eq!(cli.interval, Duration::from_secs(60));
            assert!(!cli.once);
        }

        it "parses the interval and once flag" {
            let cli = cli(&["--manga-names=Fairy", "--interval=3h", "--once"]);
            assert_eq!(cli.interval, Duration::from_secs(3 * 3600));
            assert!(cli.once);
        }

        it "rejects a non-numeric interval" {
            let err = Cli::try_parse_from(["mstreamb0t", "--interval=g"]).unwrap_err();
            assert!(err.to_string().contains("invalid value"));
        }

        it "rejects unknown flags" {
            let err = Cli::try_parse_from(["mstreamb0t", "--something=g"]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
        }
    }

    describe "resolve" {
        it "builds the watch list from comma separated names" {
            let config = Config::resolve(
                cli(&["--manga-names= Fairy , Dragon,,"]),
                Some("token".to_string()),
                home(),
            ).expect("valid config");

            assert_eq!(config.watch_list.terms(), ["Fairy", "Dragon"]);
            assert_eq!(config.token, "token");
        }

        it "refuses an empty watch list" {
            let err = Config::resolve(cli(&["--manga-names="]), Some("token".to_string()), home())
                .unwrap_err();
            assert!(matches!(err, ConfigError::EmptyWatchList));
            assert_eq!(err.to_string(), "manga name cannot be empty");
        }

        it "refuses a watch list of blanks" {
            let err = Config::resolve(cli(&["--manga-names= , "]), Some("token".to_string()), home())
                .unwrap_err();
            assert!(matches!(err, ConfigError::EmptyWatchList));
        }

        it "requires the pushbullet token" {
            let err = Config::resolve(cli(&["--manga-names=Fairy"]), None, home()).unwrap_err();
            assert_eq!(err.to_string(), "PUSHBULLET_TOKEN not found");

            let err = Config::resolve(cli(&["--manga-names=Fairy"]), Some(String::new()), home())
                .unwrap_err();
            assert!(matches!(err, ConfigError::MissingToken));
        }

        it "requires a home directory" {
            let err = Config::resolve(cli(&["--manga-names=Fairy"]), Some("token".to_string()), None)
                .unwrap_err();
            assert!(matches!(err, ConfigError::HomeDir));
        }

        it "keeps state in a dot directory under home" {
            let config = Config::resolve(
                cli(&["--manga-names=Fairy"]),
                Some("token".to_string()),
                home(),
            ).expect("valid config");

            assert_eq!(config.config_dir(), PathBuf::from("/home/reader/.mstreamb0t"));
            assert_eq!(
                config.checkpoint_path(),
                PathBuf::from("/home/reader/.mstreamb0t/.lastUpdate")
            );
        }
    }

    describe "ensure_config_dir" {
        it "creates the directory when missing and is idempotent" {
            let home = TempDir::new().expect("temp dir");
            let config = Config::resolve(
                cli(&["--manga-names=Fairy"]),
                Some("token".to_string()),
                Some(home.path().to_path_buf()),
            ).expect("valid config");

            assert!(!config.config_dir().exists());
            config.ensure_config_dir().expect("create");
            assert!(config.config_dir().is_dir());
            config.ensure_config_dir().expect("already exists");
        }
    }
}
