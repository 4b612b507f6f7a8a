use std::{fs, time::Duration};

use clap::Parser;
use neuronbridge::id::JacsUid;

use super::{
    commands,
    config::{CliArgs, Command, Config},
};

/// Generator settings passed on every command line unless a test sets its
/// own, so `DEPLOYMENT_CONTEXT` and friends in the environment never apply.
const BASELINE: [(&str, &str); 4] = [
    ("--deployment-context", "2"),
    ("--host-component", "7"),
    ("--retry-backoff-ms", "500"),
    ("--retry-deadline-ms", "30000"),
];

fn config(args: &[&str]) -> anyhow::Result<Config> {
    let baseline = BASELINE
        .iter()
        .filter(|(flag, _)| !args.contains(flag))
        .flat_map(|&(flag, value)| [flag, value]);
    let argv = std::iter::once("neuronbridge")
        .chain(baseline)
        .chain(args.iter().copied());
    Config::try_from(CliArgs::try_parse_from(argv)?)
}

fn run(args: &[&str]) -> anyhow::Result<String> {
    let config = config(args)?;
    let mut out = Vec::new();
    commands::run(&config, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn builds_config_from_args() {
    let config = config(&[
        "--deployment-context",
        "5",
        "--host-component",
        "9",
        "--retry-backoff-ms",
        "10",
        "--retry-deadline-ms",
        "100",
        "generate",
        "-n",
        "3",
    ])
    .unwrap();

    assert_eq!(config.deployment_context, 5);
    assert_eq!(config.host_component, Some(9));
    assert_eq!(config.policy.backoff, Duration::from_millis(10));
    assert_eq!(config.policy.deadline, Duration::from_millis(100));
    assert_eq!(
        config.command,
        Command::Generate {
            count: 3,
            last_id: None
        }
    );
}

#[test]
fn rejects_wide_deployment_context() {
    let err = config(&["--deployment-context", "16", "generate"]).unwrap_err();
    assert!(err.to_string().contains("DEPLOYMENT_CONTEXT (16)"));
}

#[test]
fn rejects_deadline_shorter_than_backoff() {
    assert!(config(&["--retry-backoff-ms", "500", "--retry-deadline-ms", "100", "generate"]).is_err());
    assert!(config(&["--retry-backoff-ms", "0", "generate"]).is_err());
}

#[test]
fn rejects_zero_count() {
    assert!(config(&["generate", "--count", "0"]).is_err());
}

#[test]
fn rejects_malformed_uid() {
    assert!(config(&["decode", "12ab"]).is_err());
    assert!(config(&["generate", "--last-id", "-1"]).is_err());
}

#[test]
fn generate_prints_increasing_uids() {
    let output = run(&[
        "--deployment-context",
        "3",
        "--host-component",
        "44",
        "generate",
        "--count",
        "5",
    ])
    .unwrap();

    let uids: Vec<JacsUid> = output.lines().map(|l| l.parse().unwrap()).collect();
    assert_eq!(uids.len(), 5);
    assert!(uids.windows(2).all(|w| w[0] < w[1]));
    assert!(uids.iter().all(|u| u.deployment_context() == 3 && u.host() == 44));
}

#[test]
fn generate_continues_after_last_id() {
    let first = run(&["--host-component", "1", "generate"]).unwrap();
    let first: JacsUid = first.trim().parse().unwrap();

    let next = run(&[
        "--host-component",
        "1",
        "generate",
        "--last-id",
        &first.to_string(),
    ])
    .unwrap();
    let next: JacsUid = next.trim().parse().unwrap();

    assert!(next > first);
}

#[test]
fn generate_issues_now_after_future_last_id() {
    let future = JacsUid::from_components(JacsUid::max_timestamp(), 0, 2, 7);
    let output = run(&[
        "--host-component",
        "7",
        "--retry-backoff-ms",
        "5",
        "--retry-deadline-ms",
        "20",
        "generate",
        "--last-id",
        &future.to_string(),
    ])
    .unwrap();

    let uid: JacsUid = output.trim().parse().unwrap();
    assert_ne!(uid, future);
    assert!(uid.timestamp() < future.timestamp());
    assert_eq!(uid.deployment_context(), 2);
    assert_eq!(uid.host(), 7);
}

#[test]
fn failed_command_exits_nonzero() {
    assert_eq!(commands::exit_status(&Ok(())), 0);

    let exhausted = anyhow::Error::from(neuronbridge::Error::Exhausted {
        elapsed: Duration::from_secs(30),
    });
    assert_eq!(commands::exit_status(&Err(exhausted)), 1);
    assert_eq!(commands::exit_status(&Err(anyhow::anyhow!("no bucket"))), 1);
}

#[test]
fn decode_prints_fields() {
    let uid = JacsUid::from_components(1_000, 3, 2, 17);
    let output = run(&["decode", &uid.to_string()]).unwrap();

    assert_eq!(
        output,
        format!(
            "{uid}\ttimestamp=1000\tunix_millis=921700001000\tsequence=3\tcontext=2\thost=17\n"
        )
    );
}

#[test]
fn decode_prints_json() {
    let uid = JacsUid::from_components(1_000, 3, 2, 17);
    let output = run(&["decode", "--json", &uid.to_string()]).unwrap();

    let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
    assert_eq!(value["id"], serde_json::json!(uid.to_string()));
    assert_eq!(value["timestamp"], serde_json::json!(1_000));
    assert_eq!(value["host"], serde_json::json!(17));
}

fn bucket_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for path in [
        "JRC2018_Unisex_20x_HR/FlyEM_Hemibrain_v1.2.1/a.png",
        "JRC2018_Unisex_20x_HR/FlyLight_Gen1_MCFO/b.png",
        "JRC2018_VNC_Unisex_40x_DS/FlyLight_Gen1_MCFO/c.png",
    ] {
        let path = dir.path().join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"png").unwrap();
    }
    dir
}

#[test]
fn list_prints_keys_and_sizes() {
    let dir = bucket_dir();
    let root = dir.path().to_str().unwrap();
    let output = run(&[
        "list",
        "--root",
        root,
        "--bucket",
        "cdm",
        "--prefix",
        "JRC2018_Unisex_20x_HR/",
    ])
    .unwrap();

    assert_eq!(
        output,
        "JRC2018_Unisex_20x_HR/FlyEM_Hemibrain_v1.2.1/a.png\t3\n\
         JRC2018_Unisex_20x_HR/FlyLight_Gen1_MCFO/b.png\t3\n"
    );
}

#[test]
fn prefixes_prints_folders() {
    let dir = bucket_dir();
    let root = dir.path().to_str().unwrap();

    let templates = run(&["prefixes", "--root", root, "--bucket", "cdm"]).unwrap();
    assert_eq!(templates, "JRC2018_Unisex_20x_HR/\nJRC2018_VNC_Unisex_40x_DS/\n");

    let libraries = run(&[
        "prefixes",
        "--root",
        root,
        "--bucket",
        "cdm",
        "--prefix",
        "JRC2018_Unisex_20x_HR/",
    ])
    .unwrap();
    assert_eq!(
        libraries,
        "JRC2018_Unisex_20x_HR/FlyEM_Hemibrain_v1.2.1/\nJRC2018_Unisex_20x_HR/FlyLight_Gen1_MCFO/\n"
    );
}

#[test]
fn prefixes_prints_folder_names() {
    let dir = bucket_dir();
    let root = dir.path().to_str().unwrap();

    let libraries = run(&[
        "prefixes",
        "--root",
        root,
        "--bucket",
        "cdm",
        "--prefix",
        "JRC2018_Unisex_20x_HR/",
        "--names",
    ])
    .unwrap();
    assert_eq!(libraries, "FlyEM_Hemibrain_v1.2.1\nFlyLight_Gen1_MCFO\n");
}

#[test]
fn prefixes_keeps_only_templates() {
    let dir = bucket_dir();
    let stray = dir.path().join("Color_Depth_MIPs").join("d.png");
    fs::create_dir_all(stray.parent().unwrap()).unwrap();
    fs::write(stray, b"png").unwrap();
    let root = dir.path().to_str().unwrap();

    let all = run(&["prefixes", "--root", root, "--bucket", "cdm"]).unwrap();
    assert_eq!(all.lines().count(), 3);

    let templates = run(&["prefixes", "--root", root, "--bucket", "cdm", "--templates"]).unwrap();
    assert_eq!(templates, "JRC2018_Unisex_20x_HR\nJRC2018_VNC_Unisex_40x_DS\n");
}

#[test]
fn versions_lists_release_directories() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["v2.1.1", "v10.0.0", "v3.0.0", "vnext", "staging"] {
        fs::create_dir(dir.path().join(name)).unwrap();
    }
    fs::write(dir.path().join("v4.0.0.tar"), b"tar").unwrap();

    let output = run(&["versions", "--root", dir.path().to_str().unwrap()]).unwrap();
    assert_eq!(output, "v10.0.0\nv2.1.1\nv3.0.0\n");
}

#[test]
fn versions_missing_root_fails() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("absent");
    let err = run(&["versions", "--root", root.to_str().unwrap()]).unwrap_err();
    assert!(err.to_string().ends_with("does not exist"));
}

#[test]
fn list_missing_root_fails() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("absent");
    let err = run(&["list", "--root", root.to_str().unwrap(), "--bucket", "cdm"]).unwrap_err();
    assert!(err.to_string().starts_with("failed to open bucket"));
}
