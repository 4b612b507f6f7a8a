use std::{fs, io::Write, path::Path};

use anyhow::Context;
use neuronbridge::{
    Error,
    generator::JacsUidGenerator,
    host::{FixedHost, HostSource, ResolvedHost},
    id::JacsUid,
    listing::{
        DirectoryBucket, ListRequest, common_prefixes, folder_name, is_alignment_template,
        is_release_version, list_all,
    },
    serde::as_string_uid,
    time::{JACS_EPOCH, SystemClock},
};
use serde::Serialize;

use super::config::{BucketArgs, Command, Config};

#[derive(Debug, Serialize)]
struct DecodedUid {
    #[serde(with = "as_string_uid")]
    id: JacsUid,
    timestamp: u64,
    unix_millis: u64,
    sequence: u64,
    deployment_context: u8,
    host: u8,
}

impl From<JacsUid> for DecodedUid {
    fn from(id: JacsUid) -> Self {
        Self {
            id,
            timestamp: id.timestamp(),
            unix_millis: id.unix_millis(JACS_EPOCH),
            sequence: id.sequence(),
            deployment_context: id.deployment_context(),
            host: id.host(),
        }
    }
}

/// Runs the configured subcommand, writing its results to `out`.
pub fn run(config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    match &config.command {
        Command::Generate { count, last_id } => generate(config, *count, *last_id, out),
        Command::Decode { uids, json } => decode(uids, *json, out),
        Command::List { bucket } => list(bucket, out),
        Command::Prefixes {
            bucket,
            delimiter,
            names,
            templates,
        } => prefixes(bucket, delimiter, *names, *templates, out),
        Command::Versions { root } => versions(root, out),
    }
}

/// Logs a failed command once and maps its outcome to a process exit status.
pub fn exit_status(result: &anyhow::Result<()>) -> u8 {
    let Err(err) = result else {
        return 0;
    };
    if let Some(Error::Exhausted { elapsed }) = err.downcast_ref::<Error>() {
        tracing::error!(?elapsed, "JACS UID generation timed out, halting");
    } else {
        tracing::error!("{err:#}");
    }
    1
}

fn generate(
    config: &Config,
    count: usize,
    last_id: Option<JacsUid>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let host = match config.host_component {
        Some(host) => host,
        None => ResolvedHost::resolve().host_component(),
    };
    let generator = JacsUidGenerator::new(
        config.deployment_context,
        SystemClock::default(),
        FixedHost(host),
    )?
    .with_policy(config.policy);

    tracing::debug!(
        deployment_context = config.deployment_context,
        host,
        count,
        "generating JACS UIDs"
    );

    let mut last = last_id;
    for _ in 0..count {
        let uid = generator.try_next_id(last)?;
        writeln!(out, "{uid}")?;
        last = Some(uid);
    }
    Ok(())
}

fn decode(uids: &[JacsUid], json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    for &uid in uids {
        let decoded = DecodedUid::from(uid);
        if json {
            serde_json::to_writer(&mut *out, &decoded)?;
            writeln!(out)?;
        } else {
            writeln!(
                out,
                "{}\ttimestamp={}\tunix_millis={}\tsequence={}\tcontext={}\thost={}",
                decoded.id,
                decoded.timestamp,
                decoded.unix_millis,
                decoded.sequence,
                decoded.deployment_context,
                decoded.host
            )?;
        }
    }
    Ok(())
}

fn open_bucket(args: &BucketArgs) -> anyhow::Result<(DirectoryBucket, ListRequest)> {
    let bucket = DirectoryBucket::open(&args.bucket, &args.root)
        .with_context(|| format!("failed to open bucket at {}", args.root.display()))?;
    let mut request = ListRequest::new(&args.bucket);
    if let Some(prefix) = &args.prefix {
        request = request.with_prefix(prefix);
    }
    Ok((bucket, request))
}

fn list(args: &BucketArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let (bucket, request) = open_bucket(args)?;
    let mut listed = 0usize;
    for entry in list_all(&bucket, request) {
        let entry = entry?;
        writeln!(out, "{}\t{}", entry.key, entry.size)?;
        listed += 1;
    }
    tracing::info!(bucket = %args.bucket, listed, "listing complete");
    Ok(())
}

fn prefixes(
    args: &BucketArgs,
    delimiter: &str,
    names: bool,
    templates: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let (bucket, request) = open_bucket(args)?;
    let prefixes = common_prefixes(&bucket, request.with_delimiter(delimiter))?;
    for prefix in prefixes
        .iter()
        .filter(|p| !templates || is_alignment_template(p))
    {
        if names || templates {
            writeln!(out, "{}", folder_name(prefix, delimiter))?;
        } else {
            writeln!(out, "{prefix}")?;
        }
    }
    Ok(())
}

fn versions(root: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let entries = fs::read_dir(root)
        .with_context(|| format!("directory {} does not exist", root.display()))?;
    let mut versions = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) if is_release_version(&name) => versions.push(name),
            _ => {}
        }
    }
    versions.sort_unstable();
    tracing::debug!(root = %root.display(), found = versions.len(), "release versions");
    for version in versions {
        writeln!(out, "{version}")?;
    }
    Ok(())
}
