use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use types::SolveParams;

pub const ENV_PREFIX: &str = "TIMETABLE__GA__";

/// Values given on the command line; they win over every other source.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub population: Option<usize>,
    pub generations: Option<usize>,
    pub mutation_rate: Option<f64>,
    pub seed: Option<u64>,
    pub time_limit_sec: Option<u64>,
    pub sequential: bool,
}

/// Defaults, then the params file, then `TIMETABLE__GA__*`, then flags.
pub fn load(file: Option<&Path>, flags: &Overrides) -> Result<SolveParams> {
    let mut params = match file {
        Some(path) => read_json(path)?,
        None => SolveParams::default(),
    };
    apply_env(&mut params, |key| std::env::var(key).ok())?;
    apply_flags(&mut params, flags);
    Ok(params)
}

pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

pub fn apply_env(
    params: &mut SolveParams,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    let get = |key: &str| lookup(&format!("{ENV_PREFIX}{key}"));

    if let Some(v) = get("POPULATION") {
        params.population_size = parse_var("POPULATION", &v)?;
    }
    if let Some(v) = get("GENERATIONS") {
        params.generations = parse_var("GENERATIONS", &v)?;
    }
    if let Some(v) = get("MUTATION_RATE") {
        params.mutation_rate = parse_var("MUTATION_RATE", &v)?;
    }
    if let Some(v) = get("SEED") {
        params.seed = parse_var("SEED", &v)?;
    }
    if let Some(v) = get("TIME_LIMIT_SEC") {
        params.time_limit_sec = Some(parse_var("TIME_LIMIT_SEC", &v)?);
    }
    Ok(())
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("invalid {ENV_PREFIX}{key}={raw:?}"))
}

pub fn apply_flags(params: &mut SolveParams, flags: &Overrides) {
    if let Some(n) = flags.population {
        params.population_size = n;
    }
    if let Some(n) = flags.generations {
        params.generations = n;
    }
    if let Some(r) = flags.mutation_rate {
        params.mutation_rate = r;
    }
    if let Some(s) = flags.seed {
        params.seed = s;
    }
    if let Some(t) = flags.time_limit_sec {
        params.time_limit_sec = Some(t);
    }
    if flags.sequential {
        params.parallel = false;
    }
}
