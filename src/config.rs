use std::fs;

use anyhow::{anyhow, Context, Result};
use nom::character::complete::{digit1, one_of};
use nom::combinator::{map_res, opt};
use nom::sequence::Tuple;
use nom::IResult;
use serde::{Deserialize, Serialize};

use crate::utils::{GB, KB, MB};

/// Configuration of a worker-count sweep.
///
/// Either `input_file` (mapped from disk) or `input_size` (seeded random
/// bytes, "4096" / "64K" / "16M" / "1G") selects the input; the file wins
/// when both are present.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SweepConfig {
    pub input_file: Option<String>,
    pub input_size: Option<String>,
    pub nb_workers: Vec<usize>,
    pub warmup: usize,
    pub repetitions: usize,
    pub seed: Option<u64>,
    pub output: Option<String>,
}

impl SweepConfig {
    pub fn new(path: &str) -> Result<SweepConfig> {
        let str = fs::read_to_string(path)
            .context("Unable to read config file")?;

        serde_json::from_str(&str)
            .context("Unable to convert json to struct")
    }

    pub fn save(self: &SweepConfig, path: &str) -> Result<()> {
        let str = serde_json::to_string_pretty(&self)
            .context("Unable to create json of config")?;

        fs::write(path, str)
            .context("Unable to write config to file")
    }
}

/// Parses a byte count with an optional power-of-two K/M/G suffix.
pub fn parse_size(input: &str) -> Result<usize> {
    fn parser(input: &str) -> IResult<&str, (usize, Option<char>)> {
        (map_res(digit1, str::parse::<usize>), opt(one_of("KMGkmg"))).parse(input)
    }

    match parser(input.trim()) {
        Ok(("", (count, suffix))) => {
            let unit = match suffix {
                None => 1,
                Some('K') | Some('k') => KB,
                Some('M') | Some('m') => MB,
                Some('G') | Some('g') => GB,
                Some(other) => return Err(anyhow!("Unknown size suffix: {}", other)),
            };
            count
                .checked_mul(unit)
                .ok_or_else(|| anyhow!("Size does not fit in usize: {}", input))
        }
        Ok((rest, _)) => Err(anyhow!("Trailing input in size {:?}: {:?}", input, rest)),
        Err(e) => Err(anyhow!("Unable to parse size {:?}: {:?}", input, e)),
    }
}
