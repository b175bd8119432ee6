use anyhow::{anyhow, Result};
use gena_utils::dejsonify;
use serde::de::DeserializeOwned;
use std::{fs, io::Read};

/// Resolves a CLI argument that may be a literal, a path to a `.json` file,
/// or `-` for stdin.
pub fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow!("Failed to read from stdin: {}", e))?;
        Ok(buffer)
    } else if input.ends_with(".json") {
        fs::read_to_string(input).map_err(|e| anyhow!("Failed to read file {}: {}", input, e))
    } else {
        Ok(input.to_string())
    }
}

pub fn load<T: DeserializeOwned>(input: &str, what: &str) -> Result<T> {
    let content = read_input(input)?;
    dejsonify::<T>(&content).map_err(|e| anyhow!("Failed to parse {}: {}", what, e))
}

/// Accepts `1,4,1`, `[1, 4, 1]` or a `.json` file holding the array.
pub fn parse_disc_positions(input: &str) -> Result<Vec<usize>> {
    let content = read_input(input)?;
    let content = content.trim();
    if content.starts_with('[') {
        return dejsonify::<Vec<usize>>(content)
            .map_err(|e| anyhow!("Failed to parse disc positions: {}", e));
    }
    content
        .split(',')
        .map(|rod| {
            rod.trim()
                .parse::<usize>()
                .map_err(|e| anyhow!("Invalid rod '{}': {}", rod.trim(), e))
        })
        .collect()
}
