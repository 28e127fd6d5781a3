//! TOML configuration for the example driver: which file to read, which
//! file to write, and an optional override of the version allow-list.

use std::fs::File;
use std::io::prelude::*;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct Config {
    pub source: PathBuf,
    pub destination: PathBuf,
    #[serde(default)]
    pub supported_versions: Option<Vec<i32>>,
}

impl Config {
    pub const PATH: &'static str = "wldtool.toml";

    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut f = File::open(path)?;
        let mut text = String::new();
        f.read_to_string(&mut text)?;
        Ok(toml::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_toml_missing_mandatory_field() {
        let err = toml::from_str::<Config>(r#"source = "a.wld""#).unwrap_err();
        assert!(err.to_string().contains("destination"));
    }

    #[test]
    fn supported_versions_defaults_to_none() {
        let cfg: Config = toml::from_str(r#"source = "a.wld"
destination = "b.wld""#)
            .unwrap();
        assert!(cfg.supported_versions.is_none());
    }
}
