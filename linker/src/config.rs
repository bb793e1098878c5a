use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Error;

/// Output switches. Every field is optional in the YAML file.
///
/// ```yaml
/// print: true
/// human: false
/// verbose: false
/// keep_both: true
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Print the output even when an output file is given
    pub print: bool,
    /// Print the human readable rendering instead of the standard output
    pub human: bool,
    /// Debug tracing
    pub verbose: bool,
    /// Never overwrite an existing output file
    pub keep_both: bool,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path)?;
        Ok(serde_yaml::from_reader(BufReader::new(file))?)
    }

    pub fn from_yaml(text: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// A switch is on when either side turns it on.
    pub fn merge(self, other: Config) -> Config {
        Config {
            print: self.print || other.print,
            human: self.human || other.human,
            verbose: self.verbose || other.verbose,
            keep_both: self.keep_both || other.keep_both,
        }
    }
}
