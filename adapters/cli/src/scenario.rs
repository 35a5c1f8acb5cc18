use std::{error::Error, fmt, fs, io, path::Path};

use wave_combat_core::{coerce_seed, coerce_wave_number, SimulationConfig};

/// Command-line values that take precedence over the scenario file.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Overrides {
    /// Replacement generator seed.
    pub(crate) seed: Option<f64>,
    /// Replacement wave number.
    pub(crate) wave_number: Option<f64>,
}

impl Overrides {
    /// Writes every present override into `config`, coerced like file values.
    pub(crate) fn apply(self, config: &mut SimulationConfig) {
        if let Some(seed) = self.seed {
            config.seed = coerce_seed(seed);
        }
        if let Some(wave_number) = self.wave_number {
            config.wave_number = coerce_wave_number(wave_number);
        }
    }
}

/// Reads and parses the scenario stored at `path`.
pub(crate) fn load(path: &Path) -> Result<SimulationConfig, ScenarioError> {
    let source = fs::read_to_string(path).map_err(ScenarioError::Unreadable)?;
    parse(&source)
}

/// Parses a JSON scenario document.
pub(crate) fn parse(source: &str) -> Result<SimulationConfig, ScenarioError> {
    if source.trim().is_empty() {
        return Err(ScenarioError::EmptyDocument);
    }
    serde_json::from_str(source).map_err(ScenarioError::InvalidDocument)
}

/// Errors that can occur while loading a scenario file.
#[derive(Debug)]
pub(crate) enum ScenarioError {
    /// The file could not be read.
    Unreadable(io::Error),
    /// The file was empty or contained only whitespace.
    EmptyDocument,
    /// The document was not a valid scenario.
    InvalidDocument(serde_json::Error),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable(error) => write!(f, "could not read scenario: {error}"),
            Self::EmptyDocument => write!(f, "scenario file was empty"),
            Self::InvalidDocument(error) => write!(f, "could not parse scenario: {error}"),
        }
    }
}

impl Error for ScenarioError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unreadable(error) => Some(error),
            Self::InvalidDocument(error) => Some(error),
            Self::EmptyDocument => None,
        }
    }
}
