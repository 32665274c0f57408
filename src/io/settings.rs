use crate::defaults::*;
use crate::error::ConductivityError;
use crate::types::{Component, OrbitalIndex};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

fn default_component() -> String {
    String::from(COMPONENT)
}
fn default_gamma() -> f64 {
    GAMMA
}
fn default_max_freq() -> f64 {
    MAX_FREQ
}
fn default_n_freq() -> usize {
    N_FREQ
}
fn default_valence_orbitals() -> Vec<OrbitalIndex> {
    Vec::new()
}

/// Settings of a Kubo-Greenwood calculation. Every field has a default, so an
/// empty TOML string yields a valid configuration:
/// ```toml
/// component = "cc"
/// gamma = 0.05
/// max_freq = 20.0
/// n_freq = 500
/// valence_orbitals = [[0, 0], [0, 1]]
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct KuboConfig {
    #[serde(default = "default_component")]
    pub component: String,
    #[serde(default = "default_gamma")]
    pub gamma: f64,
    #[serde(default = "default_max_freq")]
    pub max_freq: f64,
    #[serde(default = "default_n_freq")]
    pub n_freq: usize,
    #[serde(default = "default_valence_orbitals")]
    pub valence_orbitals: Vec<OrbitalIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nmax: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lmax: Option<usize>,
}

impl Default for KuboConfig {
    fn default() -> Self {
        Self {
            component: default_component(),
            gamma: default_gamma(),
            max_freq: default_max_freq(),
            n_freq: default_n_freq(),
            valence_orbitals: default_valence_orbitals(),
            nmax: None,
            lmax: None,
        }
    }
}

impl KuboConfig {
    /// Read the settings from a TOML string. Missing keys take their default
    /// values, the result is validated before it is returned.
    pub fn from_toml_str(input: &str) -> Result<Self, ConductivityError> {
        let config: Self = toml::from_str(input)
            .map_err(|err| ConductivityError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConductivityError> {
        toml::to_string(self).map_err(|err| ConductivityError::InvalidConfig(err.to_string()))
    }

    /// The component tag resolved into the closed set of components.
    pub fn component(&self) -> Result<Component, ConductivityError> {
        Component::from_str(&self.component)
    }

    pub fn validate(&self) -> Result<(), ConductivityError> {
        self.component()?;
        if !(self.gamma > 0.0) {
            return Err(ConductivityError::InvalidConfig(format!(
                "gamma has to be positive, got {}",
                self.gamma
            )));
        }
        if !(self.max_freq > 0.0) {
            return Err(ConductivityError::InvalidConfig(format!(
                "max_freq has to be positive, got {}",
                self.max_freq
            )));
        }
        if self.n_freq < 2 {
            return Err(ConductivityError::InvalidConfig(format!(
                "n_freq has to be at least 2, got {}",
                self.n_freq
            )));
        }
        Ok(())
    }
}
