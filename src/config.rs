use crate::core::billing::Tariff;
use crate::core::pv::PhotovoltaicArray;
use crate::errors::ConfigurationError;
use serde::Deserialize;
use serde_valid::Validate;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::info;

// Solar array and tariff defaults, editable by the user through a JSON configuration file.
pub const DEFAULT_PANEL_AREA_M2: f64 = 10.0;
pub const DEFAULT_PANEL_COUNT: u32 = 1;
pub const DEFAULT_PANEL_EFFICIENCY: f64 = 0.18;
pub const DEFAULT_SYSTEM_LOSS: f64 = 0.17;
pub const DEFAULT_TARIFF_TE: f64 = 0.35921;
pub const DEFAULT_TARIFF_TUSD: f64 = 0.76273;
pub const DEFAULT_IRRADIATION_FILE: &str = "Irradiacao_Itaperuna.xlsx";
pub const DEFAULT_CHART_FILE: &str = "consumption_chart.svg";

/// Fixed parameters for a single assessment run.
///
/// Any field left out of a configuration file keeps its default.
#[derive(Clone, Debug, Deserialize, PartialEq, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct SystemConfiguration {
    /// Area of one panel, in m2
    #[validate(minimum = 0.)]
    pub panel_area_m2: f64,
    #[validate(minimum = 1)]
    pub panel_count: u32,
    #[validate(minimum = 0.)]
    #[validate(maximum = 1.)]
    pub panel_efficiency: f64,
    #[validate(minimum = 0.)]
    #[validate(maximum = 1.)]
    pub system_loss: f64,
    /// Energy tariff (TE), in R$/kWh
    #[validate(minimum = 0.)]
    pub tariff_te: f64,
    /// Distribution tariff (TUSD), in R$/kWh
    #[validate(minimum = 0.)]
    pub tariff_tusd: f64,
    pub irradiation_file: PathBuf,
    pub chart_file: PathBuf,
}

impl Default for SystemConfiguration {
    fn default() -> Self {
        Self {
            panel_area_m2: DEFAULT_PANEL_AREA_M2,
            panel_count: DEFAULT_PANEL_COUNT,
            panel_efficiency: DEFAULT_PANEL_EFFICIENCY,
            system_loss: DEFAULT_SYSTEM_LOSS,
            tariff_te: DEFAULT_TARIFF_TE,
            tariff_tusd: DEFAULT_TARIFF_TUSD,
            irradiation_file: PathBuf::from(DEFAULT_IRRADIATION_FILE),
            chart_file: PathBuf::from(DEFAULT_CHART_FILE),
        }
    }
}

impl SystemConfiguration {
    pub fn from_json(json: impl Read) -> Result<Self, ConfigurationError> {
        let config: Self = serde_json::from_reader(json)?;
        config
            .validate()
            .map_err(|errors| ConfigurationError::Invalid(errors.to_string()))?;

        Ok(config)
    }

    /// Load configuration from a JSON file, or use the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        match path {
            Some(path) => {
                info!(path = %path.display(), "loading configuration");
                Self::from_json(BufReader::new(File::open(path)?))
            }
            None => Ok(Self::default()),
        }
    }

    /// Total area of all panels, in m2
    pub fn total_panel_area_m2(&self) -> f64 {
        self.panel_area_m2 * self.panel_count as f64
    }

    pub fn tariff(&self) -> Tariff {
        Tariff::new(self.tariff_te, self.tariff_tusd)
    }

    pub fn pv_array(&self) -> PhotovoltaicArray {
        PhotovoltaicArray::new(
            self.total_panel_area_m2(),
            self.panel_efficiency,
            self.system_loss,
        )
    }
}
