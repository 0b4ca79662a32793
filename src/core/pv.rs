use crate::core::consumption::{MonthlyGeneration, MonthlyIrradiation};
use crate::core::units::watt_hours_to_kilowatt_hours;
use serde_valid::Validate;
use tracing::{debug, instrument};

/// This module contains the photovoltaic array and its monthly energy estimate.

#[derive(Clone, Copy, Debug, PartialEq, Validate)]
pub struct PhotovoltaicArray {
    /// Total collecting area of the array, in m2
    #[validate(minimum = 0.)]
    pub area_m2: f64,
    /// Fraction of incident solar energy converted to electricity, 0 to 1
    #[validate(minimum = 0.)]
    #[validate(maximum = 1.)]
    pub efficiency: f64,
    /// Fraction of generated energy lost in wiring, inverter, soiling etc., 0 to 1
    #[validate(minimum = 0.)]
    #[validate(maximum = 1.)]
    pub system_loss: f64,
}

impl PhotovoltaicArray {
    /// Construct a PhotovoltaicArray
    ///
    /// Arguments:
    /// * `area_m2` - total panel area, in m2
    /// * `efficiency` - panel efficiency as a fraction (18% = 0.18)
    /// * `system_loss` - system losses as a fraction (17% = 0.17, i.e. 83% of output is usable)
    pub fn new(area_m2: f64, efficiency: f64, system_loss: f64) -> Self {
        Self {
            area_m2,
            efficiency,
            system_loss,
        }
    }

    /// Share of generated energy that survives system losses.
    pub fn performance_ratio(&self) -> f64 {
        1. - self.system_loss
    }

    /// Estimate the energy (in kWh) generated in each month for which there is irradiation data.
    ///
    /// Irradiation is the mean daily value in Wh/m2/day, scaled up by the number of days in the
    /// month. With no irradiation data the result is empty.
    #[instrument(skip_all)]
    pub fn simulate_generation(&self, irradiation: &MonthlyIrradiation) -> MonthlyGeneration {
        irradiation
            .iter()
            .map(|(month, irradiation_daily_avg)| {
                // monthly irradiation in Wh/m2
                let irradiation_monthly = irradiation_daily_avg * month.days() as f64;
                // energy in Wh
                let energy_wh = irradiation_monthly
                    * self.area_m2
                    * self.efficiency
                    * self.performance_ratio();
                let generated_kwh = watt_hours_to_kilowatt_hours(energy_wh);

                debug!(%month, generated_kwh, "simulated monthly generation");
                (*month, generated_kwh)
            })
            .collect()
    }
}
