pub const WATT_HOURS_PER_KILOWATT_HOUR: u32 = 1_000;
pub const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Convert an energy amount in Wh to kWh.
pub fn watt_hours_to_kilowatt_hours(energy_wh: f64) -> f64 {
    energy_wh / WATT_HOURS_PER_KILOWATT_HOUR as f64
}
