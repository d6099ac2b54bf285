//! Test data builders for creating archive rows

use sensorscope::{Channel, SensorRow};

/// Builder for creating test SensorRows
pub struct SensorRowBuilder {
    readings: [f64; 8],
    sensing_time: String,
}

impl SensorRowBuilder {
    pub fn new() -> Self {
        Self {
            readings: [0.0; 8],
            sensing_time: "2024-12-15T00:00:00".to_string(),
        }
    }

    /// Set one channel's (raw, compensation) reading pair
    pub fn channel(mut self, channel: Channel, raw: f64, compensation: f64) -> Self {
        let k = channel.index();
        self.readings[2 * k] = raw;
        self.readings[2 * k + 1] = compensation;
        self
    }

    /// Fill every channel with `base + index` readings
    pub fn sequential(mut self, base: f64) -> Self {
        for (i, slot) in self.readings.iter_mut().enumerate() {
            *slot = base + i as f64;
        }
        self
    }

    pub fn sensing_time(mut self, time: &str) -> Self {
        self.sensing_time = time.to_string();
        self
    }

    pub fn build(self) -> SensorRow {
        SensorRow::new(self.readings, self.sensing_time)
    }
}

impl Default for SensorRowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_builder() {
        let row = SensorRowBuilder::new()
            .channel(Channel::Ch2, 3.0, 4.0)
            .sensing_time("2024-12-16T08:00:00")
            .build();

        assert_eq!(row.reading_pair(Channel::Ch2), (3.0, 4.0));
        assert_eq!(row.reading_pair(Channel::Ch1), (0.0, 0.0));
        assert_eq!(row.sensing_time, "2024-12-16T08:00:00");
    }
}
