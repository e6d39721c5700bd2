use crate::model::{AlertDefinition, Channel, Sensor, Severity};

/// 内置告警定义：温度、湿度、电力各一条
pub fn default_definitions() -> Vec<AlertDefinition> {
    vec![
        AlertDefinition::new("1", Channel::Temperature, 30.0, Severity::High)
            .with_max_count(10)
            .with_sensor(Sensor::new("T1", "Temperature Sensor 1", "Server room"))
            .with_sensor(Sensor::new("T2", "Temperature Sensor 2", "Main office"))
            .with_address("123 Rue de l'Innovation, 75001 Paris")
            .with_description("Rapid temperature increase in the server room"),
        AlertDefinition::new("2", Channel::Humidity, 70.0, Severity::Moderate)
            .with_max_count(8)
            .with_sensor(Sensor::new("H1", "Humidity Sensor 1", "Warehouse"))
            .with_address("456 Avenue de la Technologie, 69002 Lyon")
            .with_description("Abnormal humidity level detected in the warehouse"),
        AlertDefinition::new("3", Channel::Electricity, 220.0, Severity::Critical)
            .with_max_count(5)
            .with_sensor(Sensor::new("E1", "Electricity Sensor 1", "Main electrical panel"))
            .with_sensor(Sensor::new("E2", "Electricity Sensor 2", "Conference room"))
            .with_address("789 Boulevard de l'Électronique, 33000 Bordeaux")
            .with_description("Power consumption spike detected, overload risk"),
    ]
}

/// 告警详情中的处理建议
pub const RECOMMENDATIONS: [&str; 3] = [
    "Check the sensors to make sure they are working properly",
    "Inspect the affected area for possible anomalies",
    "Adjust control parameters if necessary",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_channel_once() {
        let defs = default_definitions();
        assert_eq!(defs.len(), Channel::ALL.len());
        for channel in Channel::ALL {
            assert_eq!(defs.iter().filter(|d| d.channel == channel).count(), 1);
        }
    }

    #[test]
    fn test_catalog_thresholds() {
        let defs = default_definitions();
        let electricity = defs.iter().find(|d| d.channel == Channel::Electricity).unwrap();
        assert_eq!(electricity.threshold, 220.0);
        assert_eq!(electricity.severity, Severity::Critical);
        assert_eq!(electricity.sensors.len(), 2);
    }
}
