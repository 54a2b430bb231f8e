use crate::sensor::Channel;
use std::collections::HashMap;

/// Telemetry fields sent by the tracker, kept as raw strings until interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Telemetry {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub device: Option<String>,
    pub air: Option<String>,
    pub water: Option<String>,
}

impl Telemetry {
    pub fn reading(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::Air => self.air.as_deref(),
            Channel::Water => self.water.as_deref(),
            Channel::Device => self.device.as_deref(),
        }
    }
}

/// A single heartbeat call: routing parameters plus telemetry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeartbeatRequest {
    pub bot: Option<String>,
    pub api_key: Option<String>,
    pub recipient: Option<String>,
    pub telemetry: Telemetry,
}

impl HeartbeatRequest {
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let param = |name: &str| params.get(name).cloned();
        Self {
            bot: param("b"),
            api_key: param("k"),
            recipient: param("r"),
            telemetry: Telemetry {
                latitude: param("lat"),
                longitude: param("lon"),
                device: param(Channel::Device.parameter()),
                air: param(Channel::Air.parameter()),
                water: param(Channel::Water.parameter()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_query_maps_tracker_parameters() {
        let params = HashMap::from([
            ("b".to_string(), "mb".to_string()),
            ("k".to_string(), "secret".to_string()),
            ("lat".to_string(), "50.123456".to_string()),
            ("lon".to_string(), "5.678901".to_string()),
            ("t1".to_string(), "31.2".to_string()),
            ("t2".to_string(), "18.0".to_string()),
            ("t3".to_string(), "14.5".to_string()),
        ]);
        let request = HeartbeatRequest::from_query(&params);
        assert_eq!(request.bot.as_deref(), Some("mb"));
        assert_eq!(request.api_key.as_deref(), Some("secret"));
        assert_eq!(request.recipient, None);
        assert_eq!(request.telemetry.reading(Channel::Device), Some("31.2"));
        assert_eq!(request.telemetry.reading(Channel::Air), Some("18.0"));
        assert_eq!(request.telemetry.reading(Channel::Water), Some("14.5"));
        assert_eq!(request.telemetry.latitude.as_deref(), Some("50.123456"));
    }
}
