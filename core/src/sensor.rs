use crate::parse_numeric;

/// Value a DS18B20 bus read returns when the sensor is disconnected.
const ONE_WIRE_FAULT: f64 = -127.0;
/// Power-on reset value of a DS18B20: the conversion never ran.
const POWER_ON_RESET: f64 = 85.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Air,
    Water,
    Device,
}

impl Channel {
    /// Order in which the channels appear in the message.
    pub const ORDERED: [Channel; 3] = [Channel::Air, Channel::Water, Channel::Device];

    pub fn label(self) -> &'static str {
        match self {
            Channel::Air => "🌬 air",
            Channel::Water => "💧 water",
            Channel::Device => "🌡 device",
        }
    }

    /// Query parameter carrying this channel.
    pub fn parameter(self) -> &'static str {
        match self {
            Channel::Air => "t2",
            Channel::Water => "t3",
            Channel::Device => "t1",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    OneWireFault,
    SensorFault,
    Celsius(f64),
}

impl Reading {
    /// Interprets a raw value; anything that is not a number yields `None`.
    pub fn interpret(raw: &str) -> Option<Self> {
        let value = parse_numeric(raw)?;
        Some(if value == ONE_WIRE_FAULT {
            Reading::OneWireFault
        } else if value == POWER_ON_RESET {
            Reading::SensorFault
        } else {
            Reading::Celsius(value)
        })
    }

    pub fn render(&self, channel: Channel) -> String {
        let label = channel.label();
        match self {
            Reading::OneWireFault => format!("⚠️ 1-Wire error ({label})"),
            Reading::SensorFault => format!("⚠️ sensor error ({label})"),
            Reading::Celsius(value) => format!("{label} {value} °C"),
        }
    }
}

pub fn diagnose(raw: &str, channel: Channel) -> Option<String> {
    Reading::interpret(raw).map(|reading| reading.render(channel))
}
