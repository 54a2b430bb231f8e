use crate::MESSAGE_HEADER;
use crate::config::Config;
use crate::forecast::{ForecastBlock, ForecastFetch};
use crate::geo::{NO_VALID_POSITION, Position, Proximity};
use crate::parse_numeric;
use crate::request::Telemetry;
use crate::sensor::{self, Channel};

/// Weather collaborator: "forecast by coordinates".
#[allow(async_fn_in_trait)]
pub trait ForecastSource {
    async fn forecast(&self, position: Position) -> ForecastFetch;
}

/// Ordered, append-only list of message lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    lines: Vec<String>,
}

impl Message {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Text sent to the recipient: header, one line per entry, trailing newline.
    pub fn text(&self) -> String {
        format!("{MESSAGE_HEADER}\n{}\n", self.lines.join("\n"))
    }
}

pub struct MessageComposer<'a> {
    config: &'a Config,
}

impl<'a> MessageComposer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Position lines and the position to forecast for, if it passed the sanity check.
    ///
    /// Nothing is produced unless both coordinates are numeric.
    pub fn locate(&self, telemetry: &Telemetry) -> (Vec<String>, Option<Position>) {
        let latitude = telemetry.latitude.as_deref().and_then(parse_numeric);
        let longitude = telemetry.longitude.as_deref().and_then(parse_numeric);
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            return (Vec::new(), None);
        };

        let position = Position::new(latitude, longitude);
        if !position.passes_sanity_check() {
            return (vec![NO_VALID_POSITION.to_string()], None);
        }

        match Proximity::classify(
            position,
            &self.config.reference_points,
            self.config.distance_threshold,
        ) {
            Some(proximity) => (proximity.lines(position), Some(position)),
            None => (Vec::new(), Some(position)),
        }
    }

    pub fn temperatures(&self, telemetry: &Telemetry) -> Vec<String> {
        Channel::ORDERED
            .iter()
            .filter_map(|&channel| {
                telemetry
                    .reading(channel)
                    .and_then(|raw| sensor::diagnose(raw, channel))
            })
            .collect()
    }

    pub async fn compose<F: ForecastSource>(&self, telemetry: &Telemetry, forecasts: &F) -> Message {
        let mut message = Message::default();
        let (position_lines, position) = self.locate(telemetry);
        for line in position_lines {
            message.push(line);
        }
        for line in self.temperatures(telemetry) {
            message.push(line);
        }
        if let Some(position) = position {
            let fetch = forecasts.forecast(position).await;
            let block = ForecastBlock::from_fetch(&fetch, &self.config.weekday_labels);
            message.push(block.render());
        }
        message
    }
}
