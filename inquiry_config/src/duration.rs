use std::ops::Deref;

use serde::Deserialize;

/// A duration written as whitespace separated parts like `1m 30s` or `500ms`.
///
/// Supported units are `ms`, `s`, `m`, `h` and `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::str::FromStr for Duration {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .try_fold(std::time::Duration::ZERO, |out, part| {
                parse_part(part).map(|x| out + x)
            })
            .map(Self)
    }
}

fn parse_part(part: &str) -> Result<std::time::Duration, &'static str> {
    let split = part
        .find(|c: char| !c.is_ascii_digit())
        .ok_or("Missing duration unit")?;
    let (value, unit) = part.split_at(split);
    let value = value.parse::<u64>().map_err(|_| "Invalid duration")?;
    let millis = match unit {
        "ms" => 1,
        "s" => 1000,
        "m" => 60 * 1000,
        "h" => 60 * 60 * 1000,
        "d" => 24 * 60 * 60 * 1000,
        _ => return Err("Invalid duration unit"),
    };
    value
        .checked_mul(millis)
        .map(std::time::Duration::from_millis)
        .ok_or("Duration too large")
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}
