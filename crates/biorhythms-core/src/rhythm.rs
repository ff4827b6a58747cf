//! Rhythm definitions.
//!
//! A rhythm is a named sine cycle with a fixed period in days. The three
//! classic rhythms are available through [`RhythmSet::standard`]; custom sets
//! are validated once, at construction, so generation never sees a bad period.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::ValidationError;

pub const PHYSICAL_PERIOD: f64 = 23.0;
pub const EMOTIONAL_PERIOD: f64 = 28.0;
pub const INTELLECTUAL_PERIOD: f64 = 33.0;

pub const PHYSICAL_COLOR: Rgb = Rgb::from_hex(0xF05D64);
pub const EMOTIONAL_COLOR: Rgb = Rgb::from_hex(0x1FAE9E);
pub const INTELLECTUAL_COLOR: Rgb = Rgb::from_hex(0x3C5CE5);

/// The three classic rhythms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RhythmKind {
    Physical,
    Emotional,
    Intellectual,
}

impl RhythmKind {
    pub const ALL: [RhythmKind; 3] = [
        RhythmKind::Physical,
        RhythmKind::Emotional,
        RhythmKind::Intellectual,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RhythmKind::Physical => "physical",
            RhythmKind::Emotional => "emotional",
            RhythmKind::Intellectual => "intellectual",
        }
    }

    pub fn period(self) -> f64 {
        match self {
            RhythmKind::Physical => PHYSICAL_PERIOD,
            RhythmKind::Emotional => EMOTIONAL_PERIOD,
            RhythmKind::Intellectual => INTELLECTUAL_PERIOD,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            RhythmKind::Physical => PHYSICAL_COLOR,
            RhythmKind::Emotional => EMOTIONAL_COLOR,
            RhythmKind::Intellectual => INTELLECTUAL_COLOR,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn rhythm(self) -> Rhythm {
        Rhythm {
            name: self.name().into(),
            period: self.period(),
            color: self.color(),
        }
    }
}

/// A single biorhythm cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rhythm {
    /// Stable identifier, also used as the localization key suffix
    name: String,
    /// Cycle length in days (> 0)
    period: f64,
    /// Line color for charts and legends
    color: Rgb,
}

impl Rhythm {
    /// Create a rhythm, rejecting non-positive or non-finite periods.
    pub fn new(name: impl Into<String>, period: f64, color: Rgb) -> Result<Self, ValidationError> {
        let name = name.into();
        if !period.is_finite() || period <= 0.0 {
            tracing::warn!(%name, period, "rejecting rhythm with invalid period");
            return Err(ValidationError::InvalidRhythmConfig { name, period });
        }
        Ok(Self {
            name,
            period,
            color,
        })
    }

    pub fn physical() -> Self {
        RhythmKind::Physical.rhythm()
    }

    pub fn emotional() -> Self {
        RhythmKind::Emotional.rhythm()
    }

    pub fn intellectual() -> Self {
        RhythmKind::Intellectual.rhythm()
    }

    /// Classic kind this rhythm is named after, `None` for custom rhythms.
    pub fn kind(&self) -> Option<RhythmKind> {
        RhythmKind::from_name(&self.name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}

/// Unvalidated rhythm as it appears in serialized configuration.
#[derive(Deserialize)]
struct RawRhythm {
    name: String,
    period: f64,
    color: Rgb,
}

impl<'de> Deserialize<'de> for Rhythm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawRhythm::deserialize(deserializer)?;
        Rhythm::new(raw.name, raw.period, raw.color).map_err(serde::de::Error::custom)
    }
}

/// A non-empty, ordered set of rhythms with distinct periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RhythmSet(Vec<Rhythm>);

impl Default for RhythmSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl RhythmSet {
    /// Validate and wrap `rhythms`, keeping their order.
    pub fn new(rhythms: Vec<Rhythm>) -> Result<Self, ValidationError> {
        if rhythms.is_empty() {
            return Err(ValidationError::EmptyRhythmSet);
        }
        for (i, rhythm) in rhythms.iter().enumerate() {
            if rhythms[..i].iter().any(|r| r.period == rhythm.period) {
                return Err(ValidationError::DuplicatePeriod {
                    period: rhythm.period,
                });
            }
        }
        Ok(Self(rhythms))
    }

    /// Physical (23), emotional (28) and intellectual (33), in that order.
    pub fn standard() -> Self {
        Self(RhythmKind::ALL.into_iter().map(RhythmKind::rhythm).collect())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rhythm> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Rhythm> {
        self.0.iter().find(|r| r.name == name)
    }
}

impl<'a> IntoIterator for &'a RhythmSet {
    type Item = &'a Rhythm;
    type IntoIter = std::slice::Iter<'a, Rhythm>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for RhythmSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rhythms = Vec::<Rhythm>::deserialize(deserializer)?;
        RhythmSet::new(rhythms).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_set_has_classic_periods_in_order() {
        let set = RhythmSet::standard();
        let periods: Vec<f64> = set.iter().map(Rhythm::period).collect();
        assert_eq!(periods, vec![23.0, 28.0, 33.0]);
        assert_eq!(set.find("emotional").unwrap().color(), EMOTIONAL_COLOR);
    }

    #[test]
    fn kinds_map_to_standard_rhythms() {
        for (kind, rhythm) in RhythmKind::ALL.into_iter().zip(RhythmSet::standard().iter()) {
            assert_eq!(kind.rhythm(), *rhythm);
            assert_eq!(rhythm.kind(), Some(kind));
            assert_eq!(RhythmKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(RhythmKind::Emotional.period(), 28.0);
        assert_eq!(RhythmKind::from_name("intuitive"), None);
        let custom = Rhythm::new("intuitive", 38.0, PHYSICAL_COLOR).unwrap();
        assert_eq!(custom.kind(), None);
    }

    #[test]
    fn rejects_non_positive_period() {
        for period in [0.0, -23.0, f64::NAN, f64::INFINITY] {
            let err = Rhythm::new("broken", period, PHYSICAL_COLOR).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidRhythmConfig { .. }));
        }
    }

    #[test]
    fn accepts_custom_period() {
        let r = Rhythm::new("intuitive", 38.0, Rgb::new(10, 20, 30)).unwrap();
        assert_eq!(r.name(), "intuitive");
        assert_eq!(r.period(), 38.0);
    }

    #[test]
    fn rejects_empty_and_duplicate_sets() {
        assert_eq!(RhythmSet::new(vec![]), Err(ValidationError::EmptyRhythmSet));

        let dup = RhythmSet::new(vec![
            Rhythm::physical(),
            Rhythm::new("other", 23.0, PHYSICAL_COLOR).unwrap(),
        ]);
        assert_eq!(dup, Err(ValidationError::DuplicatePeriod { period: 23.0 }));
    }

    #[test]
    fn deserialization_validates_periods() {
        let ok: RhythmSet =
            serde_json::from_str(r##"[{"name":"a","period":5.0,"color":"#000000"}]"##).unwrap();
        assert_eq!(ok.len(), 1);

        let bad = serde_json::from_str::<RhythmSet>(
            r##"[{"name":"a","period":0.0,"color":"#000000"}]"##,
        );
        assert!(bad.is_err());

        let empty = serde_json::from_str::<RhythmSet>("[]");
        assert!(empty.is_err());
    }
}
