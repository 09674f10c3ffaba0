//! Built-in sample catalog.
//!
//! The demo backend ships with a fixed set of pre-loaded stellar signals.
//! Each record carries a ground-truth label and the generator parameters
//! used to synthesize its light curve. Truth labels stay server-side: the
//! listing endpoint exposes only id, name, and description.

use once_cell::sync::Lazy;

/// Ground-truth label driving which synthetic signal a sample produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruthLabel {
    /// Confirmed planet: clean periodic transits.
    Confirmed,
    /// Ambiguous signal: shallow transit buried in noise.
    Candidate,
    /// Known non-planet signal.
    FalsePositive,
}

/// Flavor of false-positive signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
    /// Deep V-shaped eclipses from a stellar companion.
    EclipsingBinary,
    /// Slow sinusoidal brightness variation (star pulsation).
    StellarVariability,
    /// Pure photometric noise.
    Noise,
}

/// Generator parameters for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleParams {
    /// Orbital period in days.
    pub period_days: Option<f64>,
    /// Transit duration in hours.
    pub transit_duration_hours: Option<f64>,
    /// Planet radius in Earth radii; when present the transit depth is
    /// derived from it instead of `transit_depth`.
    pub planet_radius_earth: Option<f64>,
    /// Fallback transit depth as a fraction of baseline flux.
    pub transit_depth: Option<f64>,
    /// Which false-positive signal to synthesize.
    pub anomaly: Option<AnomalyKind>,
}

/// One catalog entry.
#[derive(Debug, Clone)]
pub struct SampleRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub truth: TruthLabel,
    pub params: SampleParams,
}

/// The sample database.
#[derive(Debug, Clone)]
pub struct SampleCatalog {
    samples: Vec<SampleRecord>,
}

static BUILTIN: Lazy<SampleCatalog> = Lazy::new(|| SampleCatalog {
    samples: vec![
        SampleRecord {
            id: "kepler-186f",
            name: "Kepler-186f",
            description: "Earth-sized planet in the habitable zone of a red dwarf",
            truth: TruthLabel::Confirmed,
            params: SampleParams {
                period_days: Some(9.8),
                transit_duration_hours: Some(4.5),
                planet_radius_earth: Some(1.17),
                ..SampleParams::default()
            },
        },
        SampleRecord {
            id: "kepler-452b",
            name: "Kepler-452b",
            description: "Super-Earth orbiting a Sun-like star",
            truth: TruthLabel::Confirmed,
            params: SampleParams {
                period_days: Some(12.4),
                transit_duration_hours: Some(6.2),
                planet_radius_earth: Some(1.63),
                ..SampleParams::default()
            },
        },
        SampleRecord {
            id: "trappist-1e",
            name: "TRAPPIST-1e",
            description: "Rocky planet in the TRAPPIST-1 seven-planet system",
            truth: TruthLabel::Confirmed,
            params: SampleParams {
                period_days: Some(6.1),
                transit_duration_hours: Some(2.8),
                planet_radius_earth: Some(0.92),
                ..SampleParams::default()
            },
        },
        SampleRecord {
            id: "koi-5123",
            name: "KOI-5123.01",
            description: "Kepler object of interest awaiting confirmation",
            truth: TruthLabel::Candidate,
            params: SampleParams::default(),
        },
        SampleRecord {
            id: "koi-8888",
            name: "KOI-8888.01",
            description: "Weak periodic dimming, low signal-to-noise",
            truth: TruthLabel::Candidate,
            params: SampleParams::default(),
        },
        SampleRecord {
            id: "eb-001",
            name: "EB-001",
            description: "Eclipsing binary masquerading as a transit signal",
            truth: TruthLabel::FalsePositive,
            params: SampleParams {
                anomaly: Some(AnomalyKind::EclipsingBinary),
                ..SampleParams::default()
            },
        },
        SampleRecord {
            id: "var-002",
            name: "VAR-002",
            description: "Pulsating variable star with sinusoidal brightness changes",
            truth: TruthLabel::FalsePositive,
            params: SampleParams {
                anomaly: Some(AnomalyKind::StellarVariability),
                ..SampleParams::default()
            },
        },
        SampleRecord {
            id: "noise-003",
            name: "NOISE-003",
            description: "Quiet star, photometric noise only",
            truth: TruthLabel::FalsePositive,
            params: SampleParams {
                anomaly: Some(AnomalyKind::Noise),
                ..SampleParams::default()
            },
        },
    ],
});

impl SampleCatalog {
    /// The built-in demo catalog.
    pub fn builtin() -> &'static SampleCatalog {
        &BUILTIN
    }

    /// Look up a sample by id.
    pub fn get(&self, sample_id: &str) -> Option<&SampleRecord> {
        self.samples.iter().find(|s| s.id == sample_id)
    }

    /// All samples in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &SampleRecord> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
