//! Display-ready audio features derived from the raw Web API object.

use crate::spotify::AudioFeatures;

/// Note names indexed by pitch class.
pub const PITCH_CLASSES: [&str; 12] = [
    "C", "C♯/D♭", "D", "D♯/E♭", "E", "F", "F♯/G♭", "G", "G♯/A♭", "A", "A♯/B♭", "B",
];

/// Label shown when the pitch class is outside 0..=11 (Spotify sends -1 for no key).
pub const UNKNOWN_KEY: &str = "Unknown";

/// Formats a pitch class and mode flag as e.g. `"C Major"` or `"A Minor"`.
pub fn key_label(pitch_class: i32, mode: i32) -> String {
    let name = usize::try_from(pitch_class)
        .ok()
        .and_then(|i| PITCH_CLASSES.get(i));

    match name {
        Some(name) if mode == 1 => format!("{} Major", name),
        Some(name) => format!("{} Minor", name),
        None => UNKNOWN_KEY.to_string(),
    }
}

/// Feature vector as presented to the user. Ratios are passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackFeatures {
    pub acousticness: f64,
    pub danceability: f64,
    pub energy: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub speechiness: f64,
    pub valence: Option<f64>,
    pub bpm: f64,
    pub key: String,
}

impl TrackFeatures {
    pub fn from_audio_features(raw: &AudioFeatures) -> Self {
        Self {
            acousticness: raw.acousticness,
            danceability: raw.danceability,
            energy: raw.energy,
            instrumentalness: raw.instrumentalness,
            liveness: raw.liveness,
            speechiness: raw.speechiness,
            valence: raw.valence,
            bpm: raw.tempo,
            key: key_label(raw.key, raw.mode),
        }
    }

    /// Tempo rounded to a whole beat.
    pub fn display_bpm(&self) -> i64 {
        self.bpm.round() as i64
    }
}

impl From<AudioFeatures> for TrackFeatures {
    fn from(raw: AudioFeatures) -> Self {
        Self::from_audio_features(&raw)
    }
}
