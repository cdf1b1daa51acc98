//! Game settings
//!
//! Read once at startup from the page URL query (`?quality=low&seed=7`) or,
//! on native, from the `STAR_GUARD_SETTINGS` environment variable in the same
//! syntax. Nothing is persisted.

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 128,
            QualityPreset::Medium => 512,
            QualityPreset::High => 2048,
        }
    }

    /// Whether to render the star field
    pub fn starfield_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (explosions, breach sparks)
    pub particles: bool,
    /// Star field background
    pub starfield: bool,
    /// Show FPS counter
    pub show_fps: bool,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
    /// Directory serving sprite JSON files; `None` uses built-in art
    pub sprite_dir: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            starfield: true,
            show_fps: false,
            seed: None,
            sprite_dir: None,
        }
    }
}

impl Settings {
    /// Environment variable read by `from_env`
    pub const ENV_VAR: &'static str = "STAR_GUARD_SETTINGS";

    /// Parse a URL query string. A leading `?` is optional and keys and values
    /// are percent-decoded; unknown keys and malformed values are logged and
    /// skipped.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        let query = query.trim().trim_start_matches('?');

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let (key, value) = (decode_component(key), decode_component(value));
            settings.apply(key.trim(), value.trim());
        }

        settings
    }

    /// Read `STAR_GUARD_SETTINGS`, falling back to defaults when unset
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(query) => {
                log::info!("Loaded settings from {}", Self::ENV_VAR);
                Self::from_query(&query)
            }
            Err(_) => Self::default(),
        }
    }

    fn apply(&mut self, key: &str, value: &str) {
        match key {
            "quality" => match QualityPreset::from_str(value) {
                Some(preset) => self.quality = preset,
                None => log::warn!("Ignoring unknown quality '{}'", value),
            },
            "particles" => self.set_flag(key, value, |s, on| s.particles = on),
            "stars" | "starfield" => self.set_flag(key, value, |s, on| s.starfield = on),
            "fps" | "show_fps" => self.set_flag(key, value, |s, on| s.show_fps = on),
            "seed" => match value.parse::<u64>() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => log::warn!("Ignoring malformed seed '{}'", value),
            },
            "sprites" => {
                if value.is_empty() {
                    log::warn!("Ignoring empty sprites directory");
                } else {
                    self.sprite_dir = Some(value.to_string());
                }
            }
            _ => log::warn!("Ignoring unknown setting '{}'", key),
        }
    }

    fn set_flag(&mut self, key: &str, value: &str, set: impl FnOnce(&mut Self, bool)) {
        match parse_flag(value) {
            Some(on) => set(self, on),
            None => log::warn!("Ignoring malformed value '{}' for '{}'", value, key),
        }
    }

    /// Effective particle cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Stars are drawn only if both the toggle and the preset allow them
    pub fn starfield_enabled(&self) -> bool {
        self.starfield && self.quality.starfield_enabled()
    }
}

/// Decode `application/x-www-form-urlencoded` text: `+` is a space and
/// `%XX` a byte. Malformed escapes are kept as written.
fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 2;
                    }
                    _ => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// `key` alone counts as on
fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "" | "1" | "on" | "true" | "yes" => Some(true),
        "0" | "off" | "false" | "no" => Some(false),
        _ => None,
    }
}
