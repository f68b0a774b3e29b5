//! Interpretation of the human-readable hardware strings in catalog entries.
//!
//! Catalog documents describe requirements the way a person would write
//! them (`"8 ГБ"`, `"Опционально (>4GB VRAM)"`). The types here read those
//! strings without ever replacing them, so a reserialized document keeps
//! the original text.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;
const TIB: u64 = GIB * 1024;

static QUANTITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)(?:[.,](\d{1,9}))?\s*(\p{L}+)\s*$").expect("valid quantity pattern")
});

static VRAM_BOUND_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)>\s*(\d+(?:[.,]\d{1,9})?\s*\p{L}+?)\s*VRAM").expect("valid VRAM pattern")
});

/// A byte quantity parsed from text such as `"16 ГБ"` or `"512MB"`.
///
/// Units are binary multiples regardless of spelling, matching how model
/// runtimes report memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MemorySize(u64);

impl MemorySize {
    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    pub const fn from_gib(gib: u64) -> Self {
        Self(gib.saturating_mul(GIB))
    }

    pub const fn bytes(self) -> u64 {
        self.0
    }

    /// Parse a human-readable quantity. Returns `None` for anything that is
    /// not a number followed by a recognised unit.
    pub fn parse(text: &str) -> Option<Self> {
        let captures = QUANTITY_PATTERN.captures(text)?;
        let whole: u64 = captures.get(1)?.as_str().parse().ok()?;
        let multiplier = unit_multiplier(captures.get(3)?.as_str())?;

        let mut bytes = whole.checked_mul(multiplier)?;
        if let Some(fraction) = captures.get(2) {
            let digits = fraction.as_str();
            let numerator: u64 = digits.parse().ok()?;
            let denominator = 10u64.checked_pow(u32::try_from(digits.len()).ok()?)?;
            let partial = u128::from(numerator) * u128::from(multiplier) / u128::from(denominator);
            bytes = bytes.checked_add(u64::try_from(partial).ok()?)?;
        }

        Some(Self(bytes))
    }
}

fn unit_multiplier(unit: &str) -> Option<u64> {
    match unit.to_lowercase().as_str() {
        "b" | "б" => Some(1),
        "kb" | "kib" | "кб" => Some(KIB),
        "mb" | "mib" | "мб" => Some(MIB),
        "gb" | "gib" | "гб" => Some(GIB),
        "tb" | "tib" | "тб" => Some(TIB),
        _ => None,
    }
}

impl fmt::Display for MemorySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (unit, label) = [(TIB, "TiB"), (GIB, "GiB"), (MIB, "MiB"), (KIB, "KiB")]
            .into_iter()
            .find(|(unit, _)| self.0 >= *unit)
            .unwrap_or((1, "B"));

        // Nearest tenth; a value that rounds to a whole unit prints without
        // the `.0`.
        let unit = u128::from(unit);
        let tenths = (u128::from(self.0) * 10 + unit / 2) / unit;
        if tenths % 10 == 0 {
            write!(f, "{} {label}", tenths / 10)
        } else {
            write!(f, "{}.{} {label}", tenths / 10, tenths % 10)
        }
    }
}

/// How strongly an entry asks for a GPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GpuLevel {
    Optional,
    Recommended,
    Required,
    /// The qualifier did not match any known wording.
    Unspecified,
}

impl GpuLevel {
    pub fn label(self) -> &'static str {
        match self {
            GpuLevel::Optional => "optional",
            GpuLevel::Recommended => "recommended",
            GpuLevel::Required => "required",
            GpuLevel::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for GpuLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parsed form of a GPU qualifier such as `"Рекомендуется (>6GB VRAM)"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GpuPolicy {
    pub level: GpuLevel,
    pub min_vram: Option<MemorySize>,
}

impl GpuPolicy {
    pub fn parse(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let level = if lowered.contains("опционально") || lowered.contains("optional") {
            GpuLevel::Optional
        } else if lowered.contains("рекомендуется") || lowered.contains("recommended") {
            GpuLevel::Recommended
        } else if ["обязательно", "требуется", "required"]
            .iter()
            .any(|word| lowered.contains(word))
        {
            GpuLevel::Required
        } else {
            GpuLevel::Unspecified
        };

        let min_vram = VRAM_BOUND_PATTERN
            .captures(text)
            .and_then(|captures| captures.get(1))
            .and_then(|bound| MemorySize::parse(bound.as_str()));

        Self { level, min_vram }
    }
}

impl fmt::Display for GpuPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.min_vram {
            Some(vram) => write!(f, "{} (>{vram} VRAM)", self.level),
            None => write!(f, "{}", self.level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cyrillic_and_latin_units() {
        assert_eq!(MemorySize::parse("8 ГБ"), Some(MemorySize::from_gib(8)));
        assert_eq!(MemorySize::parse("16 гб"), Some(MemorySize::from_gib(16)));
        assert_eq!(MemorySize::parse("4GB"), Some(MemorySize::from_gib(4)));
        assert_eq!(
            MemorySize::parse("512 MiB"),
            Some(MemorySize::from_bytes(512 * MIB))
        );
        assert_eq!(
            MemorySize::parse("1 ТБ"),
            Some(MemorySize::from_bytes(TIB))
        );
    }

    #[test]
    fn parses_fractional_quantities() {
        assert_eq!(
            MemorySize::parse("1.5 GB"),
            Some(MemorySize::from_bytes(GIB + GIB / 2))
        );
        assert_eq!(
            MemorySize::parse("0,5 ГБ"),
            Some(MemorySize::from_bytes(GIB / 2))
        );
    }

    #[test]
    fn rejects_text_without_a_known_unit() {
        assert_eq!(MemorySize::parse(""), None);
        assert_eq!(MemorySize::parse("лots"), None);
        assert_eq!(MemorySize::parse("8 parsecs"), None);
        assert_eq!(MemorySize::parse("eight GB"), None);
        assert_eq!(MemorySize::parse("8 G"), None);
        assert_eq!(MemorySize::parse("512 m"), None);
    }

    #[test]
    fn display_prefers_whole_units() {
        assert_eq!(MemorySize::from_gib(16).to_string(), "16 GiB");
        assert_eq!(MemorySize::from_bytes(512 * MIB).to_string(), "512 MiB");
        assert_eq!(MemorySize::from_bytes(GIB + GIB / 2).to_string(), "1.5 GiB");
        assert_eq!(MemorySize::from_bytes(100).to_string(), "100 B");
    }

    #[test]
    fn display_rounds_to_the_nearest_tenth() {
        assert_eq!(MemorySize::from_bytes(GIB + GIB / 4).to_string(), "1.3 GiB");
        assert_eq!(MemorySize::from_bytes(GIB + GIB / 100).to_string(), "1 GiB");
        assert_eq!(MemorySize::from_bytes(2 * GIB - MIB).to_string(), "2 GiB");
        let parsed = MemorySize::parse("1.05 GB").map(|size| size.to_string());
        assert_eq!(parsed.as_deref(), Some("1 GiB"));
    }

    #[test]
    fn orders_by_byte_count() {
        assert!(MemorySize::parse("16 ГБ") > MemorySize::parse("8 ГБ"));
        assert!(MemorySize::parse("1 GB") > MemorySize::parse("900 MB"));
    }

    #[test]
    fn gpu_policy_reads_level_and_vram_bound() {
        let optional = GpuPolicy::parse("Опционально (>4GB VRAM)");
        assert_eq!(optional.level, GpuLevel::Optional);
        assert_eq!(optional.min_vram, Some(MemorySize::from_gib(4)));

        let recommended = GpuPolicy::parse("Рекомендуется (>8GB VRAM)");
        assert_eq!(recommended.level, GpuLevel::Recommended);
        assert_eq!(recommended.min_vram, Some(MemorySize::from_gib(8)));

        let bare = GpuPolicy::parse("Опционально");
        assert_eq!(bare.level, GpuLevel::Optional);
        assert_eq!(bare.min_vram, None);
    }

    #[test]
    fn gpu_policy_handles_english_and_unknown_wording() {
        assert_eq!(
            GpuPolicy::parse("Required (>24 GB VRAM)"),
            GpuPolicy {
                level: GpuLevel::Required,
                min_vram: Some(MemorySize::from_gib(24)),
            }
        );
        assert_eq!(GpuPolicy::parse("Требуется").level, GpuLevel::Required);
        assert_eq!(GpuPolicy::parse("whatever").level, GpuLevel::Unspecified);
    }

    #[test]
    fn gpu_policy_display_includes_bound() {
        assert_eq!(
            GpuPolicy::parse("Рекомендуется (>6GB VRAM)").to_string(),
            "recommended (>6 GiB VRAM)"
        );
        assert_eq!(GpuPolicy::parse("Опционально").to_string(), "optional");
    }
}
