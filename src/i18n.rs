//! Bilingual string tables (Indonesian / English)
//!
//! Flat key lookup with fallback: an unknown key renders as itself, so a
//! missing translation is visible in the UI instead of panicking.

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// Indonesian (default audience)
    #[default]
    Id,
    /// English
    En,
}

impl Language {
    /// BCP 47 tag, also used as the persisted settings value
    pub fn code(&self) -> &'static str {
        match self {
            Language::Id => "id",
            Language::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "id" => Some(Language::Id),
            "en" => Some(Language::En),
            _ => None,
        }
    }
}

/// Health facts shown on the level-up interstitial; fact `level - 1` appears
/// when the player reaches `level`.
const FACTS_ID: [&str; 10] = [
    "Asap rokok mengandung lebih dari 7.000 bahan kimia berbahaya, 70 di antaranya menyebabkan kanker.",
    "Tar dalam rokok bisa menurunkan kapasitas paru-paru hingga 30% dalam 10 tahun.",
    "Satu batang rokok mengandung sekitar 4.800 bahan kimia beracun.",
    "Perokok pasif menerima 15% lebih banyak karbon monoksida dibanding perokok aktif.",
    "Berhenti merokok 1 tahun menurunkan risiko penyakit jantung hingga 50%.",
    "Nikotin mencapai otak hanya dalam 10 detik setelah menghisap rokok.",
    "Rokok menyebabkan 90% kasus kanker paru-paru di seluruh dunia.",
    "Setelah 20 menit berhenti merokok, detak jantung mulai kembali normal.",
    "Perokok kehilangan rata-rata 10 tahun harapan hidup dibanding non-perokok.",
    "Indonesia adalah negara dengan perokok terbanyak ke-3 di dunia.",
];

const FACTS_EN: [&str; 10] = [
    "Cigarette smoke contains over 7,000 harmful chemicals, 70 of which cause cancer.",
    "Tar in cigarettes can reduce lung capacity by up to 30% within 10 years.",
    "A single cigarette contains about 4,800 toxic chemicals.",
    "Passive smokers receive 15% more carbon monoxide than active smokers.",
    "Quitting smoking for 1 year reduces heart disease risk by up to 50%.",
    "Nicotine reaches the brain within just 10 seconds of inhaling.",
    "Smoking causes 90% of lung cancer cases worldwide.",
    "After 20 minutes of quitting, heart rate begins to normalize.",
    "Smokers lose an average of 10 years of life expectancy compared to non-smokers.",
    "Indonesia has the 3rd highest number of smokers in the world.",
];

const STRINGS_ID: &[(&str, &str)] = &[
    ("tagline", "Lindungi paru-paru dari racun rokok yang jatuh!"),
    ("rule", "HP habis atau Tar penuh = Game Over!"),
    ("mode_endless", "Mode Endless"),
    ("mode_survival", "Bertahan 2 Menit"),
    ("level_up", "Level Naik!"),
    ("speed_increased", "Kecepatan meningkat!"),
    ("gameover_tar", "Paru-paru Penuh Tar!"),
    ("gameover_health", "Paru-paru Rusak!"),
    ("final_score", "Skor Akhir"),
    ("survival_time", "Waktu Bertahan"),
    ("toxins_blocked", "Racun Diblokir"),
    ("max_combo", "Combo Tertinggi"),
    ("level_reached", "Level Tercapai"),
    ("new_high_score", "Skor Tertinggi Baru!"),
    ("high_score", "Skor Tertinggi"),
    ("play_again", "Main Lagi"),
    ("paused", "Jeda"),
    ("controls_hint", "Gunakan mouse/touch atau \u{2190} \u{2192}"),
];

const STRINGS_EN: &[(&str, &str)] = &[
    ("tagline", "Protect the lungs from falling cigarette toxins!"),
    ("rule", "Empty HP or Full Tar = Game Over!"),
    ("mode_endless", "Endless Mode"),
    ("mode_survival", "Survive 2 Minutes"),
    ("level_up", "Level Up!"),
    ("speed_increased", "Speed increased!"),
    ("gameover_tar", "Lungs Full of Tar!"),
    ("gameover_health", "Lungs Destroyed!"),
    ("final_score", "Final Score"),
    ("survival_time", "Survival Time"),
    ("toxins_blocked", "Toxins Blocked"),
    ("max_combo", "Max Combo"),
    ("level_reached", "Level Reached"),
    ("new_high_score", "New High Score!"),
    ("high_score", "High Score"),
    ("play_again", "Play Again"),
    ("paused", "Paused"),
    ("controls_hint", "Use mouse/touch or \u{2190} \u{2192}"),
];

/// Language-aware string lookup
#[derive(Debug, Clone, Copy, Default)]
pub struct Translator {
    pub language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Look up a UI string; falls back to the key itself
    pub fn get<'a>(&self, key: &'a str) -> &'a str {
        let table = match self.language {
            Language::Id => STRINGS_ID,
            Language::En => STRINGS_EN,
        };
        table
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or(key)
    }

    /// Health fact shown when reaching `level` (2..=10)
    pub fn fact(&self, index: usize) -> Option<&'static str> {
        let facts = match self.language {
            Language::Id => &FACTS_ID,
            Language::En => &FACTS_EN,
        };
        facts.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_per_language() {
        let id = Translator::new(Language::Id);
        let en = Translator::new(Language::En);
        assert_eq!(id.get("play_again"), "Main Lagi");
        assert_eq!(en.get("play_again"), "Play Again");
    }

    #[test]
    fn test_unknown_key_falls_back_to_itself() {
        let t = Translator::new(Language::En);
        assert_eq!(t.get("no_such_key"), "no_such_key");
    }

    #[test]
    fn test_both_tables_cover_the_same_keys() {
        for (key, _) in STRINGS_ID {
            assert!(
                STRINGS_EN.iter().any(|(k, _)| k == key),
                "missing en: {key}"
            );
        }
        for (key, _) in STRINGS_EN {
            assert!(
                STRINGS_ID.iter().any(|(k, _)| k == key),
                "missing id: {key}"
            );
        }
    }

    #[test]
    fn test_every_ui_label_resolves_in_both_languages() {
        // Keys the game shell renders; none may fall back to itself
        let keys = [
            "tagline",
            "rule",
            "mode_endless",
            "mode_survival",
            "level_up",
            "speed_increased",
            "gameover_tar",
            "gameover_health",
            "final_score",
            "survival_time",
            "toxins_blocked",
            "max_combo",
            "level_reached",
            "new_high_score",
            "high_score",
            "play_again",
            "paused",
            "controls_hint",
        ];
        for t in [Translator::new(Language::Id), Translator::new(Language::En)] {
            for key in keys {
                assert_ne!(t.get(key), key, "untranslated: {key}");
            }
        }
    }

    #[test]
    fn test_facts_available_for_every_level_up() {
        let t = Translator::new(Language::Id);
        // Levels 2..=10 show fact index level - 1
        for level in 2..=10u32 {
            assert!(t.fact((level - 1) as usize).is_some());
        }
        assert!(t.fact(10).is_none());
    }

    #[test]
    fn test_language_codes_round_trip() {
        for lang in [Language::Id, Language::En] {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code("fr"), None);
    }
}
