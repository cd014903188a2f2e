//! Coarse content themes.
//!
//! A prompt belongs to a theme when any of the theme's keywords occurs as a
//! substring of the lowercased prompt. Membership is tracked as a bitset
//! over [`THEMES`].

/// A named keyword bucket with a bonus weight.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub weight: f64,
}

/// The six themes, in bit order.
pub static THEMES: [Theme; 6] = [
    Theme {
        name: "fantasy",
        keywords: &[
            "fantasy", "dragon", "castle", "magic", "mystical", "mythical", "enchanted", "wizard",
            "fairy", "spell", "legendary", "magical",
        ],
        weight: 1.2,
    },
    Theme {
        name: "scifi",
        keywords: &[
            "cyberpunk", "futuristic", "robot", "space", "alien", "tech", "cyber", "sci-fi",
            "android", "ai", "digital", "neon",
        ],
        weight: 1.3,
    },
    Theme {
        name: "nature",
        keywords: &[
            "forest", "ocean", "mountain", "tree", "flower", "landscape", "natural", "garden",
            "wildlife", "organic", "earth",
        ],
        weight: 1.1,
    },
    Theme {
        name: "urban",
        keywords: &[
            "city", "urban", "street", "building", "lights", "downtown", "metropolitan",
            "architecture", "skyline",
        ],
        weight: 1.0,
    },
    Theme {
        name: "abstract",
        keywords: &[
            "abstract", "geometric", "pattern", "digital", "modern", "artistic", "creative",
            "conceptual", "surreal",
        ],
        weight: 1.1,
    },
    Theme {
        name: "vintage",
        keywords: &[
            "vintage", "retro", "old", "classic", "antique", "steampunk", "nostalgic",
            "historical", "traditional",
        ],
        weight: 1.0,
    },
];

/// Set of themes a prompt belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeSet(u8);

impl ThemeSet {
    /// Detects themes in an already lowercased prompt.
    pub fn detect(lowered: &str) -> Self {
        let mut bits = 0u8;
        for (i, theme) in THEMES.iter().enumerate() {
            if theme.keywords.iter().any(|k| lowered.contains(k)) {
                bits |= 1u8 << i;
            }
        }
        ThemeSet(bits)
    }

    /// Themes present in both sets.
    pub fn intersection(self, other: ThemeSet) -> ThemeSet {
        ThemeSet(self.0 & other.0)
    }

    /// Iterates member themes in table order.
    pub fn iter(self) -> impl Iterator<Item = &'static Theme> {
        THEMES
            .iter()
            .enumerate()
            .filter(move |(i, _)| self.0 & (1u8 << *i) != 0)
            .map(|(_, t)| t)
    }
}
