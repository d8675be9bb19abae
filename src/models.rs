use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Number of surahs in the mushaf; the API never returns an id outside this range.
pub const CHAPTER_COUNT: u32 = 114;

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct ChaptersResponse {
    pub chapters: Vec<Chapter>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct ChapterEnvelope {
    pub chapter: Chapter,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct VersesResponse {
    pub verses: Vec<Verse>,
    pub pagination: Option<Pagination>, // make it optional to avoid surprises
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Pagination {
    pub per_page: Option<u32>,
    pub current_page: Option<u32>,
    pub next_page: Option<u32>,
    pub total_pages: Option<u32>,
    pub total_records: Option<u32>,
}

/// Chapters (surahs)
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Chapter {
    pub id: u32,
    pub name_simple: String,
    #[serde(default)]
    pub name_complex: String,
    pub name_arabic: String,
    pub translated_name: TranslatedName,
    pub revelation_place: RevelationPlace,
    pub verses_count: u32,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct TranslatedName {
    #[serde(default)]
    pub language_name: String,
    pub name: String,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RevelationPlace {
    #[serde(alias = "mecca", alias = "meccan")]
    Makkah,
    #[serde(alias = "medina", alias = "medinan")]
    Madinah,
}

impl fmt::Display for RevelationPlace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RevelationPlace::Makkah => "makkah",
            RevelationPlace::Madinah => "madinah",
        })
    }
}

impl Chapter {
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=CHAPTER_COUNT).contains(&self.id) {
            return Err(format!("chapter id {} out of range", self.id));
        }
        if self.verses_count == 0 {
            return Err(format!("chapter {} has no verses", self.id));
        }
        if self.name_simple.trim().is_empty() {
            return Err(format!("chapter {} has no name", self.id));
        }
        Ok(())
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Verse {
    pub id: u32,
    pub verse_number: u32,
    pub verse_key: VerseKey,
    pub text_uthmani: String,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Translation {
    #[serde(default)]
    pub resource_id: Option<u32>,
    // raw text, may carry <sup foot_note=..> markers
    #[serde(default)]
    pub text: Option<String>,
}

impl Verse {
    /// First translation's raw text, if there is one and it is not blank.
    pub fn translation_text(&self) -> Option<&str> {
        self.translations
            .first()
            .and_then(|t| t.text.as_deref())
            .filter(|t| !t.is_empty())
    }

    pub fn validate(&self, chapter: u32) -> Result<(), String> {
        if self.verse_number == 0 {
            return Err(format!("verse {} has number 0", self.verse_key));
        }
        if self.verse_key.chapter != chapter {
            return Err(format!(
                "verse {} does not belong to chapter {chapter}",
                self.verse_key
            ));
        }
        if self.verse_key.verse != self.verse_number {
            return Err(format!(
                "verse key {} disagrees with verse number {}",
                self.verse_key, self.verse_number
            ));
        }
        Ok(())
    }
}

/// `chapter:verse`, e.g. `2:255`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VerseKey {
    pub chapter: u32,
    pub verse: u32,
}

impl FromStr for VerseKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (c, v) = s
            .split_once(':')
            .ok_or_else(|| format!("bad verse key: {s:?}"))?;
        let chapter = c.trim().parse().map_err(|_| format!("bad verse key: {s:?}"))?;
        let verse = v.trim().parse().map_err(|_| format!("bad verse key: {s:?}"))?;
        Ok(VerseKey { chapter, verse })
    }
}

impl TryFrom<String> for VerseKey {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<VerseKey> for String {
    fn from(k: VerseKey) -> Self {
        k.to_string()
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FATIHAH: &str = r#"{
        "id": 1, "revelation_place": "makkah", "revelation_order": 5,
        "bismillah_pre": false, "name_simple": "Al-Fatihah",
        "name_complex": "Al-Fātiĥah", "name_arabic": "الفاتحة",
        "verses_count": 7, "pages": [1, 1],
        "translated_name": {"language_name": "english", "name": "The Opener"}
    }"#;

    #[test]
    fn chapter_decodes_api_shape() {
        let c: Chapter = serde_json::from_str(FATIHAH).unwrap();
        assert_eq!(c.id, 1);
        assert_eq!(c.name_simple, "Al-Fatihah");
        assert_eq!(c.translated_name.name, "The Opener");
        assert_eq!(c.revelation_place, RevelationPlace::Makkah);
        assert_eq!(c.verses_count, 7);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn chapter_missing_field_is_rejected() {
        let err = serde_json::from_str::<Chapter>(r#"{"id": 1, "name_simple": "x"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn unknown_revelation_place_is_rejected() {
        let json = FATIHAH.replace("makkah", "atlantis");
        assert!(serde_json::from_str::<Chapter>(&json).is_err());
    }

    #[test]
    fn chapter_id_out_of_range_fails_validation() {
        let mut c: Chapter = serde_json::from_str(FATIHAH).unwrap();
        c.id = 115;
        assert!(c.validate().is_err());
    }

    #[test]
    fn verse_key_parses_and_displays() {
        let k: VerseKey = "2:255".parse().unwrap();
        assert_eq!(k, VerseKey { chapter: 2, verse: 255 });
        assert_eq!(k.to_string(), "2:255");
        assert!("2-255".parse::<VerseKey>().is_err());
        assert!("a:1".parse::<VerseKey>().is_err());
    }

    #[test]
    fn verse_decodes_and_validates() {
        let v: Verse = serde_json::from_str(
            r#"{"id": 8, "verse_number": 1, "verse_key": "2:1",
                "text_uthmani": "الٓمٓ",
                "translations": [{"id": 1, "resource_id": 33, "text": "Alif Lam Mim."}]}"#,
        )
        .unwrap();
        assert_eq!(v.translation_text(), Some("Alif Lam Mim."));
        assert!(v.validate(2).is_ok());
        assert!(v.validate(3).is_err());
    }

    #[test]
    fn verse_without_translations_has_no_text() {
        let v: Verse = serde_json::from_str(
            r#"{"id": 1, "verse_number": 1, "verse_key": "1:1", "text_uthmani": "x"}"#,
        )
        .unwrap();
        assert_eq!(v.translation_text(), None);
    }
}
