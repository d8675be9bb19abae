use crate::models::Chapter;
use unicode_normalization::UnicodeNormalization;

/// ASCII-folded, lowercase, alphanumerics only: "Al-Fātiĥah" -> "alfatihah".
pub fn norm_key(s: &str) -> String {
    s.nfkd()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Chapters whose simple name contains `needle`, ignoring case. Order is kept;
/// an empty needle keeps everything.
pub fn filter_chapters<'a>(chapters: &'a [Chapter], needle: &str) -> Vec<&'a Chapter> {
    let needle = needle.to_lowercase();
    chapters
        .iter()
        .filter(|c| c.name_simple.to_lowercase().contains(&needle))
        .collect()
}

// resolve using SERVER names (not your input)
pub fn resolve_chapter<'a>(chapters: &'a [Chapter], spec: &str) -> Option<&'a Chapter> {
    let spec = spec.trim();
    if let Ok(n) = spec.parse::<u32>() {
        return chapters.iter().find(|c| c.id == n);
    }
    let key = norm_key(spec);
    if key.is_empty() {
        return None;
    }
    let exact = chapters
        .iter()
        .find(|c| norm_key(&c.name_simple) == key || norm_key(&c.name_complex) == key);
    // "baqarah" should still find "Al-Baqarah"
    exact.or_else(|| {
        chapters
            .iter()
            .find(|c| {
                let name = norm_key(&c.name_simple);
                name.strip_prefix("al").unwrap_or(&name) == key
            })
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{RevelationPlace, TranslatedName};

    pub(crate) fn chapter(id: u32, simple: &str, complex: &str) -> Chapter {
        Chapter {
            id,
            name_simple: simple.into(),
            name_complex: complex.into(),
            name_arabic: String::new(),
            translated_name: TranslatedName { language_name: "english".into(), name: String::new() },
            revelation_place: RevelationPlace::Makkah,
            verses_count: 7,
        }
    }

    fn catalog() -> Vec<Chapter> {
        vec![
            chapter(1, "Al-Fatihah", "Al-Fātiĥah"),
            chapter(2, "Al-Baqarah", "Al-Baqarah"),
            chapter(3, "Ali 'Imran", "Āli `Imrān"),
            chapter(87, "Al-A'la", "Al-'A`lá"),
            chapter(96, "Al-'Alaq", "Al-`Alaq"),
            chapter(112, "Al-Ikhlas", "Al-'Ikhlāş"),
        ]
    }

    fn ids(v: &[&Chapter]) -> Vec<u32> {
        v.iter().map(|c| c.id).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let all = catalog();
        assert_eq!(ids(&filter_chapters(&all, "")), vec![1, 2, 3, 87, 96, 112]);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let all = catalog();
        assert_eq!(ids(&filter_chapters(&all, "baq")), vec![2]);
        assert_eq!(ids(&filter_chapters(&all, "BAQ")), vec![2]);
        // matches in the middle, not only prefixes
        assert_eq!(ids(&filter_chapters(&all, "lAs")), vec![112]);
        assert_eq!(ids(&filter_chapters(&all, "al-")), vec![1, 2, 87, 96, 112]);
    }

    #[test]
    fn filter_with_no_match_is_empty() {
        let all = catalog();
        assert!(filter_chapters(&all, "zzz").is_empty());
    }

    #[test]
    fn norm_key_folds_diacritics() {
        assert_eq!(norm_key("Al-Fātiĥah"), "alfatihah");
        assert_eq!(norm_key("Āli `Imrān"), "aliimran");
    }

    #[test]
    fn resolve_by_number_and_name() {
        let all = catalog();
        assert_eq!(resolve_chapter(&all, "2").map(|c| c.id), Some(2));
        assert_eq!(resolve_chapter(&all, "al fatihah").map(|c| c.id), Some(1));
        assert_eq!(resolve_chapter(&all, "Āli Imran").map(|c| c.id), Some(3));
        assert_eq!(resolve_chapter(&all, "baqarah").map(|c| c.id), Some(2));
        // only one leading "al" is dropped
        assert_eq!(resolve_chapter(&all, "alaq").map(|c| c.id), Some(96));
        assert_eq!(resolve_chapter(&all, "ala").map(|c| c.id), Some(87));
        assert_eq!(resolve_chapter(&all, "99").map(|c| c.id), None);
        assert_eq!(resolve_chapter(&all, "--").map(|c| c.id), None);
    }
}
