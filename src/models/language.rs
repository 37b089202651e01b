//! Language code handling for alias lookup.
//!
//! Callers pass locales with two-letter ISO 639-1 languages (`"zh-TW"`), while
//! GeoPlanet dumps tag aliases with three-letter ISO 639-2 codes (`"ZHO"`).
//! Lookups accept either form on both sides.

/// ISO 639-1 code and its ISO 639-2 terminology and bibliographic forms
const ISO_639: &[(&str, &str, &str)] = &[
    ("ar", "ara", "ara"),
    ("bg", "bul", "bul"),
    ("ca", "cat", "cat"),
    ("cs", "ces", "cze"),
    ("cy", "cym", "wel"),
    ("da", "dan", "dan"),
    ("de", "deu", "ger"),
    ("el", "ell", "gre"),
    ("en", "eng", "eng"),
    ("es", "spa", "spa"),
    ("et", "est", "est"),
    ("eu", "eus", "baq"),
    ("fa", "fas", "per"),
    ("fi", "fin", "fin"),
    ("fr", "fra", "fre"),
    ("ga", "gle", "gle"),
    ("he", "heb", "heb"),
    ("hi", "hin", "hin"),
    ("hr", "hrv", "hrv"),
    ("hu", "hun", "hun"),
    ("hy", "hye", "arm"),
    ("id", "ind", "ind"),
    ("is", "isl", "ice"),
    ("it", "ita", "ita"),
    ("ja", "jpn", "jpn"),
    ("ka", "kat", "geo"),
    ("ko", "kor", "kor"),
    ("lt", "lit", "lit"),
    ("lv", "lav", "lav"),
    ("mk", "mkd", "mac"),
    ("ms", "msa", "may"),
    ("nl", "nld", "dut"),
    ("no", "nor", "nor"),
    ("pl", "pol", "pol"),
    ("pt", "por", "por"),
    ("ro", "ron", "rum"),
    ("ru", "rus", "rus"),
    ("sk", "slk", "slo"),
    ("sl", "slv", "slv"),
    ("sq", "sqi", "alb"),
    ("sr", "srp", "srp"),
    ("sv", "swe", "swe"),
    ("th", "tha", "tha"),
    ("tr", "tur", "tur"),
    ("uk", "ukr", "ukr"),
    ("vi", "vie", "vie"),
    ("zh", "zho", "chi"),
];

/// Primary language subtag of a locale: `"zh-TW"`, `"zh_TW"` and `"ZH"` all yield `"zh"`.
pub fn language_of(locale: &str) -> String {
    locale
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Two-letter form of a lowercase language code, if one is known
fn canonical(code: &str) -> &str {
    ISO_639
        .iter()
        .find(|(_, terminology, bibliographic)| code == *terminology || code == *bibliographic)
        .map_or(code, |&(alpha2, _, _)| alpha2)
}

/// Whether two lowercase language codes name the same language,
/// regardless of ISO 639-1 or 639-2 form.
pub fn same_language(a: &str, b: &str) -> bool {
    a == b || canonical(a) == canonical(b)
}
