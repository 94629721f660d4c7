//! Language codes.
//!
//! Codes are accepted as `xx`, `xx_XX` or `xx-XX` (case insensitive),
//! optionally followed by an encoding suffix (`zh_CN.gbk`) that is wiped off.
//! A bare language resolves to its default region, the way POSIX locale aliases do.
//!
use std::collections::{HashMap, HashSet};
use std::fmt;

use lazy_static::lazy_static;
use oxilangtag::LanguageTag;

use crate::error::Error;

lazy_static! {

    /// Default region of each known language.
    pub static ref DEFAULT_REGION: HashMap<&'static str, &'static str> = [
        ("af", "ZA"),
        ("ar", "AA"),
        ("be", "BY"),
        ("bg", "BG"),
        ("bn", "IN"),
        ("ca", "ES"),
        ("cs", "CZ"),
        ("cy", "GB"),
        ("da", "DK"),
        ("de", "DE"),
        ("el", "GR"),
        ("en", "US"),
        ("es", "ES"),
        ("et", "EE"),
        ("eu", "ES"),
        ("fa", "IR"),
        ("fi", "FI"),
        ("fr", "FR"),
        ("ga", "IE"),
        ("gl", "ES"),
        ("he", "IL"),
        ("hi", "IN"),
        ("hr", "HR"),
        ("hu", "HU"),
        ("hy", "AM"),
        ("id", "ID"),
        ("is", "IS"),
        ("it", "IT"),
        ("ja", "JP"),
        ("ka", "GE"),
        ("kk", "KZ"),
        ("ko", "KR"),
        ("lt", "LT"),
        ("lv", "LV"),
        ("mk", "MK"),
        ("ms", "MY"),
        ("mt", "MT"),
        ("nb", "NO"),
        ("nl", "NL"),
        ("nn", "NO"),
        ("no", "NO"),
        ("pl", "PL"),
        ("pt", "PT"),
        ("ro", "RO"),
        ("ru", "RU"),
        ("sk", "SK"),
        ("sl", "SI"),
        ("sq", "AL"),
        ("sr", "RS"),
        ("sv", "SE"),
        ("ta", "IN"),
        ("te", "IN"),
        ("th", "TH"),
        ("tr", "TR"),
        ("uk", "UA"),
        ("ur", "PK"),
        ("vi", "VN"),
        ("zh", "CN"),
    ]
    .iter()
    .copied()
    .collect();

    /// Regional variants that differ from [struct@DEFAULT_REGION].
    pub static ref REGIONAL_VARIANTS: HashSet<&'static str> = [
        "ar_AE", "ar_EG", "ar_SA",
        "de_AT", "de_BE", "de_CH", "de_LU",
        "en_AU", "en_CA", "en_GB", "en_IE", "en_IN", "en_NZ", "en_SG", "en_ZA",
        "es_AR", "es_CL", "es_CO", "es_MX", "es_PE", "es_US", "es_VE",
        "fr_BE", "fr_CA", "fr_CH", "fr_LU",
        "it_CH",
        "nl_BE",
        "pt_BR",
        "ru_UA",
        "sv_FI",
        "zh_HK", "zh_SG", "zh_TW",
    ]
    .iter()
    .copied()
    .collect();
}

/// A validated language/region pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode {
    lang: String,
    country: String,
}

impl LanguageCode {
    /// Parse and normalize a language code.
    ///
    /// Returns [Error::InvalidLanguageTag] if the code is syntactically invalid
    /// or does not correspond to a known locale.
    pub fn parse(code: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidLanguageTag(code.to_string());

        // wipe off the encoding part
        let stripped = code.split('.').next().unwrap_or_default().replace('_', "-");
        let tag = LanguageTag::parse(stripped).map_err(|_| invalid())?;

        let lang = tag.primary_language().to_ascii_lowercase();
        let default_region = DEFAULT_REGION.get(lang.as_str()).ok_or_else(invalid)?;

        let country = match tag.region() {
            None => default_region.to_string(),
            Some(region) => {
                let region = region.to_ascii_uppercase();
                let locale = format!("{}_{}", lang, region);
                if region != *default_region && !REGIONAL_VARIANTS.contains(locale.as_str()) {
                    return Err(invalid());
                }
                region
            }
        };

        Ok(Self { lang, country })
    }

    /// `true` if the code can be parsed.
    pub fn is_valid(code: &str) -> bool {
        Self::parse(code).is_ok()
    }

    /// lowercase language (`en`)
    pub fn xx(&self) -> &str {
        &self.lang
    }

    /// uppercase language (`EN`)
    pub fn upper_xx(&self) -> String {
        self.lang.to_ascii_uppercase()
    }

    /// `en_us`
    pub fn xx_xx(&self) -> String {
        format!("{}_{}", self.lang, self.country.to_ascii_lowercase())
    }

    /// `en_US`
    pub fn locale_form(&self) -> String {
        format!("{}_{}", self.lang, self.country)
    }

    /// Form used in TMX `xml:lang` attributes (`en-US`).
    pub fn tmx_form(&self) -> String {
        format!("{}-{}", self.lang, self.country)
    }

    /// `en-us`
    pub fn xx_dash_xx(&self) -> String {
        format!("{}-{}", self.lang, self.country.to_ascii_lowercase())
    }

    /// `EN-US`
    pub fn upper_dash(&self) -> String {
        format!("{}-{}", self.upper_xx(), self.country)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tmx_form())
    }
}

impl std::str::FromStr for LanguageCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
