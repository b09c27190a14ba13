//! Immutable comparison configuration and the default tokenizer.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use regex::Regex;

use crate::error::{ConfigError, ConfigResult};

/// Which length `normLimit` gets multiplied against when it's converted
/// into an absolute cost ceiling. A plain enum rather than a string, so a
/// caller can't construct an unrecognized `normType` at all — the
/// "unknown normType" error in spec is unreachable by construction here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormType {
    Max,
    Min,
    First,
}

impl Default for NormType {
    fn default() -> Self {
        NormType::Max
    }
}

/// Locale used by the default tokenizer's lowercasing step. `None`
/// disables lowercasing entirely. Only Turkish gets a dedicated case rule
/// (the dotted/dotless I pair); everything else relies on Rust's built-in
/// Unicode default case folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    English,
    Turkish,
    None,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::English
    }
}

type TokenizerFn = dyn Fn(&str) -> Vec<String> + Send + Sync;

/// Immutable bundle of costs, penalties, limits, tokenizer and
/// normalization selector. Built once via [`Config::builder`] and shared
/// read-only; safe to use from multiple threads concurrently as long as it
/// isn't rebuilt mid-flight.
#[derive(Clone)]
pub struct Config {
    pub ins_del_cost: f64,
    pub subst_cost: f64,
    pub swap_cost: f64,
    pub duplicate_cost: f64,
    pub digit_change_penalty: f64,
    pub token_initial_penalty: f64,
    pub token_sep_subst_penalty: f64,
    pub token_delta_penalty: f64,
    pub space_only_cost: f64,
    pub per_token_limit: bool,
    pub default_limit: f64,
    pub default_norm_limit: f64,
    pub norm_type: NormType,
    pub token_sep: char,
    pub token_split: String,
    pub locale: Locale,
    tokenizer: Option<Arc<TokenizerFn>>,
    default_tokenizer: Arc<OnceCell<Regex>>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("ins_del_cost", &self.ins_del_cost)
            .field("subst_cost", &self.subst_cost)
            .field("swap_cost", &self.swap_cost)
            .field("duplicate_cost", &self.duplicate_cost)
            .field("digit_change_penalty", &self.digit_change_penalty)
            .field("token_initial_penalty", &self.token_initial_penalty)
            .field("token_sep_subst_penalty", &self.token_sep_subst_penalty)
            .field("token_delta_penalty", &self.token_delta_penalty)
            .field("space_only_cost", &self.space_only_cost)
            .field("per_token_limit", &self.per_token_limit)
            .field("default_limit", &self.default_limit)
            .field("default_norm_limit", &self.default_norm_limit)
            .field("norm_type", &self.norm_type)
            .field("token_sep", &self.token_sep)
            .field("token_split", &self.token_split)
            .field("locale", &self.locale)
            .field("tokenizer", &self.tokenizer.as_ref().map(|_| "<custom fn>"))
            .finish()
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Splits `s` into tokens using the injected tokenizer, or the default
    /// one (lazily compiled and cached on this `Config`).
    pub(crate) fn tokenize(&self, s: &str) -> Vec<String> {
        if let Some(tokenizer) = &self.tokenizer {
            return tokenizer(s);
        }
        self.default_tokenize(s)
    }

    fn default_tokenize(&self, s: &str) -> Vec<String> {
        let lowered;
        let s: &str = if self.locale == Locale::None {
            s
        } else {
            lowered = lowercase_for_locale(s, self.locale);
            &lowered
        };

        let re = self
            .default_tokenizer
            .get_or_init(|| Regex::new(&self.token_split).expect("validated at build time"));

        let stripped = strip_split_edges(s, re);

        re.split(stripped)
            .filter(|t| !t.is_empty())
            .map(|t| t.to_string())
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        ConfigBuilder::new().build().expect("defaults are always valid")
    }
}

fn lowercase_for_locale(s: &str, locale: Locale) -> String {
    match locale {
        Locale::Turkish => s
            .chars()
            .map(|c| match c {
                'I' => 'ı',
                'İ' => 'i',
                _ => c.to_lowercase().next().unwrap_or(c),
            })
            .collect(),
        _ => s.to_lowercase(),
    }
}

/// Strips a single leading and a single trailing match of `re` from `s`,
/// mirroring `String.replaceAll` edge-trimming without touching the
/// interior of the string.
fn strip_split_edges<'a>(s: &'a str, re: &Regex) -> &'a str {
    let mut start = 0;
    let mut end = s.len();

    if let Some(m) = re.find(s) {
        if m.start() == 0 {
            start = m.end();
        }
    }
    if start >= end {
        return "";
    }
    for m in re.find_iter(&s[start..end]) {
        let abs_end = m.end() + start;
        if abs_end == end {
            end = m.start() + start;
        }
    }
    &s[start..end]
}

/// Consuming-self fluent builder: every setter takes `self` by value and
/// returns `Self`, ending in `.build()`.
#[derive(Clone)]
pub struct ConfigBuilder {
    ins_del_cost: f64,
    subst_cost: f64,
    swap_cost: f64,
    duplicate_cost: f64,
    digit_change_penalty: f64,
    token_initial_penalty: f64,
    token_sep_subst_penalty: f64,
    token_delta_penalty: f64,
    space_only_cost: f64,
    per_token_limit: bool,
    default_limit: f64,
    default_norm_limit: f64,
    norm_type: NormType,
    token_sep: char,
    token_split: String,
    locale: Locale,
    tokenizer: Option<Arc<TokenizerFn>>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            ins_del_cost: 1.0,
            subst_cost: 1.0,
            swap_cost: 1.25,
            duplicate_cost: 0.05,
            digit_change_penalty: 0.33,
            token_initial_penalty: 0.25,
            token_sep_subst_penalty: 0.50,
            token_delta_penalty: 0.25,
            space_only_cost: 0.10,
            per_token_limit: true,
            default_limit: 2.0,
            default_norm_limit: 0.0,
            norm_type: NormType::Max,
            token_sep: '\u{0020}',
            token_split: r"[\p{Z}\p{P}\p{S}]+".to_string(),
            locale: Locale::English,
            tokenizer: None,
        }
    }

    pub fn ins_del_cost(mut self, v: f64) -> Self {
        self.ins_del_cost = v;
        self
    }

    pub fn subst_cost(mut self, v: f64) -> Self {
        self.subst_cost = v;
        self
    }

    pub fn swap_cost(mut self, v: f64) -> Self {
        self.swap_cost = v;
        self
    }

    pub fn duplicate_cost(mut self, v: f64) -> Self {
        self.duplicate_cost = v;
        self
    }

    pub fn digit_change_penalty(mut self, v: f64) -> Self {
        self.digit_change_penalty = v;
        self
    }

    pub fn token_initial_penalty(mut self, v: f64) -> Self {
        self.token_initial_penalty = v;
        self
    }

    pub fn token_sep_subst_penalty(mut self, v: f64) -> Self {
        self.token_sep_subst_penalty = v;
        self
    }

    pub fn token_delta_penalty(mut self, v: f64) -> Self {
        self.token_delta_penalty = v;
        self
    }

    pub fn space_only_cost(mut self, v: f64) -> Self {
        self.space_only_cost = v;
        self
    }

    pub fn per_token_limit(mut self, v: bool) -> Self {
        self.per_token_limit = v;
        self
    }

    pub fn default_limit(mut self, v: f64) -> Self {
        self.default_limit = v;
        self
    }

    pub fn default_norm_limit(mut self, v: f64) -> Self {
        self.default_norm_limit = v;
        self
    }

    pub fn norm_type(mut self, v: NormType) -> Self {
        self.norm_type = v;
        self
    }

    pub fn token_sep(mut self, v: char) -> Self {
        self.token_sep = v;
        self
    }

    pub fn token_split(mut self, v: impl Into<String>) -> Self {
        self.token_split = v.into();
        self
    }

    pub fn locale(mut self, v: Locale) -> Self {
        self.locale = v;
        self
    }

    pub fn tokenizer<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        self.tokenizer = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> ConfigResult<Config> {
        if self.tokenizer.is_none() {
            if let Err(err) = Regex::new(&self.token_split) {
                return Err(ConfigError::InvalidTokenSplit {
                    pattern: self.token_split.clone(),
                    reason: err.to_string(),
                });
            }
        }

        Ok(Config {
            ins_del_cost: self.ins_del_cost,
            subst_cost: self.subst_cost,
            swap_cost: self.swap_cost,
            duplicate_cost: self.duplicate_cost,
            digit_change_penalty: self.digit_change_penalty,
            token_initial_penalty: self.token_initial_penalty,
            token_sep_subst_penalty: self.token_sep_subst_penalty,
            token_delta_penalty: self.token_delta_penalty,
            space_only_cost: self.space_only_cost,
            per_token_limit: self.per_token_limit,
            default_limit: self.default_limit,
            default_norm_limit: self.default_norm_limit,
            norm_type: self.norm_type,
            token_sep: self.token_sep,
            token_split: self.token_split,
            locale: self.locale,
            tokenizer: self.tokenizer,
            default_tokenizer: Arc::new(OnceCell::new()),
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tokenizer_splits_on_whitespace_and_punctuation() {
        let config = Config::default();
        assert_eq!(config.tokenize("an dog"), vec!["an", "dog"]);
        assert_eq!(config.tokenize("  an, dog!  "), vec!["an", "dog"]);
    }

    #[test]
    fn locale_none_skips_lowercasing() {
        let config = Config::builder().locale(Locale::None).build().unwrap();
        assert_eq!(config.tokenize("DoG"), vec!["DoG"]);
    }

    #[test]
    fn default_locale_lowercases() {
        let config = Config::default();
        assert_eq!(config.tokenize("DoG"), vec!["dog"]);
    }

    #[test]
    fn invalid_token_split_is_rejected_at_build() {
        let err = Config::builder()
            .token_split("[unterminated")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTokenSplit { .. }));
    }
}
