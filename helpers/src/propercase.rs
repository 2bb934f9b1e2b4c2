use once_cell::sync::Lazy;
use regex::Regex;

use crate::roman::roman_to_number;

static LEADING_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[\s.,:;!?@#$%^&*()\-—=+<>'"\[\]{}|\\/]+"#).unwrap());

static TRAILING_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\s.,:;!?@#$%^&*()\-—=+<>'"\[\]{}|\\/]+$"#).unwrap());

static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static SPACES_OR_DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-]+").unwrap());

const SMALL_WORDS: &str = "a an the some with at from into upon of to in for on by over but up out down \
    off or and not that but as than then so nor yet amid atop onto per se versus via vice vis-a-vis vis-à-vis";

const PREFER_LOWERCASE: &str = "av af da dal del der di la le van von der den vel";

const ALWAYS_LOWERCASE: &str = "van von der i.e. e.g.";

const ABBREVIATIONS: &str = "id tv url faq q&a atm tba rip p.s. esl efl diy iq gmo pc pr sos pow ad bc ce \
    bce md hr efl elt esl ba ma bsc msc cc bcc lgbt edm lol omg rsvp vip tl;dr dc ceo cmo cfo evp svp vp md pa";

const FIXES: &[(&str, &str)] = &[("phd", "PhD"), ("ph.d.", "Ph.D.")];

/// Word lists and switches driving [`propercase_with`]
///
/// Lists are matched against the lowercased word.
#[derive(Debug, Clone, PartialEq)]
pub struct PropercaseOptions {
    /// Join words with `-` instead of a space, and split on dashes too
    pub dash_separated: bool,
    /// Keep words that look like urls or paths intact
    pub keep_urls: bool,
    /// Uppercase words that parse as roman numerals
    pub handle_romans: bool,
    /// Words that are kept exactly as written
    pub preserve: Vec<String>,
    pub small_words: Vec<String>,
    pub prefer_lowercase: Vec<String>,
    /// Lowercased everywhere but at the start of a sentence
    pub always_lowercase: Vec<String>,
    /// Uppercased, plural and possessive forms included (`CEOs`, `CEO's`)
    pub abbreviations: Vec<String>,
    /// Fixed spellings keyed by lowercased word
    pub fixes: Vec<(String, String)>,
}

impl Default for PropercaseOptions {
    fn default() -> Self {
        let owned = |list: &str| list.split_whitespace().map(str::to_string).collect();

        Self {
            dash_separated: false,
            keep_urls: true,
            handle_romans: true,
            preserve: vec![],
            small_words: owned(SMALL_WORDS),
            prefer_lowercase: owned(PREFER_LOWERCASE),
            always_lowercase: owned(ALWAYS_LOWERCASE),
            abbreviations: owned(ABBREVIATIONS),
            fixes: FIXES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }
}

impl PropercaseOptions {
    fn contains(list: &[String], word: &str) -> bool {
        list.iter().any(|item| item == word)
    }

    fn is_abbreviation(&self, lowercase: &str) -> bool {
        if Self::contains(&self.abbreviations, lowercase) {
            return true;
        }

        ["'s", "s", "'"].iter().any(|suffix| {
            lowercase
                .strip_suffix(suffix)
                .is_some_and(|base| Self::contains(&self.abbreviations, base))
        })
    }

    fn fix(&self, lowercase: &str) -> Option<&str> {
        self.fixes
            .iter()
            .find(|(from, _)| from == lowercase)
            .map(|(_, to)| to.as_str())
    }
}

/// Title case `input` with the default word lists
///
/// ```
/// assert_eq!("Nothing to Be Afraid Of", helpers::propercase("nothing to be afraid of"));
/// ```
pub fn propercase(input: &str) -> String {
    propercase_with(input, &PropercaseOptions::default())
}

/// Title case `input`
///
/// Small words stay lowercase unless they start or end a sentence or follow
/// a colon. Abbreviations and roman numerals are uppercased. Words containing
/// a dot, `//` or `\` are left alone when `keep_urls` is set.
pub fn propercase_with(input: &str, options: &PropercaseOptions) -> String {
    let (splitter, separator) = if options.dash_separated {
        (&*SPACES_OR_DASHES, "-")
    } else {
        (&*SPACES, " ")
    };

    let words: Vec<&str> = splitter
        .split(input)
        .filter(|word| !word.is_empty())
        .collect();

    let mut parts = Vec::with_capacity(words.len());
    let mut is_first_word: Option<bool> = None;
    let mut is_last_word = false;
    let mut after_colon = false;

    for (index, input_word) in words.iter().enumerate() {
        let core_start = LEADING_PUNCTUATION
            .find(input_word)
            .map(|found| found.end())
            .unwrap_or(0);
        let rest = &input_word[core_start..];
        let core_end = TRAILING_PUNCTUATION
            .find(rest)
            .map(|found| found.start())
            .unwrap_or(rest.len());
        let word = &rest[..core_end];

        if word.is_empty() {
            parts.push(input_word.to_string());
            continue;
        }

        let first = match is_first_word {
            None => true,
            Some(_) => is_last_word,
        };
        is_first_word = Some(first);
        is_last_word = input_word.ends_with('.') || index == words.len() - 1;

        let lowercase = word.to_lowercase();
        let at_edge = first || is_last_word || after_colon;

        let cased = if !at_edge
            && (PropercaseOptions::contains(&options.small_words, &lowercase)
                || PropercaseOptions::contains(&options.prefer_lowercase, &lowercase))
        {
            lowercase.clone()
        } else if !first && PropercaseOptions::contains(&options.always_lowercase, &lowercase) {
            lowercase.clone()
        } else if options.is_abbreviation(&lowercase) {
            uppercase_abbreviation(word, &lowercase, options)
        } else if options.handle_romans && roman_to_number(word).is_some() {
            word.to_uppercase()
        } else if PropercaseOptions::contains(&options.preserve, &lowercase) {
            word.to_string()
        } else if options.keep_urls && looks_like_path(word) {
            word.to_string()
        } else if let Some(fixed) = options.fix(&lowercase) {
            fixed.to_string()
        } else {
            capitalize(&lowercase)
        };

        after_colon = input_word.ends_with(':') || input_word.ends_with(';');

        let mut output = String::with_capacity(input_word.len());
        output.push_str(&input_word[..core_start]);
        output.push_str(&cased);
        output.push_str(&rest[core_end..]);
        parts.push(output);
    }

    parts.join(separator)
}

fn uppercase_abbreviation(word: &str, lowercase: &str, options: &PropercaseOptions) -> String {
    // plural form keeps its lowercase "s"
    if !PropercaseOptions::contains(&options.abbreviations, lowercase) && lowercase.ends_with('s')
    {
        let (stem, suffix) = word.split_at(word.len() - 1);
        return format!("{}{}", stem.to_uppercase(), suffix.to_lowercase());
    }

    word.to_uppercase()
}

fn looks_like_path(word: &str) -> bool {
    word.contains('.') || word.contains("//") || word.contains('\\')
}

fn capitalize(lowercase: &str) -> String {
    let mut chars = lowercase.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
