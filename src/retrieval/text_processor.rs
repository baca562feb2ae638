//! Text cleaning, tokenization and n-gram extraction

use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

pub struct TextProcessor {
    stop_words: HashSet<&'static str>,
    email_regex: Regex,
    phone_regex: Regex,
    url_regex: Regex,
    whitespace_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .expect("Invalid email regex");

        let phone_regex = Regex::new(r"\b(?:\+?1[-. ]?)?\(?[0-9]{3}\)?[-. ]?[0-9]{3}[-. ]?[0-9]{4}\b")
            .expect("Invalid phone regex");

        let url_regex = Regex::new(r"https?://[^\s]+").expect("Invalid URL regex");

        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

        Self {
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
            email_regex,
            phone_regex,
            url_regex,
            whitespace_regex,
        }
    }

    /// Strip contact details and URLs, normalize quotes and whitespace.
    pub fn clean_text(&self, text: &str) -> String {
        let cleaned = self.url_regex.replace_all(text, " ");
        let cleaned = self.email_regex.replace_all(&cleaned, " ");
        let cleaned = self.phone_regex.replace_all(&cleaned, " ");
        let cleaned: String = cleaned
            .chars()
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' => '\'',
                '\u{201C}' | '\u{201D}' => '"',
                '\u{2013}' | '\u{2014}' => '-',
                _ => c,
            })
            .collect();

        self.whitespace_regex.replace_all(&cleaned, " ").trim().to_string()
    }

    /// Lowercased word tokens with stop words, single characters and pure numbers removed.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = self.clean_text(text);
        let mut tokens = Vec::new();

        for word in cleaned.unicode_words() {
            let normalized = word.to_lowercase();

            if normalized.chars().count() > 1
                && !self.is_stop_word(&normalized)
                && normalized.chars().any(|c| c.is_alphabetic())
            {
                tokens.push(normalized);
            }
        }

        tokens
    }

    /// Unigrams through `max_n`-grams over the filtered token stream.
    pub fn terms(&self, text: &str, max_n: usize) -> Vec<String> {
        let tokens = self.tokenize(text);
        let max_n = max_n.max(1);
        let mut terms = tokens.clone();

        for n in 2..=max_n {
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }

        terms
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}

/// Common English function words.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "an",
    "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "becoming",
    "been", "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "both", "but", "by", "can", "cannot", "could", "did", "do", "does", "done", "down",
    "due", "during", "each", "eg", "either", "else", "elsewhere", "enough", "etc", "even",
    "ever", "every", "everyone", "everything", "everywhere", "except", "few", "for", "former",
    "formerly", "from", "further", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hers", "herself", "him", "himself", "his", "how",
    "however", "ie", "if", "in", "indeed", "into", "is", "it", "its", "itself", "just", "last",
    "latter", "least", "less", "many", "may", "me", "meanwhile", "might", "more", "moreover",
    "most", "mostly", "much", "must", "my", "myself", "namely", "neither", "never",
    "nevertheless", "next", "no", "nobody", "none", "nor", "not", "nothing", "now", "nowhere",
    "of", "off", "often", "on", "once", "one", "only", "onto", "or", "other", "others",
    "otherwise", "our", "ours", "ourselves", "out", "over", "own", "per", "perhaps", "please",
    "rather", "re", "same", "seem", "seemed", "seeming", "seems", "several", "she", "should",
    "since", "so", "some", "somehow", "someone", "something", "sometime", "sometimes",
    "somewhere", "still", "such", "than", "that", "the", "their", "them", "themselves", "then",
    "thence", "there", "thereafter", "thereby", "therefore", "therein", "thereupon", "these",
    "they", "this", "those", "though", "through", "throughout", "thru", "thus", "to",
    "together", "too", "toward", "towards", "under", "until", "up", "upon", "us", "very", "via",
    "was", "we", "well", "were", "what", "whatever", "when", "whence", "whenever", "where",
    "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever", "whether", "which",
    "while", "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within",
    "without", "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];
