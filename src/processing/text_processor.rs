//! Tokenization, stop words, and candidate phrase generation

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;

/// Common English stop words, excluded from keyphrases and frequency counts
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against",
    "all", "almost", "alone", "along", "already", "also", "although", "always",
    "am", "among", "amongst", "an", "and", "another", "any", "anyhow", "anyone",
    "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be",
    "became", "because", "become", "becomes", "becoming", "been", "before",
    "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "both", "but", "by", "can", "cannot", "could", "did", "do", "does",
    "doing", "done", "down", "due", "during", "each", "eg", "either", "else",
    "elsewhere", "enough", "etc", "even", "ever", "every", "everyone",
    "everything", "everywhere", "except", "few", "first", "for", "former",
    "formerly", "from", "further", "get", "give", "had", "has", "have", "having",
    "he", "hence", "her", "here", "hereafter", "hereby", "herein", "hers",
    "herself", "him", "himself", "his", "how", "however", "ie", "if", "in",
    "indeed", "into", "is", "it", "its", "itself", "just", "keep", "last",
    "latter", "least", "less", "made", "make", "many", "may", "me", "meanwhile",
    "might", "more", "moreover", "most", "mostly", "much", "must", "my", "myself",
    "namely", "neither", "never", "nevertheless", "next", "no", "nobody", "none",
    "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once",
    "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours",
    "ourselves", "out", "over", "own", "per", "perhaps", "please", "put",
    "rather", "re", "same", "see", "seem", "seemed", "seeming", "seems",
    "several", "she", "should", "since", "so", "some", "somehow", "someone",
    "something", "sometime", "sometimes", "somewhere", "still", "such", "than",
    "that", "the", "their", "theirs", "them", "themselves", "then", "thence",
    "there", "thereafter", "thereby", "therefore", "therein", "thereupon",
    "these", "they", "this", "those", "though", "through", "throughout", "thru",
    "thus", "to", "together", "too", "toward", "towards", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever",
    "when", "whence", "whenever", "where", "whereafter", "whereas", "whereby",
    "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
    "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within",
    "without", "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

static STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

static ALPHABETIC_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]{3,}").expect("Invalid alphabetic run regex"));

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

#[derive(Debug, Clone, Default)]
pub struct TextProcessor;

impl TextProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Lowercased words of at least two characters that contain a letter
    pub fn words(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(str::to_lowercase)
            .filter(|word| word.chars().count() > 1 && word.chars().any(char::is_alphabetic))
            .collect()
    }

    /// Split text into sentences
    pub fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Distinct n-grams of `min_ngram..=max_ngram` words, first-seen order.
    ///
    /// N-grams never cross a sentence boundary and never contain a stop word.
    /// At most `limit` candidates are returned.
    pub fn candidate_phrases(
        &self,
        text: &str,
        min_ngram: usize,
        max_ngram: usize,
        limit: usize,
    ) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for sentence in self.split_sentences(text) {
            let words = self.words(sentence);

            // contiguous stop-word-free runs
            for run in words.split(|word| is_stop_word(word)) {
                for start in 0..run.len() {
                    for n in min_ngram..=max_ngram {
                        if start + n > run.len() {
                            break;
                        }
                        let phrase = run[start..start + n].join(" ");
                        if seen.insert(phrase.clone()) {
                            candidates.push(phrase);
                            if candidates.len() >= limit {
                                return candidates;
                            }
                        }
                    }
                }
            }
        }

        candidates
    }

    /// Lowercased alphabetic runs of three or more letters, stop words removed.
    ///
    /// Runs are maximal ASCII letter sequences, so digits and punctuation
    /// split them: "Python3" yields "python".
    pub fn alphabetic_tokens(&self, text: &str) -> Vec<String> {
        ALPHABETIC_RUN
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .filter(|token| !is_stop_word(token))
            .collect()
    }
}
