//! Text processing and normalization

use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

pub struct TextProcessor {
    whitespace_regex: Regex,
    punctuation_regex: Regex,
    digit_regex: Regex,
    token_regex: Regex,
    clause_regex: Regex,
    function_words: HashSet<&'static str>,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");
        let punctuation_regex = Regex::new(r"[^\w\s]").expect("Invalid punctuation regex");
        let digit_regex = Regex::new(r"\d+").expect("Invalid digit regex");

        // Keeps "node.js", "c++" and "c#" whole; hyphens split ("python-based") and trailing dots are dropped
        let token_regex = Regex::new(r"\w+(?:[.']\w+)*[+#]*").expect("Invalid token regex");

        let clause_regex = Regex::new(r"[,;:()\[\]{}/|\u{2022}\n\r\t!?]+").expect("Invalid clause regex");

        Self {
            whitespace_regex,
            punctuation_regex,
            digit_regex,
            token_regex,
            clause_regex,
            function_words: Self::create_function_words(),
        }
    }

    /// Lowercase, collapse whitespace, strip punctuation and digits, trim
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let collapsed = self.whitespace_regex.replace_all(lowered.trim(), " ");
        let no_punct = self.punctuation_regex.replace_all(&collapsed, "");
        let no_digits = self.digit_regex.replace_all(&no_punct, "");

        no_digits.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Lowercased tokens, skill-shaped words ("node.js", "c#") kept intact
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.token_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Split text into phrase chunks: runs of content words between
    /// punctuation and function words, each joined by single spaces
    pub fn phrase_chunks(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut chunks = Vec::new();

        for sentence in lowered.unicode_sentences() {
            for clause in self.clause_regex.split(sentence) {
                let mut current: Vec<String> = Vec::new();

                for token in self.tokenize(clause) {
                    if self.function_words.contains(token.as_str()) {
                        if !current.is_empty() {
                            chunks.push(current.join(" "));
                            current.clear();
                        }
                    } else {
                        current.push(token);
                    }
                }

                if !current.is_empty() {
                    chunks.push(current.join(" "));
                }
            }
        }

        chunks
    }

    pub fn is_function_word(&self, word: &str) -> bool {
        self.function_words.contains(word)
    }

    fn create_function_words() -> HashSet<&'static str> {
        [
            // determiners
            "a", "an", "the", "this", "that", "these", "those", "some", "any", "each",
            "every", "all", "no", "our", "your", "their", "its", "my", "his", "her",
            // prepositions
            "in", "on", "at", "by", "for", "from", "of", "to", "with", "within",
            "without", "into", "onto", "over", "under", "about", "across", "through",
            "during", "including", "via", "as", "like",
            // conjunctions
            "and", "or", "but", "nor", "so", "yet", "while", "whereas", "if",
            // pronouns
            "i", "we", "you", "he", "she", "it", "they", "me", "us", "them",
            "who", "which", "what",
            // auxiliaries
            "is", "are", "was", "were", "be", "been", "being", "am", "has", "have",
            "had", "do", "does", "did", "will", "would", "should", "can", "could",
            "must", "may", "might",
        ]
        .into_iter()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_digits() {
        let processor = TextProcessor::new();
        let text = "  Senior  Python\tDeveloper, 5+ years!\nNode.js & C++  ";

        assert_eq!(processor.normalize(text), "senior python developer years nodejs c");
    }

    #[test]
    fn test_normalize_empty() {
        let processor = TextProcessor::new();
        assert_eq!(processor.normalize(""), "");
        assert_eq!(processor.normalize(" 123 ... "), "");
    }

    #[test]
    fn test_tokenize_keeps_skill_shapes() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("Skilled in React, Node.js, C++ and C#. Ends here.");

        assert!(tokens.contains(&"react".to_string()));
        assert!(tokens.contains(&"node.js".to_string()));
        assert!(tokens.contains(&"c++".to_string()));
        assert!(tokens.contains(&"c#".to_string()));
        assert!(tokens.contains(&"here".to_string()));
        assert!(!tokens.iter().any(|t| t.ends_with('.')));
    }

    #[test]
    fn test_tokenize_splits_hyphenated_words() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("Python-based services, AWS-hosted");

        assert_eq!(tokens, vec!["python", "based", "services", "aws", "hosted"]);
    }

    #[test]
    fn test_phrase_chunks_split_on_function_words() {
        let processor = TextProcessor::new();
        let chunks = processor.phrase_chunks("Experience with machine learning and deep learning, plus Spring Boot.");

        assert_eq!(
            chunks,
            vec!["experience", "machine learning", "deep learning", "plus spring boot"]
        );
    }

    #[test]
    fn test_function_word_lookup() {
        let processor = TextProcessor::new();
        assert!(processor.is_function_word("with"));
        assert!(!processor.is_function_word("python"));
    }
}
