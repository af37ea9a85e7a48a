//! Keyword normalization through synonym folding

use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Canonical keyword -> synonyms that fold into it.
///
/// Synonym sets are expected to be disjoint across canonical entries. Overlaps
/// are a configuration mistake and are not detected; the canonical keyword
/// that sorts last alphabetically wins the contested synonym.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynonymTable {
    groups: BTreeMap<String, BTreeSet<String>>,
}

impl SynonymTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add synonyms to a canonical keyword, creating the group if needed
    pub fn insert<I, S>(&mut self, canonical: &str, synonyms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let group = self.groups.entry(fold(canonical)).or_default();
        group.extend(synonyms.into_iter().map(|s| fold(s.as_ref())));
    }

    /// Merge extra groups, e.g. from the `[synonyms]` config section
    pub fn merged_with(mut self, extra: &BTreeMap<String, Vec<String>>) -> Self {
        for (canonical, synonyms) in extra {
            self.insert(canonical, synonyms);
        }
        self
    }

    pub fn groups(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Built-in technology and soft-skill synonym groups
    pub fn builtin() -> Self {
        let mut table = Self::new();

        // Programming languages
        table.insert("javascript", ["js", "java script", "ecmascript"]);
        table.insert("typescript", ["ts"]);
        table.insert("python", ["py", "python3", "python 3"]);
        table.insert("golang", ["go", "go lang"]);
        table.insert("c++", ["cpp", "c plus plus"]);
        table.insert("csharp", ["c#", "c sharp"]);

        // Frameworks and platforms
        table.insert("node.js", ["node", "nodejs", "node js"]);
        table.insert("react", ["reactjs", "react.js", "react js"]);
        table.insert("vue", ["vuejs", "vue.js"]);
        table.insert("kubernetes", ["k8s", "kube"]);
        table.insert("postgresql", ["postgres", "psql", "postgre sql"]);
        table.insert("amazon web services", ["aws"]);
        table.insert("google cloud platform", ["gcp", "google cloud"]);
        table.insert("microsoft azure", ["azure"]);
        table.insert("rest api", ["rest apis", "restful api", "restful apis", "restful"]);
        table.insert("sql", ["structured query language"]);
        table.insert("ci/cd", ["cicd", "continuous integration", "continuous delivery", "continuous deployment"]);
        table.insert("devops", ["dev ops"]);

        // Data and AI
        table.insert("machine learning", ["ml"]);
        table.insert("artificial intelligence", ["ai"]);
        table.insert("deep learning", ["dl"]);
        table.insert("natural language processing", ["nlp"]);

        // Design
        table.insert("user experience", ["ux", "ux design"]);
        table.insert("user interface", ["ui", "ui design"]);

        // Soft skills
        table.insert("leadership", ["team leadership", "people leadership", "leading teams"]);
        table.insert("communication", ["communication skills", "verbal communication", "written communication"]);
        table.insert("problem solving", ["problem-solving", "troubleshooting"]);
        table.insert("teamwork", ["team player", "collaboration"]);
        table.insert("project management", ["managing projects", "project planning"]);

        table
    }
}

/// Folds raw keywords to their canonical form.
#[derive(Debug, Clone)]
pub struct KeywordNormalizer {
    // synonym or canonical -> canonical
    index: HashMap<String, String>,
}

impl KeywordNormalizer {
    pub fn new(table: &SynonymTable) -> Self {
        let mut index = HashMap::new();

        for canonical in table.groups.keys() {
            index.insert(canonical.clone(), canonical.clone());
        }
        for (canonical, synonyms) in table.groups() {
            for synonym in synonyms {
                index.insert(synonym.clone(), canonical.clone());
            }
        }

        Self { index }
    }

    /// Lowercase, trim, and map synonyms onto their canonical keyword
    pub fn normalize(&self, raw: &str) -> String {
        let folded = fold(raw);
        match self.index.get(&folded) {
            Some(canonical) => canonical.clone(),
            None => folded,
        }
    }

    pub fn is_canonical(&self, keyword: &str) -> bool {
        self.index.get(keyword).is_some_and(|canonical| canonical == keyword)
    }
}

impl Default for KeywordNormalizer {
    fn default() -> Self {
        Self::new(&SynonymTable::builtin())
    }
}

/// Lowercase and collapse whitespace runs to single spaces
fn fold(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_synonym_folds_to_its_canonical() {
        let table = SynonymTable::builtin();
        let normalizer = KeywordNormalizer::new(&table);

        for (canonical, synonyms) in table.groups() {
            assert_eq!(&normalizer.normalize(canonical), canonical);
            for synonym in synonyms {
                assert_eq!(&normalizer.normalize(synonym), canonical, "synonym {}", synonym);
            }
        }
    }

    #[test]
    fn test_builtin_synonym_sets_are_disjoint() {
        let table = SynonymTable::builtin();
        let mut owner: HashMap<&String, &String> = HashMap::new();

        for (canonical, synonyms) in table.groups() {
            for synonym in synonyms {
                assert!(owner.insert(synonym, canonical).is_none(), "{} listed twice", synonym);
                assert!(table.groups.get(synonym).is_none(), "{} is also canonical", synonym);
            }
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let normalizer = KeywordNormalizer::default();
        let inputs = ["  JS ", "Machine   Learning", "K8S", "Rust", "", "  ", "Team Leadership", "c#"];

        for input in inputs {
            let once = normalizer.normalize(input);
            assert_eq!(normalizer.normalize(&once), once, "input {:?}", input);
        }
    }

    #[test]
    fn test_unknown_keyword_is_lowercased_and_trimmed() {
        let normalizer = KeywordNormalizer::default();
        assert_eq!(normalizer.normalize("  Terraform  "), "terraform");
        assert_eq!(normalizer.normalize("Distributed\tSystems"), "distributed systems");
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let normalizer = KeywordNormalizer::default();
        assert_eq!(normalizer.normalize("JavaScript"), "javascript");
        assert_eq!(normalizer.normalize("AWS"), "amazon web services");
        assert_eq!(normalizer.normalize("Go"), "golang");
        assert!(normalizer.is_canonical("python"));
        assert!(!normalizer.is_canonical("py"));
    }

    #[test]
    fn test_injected_table_replaces_builtin() {
        let mut table = SynonymTable::new();
        table.insert("Rust", ["rustlang", "Rust Lang"]);
        let normalizer = KeywordNormalizer::new(&table);

        assert_eq!(normalizer.normalize("RustLang"), "rust");
        assert_eq!(normalizer.normalize("rust lang"), "rust");
        assert_eq!(normalizer.normalize("js"), "js");
    }

    #[test]
    fn test_contested_synonym_goes_to_last_sorted_canonical() {
        let mut table = SynonymTable::new();
        table.insert("zookeeper", ["zk"]);
        table.insert("azkaban", ["zk"]);
        let normalizer = KeywordNormalizer::new(&table);

        assert_eq!(normalizer.normalize("zk"), "zookeeper");
    }

    #[test]
    fn test_merge_extends_existing_group() {
        let mut extra = BTreeMap::new();
        extra.insert("python".to_string(), vec!["cpython".to_string()]);
        extra.insert("rust".to_string(), vec!["rustlang".to_string()]);

        let table = SynonymTable::builtin().merged_with(&extra);
        let normalizer = KeywordNormalizer::new(&table);

        assert_eq!(normalizer.normalize("cpython"), "python");
        assert_eq!(normalizer.normalize("py"), "python");
        assert_eq!(normalizer.normalize("rustlang"), "rust");
    }
}
