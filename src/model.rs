use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static TITLE_WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z]{3,}\b").expect("Invalid title word regex pattern"));

/// One input document as handed over by the extraction collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub citekey: String,
    #[serde(default)]
    pub raw_text: String,
    #[serde(default)]
    pub reference_block: String,
}

/// Identity of a paper without its text, as carried in results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperInfo {
    pub title: String,
    pub authors: Vec<String>,
    pub year: Option<i32>,
    pub citekey: String,
}

/// Builder for Paper; fills in a citekey when none is given.
pub struct PaperBuilder {
    title: String,
    authors: Vec<String>,
    year: Option<i32>,
    citekey: Option<String>,
    raw_text: String,
    reference_block: String,
}

impl PaperBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors: Vec::new(),
            year: None,
            citekey: None,
            raw_text: String::new(),
            reference_block: String::new(),
        }
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors.extend(authors.into_iter().map(Into::into));
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn citekey(mut self, citekey: impl Into<String>) -> Self {
        self.citekey = Some(citekey.into());
        self
    }

    pub fn raw_text(mut self, text: impl Into<String>) -> Self {
        self.raw_text = text.into();
        self
    }

    pub fn reference_block(mut self, block: impl Into<String>) -> Self {
        self.reference_block = block.into();
        self
    }

    pub fn build(self) -> Paper {
        let mut paper = Paper {
            title: self.title,
            authors: self.authors,
            year: self.year,
            citekey: self.citekey.unwrap_or_default(),
            raw_text: self.raw_text,
            reference_block: self.reference_block,
        };
        paper.ensure_citekey();
        paper
    }
}

impl Paper {
    pub fn builder(title: impl Into<String>) -> PaperBuilder {
        PaperBuilder::new(title)
    }

    /// Generate a citekey if the input did not carry one.
    pub fn ensure_citekey(&mut self) {
        if self.citekey.trim().is_empty() {
            let first_author = self.authors.first().map(String::as_str).unwrap_or("");
            self.citekey = generate_citekey(first_author, self.year, &self.title);
        }
    }

    pub fn info(&self) -> PaperInfo {
        PaperInfo {
            title: self.title.clone(),
            authors: self.authors.clone(),
            year: self.year,
            citekey: self.citekey.clone(),
        }
    }
}

/// `authorYEARkeyword`, e.g. `smith2020protein`.
pub fn generate_citekey(first_author: &str, year: Option<i32>, title: &str) -> String {
    let last_name = if first_author.contains(',') {
        first_author.split(',').next().unwrap_or("").trim()
    } else {
        first_author.split_whitespace().last().unwrap_or("")
    };

    let mut author: String = last_name
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_lowercase();
    if author.is_empty() {
        author = "unknown".to_string();
    }

    let year = year.map(|y| y.to_string()).unwrap_or_else(|| "unknown".to_string());

    let lowered = title.to_lowercase();
    let keyword = TITLE_WORD_REGEX
        .find(&lowered)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "paper".to_string());

    format!("{}{}{}", author, year, keyword)
}
