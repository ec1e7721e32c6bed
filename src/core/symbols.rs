//! Ticker symbol heuristics over raw OCR text.
//!
//! Five independent passes surface candidate tokens in priority order. The
//! candidates are merged into an ordered set, filtered against stop words,
//! and finally intersected with the target list in its canonical order.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_TARGETS: [&str; 10] = [
    "BYND", "SPY", "QQQ", "DJT", "TSLA", "NVDA", "RGTI", "OPEN", "INTC", "BMNR",
];

pub const DEFAULT_STOP_WORDS: [&str; 27] = [
    "RANK", "SYMBOL", "MOST", "ACTIVE", "TRENDING", "NEWS", "VIEW", "TOP", "WITH", "MESSAGES",
    "FEED", "SEARCH", "HOME", "PROFILE", "CHAT", "IDEAS", "WATCH", "CORP", "INC", "LLC", "LTD",
    "THE", "AND", "FOR", "ARE", "BUT", "NOT",
];

pub const DEFAULT_FORBIDDEN_SUBSTRINGS: [&str; 4] = ["STOCK", "TWIT", "MOST", "ACT"];

/// OCR 無法執行時回傳的範例清單
pub const DEFAULT_SAMPLE_FALLBACK: [&str; 15] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "TSLA", "NVDA", "META", "NFLX", "SPY", "QQQ", "AMD", "BABA",
    "DIS", "V", "JPM",
];

const MIN_SYMBOL_LEN: usize = 2;
const MAX_SYMBOL_LEN: usize = 5;

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolRules {
    /// 目標代號，順序即為輸出順序
    pub targets: Vec<String>,
    pub stop_words: Vec<String>,
    pub forbidden_substrings: Vec<String>,
    pub sample_fallback: Vec<String>,
}

impl Default for SymbolRules {
    fn default() -> Self {
        Self {
            targets: to_owned_list(&DEFAULT_TARGETS),
            stop_words: to_owned_list(&DEFAULT_STOP_WORDS),
            forbidden_substrings: to_owned_list(&DEFAULT_FORBIDDEN_SUBSTRINGS),
            sample_fallback: to_owned_list(&DEFAULT_SAMPLE_FALLBACK),
        }
    }
}

impl SymbolRules {
    pub fn with_targets<I, T>(targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn is_target(&self, token: &str) -> bool {
        self.targets.iter().any(|t| t == token)
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.iter().any(|w| w == token)
    }

    /// 非目標代號的篩選規則
    pub fn is_plausible_symbol(&self, token: &str) -> bool {
        !self.is_stop_word(token)
            && !self
                .forbidden_substrings
                .iter()
                .any(|fragment| token.contains(fragment.as_str()))
            && (MIN_SYMBOL_LEN..=MAX_SYMBOL_LEN).contains(&token.len())
            && token.chars().all(|c| c.is_ascii_uppercase())
    }
}

/// Extraction passes, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPass {
    Ranked,
    Company,
    Percentage,
    Partial,
    Standalone,
}

impl MatchPass {
    pub const PRIORITY: [MatchPass; 5] = [
        MatchPass::Ranked,
        MatchPass::Company,
        MatchPass::Percentage,
        MatchPass::Partial,
        MatchPass::Standalone,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MatchPass::Ranked => "ranked",
            MatchPass::Company => "company",
            MatchPass::Percentage => "percentage",
            MatchPass::Partial => "partial",
            MatchPass::Standalone => "standalone",
        }
    }

    pub fn run(&self, text: &str, rules: &SymbolRules) -> Vec<String> {
        match self {
            MatchPass::Ranked => ranked_matches(text),
            MatchPass::Company => company_matches(text),
            MatchPass::Percentage => percentage_matches(text),
            MatchPass::Partial => partial_matches(text, rules),
            MatchPass::Standalone => standalone_matches(text),
        }
    }
}

lazy_static::lazy_static! {
    // 排名清單: "1 BYND"
    static ref RANKED_RE: Regex = Regex::new(r"(\d+)\s+([A-Z]{2,5})\b").unwrap();
    // 代號後接公司名稱: "TSLA Tesla"
    static ref COMPANY_RE: Regex = Regex::new(r"\b([A-Z]{2,5})\s+[A-Z][a-z]+").unwrap();
    // 代號後接漲跌幅: "NVDA ↑ 3.2%"
    static ref PERCENTAGE_RE: Regex =
        Regex::new(r"(?i)\b([A-Z]{2,5})\s*[↑↓⬆⬇]?\s*[\d.]+%").unwrap();
    static ref STANDALONE_RE: Regex = Regex::new(r"\b([A-Z]{2,5})\b").unwrap();
    static ref UPPERCASE_RUN_RE: Regex = Regex::new(r"[A-Z]+").unwrap();
}

pub fn ranked_matches(text: &str) -> Vec<String> {
    RANKED_RE
        .captures_iter(text)
        .map(|caps| {
            tracing::debug!("Found ranked stock: #{} {}", &caps[1], &caps[2]);
            caps[2].to_string()
        })
        .collect()
}

pub fn company_matches(text: &str) -> Vec<String> {
    COMPANY_RE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

pub fn percentage_matches(text: &str) -> Vec<String> {
    PERCENTAGE_RE
        .captures_iter(text)
        .map(|caps| caps[1].to_uppercase())
        .collect()
}

pub fn standalone_matches(text: &str) -> Vec<String> {
    STANDALONE_RE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// 補償 OCR 辨識錯誤: 每個目標最多回報一次，回報的是目標本身而非誤讀的字串
pub fn partial_matches(text: &str, rules: &SymbolRules) -> Vec<String> {
    let runs: Vec<&str> = UPPERCASE_RUN_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|run| !rules.is_stop_word(run))
        .collect();

    let mut found = Vec::new();
    for target in &rules.targets {
        let hit = runs
            .iter()
            .find(|run| resembles_target(run, target) || contains_glued_target(run, target));
        if let Some(run) = hit {
            tracing::debug!("✓ Found partial match for {}: '{}'", target, run);
            found.push(target.clone());
        }
    }
    found
}

fn mismatch_count(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

/// A run resembles `target` when it shares the first two letters, is at least
/// as long as the target's three-letter prefix, carries at most one extra
/// letter, and differs from the target in at most one overlapping position.
fn resembles_target(run: &str, target: &str) -> bool {
    let lead = target.len().min(2);
    let min_len = target.len().min(3);
    let max_len = target.len() + 1;

    if run.len() < min_len
        || run.len() > max_len
        || run.as_bytes()[..lead] != target.as_bytes()[..lead]
    {
        return false;
    }

    mismatch_count(run.as_bytes(), target.as_bytes()) <= 1
}

/// OCR 常把代號和公司名稱黏在一起 (例如 "NVDANVIDIA")。
/// 長字串內的片段必須完整包含目標的前三個字母，其餘最多一個字母不同
fn contains_glued_target(run: &str, target: &str) -> bool {
    let (bytes, wanted) = (run.as_bytes(), target.as_bytes());
    let anchor = &wanted[..wanted.len().min(3)];
    if anchor.is_empty() || bytes.len() <= wanted.len() + 1 {
        return false;
    }

    (0..bytes.len())
        .filter(|&start| bytes[start..].starts_with(anchor))
        .any(|start| {
            let window = &bytes[start..bytes.len().min(start + wanted.len())];
            mismatch_count(window, wanted) <= 1
        })
}

/// Priority-ordered set of candidate tokens; the first insertion wins.
#[derive(Debug, Default, Clone)]
pub struct CandidateSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: String) -> bool {
        if self.seen.contains(&token) {
            return false;
        }
        self.seen.insert(token.clone());
        self.order.push(token);
        true
    }

    pub fn contains(&self, token: &str) -> bool {
        self.seen.contains(token)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl Extend<String> for CandidateSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for token in iter {
            self.insert(token);
        }
    }
}

pub fn collect_candidates(text: &str, rules: &SymbolRules) -> CandidateSet {
    let mut candidates = CandidateSet::new();
    for pass in MatchPass::PRIORITY {
        let tokens = pass.run(text, rules);
        for token in &tokens {
            if rules.is_target(token) {
                tracing::debug!("✓ Found target stock via {} pass: {}", pass.label(), token);
            }
        }
        candidates.extend(tokens);
    }
    candidates
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolMatch {
    /// 目標代號，依目標清單順序
    pub symbols: Vec<String>,
    pub additional: Vec<String>,
    pub missing: Vec<String>,
}

pub fn extract_stock_symbols(text: &str, rules: &SymbolRules) -> SymbolMatch {
    tracing::debug!("Full OCR text length: {} characters", text.chars().count());

    let candidates = collect_candidates(text, rules);
    tracing::debug!(
        "Raw potential stocks found: {:?}",
        candidates.iter().collect::<Vec<_>>()
    );

    let mut filtered = CandidateSet::new();
    for token in candidates.iter().filter(|t| rules.is_target(t)) {
        filtered.insert(token.to_string());
    }

    let mut additional = Vec::new();
    for token in candidates.iter().filter(|t| !rules.is_target(t)) {
        if rules.is_plausible_symbol(token) && filtered.insert(token.to_string()) {
            tracing::debug!("+ Added additional stock: {}", token);
            additional.push(token.to_string());
        }
    }

    let mut confirmed = CandidateSet::new();
    let mut missing = Vec::new();
    for target in &rules.targets {
        if filtered.contains(target) {
            confirmed.insert(target.clone());
        } else if !missing.contains(target) {
            missing.push(target.clone());
        }
    }
    let symbols: Vec<String> = confirmed.iter().map(str::to_string).collect();

    if !missing.is_empty() {
        tracing::warn!("⚠️  Missing stocks (may need better scrolling): {:?}", missing);
    }
    tracing::info!(
        "✅ Found {}/{} target stocks: {:?}",
        symbols.len(),
        rules.targets.len(),
        symbols
    );

    SymbolMatch {
        symbols,
        additional,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_pass() {
        assert_eq!(
            ranked_matches("1 BYND 2 SPY 3 QQQ"),
            vec!["BYND", "SPY", "QQQ"]
        );
        assert!(ranked_matches("BYND SPY").is_empty());
    }

    #[test]
    fn test_company_pass() {
        assert_eq!(company_matches("TSLA Tesla Inc"), vec!["TSLA"]);
        assert!(company_matches("TSLA tesla").is_empty());
    }

    #[test]
    fn test_percentage_pass_uppercases() {
        assert_eq!(percentage_matches("nvda ↑ 3.25%"), vec!["NVDA"]);
        assert_eq!(percentage_matches("RGTI 12%"), vec!["RGTI"]);
    }

    #[test]
    fn test_partial_pass_recovers_misread_symbol() {
        let rules = SymbolRules::default();
        assert_eq!(partial_matches("QQT", &rules), vec!["QQQ"]);
        assert_eq!(partial_matches("QQQT", &rules), vec!["QQQ"]);
    }

    #[test]
    fn test_partial_pass_requires_two_leading_letters() {
        let rules = SymbolRules::with_targets(["QQQ"]);
        assert!(partial_matches("QTQ", &rules).is_empty());
        assert!(partial_matches("XQQ", &rules).is_empty());
    }

    #[test]
    fn test_partial_pass_ignores_stop_words() {
        // "INC" 與 INTC 只差一個字母，但它是停用字
        let rules = SymbolRules::with_targets(["INTC"]);
        assert!(partial_matches("ACME INC", &rules).is_empty());
    }

    #[test]
    fn test_partial_pass_finds_symbol_glued_to_company_name() {
        let rules = SymbolRules::default();
        assert_eq!(partial_matches("NVDANVIDIA", &rules), vec!["NVDA"]);
        assert_eq!(partial_matches("INTCINTEL CORP", &rules), vec!["INTC"]);
    }

    #[test]
    fn test_glued_runs_need_the_full_three_letter_anchor() {
        let rules = SymbolRules::default();
        // "ING" 只有 INTC 的前兩個字母，"SPE" 不是 SPY
        assert!(partial_matches("TRENDING", &rules).is_empty());
        assert!(partial_matches("SPECIALS", &rules).is_empty());
        assert!(!contains_glued_target("NVDAN", "NVDA"));
        assert!(contains_glued_target("XXNVDBXX", "NVDA"));
    }

    #[test]
    fn test_resembles_target() {
        assert!(resembles_target("BYND", "BYND"));
        assert!(resembles_target("BYN", "BYND"));
        assert!(resembles_target("BYNDS", "BYND"));
        assert!(!resembles_target("BYNDSX", "BYND"));
        assert!(!resembles_target("BY", "BYND"));
        assert!(!resembles_target("BXXD", "BYND"));
    }

    #[test]
    fn test_candidate_set_keeps_first_occurrence() {
        let mut set = CandidateSet::new();
        assert!(set.insert("SPY".into()));
        assert!(set.insert("QQQ".into()));
        assert!(!set.insert("SPY".into()));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["SPY", "QQQ"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_candidates_follow_pass_priority() {
        let rules = SymbolRules::with_targets(["SPY"]);
        let candidates = collect_candidates("ABC Alpha 7 XYZ", &rules);
        // ranked 先於 company
        assert_eq!(candidates.iter().collect::<Vec<_>>(), vec!["XYZ", "ABC"]);
    }

    #[test]
    fn test_plausible_symbol_filter() {
        let rules = SymbolRules::default();
        assert!(rules.is_plausible_symbol("AMD"));
        assert!(!rules.is_plausible_symbol("RANK"));
        assert!(!rules.is_plausible_symbol("FACT"));
        assert!(!rules.is_plausible_symbol("A"));
        assert!(!rules.is_plausible_symbol("ABCDEF"));
    }

    #[test]
    fn test_additional_symbols_are_reported_but_not_returned() {
        let rules = SymbolRules::default();
        let result = extract_stock_symbols("1 SPY 2 AMD 3 RANK", &rules);
        assert_eq!(result.symbols, vec!["SPY"]);
        assert_eq!(result.additional, vec!["AMD"]);
        assert_eq!(result.missing.len(), 9);
        assert!(!result.missing.contains(&"SPY".to_string()));
    }
}
