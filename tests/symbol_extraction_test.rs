use stock_snap::core::report::render_stock_list;
use stock_snap::core::symbols::{extract_stock_symbols, SymbolRules, DEFAULT_TARGETS};
use stock_snap::core::Storage;
use stock_snap::LocalStorage;
use tempfile::TempDir;

fn default_rules() -> SymbolRules {
    SymbolRules::default()
}

fn is_in_target_order(symbols: &[String], targets: &[String]) -> bool {
    let positions: Vec<usize> = symbols
        .iter()
        .map(|s| targets.iter().position(|t| t == s).unwrap())
        .collect();
    positions.windows(2).all(|w| w[0] < w[1])
}

#[test]
fn test_ranked_listing_is_returned_in_target_order() {
    let text = "1 BYND 2 SPY 3 QQQ";
    let result = extract_stock_symbols(text, &default_rules());

    assert_eq!(result.symbols, vec!["BYND", "SPY", "QQQ"]);
    assert!(result.missing.contains(&"TSLA".to_string()));
}

#[test]
fn test_output_order_follows_targets_not_page_order() {
    let text = "NVDA 4.1%\nSPY SPDR S&P 500\nTSLA Tesla Inc\nBYND 12.5%";
    let result = extract_stock_symbols(text, &default_rules());

    assert_eq!(result.symbols, vec!["BYND", "SPY", "TSLA", "NVDA"]);
}

#[test]
fn test_results_are_subset_without_duplicates() {
    let text = "\
        STOCKTWITS MOST ACTIVE\n\
        1 DJT Trump Media 3.4%\n\
        2 DJT DJT DJT\n\
        3 INTC Intel Corp 1.2%\n\
        INTC INTC OPEN Opendoor 7.7%\n\
        RGTI Rigetti ⬆ 22.0%\n";
    let rules = default_rules();
    let result = extract_stock_symbols(text, &rules);

    for symbol in &result.symbols {
        assert!(rules.is_target(symbol), "{} is not a target", symbol);
    }
    let mut deduped = result.symbols.clone();
    deduped.dedup();
    assert_eq!(deduped, result.symbols);
    assert!(is_in_target_order(&result.symbols, &rules.targets));
    assert_eq!(result.symbols, vec!["DJT", "RGTI", "OPEN", "INTC"]);
}

#[test]
fn test_lowercase_text_yields_nothing() {
    let result = extract_stock_symbols("the most active stocks today", &default_rules());
    assert!(result.symbols.is_empty());
    assert_eq!(result.missing.len(), DEFAULT_TARGETS.len());
}

#[test]
fn test_empty_text_yields_nothing() {
    let result = extract_stock_symbols("", &default_rules());
    assert!(result.symbols.is_empty());
    assert!(result.additional.is_empty());
}

#[test]
fn test_one_letter_misread_maps_back_to_target() {
    let result = extract_stock_symbols("QQT 2.1%", &default_rules());
    assert_eq!(result.symbols, vec!["QQQ"]);
}

#[test]
fn test_symbol_glued_to_company_name_is_recovered() {
    let result = extract_stock_symbols("1.NVDANVIDIA Corp", &default_rules());
    assert_eq!(result.symbols, vec!["NVDA"]);
}

#[test]
fn test_glued_symbols_keep_target_order() {
    let text = "INTCINTEL Corp 0.8%\nTSLATESLA Inc";
    let result = extract_stock_symbols(text, &default_rules());
    assert_eq!(result.symbols, vec!["TSLA", "INTC"]);
}

#[test]
fn test_misread_never_reports_the_garbled_token() {
    let result = extract_stock_symbols("rank BMNK", &default_rules());
    assert_eq!(result.symbols, vec!["BMNR"]);
    assert!(!result.symbols.contains(&"BMNK".to_string()));
}

#[test]
fn test_non_target_symbols_are_kept_aside() {
    let text = "AAPL Apple Inc 0.4%\nSPY 1.0%";
    let result = extract_stock_symbols(text, &default_rules());

    assert_eq!(result.symbols, vec!["SPY"]);
    assert!(result.additional.contains(&"AAPL".to_string()));
}

#[test]
fn test_page_chrome_is_not_reported_as_additional() {
    let text = "STOCKTWITS TRENDING NEWS HOME CHAT\nTSLA Tesla";
    let result = extract_stock_symbols(text, &default_rules());

    assert_eq!(result.symbols, vec!["TSLA"]);
    for word in ["TRENDING", "NEWS", "HOME", "CHAT", "STOCKTWITS"] {
        assert!(!result.additional.contains(&word.to_string()));
    }
}

#[test]
fn test_custom_target_list() {
    let rules = SymbolRules::with_targets(["AAPL", "MSFT"]);
    let result = extract_stock_symbols("1 MSFT 2 AAPL 3 SPY", &rules);

    assert_eq!(result.symbols, vec!["AAPL", "MSFT"]);
    assert!(result.additional.contains(&"SPY".to_string()));
}

#[tokio::test]
async fn test_empty_list_is_persisted_with_placeholder() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());

    let body = render_stock_list(&[]);
    storage.write_file("empty.txt", body.as_bytes()).await.unwrap();

    let written = std::fs::read_to_string(temp_dir.path().join("empty.txt")).unwrap();
    assert_eq!(
        written,
        format!(
            "Most Active Stocks from StockTwits\n{}\n\nNo stocks found.\n",
            "=".repeat(40)
        )
    );
}

#[tokio::test]
async fn test_symbols_are_persisted_as_numbered_lines() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());

    let body = render_stock_list(&["SPY".to_string(), "QQQ".to_string()]);
    storage.write_file("stocks.txt", body.as_bytes()).await.unwrap();

    let written = std::fs::read_to_string(temp_dir.path().join("stocks.txt")).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "Most Active Stocks from StockTwits");
    assert_eq!(lines[1], "=".repeat(40));
    assert_eq!(lines[2], "");
    assert_eq!(&lines[3..], ["1. $SPY", "2. $QQQ"]);
}
